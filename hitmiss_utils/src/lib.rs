pub mod misc;
pub mod stats;

pub use misc::{linspace, MinMax};
pub use stats::{mean, std, std_err, var};
