#![warn(unused_extern_crates)]
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]
mod cdf;
mod ks;

pub use cdf::EmpiricalCdf;

pub mod test {
    use super::ks;

    pub use ks::{kolmogorov_sf, ks2sample, ks2sample_pvalue, ks_test};
}
