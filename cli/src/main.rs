mod opt;
mod routes;
mod utils;

use clap::Parser;
use opt::Opt;

fn route_cmd(opt: Opt) -> i32 {
    match opt {
        Opt::Reject(cmd) => routes::reject(cmd),
        Opt::Transform(cmd) => routes::transform(cmd),
        Opt::Run(cmd) => routes::run(cmd),
    }
}

fn main() {
    env_logger::init();

    let opt = Opt::parse();

    let exit_code = route_cmd(opt);

    std::process::exit(exit_code);
}
