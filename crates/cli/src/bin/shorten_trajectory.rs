use clap::Parser;
use u_flight_cli::{init_logging, shorten_trajectory, ShortenArgs};

fn main() {
    let args = ShortenArgs::parse();
    init_logging(args.verbose);

    if let Err(err) = shorten_trajectory(&args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
