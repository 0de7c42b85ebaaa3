use clap::Parser;
use u_flight_cli::{generate_grid_trajectory, init_logging, GenerateGridArgs};

fn main() {
    let args = GenerateGridArgs::parse();
    init_logging(args.verbose);

    if let Err(err) = generate_grid_trajectory(&args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
