use clap::Parser;
use pricedesk::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
