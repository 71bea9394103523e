// Synthetic vaccine-efficacy survival data
use clap::Parser;
use tracing::error;

use vax_sim::cli::{self, Cli};
use vax_sim::logging;

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = cli::run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
