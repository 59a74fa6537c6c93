use clap::Parser;
use tidyup::cli::{Cli, run};
use tidyup::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(message) = run(&cli) {
        OutputFormatter::error(&message);
        std::process::exit(1);
    }
}
