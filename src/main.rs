use std::process::ExitCode;

use clap::Parser;
use stylehush::cli::{self, Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitStatus::Error.into()
        }
    }
}
