//! dupescan - Duplicate File Finder
//!
//! Entry point for the dupescan CLI application.

use clap::Parser;
use dupescan::cli::Cli;

fn main() {
    let cli = Cli::parse();

    match dupescan::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = dupescan::exit_code_for_error(&err);
            eprintln!("Error: {err}");
            std::process::exit(exit_code.as_i32());
        }
    }
}
