use std::process;

use clap::Parser;

use astwright::cli::Args;

fn main() {
    let args = Args::parse();
    match astwright::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
