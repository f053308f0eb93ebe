use clap::Parser as ClapParser;
use colored::Colorize;
use std::process::ExitCode;

use bfscmp::cli::{self, Cli};
use bfscmp::exit_codes;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli_args = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    match cli::run(&cli_args, &mut stdout) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}
