use clap::Parser;
use dtogen::Cli;
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    info!("cli arguments parsed");
    if let Err(err) = cli.run() {
        println!("ERROR: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
