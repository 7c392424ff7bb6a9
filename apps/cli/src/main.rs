use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use quote_cli::{cli::Cli, config::Config, init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    // --help and --version exit 0 from here
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config);

    if !cli.has_symbol() {
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("Missing required SYMBOL. Run `quote --help` for details.");
        return ExitCode::FAILURE;
    }

    match run(cli, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
