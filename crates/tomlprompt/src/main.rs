mod cli;
mod commands;
mod context;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            document,
            selectors,
            seed,
            json,
            output,
        } => commands::decode::run(
            commands::decode::DecodeArgs {
                document,
                selectors,
                seed,
                json,
                output,
            },
            cli.config,
        ),
        Commands::Keys { document, json } => commands::keys::run(document, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
