use clap::Parser;
use datavault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Completions { ref shell }) => {
            datavault::cli::commands::completions::execute(shell)
        }
        Some(Commands::Session) | None => datavault::cli::commands::session::execute(&cli),
    };

    if let Err(e) = result {
        datavault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
