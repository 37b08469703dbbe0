//! fontgrab — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use fontgrab_cli::config::{GrabArgs, RunConfig};
use fontgrab_cli::report;

#[derive(Parser)]
#[command(
    name = "fontgrab",
    about = "Find the font files a web page references and download them",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(flatten)]
    grab: GrabArgs,

    /// Print the run summary as JSON on stdout. Implies --yes.
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the supported font formats and their extensions.
    Formats,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   fontgrab completions bash > ~/.local/share/bash-completion/completions/fontgrab
    ///   fontgrab completions zsh > ~/.zfunc/_fontgrab
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Formats) => {
            print!("{}", report::render_formats());
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "fontgrab", &mut std::io::stdout());
        }

        None => {
            let config = RunConfig::from_args(&cli.grab, cli.json).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            let json = config.json;

            match fontgrab_cli::run(config).await {
                Ok(summary) if json => println!("{}", summary.to_json()?),
                Ok(summary) => print!("{}", report::render_text(&summary.report())),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
