use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "questline", version, about = "Quest plan optimizer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quest management
    Quest {
        #[command(subcommand)]
        action: commands::quest::QuestAction,
    },
    /// Queue catalog and EV tables
    Queue {
        #[command(subcommand)]
        action: commands::queue::QueueAction,
    },
    /// Plan optimization and tracking
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Monte Carlo robustness report for the stored plan
    Simulate {
        /// Number of simulation iterations
        #[arg(long, default_value = "1000")]
        iterations: usize,
        /// Random seed for a reproducible report
        #[arg(long)]
        seed: Option<u64>,
        /// Catalog JSON file (defaults to the builtin catalog)
        #[arg(long)]
        catalog: Option<std::path::PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quest { action } => commands::quest::run(action),
        Commands::Queue { action } => commands::queue::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Simulate {
            iterations,
            seed,
            catalog,
            json,
        } => commands::simulate::run(iterations, seed, catalog, json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "questline",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
