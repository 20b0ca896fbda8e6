use std::io;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;
use triad_core::{Collaborators, Config, Driver, FileStorage, OpenAIClient, PipelineError};

#[derive(Parser)]
#[command(name = "triad")]
#[command(about = "Research pipeline: web search, analysis and a Markdown report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List models available on the structurer endpoint
    Models,
    /// Print the default configuration as TOML
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Credentials usually live in .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Config) => {
            print!("{}", Config::default_config_string());
            Ok(())
        }
        Some(Commands::Models) => {
            let config = Config::load().wrap_err("Failed to load configuration")?;
            list_models(&config).await
        }
        None => {
            let config = Config::load().wrap_err("Failed to load configuration")?;
            run_interactive(config).await
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run_interactive(config: Config) -> Result<()> {
    println!("\n========================================");
    println!("   TRIAD AGENT ORCHESTRATOR   ");
    println!("========================================");
    println!(
        "Pipeline: Tavily (Search) -> Gemini {} (Analyze) -> Groq {} (Structure)\n",
        config.analyst.model, config.structurer.model
    );

    let store = FileStorage::with_config(&config.output);
    let factory =
        || -> Result<Collaborators, PipelineError> { Collaborators::from_config(&config) };

    let stdin = io::stdin();
    let mut driver = Driver::new(stdin.lock(), io::stdout(), store);
    driver
        .run(&factory)
        .await
        .wrap_err("Console I/O failed")?;

    Ok(())
}

async fn list_models(config: &Config) -> Result<()> {
    let client = OpenAIClient::from_config(&config.structurer)?
        .with_http_client(config.http.build_client()?);

    println!("Fetching available models from {}...\n", config.structurer.base_url);

    let models = client
        .list_models()
        .await
        .wrap_err("Error fetching models")?;

    println!("{:<40} {:<15}", "MODEL ID", "OWNER");
    println!("{}", "-".repeat(60));
    for model in models {
        println!("{:<40} {:<15}", model.id, model.owned_by);
    }

    Ok(())
}
