use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use qa_test_plan::config::Config;
use qa_test_plan::{diff, generate_test_plan, prepare_request, GroqClient};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "generate-test-plan", version, about)]
struct Cli {
    /// Diff to generate a test plan for
    #[arg(default_value = diff::DEFAULT_INPUT)]
    input: PathBuf,
    /// Where the markdown test plan is written
    #[arg(default_value = qa_test_plan::output::DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Model identifier, overrides GROQ_MODEL
    #[arg(long)]
    model: Option<String>,
    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_env("RUST_LOG")
        .init();

    if cli.dry_run {
        let config =
            Config::preview_from_env(cli.model.as_deref()).context("Invalid configuration")?;
        let request = prepare_request(&config.model, &cli.input)?;
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let config =
        Config::from_env_with_model(cli.model.as_deref()).context("Invalid configuration")?;
    let client = GroqClient::new(config)?;

    let model = &client.config().model;
    generate_test_plan(&client, model, &cli.input, &cli.output)
        .with_context(|| format!("Failed to generate test plan from {}", cli.input.display()))?;
    info!("Done");
    Ok(())
}
