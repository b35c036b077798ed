// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout stays clean for --json)
// 3. Build one Toolbox from the configuration
// 4. Dispatch to the requested tool and print its result
// 5. Exit with proper code (0 = results, 1 = no results, 2 = error)
// =============================================================================

mod cli;
mod config;
mod github;
mod tools;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputArgs};
use tools::{render_cards, tool_specs, ToolOutput, Toolbox};

/// Environment variable holding a tracing filter, e.g. `trend_scout=debug`.
const LOG_ENV: &str = "TREND_SCOUT_LOG";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Unexpected failure: print the whole context chain
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// Returns:
//   Ok(0) = the tool found repositories (or `tools` printed the list)
//   Ok(1) = the tool ran but found nothing
//   Err   = bad arguments or an internal error
async fn run(cli: Cli) -> Result<i32> {
    let toolbox = Toolbox::new(&cli.config())?;

    let (result, output) = match cli.command {
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&tool_specs())?);
            return Ok(0);
        }
        Commands::Trending { language, since, output } => (
            toolbox
                .get_trending_repos(language.as_deref().unwrap_or_default(), since)
                .await,
            output,
        ),
        Commands::Search { query, max_results, output } => {
            (toolbox.search_repos(&query, max_results).await, output)
        }
        Commands::Hot { language, days, output } => (
            toolbox
                .get_hot_repos(language.as_deref().unwrap_or_default(), days)
                .await,
            output,
        ),
        Commands::Call { tool, args, output } => {
            let args: serde_json::Value = serde_json::from_str(&args)
                .with_context(|| format!("--args is not valid JSON: {}", args))?;
            (toolbox.invoke(&tool, &args).await?, output)
        }
    };

    print_output(&result, output)?;

    Ok(if result.is_empty() { 1 } else { 0 })
}

// Prints a tool result as text (default), JSON or cards
fn print_output(result: &ToolOutput, output: OutputArgs) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if output.cards && !result.is_empty() {
        print!("{}", render_cards(&result.repos));
    } else {
        // Also covers --cards with nothing to show: the tool text says so
        println!("{}", result.text.trim_end());
    }
    Ok(())
}
