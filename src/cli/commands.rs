use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{Analyzer, HttpAnalyzer};
use crate::domain::{AnalysisResult, Theme, TriageSession};
use crate::error::TriageError;
use crate::infra::{ConfigManager, UserConfig};

#[derive(Parser)]
#[command(name = "triager")]
#[command(about = "Classify an email and draft a reply with the triage service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send an email to the analysis service and show the triage
    Analyze {
        /// Email text to analyze (ignored when --file is given)
        text: Option<String>,

        /// Email file to upload (.txt or .pdf)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Create a default .triager.yml in the current directory
    Init,

    /// Check that the analysis service is reachable
    Health,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { text, file } => analyze_command(text, file).await,
        Commands::Init => init_command().await,
        Commands::Health => health_command().await,
    }
}

async fn analyze_command(text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let mut session = TriageSession::new();

    if let Some(path) = file {
        if let Err(e) = session.attach_file(path) {
            println!("{} {}", "⚠️".yellow(), e);
            std::process::exit(1);
        }
    } else if let Some(text) = text {
        session.set_text(text);
    }

    // Validation happens before any network work.
    let submission = match session.begin_submission() {
        Ok(submission) => submission,
        Err(TriageError::EmptyInput) => {
            println!("{} {}", "⚠️".yellow(), TriageError::EmptyInput);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let spinner = loading_spinner("Waiting for the analysis service...");
    let analyzer = HttpAnalyzer::new(config.api_base_url);

    match analyzer.analyze(&submission).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            session.complete(outcome);
            render_result(session.result());
        }
        Err(e) => {
            spinner.finish_and_clear();
            session.fail();
            println!("{} {}", "❌".red(), e.to_string().red());
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn init_command() -> Result<()> {
    println!("{}", "🔧 Initializing triager...".bold());

    let current_dir = std::env::current_dir()?;
    ConfigManager::create_default(&current_dir)?;

    println!(
        "\n{}",
        "✅ Done. Edit .triager.yml to point at your deployment."
            .green()
            .bold()
    );
    Ok(())
}

async fn health_command() -> Result<()> {
    println!("{}", "🏥 Checking triager health...".bold());

    let config = load_config()?;
    println!("Endpoint: {}", config.api_base_url);

    let analyzer = HttpAnalyzer::new(config.api_base_url);
    match analyzer.probe().await {
        Ok(()) => println!("{} analysis service reachable", "✓".green()),
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn load_config() -> Result<UserConfig> {
    let current_dir = std::env::current_dir()?;
    let manager = ConfigManager::new(current_dir)?;
    Ok(manager.get())
}

fn loading_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn render_result(result: Option<&AnalysisResult>) {
    let Some(result) = result else {
        println!(
            "{} The service did not return a usable result. Try submitting again.",
            "⚠️".yellow()
        );
        return;
    };

    println!();
    println!(
        "{}  {}",
        "🤖 Analysis".bold(),
        chrono::Local::now()
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .dimmed()
    );
    println!();

    let badge = match result.theme() {
        Theme::Productive => result.category.green().bold(),
        Theme::NonProductive => result.category.yellow().bold(),
    };
    println!("Category: {}", badge);

    println!("\n{}", "💡 Suggested reply".bold());
    println!("\"{}\"", result.suggested_reply);

    println!("\n{}", "🔍 Justification".bold());
    println!("{}", result.justification);
}
