mod config;
mod content;
mod error;
mod notion;
mod ollama;
mod prompt;
mod scanner;
mod tidier;
mod title;
mod tools;

use anyhow::Result;
use clap::{ArgAction, Parser};
use config::Config;
use notion::NotionClient;
use ollama::OllamaClient;
use prompt::ConsolePrompter;
use tidier::{Tidier, TidyOptions};
use tools::TitleSuggester;

/// Tidy untitled Notion pages
#[derive(Parser, Debug)]
#[command(name = "notion-tidy", version)]
struct Args {
    /// Automatically apply suggested titles
    #[arg(long)]
    auto_apply: bool,

    /// Prompt to delete empty, untitled pages (default: true)
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    confirm_delete: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    init_logging(&config.logging.level);
    log::info!(
        "Configuration loaded (model: {}, endpoint: {})",
        config.ai_model.model,
        config.ai_model.endpoint
    );

    if config.ai_model.provider != "ollama" {
        log::warn!("Unknown AI provider '{}', using the Ollama API", config.ai_model.provider);
    }

    // Create clients
    let notion = NotionClient::new(&config.notion, config.notion_token()?);
    let suggester = TitleSuggester::new(OllamaClient::new(
        config.ai_model.endpoint.clone(),
        config.ai_model.model.clone(),
    ));

    let options = TidyOptions {
        auto_apply: args.auto_apply,
        confirm_delete: args.confirm_delete,
        page_url_base: config.notion.page_url_base.clone(),
    };

    let summary = Tidier::new(&notion, suggester, ConsolePrompter, options)
        .run()
        .await?;

    log::info!(
        "Scanned {} page(s): {} untitled, {} deleted ({} kept), \
         {} titled ({} declined), {} skipped",
        summary.pages_scanned,
        summary.untitled,
        summary.deleted,
        summary.deletion_declined,
        summary.titles_applied,
        summary.titles_declined,
        summary.skipped
    );
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}
