use clap::{Parser, Subcommand};
use ft_core::{ArticleStorage, Category, Clock, Result, SourceConfig, SystemClock};
use ft_feeds::{init_logging, HttpFeedFetcher, PipelineManager, RunArgs, RunSummary, Variant};
use ft_inference::{create_model, Config, EnrichmentService};
use ft_publish::{Publisher, TelegramClient, PREFERRED_CATEGORIES};
use ft_storage::cleanup::DEFAULT_PLACEHOLDER;
use ft_storage::{clean_output, create_storage, ArticleWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "ft", version, about = "FalakTech news pipeline")]
struct Cli {
    /// Directory the articles are written to and published from
    #[arg(long, global = true, env = "FT_OUTPUT_DIR", default_value = "news")]
    output: PathBuf,

    /// Storage backend: markdown, or memory to run without writing files
    #[arg(long, global = true, env = "FT_STORAGE", default_value = "markdown")]
    storage: String,

    /// Inference backend: gemini or dummy
    #[arg(long, global = true, env = "FT_MODEL", default_value = "gemini")]
    model: String,

    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model id (default gemini-2.0-flash)
    #[arg(long, global = true, env = "GEMINI_MODEL")]
    model_name: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate the latest space and earth news into article files
    Fetch {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Rebuild the landing page articles, removing the previous ones
    Landing {
        #[command(flatten)]
        run: RunArgs,

        /// File kept when the output directory is cleaned
        #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
        placeholder: String,
    },
    /// Write Malay digests of the newest NASA items
    Agent {
        /// Number of feed items to digest
        #[arg(long, default_value_t = 2)]
        count: usize,

        #[command(flatten)]
        run: RunArgs,
    },
    /// Post the most recent article to the Telegram channel
    Publish {
        #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
        bot_token: Option<String>,

        #[arg(long, env = "TELEGRAM_CHANNEL_ID")]
        chat_id: Option<String>,

        /// Print the message instead of sending it
        #[arg(long)]
        dry_run: bool,

        /// Categories published ahead of newer articles, in no particular order
        #[arg(long, value_delimiter = ',', default_values_t = PREFERRED_CATEGORIES)]
        preferred: Vec<Category>,
    },
    /// List the feeds a run would use
    Sources {
        #[arg(value_enum, default_value = "news")]
        variant: Variant,

        /// JSON file to list instead of the built-in feeds
        #[arg(long)]
        sources: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fetch { ref run } => run_pipeline(&cli, Variant::News, run, None).await,
        Commands::Landing {
            ref run,
            ref placeholder,
        } => run_pipeline(&cli, Variant::Landing, run, Some(placeholder.as_str())).await,
        Commands::Agent { count, ref run } => run_agent(&cli, count, run).await,
        Commands::Publish {
            ref bot_token,
            ref chat_id,
            dry_run,
            ref preferred,
        } => publish(&cli, bot_token.clone(), chat_id.clone(), preferred.clone(), dry_run).await,
        Commands::Sources {
            variant,
            ref sources,
        } => {
            let args = RunArgs {
                sources: sources.clone(),
                delay: None,
            };
            for source in args.registry(variant).await?.sources() {
                println!("{}", describe(source));
            }
            Ok(())
        }
    }
}

fn describe(source: &SourceConfig) -> String {
    let mut line = format!(
        "{} {:<12} {:<10} limit={} {}",
        source.category.icon(),
        source.name,
        source.category,
        source.per_run_limit,
        source.feed_url
    );
    if let Some(keywords) = &source.keywords {
        line.push_str(&format!(" keywords=[{}]", keywords.join(", ")));
    }
    line
}

/// Wire the pipeline for one variant.
fn build_manager(cli: &Cli, variant: Variant, run: &RunArgs, storage: Arc<dyn ArticleStorage>) -> Result<PipelineManager> {
    let model = create_model(
        &cli.model,
        Config {
            api_key: cli.api_key.clone(),
            model_name: cli.model_name.clone(),
            base_url: None,
        },
    )?;
    info!("🧠 Inference model initialized (using {})", model.name());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let pacer = run.pacer(variant);
    info!("⏳ Pausing {}ms between articles", pacer.delay().as_millis());

    Ok(PipelineManager::new(
        Arc::new(HttpFeedFetcher::new()?),
        EnrichmentService::new(model),
        ArticleWriter::new(storage, variant.template(), clock.clone()),
        Arc::new(pacer),
        clock,
    ))
}

async fn prepare_storage(cli: &Cli, placeholder: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    let storage = create_storage(&cli.storage, &cli.output)?;
    match placeholder {
        Some(placeholder) => {
            clean_output(storage.as_ref(), placeholder).await?;
        }
        None => storage.prepare().await?,
    }
    Ok(storage)
}

async fn run_pipeline(cli: &Cli, variant: Variant, run: &RunArgs, placeholder: Option<&str>) -> Result<()> {
    let registry = run.registry(variant).await?;
    info!("🚀 Starting {:?} run with {} sources", variant, registry.len());

    let storage = prepare_storage(cli, placeholder.filter(|_| variant.cleans_output())).await?;
    let manager = build_manager(cli, variant, run, storage)?;

    let summary = manager.run(&registry).await;
    report(&summary);
    Ok(())
}

async fn run_agent(cli: &Cli, count: usize, run: &RunArgs) -> Result<()> {
    info!("🤖 FalakTech News Agent started at {}", chrono::Utc::now().to_rfc3339());

    let mut source = run
        .registry(Variant::Agent)
        .await?
        .sources()
        .first()
        .cloned()
        .ok_or_else(|| ft_core::Error::Config("Sources file lists no feeds".to_string()))?;
    source.per_run_limit = count;

    let storage = prepare_storage(cli, None).await?;
    let manager = build_manager(cli, Variant::Agent, run, storage)?;

    let summary = manager.run_agent(&source).await?;
    report(&summary);
    info!("📁 Check the {} folder for generated articles", cli.output.display());
    Ok(())
}

fn report(summary: &RunSummary) {
    for source in &summary.sources {
        info!(
            "📊 {}: saved {}, existing {}, duplicates {}, filtered {}, fallbacks {}{}",
            source.name,
            source.saved,
            source.skipped,
            source.duplicates,
            source.filtered,
            source.fallbacks,
            source
                .error
                .as_ref()
                .map(|e| format!(", error: {}", e))
                .unwrap_or_default()
        );
    }
}

async fn publish(
    cli: &Cli,
    bot_token: Option<String>,
    chat_id: Option<String>,
    preferred: Vec<Category>,
    dry_run: bool,
) -> Result<()> {
    let sender = TelegramClient::new(bot_token, chat_id)?;
    let storage = create_storage(&cli.storage, &cli.output)?;
    let publisher = Publisher::new(storage, Arc::new(sender)).with_preferred(preferred);

    match publisher.publish_latest(dry_run).await? {
        Some(article) => info!("✅ Published {}", article.filename),
        None => info!("📭 Nothing to publish in {}", cli.output.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch_with_delay() {
        let cli = Cli::try_parse_from(["ft", "fetch", "--delay", "250ms", "--model", "dummy"]).unwrap();
        assert_eq!(cli.model, "dummy");
        match cli.command {
            Commands::Fetch { run } => {
                assert_eq!(run.pacer(Variant::News).delay().as_millis(), 250);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_agent_count_and_sources_variant() {
        let cli = Cli::try_parse_from(["ft", "agent", "--count", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::Agent { count: 5, .. }));

        let cli = Cli::try_parse_from(["ft", "sources", "landing"]).unwrap();
        assert!(matches!(cli.command, Commands::Sources { variant: Variant::Landing, .. }));
    }

    #[test]
    fn test_rejects_bad_delay() {
        assert!(Cli::try_parse_from(["ft", "fetch", "--delay", "soon"]).is_err());
    }

    #[test]
    fn test_describe_source() {
        let source = SourceConfig::new("Tech", "https://t.example/feed", Category::Ai, 1).with_keywords(&["llm"]);
        let line = describe(&source);
        assert!(line.starts_with("🤖 Tech"));
        assert!(line.ends_with("https://t.example/feed keywords=[llm]"));
    }

    #[test]
    fn test_parse_publish_preferred() {
        let cli = Cli::try_parse_from(["ft", "publish"]).unwrap();
        match cli.command {
            Commands::Publish { preferred, .. } => assert_eq!(preferred, PREFERRED_CATEGORIES.to_vec()),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["ft", "publish", "--preferred", "islamic,Weather"]).unwrap();
        match cli.command {
            Commands::Publish { preferred, .. } => assert_eq!(preferred, vec![Category::Islamic, Category::Weather]),
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["ft", "publish", "--preferred", "sports"]).is_err());
    }

    #[tokio::test]
    async fn test_storage_backend_is_selectable() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("news");
        let output_arg = output.to_str().unwrap();

        let cli = Cli::try_parse_from(["ft", "--storage", "memory", "--output", output_arg, "fetch"]).unwrap();
        let storage = prepare_storage(&cli, None).await.unwrap();
        storage.write("2026-10-18-a.md", "x").await.unwrap();
        assert!(!output.exists());

        let cli = Cli::try_parse_from(["ft", "--output", output_arg, "fetch"]).unwrap();
        assert_eq!(cli.storage, "markdown");
        prepare_storage(&cli, None).await.unwrap();
        assert!(output.is_dir());

        let cli = Cli::try_parse_from(["ft", "--storage", "sqlite", "fetch"]).unwrap();
        assert!(matches!(prepare_storage(&cli, None).await, Err(ft_core::Error::Config(_))));
    }

    #[tokio::test]
    async fn test_publish_with_memory_storage_finds_nothing() {
        let cli = Cli::try_parse_from([
            "ft",
            "--storage",
            "memory",
            "publish",
            "--dry-run",
            "--bot-token",
            "t",
            "--chat-id",
            "c",
        ])
        .unwrap();
        assert!(run(cli).await.is_ok());
    }

    #[tokio::test]
    async fn test_publish_requires_credentials() {
        let cli = Cli::try_parse_from(["ft", "publish", "--dry-run", "--bot-token", ""]).unwrap();
        let result = run(cli).await;
        assert!(matches!(result, Err(ft_core::Error::Config(_))));
    }
}
