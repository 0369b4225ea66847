use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use news_curator::config::Config;
use news_curator::interest::{self, TermMatcher};
use news_curator::pipeline::ArticlePublisher;
use news_curator::translate::HttpTranslator;
use news_curator::wordpress::WordPressClient;

/// Curate feed entries into translated, illustrated posts.
#[derive(Parser, Debug)]
#[command(name = "news-curator", version, about = "Feed curation and publishing pipeline")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: PathBuf,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    loglevel: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.loglevel);

    info!(
        "Starting news curator at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let config = Config::load(&args.config)?;
    let terms = interest::load_terms(&config.curation.interests_file)?;
    info!(
        "Loaded {} interest terms from {}",
        terms.len(),
        config.curation.interests_file.display()
    );
    let matcher = TermMatcher::new(terms)?;

    let translator = HttpTranslator::new(config.translation.clone(), &config.http.user_agent);
    let backend = WordPressClient::new(&config.wordpress, &config.http);

    let mut publisher =
        ArticlePublisher::new(&config, matcher, Box::new(translator), Box::new(backend));
    publisher.run().await?;

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
