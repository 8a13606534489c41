use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mood_recommender::config::{self, AppConfig, FileConfig};
use mood_recommender::recommend::ErrorBody;
use mood_recommender::server::metrics;
use mood_recommender::{build_recommender, QuizAnswers};

/// Runs a single recommendation and prints it as JSON.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file, same format as the server's.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Low, Medium or High.
    #[clap(long, default_value = "Medium")]
    pub mood: String,

    /// Happy, Sad, Angry or Calm.
    #[clap(long, default_value = "Calm")]
    pub tone: String,

    /// Alone, "In pair" or "With company".
    #[clap(long, default_value = "Alone")]
    pub context: String,

    /// Free text note, in any language.
    #[clap(long, default_value = "")]
    pub note: String,

    /// Genre label, e.g. "Hip-Hop" or "Drum & Bass". Repeatable.
    #[clap(long = "genre")]
    pub genres: Vec<String>,

    /// Any, 1980s, 1990s, 2000s, 2010s or 2020s.
    #[clap(long, default_value = "Any")]
    pub era: String,

    /// Track id to avoid. Repeatable.
    #[clap(long = "exclude")]
    pub exclude_track_ids: Vec<String>,

    /// Print the resolved search query instead of calling the catalog.
    #[clap(long)]
    pub query_only: bool,

    #[clap(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    pub spotify_client_id: Option<String>,

    #[clap(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    #[clap(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,
}

impl CliArgs {
    /// Goes through the same deserialization as the HTTP body.
    fn answers(&self) -> Result<QuizAnswers> {
        let body = json!({
            "moodLevel": self.mood,
            "tone": self.tone,
            "context": self.context,
            "note": self.note,
            "genres": self.genres,
            "era": self.era,
            "excludeTrackIds": self.exclude_track_ids,
        });
        serde_json::from_value(body).context("Invalid quiz answers")
    }

    fn cli_config(&self) -> config::CliConfig {
        config::CliConfig {
            spotify_client_id: self.spotify_client_id.clone(),
            spotify_client_secret: self.spotify_client_secret.clone(),
            llm_api_key: self.llm_api_key.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // Logs go to stderr so stdout stays machine readable.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize tracing")?;

    let answers = cli_args.answers()?;
    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let app_config = AppConfig::resolve(&cli_args.cli_config(), file_config)?;

    metrics::init_metrics();
    let recommender = build_recommender(&app_config)?;

    if cli_args.query_only {
        let (signals, query) = recommender.resolve_query(&answers).await;
        let output = json!({
            "query": query.text,
            "source": query.source.as_str(),
            "era": signals.effective_era.as_str(),
            "ukrainianRequested": signals.ukrainian_requested,
            "americanRequested": signals.american_requested,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match recommender.recommend(&answers).await {
        Ok(recommendation) => {
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
            Ok(())
        }
        Err(err) => {
            let body = serde_json::to_string_pretty(&ErrorBody::new(err.to_string()))?;
            println!("{}", body);
            std::process::exit(1);
        }
    }
}
