//! CLI command definitions and handlers.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use voiceup_core::analysis::Analyzer;
use voiceup_core::config::Config;
use voiceup_db::DbPool;

pub mod analytics;
pub mod analyze;
pub mod conversation;
pub mod seed;
pub mod serve;

/// VoiceUp - support conversation emotion and compliance analytics
#[derive(Parser)]
#[command(name = "voiceup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the SQLite database
    #[arg(long, global = true, env = "VOICEUP_DB")]
    pub db: Option<PathBuf>,

    /// Path to a TOML config file (defaults to ./voiceup.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve(serve::ServeArgs),

    /// Replace the database contents with demo conversations
    Seed,

    /// Inspect and analyze stored conversations
    #[command(subcommand)]
    Conversation(conversation::ConversationCommands),

    /// Classify the emotions of a piece of text
    Analyze(analyze::AnalyzeArgs),

    /// Aggregate statistics
    #[command(subcommand)]
    Analytics(analytics::AnalyticsCommands),
}

/// Settings resolved from the config file and global flags.
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Context {
    /// Open the configured database, running migrations.
    pub fn open_pool(&self) -> Result<DbPool> {
        let path = &self.config.database.path;
        voiceup_db::init_pool(path).with_context(|| format!("opening database {}", path.display()))
    }

    pub fn analyzer(&self) -> Analyzer {
        Analyzer::lexicon(self.config.compliance.clone())
    }
}

impl Cli {
    /// Defaults, then the config file found from `cwd`, then `--db` / `VOICEUP_DB`.
    pub fn resolve_config(&self, cwd: &Path) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref(), cwd)?;
        if let Some(db) = &self.db {
            config.database.path = db.clone();
        }
        Ok(config)
    }

    pub async fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir()?;
        let config = self.resolve_config(&cwd)?;

        let ctx = Context {
            config,
            json: self.json,
        };

        match self.command {
            Commands::Serve(args) => serve::execute(args, ctx).await,
            Commands::Seed => seed::execute(&ctx),
            Commands::Conversation(cmd) => conversation::execute(cmd, &ctx),
            Commands::Analyze(args) => analyze::execute(args, &ctx),
            Commands::Analytics(cmd) => analytics::execute(cmd, &ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB_ENV: &str = "VOICEUP_DB";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("voiceup").chain(args.iter().copied())).unwrap()
    }

    // Only test that touches VOICEUP_DB.
    #[test]
    fn test_db_path_resolution_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("voiceup.toml"),
            "[database]\npath = \"from-file.db\"\n",
        )
        .unwrap();
        std::env::remove_var(DB_ENV);

        let config = parse(&["seed"]).resolve_config(dir.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("from-file.db"));

        std::env::set_var(DB_ENV, "from-env.db");
        let from_env = parse(&["seed"]).resolve_config(dir.path());
        let from_flag = parse(&["--db", "from-flag.db", "seed"]).resolve_config(dir.path());
        std::env::remove_var(DB_ENV);

        assert_eq!(from_env.unwrap().database.path, PathBuf::from("from-env.db"));
        assert_eq!(from_flag.unwrap().database.path, PathBuf::from("from-flag.db"));
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&["--config", "missing.toml", "seed"]);
        assert!(cli.resolve_config(dir.path()).is_err());

        let cli = parse(&["--db", "explicit.db", "analytics", "emotions"]);
        let config = cli.resolve_config(dir.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("explicit.db"));
        assert_eq!(config.server.port, 5000);
    }
}
