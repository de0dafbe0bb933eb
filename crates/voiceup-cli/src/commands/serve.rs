//! API server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use voiceup_web::state::AppState;

use super::Context;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "VOICEUP_PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "VOICEUP_HOST")]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to ./voiceup-serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, ctx: Context) -> Result<()> {
    let host = args.host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = args.port.unwrap_or(ctx.config.server.port);

    let pool = Arc::new(ctx.open_pool()?);
    let analyzer = ctx.analyzer();

    println!();
    println!("  {} {}", "VoiceUp".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}        http://{}:{}/api", "API".green(), host, port);
    println!(
        "  {}   {}",
        "Database".green(),
        ctx.config.database.path.display()
    );
    println!("  {} {}", "Classifier".green(), analyzer.classifier_name());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    voiceup_web::run_server(AppState::new(pool, analyzer), &host, port).await?;

    Ok(())
}
