//! Demo data command.

use anyhow::Result;
use colored::Colorize;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let pool = ctx.open_pool()?;
    let ids = voiceup_core::seed::seed_database(&pool, &ctx.analyzer())?;

    if ctx.json {
        println!("{}", serde_json::json!({ "conversations": ids }));
        return Ok(());
    }

    println!(
        "{} Seeded {} conversations into {}",
        "✓".green().bold(),
        ids.len(),
        ctx.config.database.path.display().to_string().cyan()
    );
    Ok(())
}
