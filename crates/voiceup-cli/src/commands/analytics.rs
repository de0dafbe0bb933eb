//! Aggregate analytics commands.

use anyhow::Result;
use clap::Subcommand;

use voiceup_core::analytics;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum AnalyticsCommands {
    /// Dominant-emotion distribution and daily trend
    Emotions,

    /// Compliance rate, average score and rule violations
    Compliance,
}

pub fn execute(cmd: AnalyticsCommands, ctx: &Context) -> Result<()> {
    let pool = ctx.open_pool()?;

    match cmd {
        AnalyticsCommands::Emotions => {
            let stats = analytics::emotion_analytics(&pool)?;
            if ctx.json {
                return output::print_json(&stats);
            }
            output::print_emotion_analytics(&stats);
        }

        AnalyticsCommands::Compliance => {
            let threshold = ctx.config.compliance.compliant_threshold;
            let stats = analytics::compliance_analytics(&pool, threshold)?;
            if ctx.json {
                return output::print_json(&stats);
            }
            output::print_compliance_analytics(&stats, threshold);
        }
    }

    Ok(())
}
