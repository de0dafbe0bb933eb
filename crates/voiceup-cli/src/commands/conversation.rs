//! Conversation commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use voiceup_core::conversation;

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum ConversationCommands {
    /// List all conversations
    List,

    /// Show a conversation with its messages and analysis
    Show(ConversationArgs),

    /// Run emotion and compliance analysis on a conversation
    Analyze(ConversationArgs),
}

#[derive(Args)]
pub struct ConversationArgs {
    /// Conversation ID
    pub id: i64,
}

pub fn execute(cmd: ConversationCommands, ctx: &Context) -> Result<()> {
    let pool = ctx.open_pool()?;

    match cmd {
        ConversationCommands::List => {
            let conversations = conversation::list_conversations(&pool)?;
            if ctx.json {
                return output::print_json(&conversations);
            }
            output::print_conversations_table(&conversations, ctx.config.compliance.compliant_threshold);
        }

        ConversationCommands::Show(args) => {
            let detail = conversation::get_conversation(&pool, args.id)?;
            if ctx.json {
                return output::print_json(&detail);
            }
            output::print_conversation(&detail);
        }

        ConversationCommands::Analyze(args) => {
            let analysis = conversation::analyze_conversation(&pool, &ctx.analyzer(), args.id)?;
            if ctx.json {
                return output::print_json(&analysis);
            }
            println!(
                "{} Analyzed conversation {}",
                "✓".green().bold(),
                args.id.to_string().cyan()
            );
            println!();
            output::print_analysis(&analysis);
        }
    }

    Ok(())
}
