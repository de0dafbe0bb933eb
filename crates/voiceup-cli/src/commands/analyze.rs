//! Free-text emotion analysis command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::Context;
use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to classify
    pub text: String,

    /// Only print the dominant emotion
    #[arg(long)]
    pub top: bool,
}

pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let analyzer = ctx.analyzer();

    if args.top {
        let prediction = analyzer.predict(&args.text)?;
        if ctx.json {
            return output::print_json(&prediction);
        }
        println!(
            "{} {} ({:.1}%)",
            "→".blue().bold(),
            prediction.emotion.cyan().bold(),
            prediction.score * 100.0
        );
        return Ok(());
    }

    let scores = analyzer.analyze_text(&args.text)?;
    if ctx.json {
        return output::print_json(&scores);
    }
    output::print_emotions(&scores);
    Ok(())
}
