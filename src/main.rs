//! Applicability CLI - render demo pages and evaluate rules documents
//!
//! `eval` loads a rules document, replays control updates against it and
//! prints the resulting visibility of every area. `demo` renders a sample
//! page through the declaration context.

use anyhow::{Context, Result};
use applicability::{
    replay, ApplicabilityConfig, ApplicabilityContext, ControlOptions, HtmlWriter, MarkupWriter,
    PageRules, SelectOption,
};
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "applicability", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a rules document after replaying control updates
    Eval {
        /// Path to a rules JSON document
        rules: PathBuf,
        /// Update to apply, as MODE:DOMAIN:TAG (repeatable, applied in order)
        #[arg(short, long = "update", value_name = "MODE:DOMAIN:TAG")]
        updates: Vec<String>,
    },
    /// Render a sample page to stdout
    Demo,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "applicability=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Eval { rules, updates } => run_eval(&rules, &updates),
        Command::Demo => run_demo(),
    }
}

fn run_eval(path: &Path, updates: &[String]) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules from {}", path.display()))?;
    let rules = PageRules::from_json(&content)
        .with_context(|| format!("invalid rules document {}", path.display()))?;

    // Problems are logged by the evaluator as they happen
    print!("{}", replay(&rules, updates)?);
    Ok(())
}

fn run_demo() -> Result<()> {
    let config = ApplicabilityConfig::load()?;
    let mut ctx = ApplicabilityContext::from_config(&config);

    let page = ctx.render(|ctx| {
        let mut html = String::from("<form>\n");
        html += &ctx.select_tag(
            "size",
            &[
                SelectOption::new("Small", "small", "s"),
                SelectOption::new("Large", "large", "l"),
            ],
            Some("s"),
            ControlOptions::default(),
        );
        html.push('\n');
        html += &ctx.check_box_tag("extras", "gift", "1", false, ControlOptions::default());
        html.push('\n');
        html += &ctx.applies_to("div", &["large"], |_| "Large items ship separately.".to_string())?;
        html.push('\n');
        html += &ctx.applies_to_all("div", &["large", "gift"], |_| {
            "Large gifts are wrapped in two parts.".to_string()
        })?;
        html.push('\n');
        html += &ctx.applies_to_none("span", &["gift"], |_| "No gift wrap.".to_string())?;
        html.push_str("\n</form>\n");
        Ok(html)
    })?;

    println!("{page}");
    println!("{}", HtmlWriter.runtime());
    Ok(())
}
