use anyhow::Result;
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use course_assessment::models::question_set::QuestionSetSummary;
use course_assessment::services::content_service::{load_file, ContentLibrary};

/// Checks question set files before they are published.
#[derive(Parser)]
#[command(name = "validate-content")]
#[command(about = "Validate course question sets and report their composition")]
#[command(version)]
struct Cli {
    /// Question set files or directories of *.json files
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<PathBuf>,

    /// Only print failures
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_assessment=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut summaries = Vec::new();
    for path in &cli.paths {
        if path.is_dir() {
            summaries.extend(ContentLibrary::load_dir(path)?.summaries());
        } else {
            summaries.push(load_file(path)?.summary());
        }
    }

    if !cli.quiet {
        for summary in &summaries {
            print_summary(summary);
        }
        let total: usize = summaries.iter().map(|s| s.question_count).sum();
        println!("{} sets, {} questions: OK", summaries.len(), total);
    }

    Ok(())
}

fn print_summary(summary: &QuestionSetSummary) {
    let d = &summary.difficulty;
    let share = |n: usize| (n as f64 * 100.0 / summary.question_count as f64).round();

    println!("{} ({}): {} questions", summary.id, summary.title, summary.question_count);
    println!(
        "  difficulty: {}% basic, {}% intermediate, {}% advanced, {}% unspecified",
        share(d.basic),
        share(d.intermediate),
        share(d.advanced),
        share(d.unspecified)
    );
    if !summary.sections.is_empty() {
        println!("  sections: {}", counts(&summary.sections));
    }
    if !summary.categories.is_empty() {
        println!("  categories: {}", counts(&summary.categories));
    }
    if !summary.modules.is_empty() {
        let modules: Vec<String> = summary.modules.iter().map(u32::to_string).collect();
        println!("  modules: {}", modules.join(", "));
    }
}

fn counts(distribution: &BTreeMap<String, usize>) -> String {
    distribution
        .iter()
        .map(|(label, count)| format!("{} ({})", label, count))
        .collect::<Vec<_>>()
        .join(", ")
}
