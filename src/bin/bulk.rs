use clap::Parser;
use serde_json::json;
use skin_risk_survey::{read_bulk, Error, ENGINE};
use std::fs::File;
use std::io::BufReader;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Score every respondent in a CSV file of survey answers
#[derive(Parser)]
struct Args {
    /// CSV with an id column followed by question id columns
    path: String,
    /// Print one JSON object per respondent
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let reader = BufReader::new(File::open(&args.path)?);
    for (line, row) in read_bulk(reader)?.enumerate() {
        match row.and_then(|row| Ok((ENGINE.assess(&row.answers)?, row))) {
            Ok((assessment, row)) => {
                if args.json {
                    let value = json!({
                        "id": row.respondent,
                        "total_score": assessment.score.total_score,
                        "answered": assessment.score.answered,
                        "tier": assessment.classification.tier,
                    });
                    println!("{}", value);
                } else {
                    println!(
                        "id = {}, score = {}/{}, answered = {}, tier = {}",
                        row.respondent,
                        assessment.score.total_score,
                        assessment.max_score,
                        assessment.score.answered,
                        assessment.classification.content.label
                    );
                }
            }
            Err(e) => {
                error!(row = line + 1, "skipped row: {}", e);
            }
        }
    }
    Ok(())
}
