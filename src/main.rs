use log::error;
use riskboard::config::RiskConfig;
use riskboard::downloader::export_file;
use riskboard::loader::load_table;
use riskboard::record::format_number;
use riskboard::session::AnalysisSession;
use riskboard::summary::{count_by_classification, risk_share};
use std::env;
use std::process::ExitCode;

struct Args {
    input: String,
    area: Option<String>,
    config: Option<String>,
    export: Option<String>,
}

fn usage(program: &str) {
    eprintln!(
        "Usage: {} <file.csv|file.xlsx> [--area NAME] [--config FILE] [--export FILE]",
        program
    );
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut input = None;
    let mut area = None;
    let mut config = None;
    let mut export = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--area" => area = Some(iter.next()?.clone()),
            "--config" => config = Some(iter.next()?.clone()),
            "--export" => export = Some(iter.next()?.clone()),
            other if other.starts_with("--") => return None,
            other if input.is_none() => input = Some(other.to_string()),
            _ => return None,
        }
    }

    Some(Args {
        input: input?,
        area,
        config,
        export,
    })
}

fn score(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => RiskConfig::from_json_file(path)?,
        None => RiskConfig::default(),
    };

    let raw = load_table(&args.input)?;
    let session = AnalysisSession::new(&raw, config)?;

    println!("Risk levels by area ({} records)", session.records().len());
    println!("{:<30} {:>8} {:>8} {:>10}  Classification", "Area", "Records", "Scored", "Mean");
    let summaries = session.summaries();
    for summary in &summaries {
        println!(
            "{:<30} {:>8} {:>8} {:>10}  {}",
            summary.area,
            summary.records,
            summary.scored,
            score(summary.mean_score),
            summary.classification
        );
    }

    println!("\nDistribution of risk by area");
    for share in risk_share(&summaries) {
        println!("{:<30} {:>6.1}%", share.area, share.percent);
    }

    if let Some(area) = &args.area {
        let selected = session.area(area);
        if selected.is_empty() {
            return Err(format!("No records for area: {}", area).into());
        }
        let summary = session.area_summary(area);
        println!("\nResults for area: {}", summary.area);
        println!("Mean risk level: {}", score(summary.mean_score));
        println!("Overall classification: {}", summary.classification);
        for (classification, count) in count_by_classification(selected.iter().copied()) {
            println!("  {:<10} {}", classification, count);
        }
        for record in &selected {
            println!(
                "  {:<30} {:<30} {:>8}  {}",
                record.activity.as_deref().unwrap_or("-"),
                record.hazard.as_deref().unwrap_or("-"),
                record.risk_score.map(format_number).unwrap_or_default(),
                record.classification
            );
        }
    }

    if let Some(path) = &args.export {
        export_file(session.records(), path)?;
        println!("\nExported {} records to {}", session.records().len(), path);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("riskboard");
    let Some(parsed) = parse_args(&args) else {
        usage(program);
        return ExitCode::FAILURE;
    };

    match run(parsed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
