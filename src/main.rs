use anyhow::Context;
use clap::{Arg, Command};
use fraud_shield::features::UrlRiskLevel;
use fraud_shield::statistics::{AuditRecord, AuditSink, StatisticsCollector};
use fraud_shield::{AnalysisResult, FraudAnalyzer, MessageAnonymizer, RiskLevel, ScorerConfig};
use log::LevelFilter;
use std::io::Read;
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("fraud-shield")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fraud and phishing risk scoring for SMS, e-mail and chat messages")
        .long_about(
            "Fraud Shield scores a message for fraud risk by fusing four detectors:\n\
             • keyword rules over common scam vocabulary\n\
             • Hindi, Tamil, Telugu and transliterated scam phrases\n\
             • URL heuristics (TLD, brand impersonation, shorteners, raw IPs)\n\
             • a TF-IDF logistic regression classifier trained at startup",
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .help("Message text to analyse")
                .index(1),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Analyse every non-empty line of FILE as a separate message")
                .conflicts_with_all(["message", "stdin"]),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .help("Read one message from standard input")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("message"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path (defaults are used when absent)"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full analysis as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("anonymize")
                .long("anonymize")
                .help("Also print the message with personal data redacted")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Print a summary of all analysed messages at the end")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-detector output")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        match ScorerConfig::generate_default(generate_path) {
            Ok(()) => println!("✅ Default configuration written to: {generate_path}"),
            Err(e) => {
                eprintln!("❌ Failed to generate configuration: {e:#}");
                process::exit(1);
            }
        }
        return;
    }

    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let config = match ScorerConfig::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    let messages = match collect_messages(&matches) {
        Ok(messages) if !messages.is_empty() => messages,
        Ok(_) => {
            eprintln!("No message to analyse. Pass MESSAGE, --file FILE or --stdin.");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error reading input: {e:#}");
            process::exit(1);
        }
    };

    let analyzer = match FraudAnalyzer::new(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error initialising analyzer: {e:#}");
            process::exit(1);
        }
    };

    let anonymizer = match MessageAnonymizer::new() {
        Ok(anonymizer) => anonymizer,
        Err(e) => {
            eprintln!("Error initialising anonymizer: {e:#}");
            process::exit(1);
        }
    };

    let collector = StatisticsCollector::new();
    let as_json = matches.get_flag("json");

    for message in messages {
        let result = analyzer.analyze_concurrent(message).await;
        collector.record(AuditRecord::from_result(&result));

        if as_json {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Failed to serialise result: {e}");
                    process::exit(1);
                }
            }
        } else {
            print_report(&result);
        }

        if matches.get_flag("anonymize") {
            println!("Anonymised: {}", anonymizer.anonymize(&result.message));
            println!();
        }
    }

    if matches.get_flag("stats") {
        print_statistics(&collector, &anonymizer);
    }
}

fn collect_messages(matches: &clap::ArgMatches) -> anyhow::Result<Vec<String>> {
    if let Some(path) = matches.get_one::<String>("file") {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?;
        return Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect());
    }

    if matches.get_flag("stdin") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read standard input")?;
        return Ok(vec![buffer.trim_end().to_string()]);
    }

    Ok(matches
        .get_one::<String>("message")
        .map(|m| vec![m.clone()])
        .unwrap_or_default())
}

fn risk_icon(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "🚨",
        RiskLevel::Medium => "⚠️",
        RiskLevel::Low => "✅",
    }
}

fn print_report(result: &AnalysisResult) {
    println!("🔍 Fraud Analysis");
    println!("═══════════════════════════════════════");
    println!("Message: {}", result.message);
    println!();
    println!(
        "{} Risk: {} (final score {}/100)",
        risk_icon(result.risk_level),
        result.risk_level,
        result.final_score
    );
    println!("  ├─ Rule score: {}", result.rule_score);
    println!("  ├─ AI score: {}", result.ai_score);
    println!(
        "  └─ URL boost: {}",
        if result.url_boost_applied { "applied" } else { "none" }
    );

    if !result.detected_phrases.is_empty() {
        println!();
        println!("Detected phrases: {}", result.detected_phrases.join(", "));
    }
    if !result.multilingual_flags.is_empty() {
        println!("Regional language signals:");
        for flag in &result.multilingual_flags {
            println!("  • {flag}");
        }
    }
    if !result.detected_languages.is_empty() {
        println!("Languages: {}", result.detected_languages.join(", "));
    }

    if !result.url_analysis.is_empty() {
        println!();
        println!("🔗 URLs:");
        for url in &result.url_analysis {
            let marker = match url.risk_level {
                UrlRiskLevel::High => "🚨",
                UrlRiskLevel::Medium => "⚠️",
                UrlRiskLevel::Low | UrlRiskLevel::Safe => "✅",
            };
            println!(
                "  {} {} ({}, risk {})",
                marker,
                url.url,
                url.risk_level,
                url.risk_score
            );
            for finding in &url.findings {
                println!("      - {finding}");
            }
        }
    }

    println!();
    println!("🤖 {}", result.ai_explanation.summary);
    println!();
    println!("{}", result.explanation);
    println!();
}

fn print_statistics(collector: &StatisticsCollector, anonymizer: &MessageAnonymizer) {
    let summary = collector.summary();

    println!("📊 Fraud Shield Statistics");
    println!("═══════════════════════════════════════");
    println!("  Messages analysed: {}", summary.total);
    println!("  ├─ HIGH: {}", summary.high);
    println!("  ├─ MEDIUM: {}", summary.medium);
    println!("  └─ LOW: {}", summary.low);
    println!("  Average final score: {:.1}", summary.avg_score);
    println!(
        "  Started: {}",
        summary.since.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let top_flags = collector.top_flags(10);
    if !top_flags.is_empty() {
        println!();
        println!("🏷️  Top flags:");
        for (flag, count) in top_flags {
            println!("  {count:>4}  {flag}");
        }
    }

    let feed = collector.community_feed(5, anonymizer);
    if !feed.is_empty() {
        println!();
        println!("📢 Community feed:");
        for entry in feed {
            println!(
                "  [{} {}] {} ({} flags)",
                entry.risk_level, entry.final_score, entry.message, entry.flag_count
            );
        }
    }
}
