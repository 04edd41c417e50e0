#![allow(clippy::uninlined_format_args)]

use fraud_shield::{FraudAnalyzer, RiskLevel, ScorerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing fraud scoring against real-world scam samples...");

    let analyzer = FraudAnalyzer::new(&ScorerConfig::default())?;

    let samples = [
        (
            "Your bank account has been blocked. Update KYC immediately. \
             Click here: http://secure-sbi-login.tk/verify",
            RiskLevel::High,
        ),
        (
            "Dear customer your SBI YONO account will be suspended today. \
             Update PAN at http://bit.ly/yono-pan-update",
            RiskLevel::Medium,
        ),
        (
            "आपका खाता बंद हो जाएगा. तुरंत KYC अपडेट करें और OTP शेयर करें",
            RiskLevel::Medium,
        ),
        (
            "Meeting rescheduled to 3pm tomorrow, please confirm.",
            RiskLevel::Low,
        ),
    ];

    let mut mismatches = 0;
    for (message, expected) in samples {
        let result = analyzer.analyze_concurrent(message.to_string()).await;

        println!("\n=== {} ===", message);
        println!(
            "Rule: {}  AI: {}  Final: {}  Risk: {}",
            result.rule_score, result.ai_score, result.final_score, result.risk_level
        );
        println!("Phrases: {:?}", result.detected_phrases);
        if !result.multilingual_flags.is_empty() {
            println!("Regional flags: {:?}", result.multilingual_flags);
        }
        for url in &result.url_analysis {
            println!("URL {} -> {} ({})", url.url, url.risk_score, url.risk_level);
        }

        // Scam tiers are floors; a benign sample must stay LOW
        let ok = if expected == RiskLevel::Low {
            result.risk_level == expected
        } else {
            result.risk_level >= expected
        };
        if ok {
            println!("✅ Expected at least {}", expected);
        } else {
            println!("❌ Expected {}, got {}", expected, result.risk_level);
            mismatches += 1;
        }
    }

    if mismatches > 0 {
        anyhow::bail!("{} sample(s) scored outside the expected tier", mismatches);
    }

    println!("\nAll samples scored as expected.");
    Ok(())
}
