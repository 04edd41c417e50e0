use super::brand_impersonation::BrandImpersonationAnalyzer;
use super::tld_risk::TldRiskAnalyzer;
use super::{UrlFinding, UrlInspection, UrlRiskLevel};
use crate::domain_utils::DomainUtils;
use anyhow::{Context, Result};
use regex::Regex;

pub const DEFAULT_MAX_URLS: usize = 5;

/// Path fragments that ask the reader to hand over credentials or collect a payout.
pub const SUSPICIOUS_PATH_KEYWORDS: &[&str] = &[
    "verify", "update", "confirm", "secure", "login", "signin", "account", "kyc", "otp", "claim",
    "reward", "prize", "free", "winner", "lucky", "offer", "cash", "refund", "block", "suspend",
];

pub const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "ow.ly",
    "short.io",
    "rb.gy",
    "cutt.ly",
];

const INSECURE_SCHEME_SCORE: u32 = 15;
const SUSPICIOUS_TLD_SCORE: u32 = 20;
const BRAND_IMPERSONATION_SCORE: u32 = 25;
const MULTI_HYPHEN_SCORE: u32 = 15;
const SINGLE_HYPHEN_SCORE: u32 = 8;
const PATH_KEYWORD_SCORE: u32 = 8;
const PATH_KEYWORD_CAP: u32 = 24;
const LONG_URL_SCORE: u32 = 10;
const LONG_URL_CHARS: usize = 100;
const IP_HOST_SCORE: u32 = 30;
const SHORTENER_SCORE: u32 = 20;
const NUMERIC_SUBDOMAIN_SCORE: u32 = 15;
const NO_INDICATOR_SCORE: u32 = 10;
const UNPARSABLE_SCORE: u32 = 50;

pub struct UrlInspector {
    url_regex: Regex,
    ip_host_regex: Regex,
    numeric_subdomain_regex: Regex,
    max_urls: usize,
}

impl UrlInspector {
    pub fn new() -> Result<Self> {
        Self::with_max_urls(DEFAULT_MAX_URLS)
    }

    pub fn with_max_urls(max_urls: usize) -> Result<Self> {
        Ok(Self {
            url_regex: Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+"#)
                .context("Invalid URL extraction pattern")?,
            ip_host_regex: Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}")
                .context("Invalid IP host pattern")?,
            numeric_subdomain_regex: Regex::new(r"^\d+\.")
                .context("Invalid numeric subdomain pattern")?,
            max_urls,
        })
    }

    /// URLs in order of appearance, at most `max_urls` of them.
    pub fn extract_urls(&self, text: &str) -> Vec<String> {
        self.url_regex
            .find_iter(text)
            .take(self.max_urls)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn inspect_message(&self, message: &str) -> Vec<UrlFinding> {
        self.extract_urls(message)
            .iter()
            .map(|url| {
                let inspection = self.inspect(url);
                if inspection.is_fallback() {
                    log::warn!("URL could not be parsed, using fallback finding: {}", url);
                }
                inspection.into_finding()
            })
            .collect()
    }

    pub fn inspect(&self, url: &str) -> UrlInspection {
        let parts = match DomainUtils::split_url(url) {
            Some(parts) => parts,
            None => return Self::fallback(url),
        };

        let domain = DomainUtils::canonicalize_domain(&parts.host);

        // Whitelisted hosts skip every other heuristic
        if BrandImpersonationAnalyzer::is_legitimate_domain(&domain) {
            return UrlInspection::Inspected(UrlFinding {
                url: url.to_string(),
                domain,
                risk_score: 0,
                risk_level: UrlRiskLevel::Safe,
                findings: vec!["Domain is a verified legitimate source".to_string()],
                is_suspicious: false,
            });
        }

        let mut findings = Vec::new();
        let mut risk_score = 0;

        if parts.scheme == "http" {
            findings.push("Uses insecure HTTP (no encryption)".to_string());
            risk_score += INSECURE_SCHEME_SCORE;
        }

        if let Some(tld) = TldRiskAnalyzer::suspicious_tld(&domain) {
            findings.push(format!("Suspicious top-level domain: {}", tld));
            risk_score += SUSPICIOUS_TLD_SCORE;
        }

        if let Some(brand) = BrandImpersonationAnalyzer::impersonated_brand(&domain) {
            findings.push(format!(
                "Impersonates \"{}\" brand in domain name",
                brand.to_uppercase()
            ));
            risk_score += BRAND_IMPERSONATION_SCORE;
        }

        let hyphen_count = DomainUtils::first_label(&domain).matches('-').count();
        if hyphen_count >= 2 {
            findings.push(format!(
                "Domain contains {} hyphens, a common typosquatting pattern",
                hyphen_count
            ));
            risk_score += MULTI_HYPHEN_SCORE;
        } else if hyphen_count == 1 {
            findings.push("Domain contains hyphen, possible brand impersonation".to_string());
            risk_score += SINGLE_HYPHEN_SCORE;
        }

        let path = parts.path.to_lowercase();
        let matched_keywords: Vec<&str> = SUSPICIOUS_PATH_KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| path.contains(keyword))
            .collect();
        if !matched_keywords.is_empty() {
            let shown: Vec<&str> = matched_keywords.iter().take(3).copied().collect();
            findings.push(format!("Suspicious path keywords: {}", shown.join(", ")));
            risk_score += (matched_keywords.len() as u32 * PATH_KEYWORD_SCORE).min(PATH_KEYWORD_CAP);
        }

        let length = url.chars().count();
        if length > LONG_URL_CHARS {
            findings.push(format!(
                "Unusually long URL ({} chars), possible obfuscation",
                length
            ));
            risk_score += LONG_URL_SCORE;
        }

        if self.ip_host_regex.is_match(&domain) {
            findings.push("URL uses raw IP address instead of domain name".to_string());
            risk_score += IP_HOST_SCORE;
        }

        if DomainUtils::matches_domain_list(&domain, URL_SHORTENERS) {
            findings.push("URL shortener detected, hides the real destination".to_string());
            risk_score += SHORTENER_SCORE;
        }

        if self.numeric_subdomain_regex.is_match(&domain) {
            findings.push("Numeric subdomain, unusual for legitimate services".to_string());
            risk_score += NUMERIC_SUBDOMAIN_SCORE;
        }

        if findings.is_empty() {
            findings.push("No specific indicators found, treat with general caution".to_string());
            risk_score = NO_INDICATOR_SCORE;
        }

        let risk_score = risk_score.min(100);

        UrlInspection::Inspected(UrlFinding {
            url: url.to_string(),
            domain,
            risk_score,
            risk_level: UrlRiskLevel::from_score(risk_score),
            findings,
            is_suspicious: risk_score >= 30,
        })
    }

    fn fallback(url: &str) -> UrlInspection {
        UrlInspection::Fallback(UrlFinding {
            url: url.to_string(),
            domain: url.to_string(),
            risk_score: UNPARSABLE_SCORE,
            risk_level: UrlRiskLevel::Medium,
            findings: vec!["Could not fully parse URL: missing host".to_string()],
            is_suspicious: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspector() -> UrlInspector {
        UrlInspector::new().unwrap()
    }

    #[test]
    fn test_phishing_url() {
        let finding = inspector()
            .inspect("http://secure-sbi-login.tk/verify")
            .into_finding();

        assert_eq!(finding.domain, "secure-sbi-login.tk");
        assert_eq!(finding.risk_score, 15 + 20 + 25 + 15 + 8);
        assert_eq!(finding.risk_level, UrlRiskLevel::High);
        assert!(finding.is_suspicious);
        assert_eq!(finding.findings.len(), 5);
        assert_eq!(finding.findings[1], "Suspicious top-level domain: .tk");
        assert_eq!(finding.findings[2], "Impersonates \"SBI\" brand in domain name");
        assert_eq!(finding.findings[4], "Suspicious path keywords: verify");
    }

    #[test]
    fn test_whitelist_short_circuits() {
        let inspection = inspector().inspect("http://sub.sbi.co.in/verify-kyc-login");
        assert!(!inspection.is_fallback());

        let finding = inspection.into_finding();
        assert_eq!(finding.risk_score, 0);
        assert_eq!(finding.risk_level, UrlRiskLevel::Safe);
        assert_eq!(finding.findings, vec!["Domain is a verified legitimate source"]);
        assert!(!finding.is_suspicious);
    }

    #[test]
    fn test_www_prefix_is_stripped() {
        let finding = inspector()
            .inspect("https://www.hdfcbank.com/login")
            .into_finding();
        assert_eq!(finding.domain, "hdfcbank.com");
        assert_eq!(finding.risk_level, UrlRiskLevel::Safe);
    }

    #[test]
    fn test_clean_url_gets_floor_score() {
        let finding = inspector().inspect("https://example.com/").into_finding();

        assert_eq!(finding.risk_score, 10);
        assert_eq!(finding.risk_level, UrlRiskLevel::Low);
        assert_eq!(finding.findings.len(), 1);
        assert!(!finding.is_suspicious);
    }

    #[test]
    fn test_ip_host() {
        let finding = inspector()
            .inspect("http://192.168.10.5/login")
            .into_finding();

        // insecure + path keyword + raw IP + numeric leading label
        assert_eq!(finding.risk_score, 15 + 8 + 30 + 15);
        assert_eq!(finding.risk_level, UrlRiskLevel::High);
    }

    #[test]
    fn test_out_of_range_ip_host_is_kept_verbatim() {
        let inspection = inspector().inspect("http://999.999.999.999/login");
        assert!(!inspection.is_fallback());

        let finding = inspection.into_finding();
        assert_eq!(finding.domain, "999.999.999.999");
        assert_eq!(finding.risk_score, 15 + 8 + 30 + 15);
        assert_eq!(finding.risk_level, UrlRiskLevel::High);
        assert!(finding
            .findings
            .contains(&"URL uses raw IP address instead of domain name".to_string()));
    }

    #[test]
    fn test_numeric_host_is_not_rewritten() {
        let finding = inspector().inspect("http://12345/verify").into_finding();

        assert_eq!(finding.domain, "12345");
        // insecure + path keyword; a bare number is neither a dotted IP nor a subdomain
        assert_eq!(finding.risk_score, 15 + 8);
    }

    #[test]
    fn test_shortener() {
        let finding = inspector().inspect("https://bit.ly/3xYz").into_finding();

        assert_eq!(finding.risk_score, 20);
        assert_eq!(finding.risk_level, UrlRiskLevel::Low);
        assert!(!finding.is_suspicious);

        // a substring of the host is not enough
        let finding = inspector().inspect("https://microsoft.com/").into_finding();
        assert_eq!(finding.risk_score, 10);
    }

    #[test]
    fn test_path_keywords_are_capped() {
        let finding = inspector()
            .inspect("https://example.com/verify/update/confirm/secure/login")
            .into_finding();

        assert_eq!(finding.risk_score, 24);
        assert_eq!(
            finding.findings,
            vec!["Suspicious path keywords: verify, update, confirm"]
        );
    }

    #[test]
    fn test_single_hyphen() {
        let finding = inspector().inspect("https://my-shop.com/").into_finding();
        assert_eq!(finding.risk_score, 8);
    }

    #[test]
    fn test_long_url() {
        let url = format!("https://example.com/{}", "a".repeat(100));
        let finding = inspector().inspect(&url).into_finding();

        assert_eq!(finding.risk_score, 10);
        assert!(finding.findings[0].starts_with("Unusually long URL (120 chars)"));
    }

    #[test]
    fn test_score_is_clamped() {
        let url = format!(
            "http://1.2.3.4-sbi-kyc.tk/verify-update-claim-{}",
            "x".repeat(80)
        );
        let finding = inspector().inspect(&url).into_finding();
        assert_eq!(finding.risk_score, 100);
    }

    #[test]
    fn test_unparsable_url_falls_back() {
        let inspection = inspector().inspect("http://:8080/login");
        assert!(inspection.is_fallback());

        let finding = inspection.into_finding();
        assert_eq!(finding.risk_score, 50);
        assert_eq!(finding.risk_level, UrlRiskLevel::Medium);
        assert_eq!(finding.domain, "http://:8080/login");
        assert!(finding.is_suspicious);
        assert_eq!(finding.findings.len(), 1);
        assert!(finding.findings[0].starts_with("Could not fully parse URL"));
    }

    #[test]
    fn test_extract_urls_in_order_and_limited() {
        let text = "a http://one.com b https://two.com c http://three.com d http://four.com \
                    e http://five.com f http://six.com g http://seven.com";
        let urls = inspector().extract_urls(text);

        assert_eq!(urls.len(), 5);
        assert_eq!(urls[0], "http://one.com");
        assert_eq!(urls[4], "http://five.com");
    }

    #[test]
    fn test_extract_stops_at_brackets() {
        let urls = inspector().extract_urls("see <http://a.tk/x> or \"https://b.xyz\"");
        assert_eq!(urls, vec!["http://a.tk/x", "https://b.xyz"]);
    }

    #[test]
    fn test_message_without_urls() {
        assert!(inspector()
            .inspect_message("Meeting rescheduled to 3pm tomorrow, please confirm.")
            .is_empty());
    }

    #[test]
    fn test_configured_limit() {
        let inspector = UrlInspector::with_max_urls(1).unwrap();
        let findings = inspector.inspect_message("http://a.com http://b.com");
        assert_eq!(findings.len(), 1);
    }
}
