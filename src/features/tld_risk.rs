/// TLDs commonly registered for throwaway phishing domains, checked in order.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    ".xyz", ".tk", ".ml", ".ga", ".cf", ".gq", ".pw", ".top", ".club", ".site", ".online",
    ".click", ".link", ".work", ".loan", ".win", ".party", ".stream", ".download",
];

pub struct TldRiskAnalyzer;

impl TldRiskAnalyzer {
    /// First suspicious TLD (with its leading dot) the domain ends with.
    pub fn suspicious_tld(domain: &str) -> Option<&'static str> {
        let domain_lower = domain.to_lowercase();
        SUSPICIOUS_TLDS
            .iter()
            .copied()
            .find(|tld| domain_lower.ends_with(tld))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspicious_tld() {
        assert_eq!(
            TldRiskAnalyzer::suspicious_tld("secure-sbi-login.tk"),
            Some(".tk")
        );
        assert_eq!(TldRiskAnalyzer::suspicious_tld("prize.xyz"), Some(".xyz"));
        assert_eq!(TldRiskAnalyzer::suspicious_tld("example.com"), None);
        // ".tk" must be a suffix, not just a substring
        assert_eq!(TldRiskAnalyzer::suspicious_tld("my.tk.example.com"), None);
    }
}
