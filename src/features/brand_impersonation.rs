use crate::domain_utils::DomainUtils;

/// Verified domains of the banks, payment apps, carriers and government
/// portals most often impersonated. Subdomains inherit the verification.
pub const LEGITIMATE_DOMAINS: &[&str] = &[
    "sbi.co.in",
    "onlinesbi.com",
    "hdfcbank.com",
    "icicibank.com",
    "axisbank.com",
    "kotak.com",
    "pnbindia.in",
    "bankofbaroda.in",
    "irctc.co.in",
    "incometax.gov.in",
    "uidai.gov.in",
    "npci.org.in",
    "paytm.com",
    "phonepe.com",
    "gpay.app",
    "amazon.in",
    "flipkart.com",
    "gov.in",
    "nic.in",
    "india.gov.in",
    "rbi.org.in",
    "sebi.gov.in",
    "jio.com",
    "airtel.in",
    "bsnl.in",
    "vi.in",
];

/// Brand keywords checked, in order, against non-whitelisted domains.
pub const BRAND_KEYWORDS: &[&str] = &[
    "sbi", "hdfc", "icici", "axis", "kotak", "pnb", "bob", "canara", "irctc", "uidai", "aadhaar",
    "income", "tax", "paytm", "phonepe", "amazon", "flipkart", "jio", "airtel", "npci", "rbi",
    "sebi",
];

pub struct BrandImpersonationAnalyzer;

impl BrandImpersonationAnalyzer {
    pub fn is_legitimate_domain(domain: &str) -> bool {
        DomainUtils::matches_domain_list(domain, LEGITIMATE_DOMAINS)
    }

    /// First brand keyword embedded in a domain that is not the brand's own.
    pub fn impersonated_brand(domain: &str) -> Option<&'static str> {
        if Self::is_legitimate_domain(domain) {
            return None;
        }

        let domain_lower = domain.to_lowercase();
        BRAND_KEYWORDS
            .iter()
            .copied()
            .find(|brand| domain_lower.contains(brand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legitimate_domains() {
        assert!(BrandImpersonationAnalyzer::is_legitimate_domain("sbi.co.in"));
        assert!(BrandImpersonationAnalyzer::is_legitimate_domain(
            "retail.onlinesbi.com"
        ));
        assert!(BrandImpersonationAnalyzer::is_legitimate_domain(
            "anything.gov.in"
        ));
        assert!(!BrandImpersonationAnalyzer::is_legitimate_domain(
            "sbi-kyc.co.in"
        ));
    }

    #[test]
    fn test_brand_impersonation() {
        assert_eq!(
            BrandImpersonationAnalyzer::impersonated_brand("secure-sbi-login.tk"),
            Some("sbi")
        );
        assert_eq!(
            BrandImpersonationAnalyzer::impersonated_brand("paytm-refund.xyz"),
            Some("paytm")
        );
        assert_eq!(
            BrandImpersonationAnalyzer::impersonated_brand("paytm.com"),
            None
        );
        assert_eq!(
            BrandImpersonationAnalyzer::impersonated_brand("example.com"),
            None
        );
    }

    #[test]
    fn test_first_brand_wins() {
        // "hdfc" precedes "paytm" in the keyword list
        assert_eq!(
            BrandImpersonationAnalyzer::impersonated_brand("paytm-hdfc.club"),
            Some("hdfc")
        );
    }
}
