/// Minimal host utilities shared by the URL inspector and the anonymiser
pub struct DomainUtils;

/// Scheme, host and path of an absolute URL, read straight from its text.
///
/// The host is only lowercased. Numeric hosts such as `12345` or
/// `999.999.999.999` stay as written rather than being reinterpreted as IPv4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: String,
    pub host: String,
    pub path: &'a str,
}

impl DomainUtils {
    /// Check if domain matches any in list (with hierarchy support)
    pub fn matches_domain_list<S: AsRef<str>>(domain: &str, domain_list: &[S]) -> bool {
        let domain_lower = domain.to_lowercase();

        domain_list.iter().any(|pattern| {
            let pattern_lower = pattern.as_ref().to_lowercase();

            // Exact match, or subdomain match (domain ends with .pattern)
            domain_lower == pattern_lower || domain_lower.ends_with(&format!(".{}", pattern_lower))
        })
    }

    /// Canonicalize domain (remove www prefix)
    pub fn canonicalize_domain(domain: &str) -> String {
        let domain_lower = domain.to_lowercase();
        if let Some(stripped) = domain_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            domain_lower
        }
    }

    /// Split `scheme://[userinfo@]host[:port]/path?query#fragment`.
    /// Returns `None` when there is no `://` or the host is empty.
    pub fn split_url(url: &str) -> Option<UrlParts<'_>> {
        let (scheme, rest) = url.split_once("://")?;

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(authority_end);
        let path_end = tail.find(['?', '#']).unwrap_or(tail.len());

        let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
        let host = Self::strip_port(host_port);
        if host.is_empty() {
            return None;
        }

        Some(UrlParts {
            scheme: scheme.to_lowercase(),
            host: host.to_lowercase(),
            path: &tail[..path_end],
        })
    }

    fn strip_port(host_port: &str) -> &str {
        if let Some(bracketed) = host_port.strip_prefix('[') {
            return bracketed.split_once(']').map_or(bracketed, |(host, _)| host);
        }
        match host_port.rsplit_once(':') {
            Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
            _ => host_port,
        }
    }

    /// Leftmost DNS label, the part typosquatters decorate with hyphens
    pub fn first_label(domain: &str) -> &str {
        domain.split('.').next().unwrap_or(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_domain_list() {
        let domains = ["sbi.co.in", "paytm.com"];

        assert!(DomainUtils::matches_domain_list("sbi.co.in", &domains));
        assert!(DomainUtils::matches_domain_list("retail.sbi.co.in", &domains));
        assert!(DomainUtils::matches_domain_list("PAYTM.COM", &domains));
        assert!(!DomainUtils::matches_domain_list("fakesbi.co.in", &domains));
        assert!(!DomainUtils::matches_domain_list("sbi.co.in.evil.tk", &domains));
    }

    #[test]
    fn test_canonicalize_domain() {
        assert_eq!(
            DomainUtils::canonicalize_domain("www.Example.com"),
            "example.com"
        );
        assert_eq!(
            DomainUtils::canonicalize_domain("example.com"),
            "example.com"
        );
        assert_eq!(
            DomainUtils::canonicalize_domain("mywww.example.com"),
            "mywww.example.com"
        );
    }

    #[test]
    fn test_split_url() {
        let parts = DomainUtils::split_url("HTTPS://user:pw@Secure-SBI.tk:8443/Verify?id=1#top").unwrap();
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.host, "secure-sbi.tk");
        assert_eq!(parts.path, "/Verify");

        let parts = DomainUtils::split_url("http://example.com").unwrap();
        assert_eq!(parts.host, "example.com");
        assert_eq!(parts.path, "");

        let parts = DomainUtils::split_url("http://[::1]:8080/x").unwrap();
        assert_eq!(parts.host, "::1");

        assert!(DomainUtils::split_url("http://:8080/login").is_none());
        assert!(DomainUtils::split_url("example.com/login").is_none());
    }

    #[test]
    fn test_split_url_keeps_numeric_hosts() {
        assert_eq!(DomainUtils::split_url("http://12345/verify").unwrap().host, "12345");
        assert_eq!(
            DomainUtils::split_url("http://999.999.999.999/login").unwrap().host,
            "999.999.999.999"
        );
        assert_eq!(DomainUtils::split_url("http://0x7f.1/").unwrap().host, "0x7f.1");
    }

    #[test]
    fn test_first_label() {
        assert_eq!(DomainUtils::first_label("secure-sbi-login.tk"), "secure-sbi-login");
        assert_eq!(DomainUtils::first_label("localhost"), "localhost");
    }
}
