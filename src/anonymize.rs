use crate::domain_utils::DomainUtils;
use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// Strips personal identifiers from a message before it is shared in the
/// community feed. Link hosts are kept so the scam domain stays visible.
pub struct MessageAnonymizer {
    email_re: Regex,
    url_re: Regex,
    aadhaar_re: Regex,
    phone_re: Regex,
    account_re: Regex,
}

impl MessageAnonymizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email_re: Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}")
                .context("Invalid email pattern")?,
            url_re: Regex::new(r"https?://\S+").context("Invalid URL pattern")?,
            aadhaar_re: Regex::new(r"\b\d{4}\s?\d{4}\s?\d{4}\b")
                .context("Invalid Aadhaar pattern")?,
            phone_re: Regex::new(r"(?:\+\d{1,3}[\s-]?)?\b\d[\d\s-]{8,13}\d\b")
                .context("Invalid phone pattern")?,
            account_re: Regex::new(r"\b\d{8,18}\b").context("Invalid account pattern")?,
        })
    }

    pub fn anonymize(&self, message: &str) -> String {
        let mut result = self
            .email_re
            .replace_all(message, "[EMAIL REDACTED]")
            .to_string();

        result = self
            .url_re
            .replace_all(&result, |caps: &Captures| Self::redact_url(&caps[0]))
            .to_string();

        result = self
            .aadhaar_re
            .replace_all(&result, "[AADHAAR REDACTED]")
            .to_string();

        result = self
            .phone_re
            .replace_all(&result, "[PHONE REDACTED]")
            .to_string();

        result = self
            .account_re
            .replace_all(&result, "[ACCOUNT REDACTED]")
            .to_string();

        result.trim().to_string()
    }

    fn redact_url(url: &str) -> String {
        match DomainUtils::split_url(url) {
            Some(parts) => format!("[LINK: {}]", parts.host),
            None => "[LINK REDACTED]".to_string(),
        }
    }
}
