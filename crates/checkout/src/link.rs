//! WhatsApp deep links.

use serde::{Deserialize, Serialize};

use thriftup_core::{DomainError, DomainResult};

pub const DEFAULT_BASE_URL: &str = "https://wa.me";

/// Where checkout messages are sent: `<base_url>/<destination>?text=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppLink {
    base_url: String,
    destination: String,
}

impl WhatsAppLink {
    /// `destination` may be written with a leading `+`, spaces or dashes;
    /// what remains must be digits.
    pub fn new(base_url: impl Into<String>, destination: &str) -> DomainResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(DomainError::validation("whatsapp base url is empty"));
        }

        let digits: String = destination
            .trim()
            .trim_start_matches('+')
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "invalid whatsapp destination: {destination}"
            )));
        }

        Ok(Self {
            base_url,
            destination: digits,
        })
    }

    pub fn with_default_base(destination: &str) -> DomainResult<Self> {
        Self::new(DEFAULT_BASE_URL, destination)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.destination,
            encode_uri_component(text)
        )
    }
}

/// Percent-encode like JavaScript's `encodeURIComponent`: every UTF-8 byte
/// outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )` becomes `%XX`.
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("x\ny"), "x%0Ay");
        assert_eq!(encode_uri_component("Rp 1.000,-"), "Rp%201.000%2C-");
        assert_eq!(encode_uri_component("&=?#/+:@"), "%26%3D%3F%23%2F%2B%3A%40");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn destination_is_normalized_to_digits() {
        let link = WhatsAppLink::with_default_base("+62 812-3456-7890").unwrap();
        assert_eq!(link.destination(), "6281234567890");
        assert_eq!(link.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_destination_is_rejected() {
        assert!(WhatsAppLink::with_default_base("").is_err());
        assert!(WhatsAppLink::with_default_base("+").is_err());
        assert!(WhatsAppLink::with_default_base("0812abc").is_err());
        assert!(WhatsAppLink::new("  ", "62812").is_err());
    }

    #[test]
    fn builds_url_with_encoded_text() {
        let link = WhatsAppLink::new("https://wa.me/", "62812").unwrap();
        assert_eq!(link.url_for("Halo kak"), "https://wa.me/62812?text=Halo%20kak");
    }
}
