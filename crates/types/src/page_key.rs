//! Names of the logical pages of an estimate.

use std::fmt;
use std::str::FromStr;

const CUSTOM_PAGE_PREFIX: &str = "Custom Page ";

/// A logical page of an estimate, as keyed in the form store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    TitlePage,
    Introduction,
    Inspection,
    Layout,
    QuoteDetails,
    TermsAndConditions,
    /// `Custom Page N`, numbered from 1.
    Custom(u32),
    /// Any other key, trimmed, so unknown pages can still be assembled.
    Other(String),
}

impl PageKey {
    pub const FIXED: [PageKey; 6] = [
        PageKey::TitlePage,
        PageKey::Introduction,
        PageKey::Inspection,
        PageKey::Layout,
        PageKey::QuoteDetails,
        PageKey::TermsAndConditions,
    ];

    pub fn is_custom(&self) -> bool {
        matches!(self, PageKey::Custom(_))
    }
}

impl FromStr for PageKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Keys are compared and kept without surrounding whitespace.
        let key = match s.trim() {
            "Title Page" => PageKey::TitlePage,
            "Introduction" => PageKey::Introduction,
            "Inspection" => PageKey::Inspection,
            "Layout" => PageKey::Layout,
            "Quote Details" => PageKey::QuoteDetails,
            "Terms and Conditions" => PageKey::TermsAndConditions,
            other => match other
                .strip_prefix(CUSTOM_PAGE_PREFIX)
                .and_then(|n| n.parse::<u32>().ok())
            {
                Some(n) if n >= 1 => PageKey::Custom(n),
                _ => PageKey::Other(other.to_string()),
            },
        };
        Ok(key)
    }
}

impl From<&str> for PageKey {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKey::TitlePage => f.write_str("Title Page"),
            PageKey::Introduction => f.write_str("Introduction"),
            PageKey::Inspection => f.write_str("Inspection"),
            PageKey::Layout => f.write_str("Layout"),
            PageKey::QuoteDetails => f.write_str("Quote Details"),
            PageKey::TermsAndConditions => f.write_str("Terms and Conditions"),
            PageKey::Custom(n) => write!(f, "{}{}", CUSTOM_PAGE_PREFIX, n),
            PageKey::Other(s) => f.write_str(s),
        }
    }
}
