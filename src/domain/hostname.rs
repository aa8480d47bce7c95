// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hostname and Label Value Objects with DNS Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hostname validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostnameError {
    #[error("Hostname is empty")]
    Empty,

    #[error("Hostname exceeds maximum length of 253 characters: {0}")]
    TooLong(usize),

    #[error("Label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("Invalid character in hostname: {0:?}")]
    InvalidCharacter(char),

    #[error("Label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),

    #[error("Top-level label cannot be all numeric: {0}")]
    NumericLabel(String),
}

/// Fully Qualified Domain Name (FQDN) value object
///
/// Represents a valid DNS hostname following RFC 1123 with invariants:
/// - Total length ≤ 253 characters
/// - Each label ≤ 63 characters
/// - Labels contain only alphanumeric and hyphens
/// - Labels cannot start or end with hyphens
/// - The top-level label cannot be all numeric
///
/// Hostnames are stored lowercase, so two spellings of the same name compare
/// equal and render identically wherever they are used (bucket name,
/// certificate, CDN alias, DNS record).
///
/// # Examples
///
/// ```rust
/// use static_site_infra::domain::Hostname;
///
/// let apex = Hostname::new("Example.com").unwrap();
/// assert_eq!(apex.as_str(), "example.com");
///
/// assert!(Hostname::new("").is_err());
/// assert!(Hostname::new("-invalid.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    /// Maximum total length for FQDN (RFC 1123)
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length for a single label (RFC 1123)
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Create a new hostname with validation
    pub fn new(hostname: impl Into<String>) -> Result<Self, HostnameError> {
        let hostname = hostname.into().to_ascii_lowercase();

        if hostname.is_empty() {
            return Err(HostnameError::Empty);
        }

        if hostname.len() > Self::MAX_LENGTH {
            return Err(HostnameError::TooLong(hostname.len()));
        }

        let labels: Vec<&str> = hostname.split('.').collect();
        for label in &labels {
            validate_label(label)?;
        }

        if let Some(tld) = labels.last() {
            if tld.chars().all(|c| c.is_ascii_digit()) {
                return Err(HostnameError::NumericLabel(tld.to_string()));
            }
        }

        Ok(Self(hostname))
    }

    /// Prefix this hostname with a single label: `{label}.{self}`
    ///
    /// Re-validates the total length of the combined name.
    pub fn with_subdomain(&self, label: &Label) -> Result<Self, HostnameError> {
        Self::new(format!("{}.{}", label.as_str(), self.0))
    }

    /// `{label}.{self}` without re-checking the total length
    ///
    /// Only for callers that already proved the join with
    /// [`Hostname::with_subdomain`].
    pub(crate) fn prefixed_unchecked(&self, label: &Label) -> Self {
        Self(format!("{}.{}", label.as_str(), self.0))
    }

    /// Get the hostname as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get labels as a vector
    pub fn labels(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }

    /// Check if this is a fully qualified domain name (contains dots)
    pub fn is_fqdn(&self) -> bool {
        self.0.contains('.')
    }
}

/// Validate a single DNS label
fn validate_label(label: &str) -> Result<(), HostnameError> {
    if label.is_empty() {
        return Err(HostnameError::Empty);
    }

    if label.len() > Hostname::MAX_LABEL_LENGTH {
        return Err(HostnameError::LabelTooLong(label.to_string()));
    }

    if let Some(ch) = label
        .chars()
        .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-')
    {
        return Err(HostnameError::InvalidCharacter(ch));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(HostnameError::InvalidLabelFormat(label.to_string()));
    }

    Ok(())
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Hostname {
    type Error = HostnameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hostname> for String {
    fn from(value: Hostname) -> Self {
        value.0
    }
}

/// A single DNS label (no dots), e.g. the `dev` in `dev.example.com`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Create a new label with validation
    pub fn new(label: impl Into<String>) -> Result<Self, HostnameError> {
        let label = label.into().to_ascii_lowercase();
        validate_label(&label)?;
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Label {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Label> for String {
    fn from(value: Label) -> Self {
        value.0
    }
}
