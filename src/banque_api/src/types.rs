use std::str::FromStr;

use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{AMOUNT_PATTERN, DEFAULT_ACCOUNT_COLOR, EMAIL_PATTERN, HEX_COLOR_PATTERN};

lazy_static::lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(EMAIL_PATTERN)
        .expect("Failed to compile email regex");
    static ref HEX_COLOR_REGEX: Regex = Regex::new(HEX_COLOR_PATTERN)
        .expect("Failed to compile hex color regex");
    static ref AMOUNT_REGEX: Regex = Regex::new(AMOUNT_PATTERN)
        .expect("Failed to compile amount regex");
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("invalid account id: must be a non-empty identifier")]
    AccountId,
    #[error("invalid email address")]
    Email,
    #[error("invalid money amount: must be a number with up to 2 decimal places")]
    Amount,
    #[error("invalid color: must be a #RRGGBB hexadecimal color")]
    HexColor,
    #[error("unknown account type: {0}")]
    AccountType(String),
}

/// Server-assigned account identifier.
///
/// The backend hands out either numeric or textual ids; both are kept as text.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);
impl AccountId {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        let t = s.trim();
        if !t.is_empty() && !t.chars().any(char::is_whitespace) {
            Ok(Self(t.into()))
        } else {
            Err(ValueError::AccountId)
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl FromStr for AccountId {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);
impl Email {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        let t = s.trim();
        if EMAIL_REGEX.is_match(t) {
            Ok(Self(t.into()))
        } else {
            Err(ValueError::Email)
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// Emails are compared case-insensitively everywhere in the app.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}
impl FromStr for Email {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A signed amount of money as typed by a user: `12`, `12.5`, `-5`, `1 250,40`.
///
/// Sign is kept so that the transfer rules, not the parser, reject negative amounts.
#[derive(Debug, Display, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);
impl Amount {
    pub fn new(v: f64) -> Result<Self, ValueError> {
        if v.is_finite() {
            Ok(Self(v))
        } else {
            Err(ValueError::Amount)
        }
    }
    pub fn get(self) -> f64 {
        self.0
    }
}
impl FromStr for Amount {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .replace([' ', '\u{a0}'], "")
            .replace('−', "-")
            .replace(',', ".");
        if !AMOUNT_REGEX.is_match(&normalized) {
            return Err(ValueError::Amount);
        }
        let v: f64 = normalized.parse().map_err(|_| ValueError::Amount)?;
        Self::new(v)
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);
impl HexColor {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        HEX_COLOR_REGEX
            .captures(s.trim())
            .and_then(|c| c.name("rgb"))
            .map(|m| Self(format!("#{}", m.as_str().to_ascii_uppercase())))
            .ok_or(ValueError::HexColor)
    }
    /// Parse a color coming from the wire, falling back to the default on garbage.
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(|s| Self::new(s).ok()).unwrap_or_default()
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_ACCOUNT_COLOR.to_string())
    }
}
impl FromStr for HexColor {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
