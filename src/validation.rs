use serde::Serialize;
use std::fmt;

pub const SHORT_LEN: usize = 8;
pub const LONG_LEN: usize = 11;

/// Reasons a code is rejected. Reported as data on the result, never as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BicError {
    TooShort,
    TooLong,
    BadChars,
    BadFormat,
    BadCountryCode,
}

impl BicError {
    pub fn as_str(self) -> &'static str {
        match self {
            BicError::TooShort => "too_short",
            BicError::TooLong => "too_long",
            BicError::BadChars => "bad_chars",
            BicError::BadFormat => "bad_format",
            BicError::BadCountryCode => "bad_country_code",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BicError::TooShort => "shorter than 8 characters",
            BicError::TooLong => "longer than 11 characters",
            BicError::BadChars => "contains characters outside A-Z and 0-9",
            BicError::BadFormat => "does not match the BIC layout",
            BicError::BadCountryCode => "country segment is not an ISO 3166 code",
        }
    }
}

impl fmt::Display for BicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strips line breaks, tabs, spaces and dashes, then uppercases.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '\n' | '\r' | '\t' | ' ' | '-'))
        .collect::<String>()
        .to_uppercase()
}

/// Runs every structural check on an already normalized code.
pub fn validate(code: &str) -> Vec<BicError> {
    let mut errors = Vec::new();
    let len = code.chars().count();
    if len < SHORT_LEN {
        errors.push(BicError::TooShort);
    }
    if len > LONG_LEN {
        errors.push(BicError::TooLong);
    }
    if !code.chars().all(is_code_char) {
        errors.push(BicError::BadChars);
    }
    if !has_bic_layout(code) {
        errors.push(BicError::BadFormat);
    }
    errors
}

// 4 letters bank, 2 letters country, 2 alphanumerics location, optional 3 alphanumerics branch.
fn has_bic_layout(code: &str) -> bool {
    let bytes = code.as_bytes();
    if !(bytes.len() == SHORT_LEN || bytes.len() == LONG_LEN) {
        return false;
    }
    bytes[..6].iter().all(u8::is_ascii_uppercase)
        && bytes[6..]
            .iter()
            .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit())
}

fn is_code_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit()
}
