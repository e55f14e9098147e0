// Field Validators - Reusable validation components
use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

static E164_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").ok());

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    ///
    /// # Errors
    /// Returns a human-readable message when the value is rejected.
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Range validator for numeric types
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T> Default for RangeValidator<T> {
    fn default() -> Self {
        Self { min: None, max: None }
    }
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Inclusive range
    pub const fn new(min: T, max: T) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    /// Set minimum value
    #[must_use]
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value
    #[must_use]
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) if value < min || value > max => {
                Err(format!("Value must be between {min} and {max}"))
            }
            (Some(min), None) if value < min => Err(format!("Value must be at least {min}")),
            (None, Some(max)) if value > max => Err(format!("Value must not exceed {max}")),
            _ => Ok(()),
        }
    }
}

/// String validator with various constraints
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    not_empty: bool,
}

impl StringValidator {
    /// Create a new string validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Require non-empty string
    #[must_use]
    pub const fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Set minimum length in characters
    #[must_use]
    pub const fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set maximum length in characters
    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set pattern to match
    ///
    /// # Errors
    /// Returns the regex compile error for an invalid pattern.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let val = value.trim();
        let len = val.chars().count();

        if self.not_empty && val.is_empty() {
            return Err("Value cannot be empty".to_string());
        }
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("Length must be at least {min} characters"));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("Length must not exceed {max} characters"));
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(val) {
                return Err(format!("Value must match pattern: {}", pattern.as_str()));
            }
        }
        Ok(())
    }
}

/// One-time passcode of an exact number of ASCII digits
#[derive(Debug, Clone, Copy)]
pub struct OtpValidator {
    digits: usize,
}

impl OtpValidator {
    pub const fn new(digits: usize) -> Self {
        Self { digits }
    }
}

impl FieldValidator<str> for OtpValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.len() == self.digits && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(format!("OTP must be {} digits.", self.digits))
        }
    }
}

/// Minimum password length
#[derive(Debug, Clone, Copy)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl FieldValidator<str> for PasswordValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() >= self.min_length {
            Ok(())
        } else {
            Err(format!("Password must be at least {} characters.", self.min_length))
        }
    }
}

/// E.164 phone number (`+918787878783`)
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneValidator;

impl FieldValidator<str> for PhoneValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if E164_RE.as_ref().is_some_and(|re| re.is_match(value)) {
            Ok(())
        } else {
            Err("Phone must be E.164 format".to_string())
        }
    }
}

/// Two-character ISO country code
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCountryValidator;

impl FieldValidator<str> for IsoCountryValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() == 2 {
            Ok(())
        } else {
            Err("Country must be 2-char ISO code".to_string())
        }
    }
}

/// Absolute URL
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlValidator;

impl FieldValidator<str> for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        url::Url::parse(value).map(|_| ()).map_err(|e| format!("Invalid URL: {e}"))
    }
}

/// Keep only ASCII digits, e.g. from a phone input.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
