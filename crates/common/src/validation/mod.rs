// Validation Module - form checks that run before any request is sent
use std::fmt;

mod validators;

pub use validators::{
    digits_only, FieldValidator, IsoCountryValidator, OtpValidator, PasswordValidator,
    PhoneValidator, RangeValidator, StringValidator, UrlValidator,
};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
///
/// Errors are kept in the order they were found; forms surface the first one
/// inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Message of the first recorded error
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "Validation error with no specific field errors"),
            [only] => f.write_str(&only.message),
            many => {
                for (i, error) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Collects field errors for one form submission
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
    stop_on_first: bool,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip further checks once one has failed
    #[must_use]
    pub const fn stop_on_first_error(mut self) -> Self {
        self.stop_on_first = true;
        self
    }

    fn should_short_circuit(&self) -> bool {
        self.stop_on_first && !self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        if self.should_short_circuit() {
            return;
        }
        self.errors.add_field_error(field, message);
    }

    /// Validate a field with a specific validator, keeping its message
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if !self.should_short_circuit() {
            if let Err(msg) = validator.validate(value) {
                self.add_error(field, msg);
            }
        }
        self
    }

    /// Validate a field, replacing the validator's message with `message`
    pub fn check<T, V>(
        &mut self,
        field: &str,
        value: &T,
        validator: &V,
        message: impl Into<String>,
    ) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if !self.should_short_circuit() && validator.validate(value).is_err() {
            self.add_error(field, message);
        }
        self
    }

    /// Record `message` unless `condition` holds
    pub fn ensure(&mut self, condition: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.add_error(field, message);
        }
        self
    }

    /// Validate string is not empty
    pub fn validate_not_empty(&mut self, field: &str, value: &str) -> &mut Self {
        self.ensure(!value.trim().is_empty(), field, "cannot be empty")
    }

    /// Check if validation has errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get errors without consuming validator
    pub const fn errors(&self) -> &ValidationError {
        &self.errors
    }

    /// Finalize and return result
    ///
    /// # Errors
    /// Returns the collected [`ValidationError`] when any check failed.
    pub fn finalize(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_error_displays_bare_message() {
        let err = ValidationError::field("otp", "OTP must be 6 digits.");
        assert_eq!(err.to_string(), "OTP must be 6 digits.");
    }

    #[test]
    fn multiple_errors_display_with_fields() {
        let mut err = ValidationError::field("email", "required");
        err.add_field_error("password", "too short");
        assert_eq!(err.to_string(), "email: required; password: too short");
        assert_eq!(err.first_message(), Some("required"));
        assert_eq!(err.field_errors("password").len(), 1);
    }

    #[test]
    fn validator_collects_in_order() {
        let mut v = Validator::new();
        v.validate_not_empty("first_name", " ")
            .check("otp", "12a", &OtpValidator::new(6), "OTP must be 6 digits.")
            .ensure(true, "unused", "never");

        let err = v.finalize().unwrap_err();
        assert_eq!(err.error_count(), 2);
        assert_eq!(err.errors[0].field, "first_name");
        assert_eq!(err.errors[1].message, "OTP must be 6 digits.");
    }

    #[test]
    fn stop_on_first_keeps_one_error() {
        let mut v = Validator::new().stop_on_first_error();
        v.ensure(false, "a", "first").ensure(false, "b", "second");
        let err = v.finalize().unwrap_err();
        assert_eq!(err.error_count(), 1);
        assert_eq!(err.first_message(), Some("first"));
    }

    #[test]
    fn clean_validator_finalizes_ok() {
        let mut v = Validator::new();
        v.validate_field("phone", "+918787878783", &PhoneValidator);
        assert!(!v.has_errors());
        assert!(v.finalize().is_ok());
    }
}
