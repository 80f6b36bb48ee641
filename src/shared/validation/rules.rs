//! Reusable field rules. Each rule reads one (or two) string fields out of
//! the payload through a plain accessor function.

use super::chain::{ValidationResult, ValidationRule};

/// Field must be non-empty after trimming.
pub struct Required<P> {
    field: &'static str,
    get: fn(&P) -> &str,
}

impl<P> Required<P> {
    pub fn new(field: &'static str, get: fn(&P) -> &str) -> Self {
        Self { field, get }
    }
}

impl<P: Send + Sync> ValidationRule<P> for Required<P> {
    fn validate(&self, payload: &P) -> ValidationResult {
        if (self.get)(payload).trim().is_empty() {
            ValidationResult::invalid(format!("{} is required", self.field))
        } else {
            ValidationResult::valid()
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }
}

/// Field must be at least `min` characters long.
pub struct MinLen<P> {
    field: &'static str,
    min: usize,
    get: fn(&P) -> &str,
}

impl<P> MinLen<P> {
    pub fn new(field: &'static str, min: usize, get: fn(&P) -> &str) -> Self {
        Self { field, min, get }
    }
}

impl<P: Send + Sync> ValidationRule<P> for MinLen<P> {
    fn validate(&self, payload: &P) -> ValidationResult {
        if (self.get)(payload).chars().count() < self.min {
            ValidationResult::invalid(format!(
                "{} must be at least {} characters",
                self.field, self.min
            ))
        } else {
            ValidationResult::valid()
        }
    }

    fn rule_name(&self) -> &'static str {
        "min-len"
    }
}

/// Field must look like an email address: a local part and a domain with a
/// dot, no whitespace.
pub struct EmailShape<P> {
    field: &'static str,
    get: fn(&P) -> &str,
}

impl<P> EmailShape<P> {
    pub fn new(field: &'static str, get: fn(&P) -> &str) -> Self {
        Self { field, get }
    }
}

impl<P: Send + Sync> ValidationRule<P> for EmailShape<P> {
    fn validate(&self, payload: &P) -> ValidationResult {
        let value = (self.get)(payload);
        let well_formed = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !value.contains(char::is_whitespace)
            }
            None => false,
        };
        if well_formed {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(format!("{} is not a valid email address", self.field))
        }
    }

    fn rule_name(&self) -> &'static str {
        "email-shape"
    }
}

/// Field must look like a phone number: an optional leading `+` followed by
/// at least ten digits, spaces, or dashes.
pub struct PhoneShape<P> {
    field: &'static str,
    get: fn(&P) -> &str,
}

impl<P> PhoneShape<P> {
    pub fn new(field: &'static str, get: fn(&P) -> &str) -> Self {
        Self { field, get }
    }
}

impl<P: Send + Sync> ValidationRule<P> for PhoneShape<P> {
    fn validate(&self, payload: &P) -> ValidationResult {
        let value = (self.get)(payload);
        let rest = value.strip_prefix('+').unwrap_or(value);
        let well_formed = rest.chars().count() >= 10
            && rest
                .chars()
                .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
        if well_formed {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(format!("{} is not a valid phone number", self.field))
        }
    }

    fn rule_name(&self) -> &'static str {
        "phone-shape"
    }
}

/// Two fields must carry the same value (password confirmation).
pub struct FieldsMatch<P> {
    message: &'static str,
    left: fn(&P) -> &str,
    right: fn(&P) -> &str,
}

impl<P> FieldsMatch<P> {
    pub fn new(message: &'static str, left: fn(&P) -> &str, right: fn(&P) -> &str) -> Self {
        Self {
            message,
            left,
            right,
        }
    }
}

impl<P: Send + Sync> ValidationRule<P> for FieldsMatch<P> {
    fn validate(&self, payload: &P) -> ValidationResult {
        if (self.left)(payload) == (self.right)(payload) {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(self.message.to_string())
        }
    }

    fn rule_name(&self) -> &'static str {
        "fields-match"
    }
}
