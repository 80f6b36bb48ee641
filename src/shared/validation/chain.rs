use crate::shared::errors::{AppError, AppResult};

/// Result of a validation rule check
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(error: String) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
        }
    }

    /// Merge two validation results
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.is_valid && other.is_valid;
        self
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.errors.join("; ")))
        }
    }
}

/// A single pre-submission check over a mutation payload.
pub trait ValidationRule<P>: Send + Sync {
    fn validate(&self, payload: &P) -> ValidationResult;

    /// Name of this rule for logging
    fn rule_name(&self) -> &'static str;
}

/// Chain of validation rules run against a payload before it is allowed to
/// reach the network.
pub struct ValidationChain<P> {
    rules: Vec<Box<dyn ValidationRule<P>>>,
    stop_on_first_error: bool,
}

impl<P> ValidationChain<P> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            stop_on_first_error: false,
        }
    }

    /// Add a validation rule to the chain
    pub fn add_rule(mut self, rule: impl ValidationRule<P> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Set whether to stop validation on first error
    pub fn stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    /// Execute all validation rules in the chain
    pub fn validate(&self, payload: &P) -> ValidationResult {
        let mut combined = ValidationResult::valid();

        for rule in &self.rules {
            let result = rule.validate(payload);
            if !result.is_valid {
                log::debug!("Validation rule '{}' failed", rule.rule_name());
            }
            combined = combined.merge(result);

            if self.stop_on_first_error && !combined.is_valid {
                break;
            }
        }

        combined
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl<P> Default for ValidationChain<P> {
    fn default() -> Self {
        Self::new()
    }
}
