pub mod chain;
pub mod rules;

pub use chain::{ValidationChain, ValidationResult, ValidationRule};
pub use rules::{EmailShape, FieldsMatch, MinLen, PhoneShape, Required};
