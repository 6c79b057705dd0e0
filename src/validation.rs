pub mod grammar;

// Re-exports for concise imports
pub use grammar::{validate_tables, ValidationReporter, ValidationResult};
