#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Only serializer errors convert implicitly; everything else is built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// An entity could not be built from its JSON/YAML input.
    #[from(ignore)]
    #[display("Validation Error: {_0}")]
    Validation(String),

    /// A model type could not be turned into a schema.
    #[from(ignore)]
    #[display("Introspection Error: model '{model}': {reason}")]
    Introspection {
        /// Type name of the offending model.
        model: String,
        /// What went wrong.
        reason: String,
    },

    /// Two different schemas were registered under the same component name.
    #[from(ignore)]
    #[display("Schema name collision: '{name}' is defined by {first} and redefined by {second}")]
    NameCollision {
        /// The contested component name.
        name: String,
        /// Where the registered definition came from.
        first: String,
        /// Where the conflicting definition came from.
        second: String,
    },

    /// A registration name is not a valid component key.
    #[from(ignore)]
    #[display("Invalid component name '{name}': must match {pattern}")]
    InvalidComponentName {
        /// The rejected name.
        name: String,
        /// The pattern component keys must match.
        pattern: &'static str,
    },

    /// Wrapper for JSON serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML serialization errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Generic errors.
    #[from(ignore)]
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Json(e) => Some(e),
            AppError::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
        assert!(std::error::Error::source(&app_err).is_some());
    }

    #[test]
    fn test_collision_display_names_both_sites() {
        let app_err = AppError::NameCollision {
            name: "User".into(),
            first: "model 'a::User' at /paths/~1users/get".into(),
            second: "model 'b::User' at /paths/~1admins/get".into(),
        };
        let msg = app_err.to_string();
        assert!(msg.contains("'User'"));
        assert!(msg.contains("a::User"));
        assert!(msg.contains("b::User"));
    }

    #[test]
    fn test_introspection_display() {
        let app_err = AppError::Introspection {
            model: "crate::Broken".into(),
            reason: "invalid type".into(),
        };
        assert_eq!(
            app_err.to_string(),
            "Introspection Error: model 'crate::Broken': invalid type"
        );
    }
}
