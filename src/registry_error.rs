use thiserror::Error;

/// Errors reported by the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// `resolve` was called for a key that nobody registered.
    #[error("Service not registered: {key}")]
    NotRegistered { key: &'static str },

    /// The entry under `key` was registered for a different service type.
    #[error("Type mismatch in registry for key {key}: expected {expected}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
    },

    /// A programmer error such as an empty key name.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_registered_display() {
        let err = RegistryError::NotRegistered { key: "IFoo" };
        assert_eq!(err.to_string(), "Service not registered: IFoo");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = RegistryError::TypeMismatch {
            key: "IFoo",
            expected: "u32",
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch in registry for key IFoo: expected u32"
        );
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = RegistryError::InvalidArgument {
            message: "service key name must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid argument: service key name must not be empty"
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            RegistryError::NotRegistered { key: "a" },
            RegistryError::NotRegistered { key: "a" }
        );
        assert_ne!(
            RegistryError::NotRegistered { key: "a" },
            RegistryError::NotRegistered { key: "b" }
        );
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &RegistryError::NotRegistered { key: "IFoo" };
        assert_eq!(err.to_string(), "Service not registered: IFoo");
    }
}
