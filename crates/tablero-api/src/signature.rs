//! Shared-secret validation for incoming webhooks.
//!
//! The hosting service is configured to append the project's shared secret
//! as a query parameter; authenticity is a literal comparison of that token
//! against `modules_config.config["gitlab"]["secret"]`. There is no MAC
//! over the body in this protocol. The comparison runs in constant time and
//! reject reasons are logged, never echoed to the caller.

use tablero_core::models::Project;

/// Integration name under which the shared secret lives in a project's
/// modules configuration.
pub const INTEGRATION_KEY: &str = "gitlab";

/// Result of shared-secret validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the request is authentic.
    pub is_valid: bool,
    /// Reject reason for logging; `None` on acceptance.
    pub error_message: Option<String>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn valid() -> Self {
        Self { is_valid: true, error_message: None }
    }

    /// Creates a failed validation result with a reject reason.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self { is_valid: false, error_message: Some(message.into()) }
    }
}

/// Validates a request token against the project's configured secret.
///
/// Each step short-circuits independently, in order: the token must be
/// present; the project must carry a modules-configuration record with a
/// non-empty payload; the `gitlab` entry must hold a non-empty string
/// secret; the secret must equal the token exactly.
///
/// Pure predicate over project configuration and request data; no side
/// effects.
pub fn validate_shared_secret(project: &Project, provided: Option<&str>) -> ValidationResult {
    let Some(provided) = provided else {
        return ValidationResult::invalid("key query parameter missing");
    };

    let Some(modules) = project.modules_config.as_ref() else {
        return ValidationResult::invalid("project has no modules configuration");
    };

    if modules.config.as_ref().is_none_or(|config| config.is_empty()) {
        return ValidationResult::invalid("modules configuration payload is empty");
    }

    let secret = modules.integration_secret(INTEGRATION_KEY).unwrap_or_default();
    if secret.is_empty() {
        return ValidationResult::invalid("no gitlab secret configured");
    }

    if constant_time_eq(secret, provided) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid("secret mismatch")
    }
}

/// Timing-safe string comparison to prevent timing attacks.
///
/// Semantically exact equality; the length check leaks only the length,
/// which the caller already controls.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use tablero_core::models::{ModulesConfig, ProjectId};

    use super::*;

    fn project_with_config(config: Option<serde_json::Value>) -> Project {
        let modules_config = config.map(|value| {
            let serde_json::Value::Object(map) = value else {
                panic!("fixture must be an object");
            };
            ModulesConfig { config: Some(map) }
        });

        Project {
            id: ProjectId(1),
            name: "demo".into(),
            slug: "demo".into(),
            created_at: Utc::now(),
            modules_config,
        }
    }

    #[test]
    fn accepts_exact_secret_match() {
        let project = project_with_config(Some(json!({"gitlab": {"secret": "s3cr3t"}})));
        let result = validate_shared_secret(&project, Some("s3cr3t"));

        assert!(result.is_valid);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn rejects_missing_token() {
        let project = project_with_config(Some(json!({"gitlab": {"secret": "s3cr3t"}})));
        assert!(!validate_shared_secret(&project, None).is_valid);
    }

    #[test]
    fn rejects_project_without_modules_config() {
        let project = project_with_config(None);
        let result = validate_shared_secret(&project, Some("s3cr3t"));

        assert!(!result.is_valid);
        assert_eq!(result.error_message.unwrap(), "project has no modules configuration");
    }

    #[test]
    fn rejects_empty_config_payload() {
        let project = project_with_config(Some(json!({})));
        assert!(!validate_shared_secret(&project, Some("anything")).is_valid);

        let project = Project {
            modules_config: Some(ModulesConfig { config: None }),
            ..project_with_config(None)
        };
        assert!(!validate_shared_secret(&project, Some("anything")).is_valid);
    }

    #[test]
    fn rejects_missing_or_empty_secret() {
        let project = project_with_config(Some(json!({"gitlab": {}})));
        assert!(!validate_shared_secret(&project, Some("s3cr3t")).is_valid);

        let project = project_with_config(Some(json!({"gitlab": {"secret": ""}})));
        assert!(!validate_shared_secret(&project, Some("")).is_valid);
    }

    #[test]
    fn rejects_secret_for_other_integration() {
        let project = project_with_config(Some(json!({"github": {"secret": "s3cr3t"}})));
        assert!(!validate_shared_secret(&project, Some("s3cr3t")).is_valid);
    }

    #[test]
    fn rejects_wrong_token() {
        let project = project_with_config(Some(json!({"gitlab": {"secret": "s3cr3t"}})));
        let result = validate_shared_secret(&project, Some("wrong"));

        assert!(!result.is_valid);
        assert_eq!(result.error_message.unwrap(), "secret mismatch");
    }

    #[test]
    fn constant_time_eq_same() {
        assert!(constant_time_eq("hello", "hello"));
    }

    #[test]
    fn constant_time_eq_different() {
        assert!(!constant_time_eq("hello", "world"));
    }

    #[test]
    fn constant_time_eq_different_length() {
        assert!(!constant_time_eq("hello", "hello_world"));
    }
}
