//! Fixture builders for projects and webhook payloads.

use chrono::Utc;
use serde_json::{json, Value};
use tablero_core::models::{ModulesConfig, Project, ProjectId};

/// Builder for project records used in tests.
///
/// # Example
///
/// ```
/// use tablero_testing::ProjectBuilder;
///
/// let project = ProjectBuilder::new(7).with_gitlab_secret("s3cr3t").build();
/// assert_eq!(project.slug, "project-7");
/// ```
#[derive(Debug)]
pub struct ProjectBuilder {
    id: i64,
    name: String,
    modules_config: Option<ModulesConfig>,
}

impl ProjectBuilder {
    /// Starts a project with generated name and no modules configuration.
    pub fn new(id: i64) -> Self {
        Self { id, name: format!("Project {id}"), modules_config: None }
    }

    /// Overrides the project name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Configures a gitlab integration with the given shared secret.
    #[must_use]
    pub fn with_gitlab_secret(mut self, secret: &str) -> Self {
        let Value::Object(config) = json!({"gitlab": {"secret": secret}}) else { unreachable!() };
        self.modules_config = Some(ModulesConfig { config: Some(config) });
        self
    }

    /// Attaches a modules-configuration record whose payload is an empty
    /// object.
    #[must_use]
    pub fn with_empty_modules(mut self) -> Self {
        self.modules_config = Some(ModulesConfig { config: Some(serde_json::Map::new()) });
        self
    }

    /// Attaches an arbitrary modules-configuration payload.
    ///
    /// # Panics
    ///
    /// Panics when the value is not a JSON object.
    #[must_use]
    pub fn with_modules_payload(mut self, payload: Value) -> Self {
        let Value::Object(config) = payload else {
            panic!("modules payload must be a JSON object");
        };
        self.modules_config = Some(ModulesConfig { config: Some(config) });
        self
    }

    /// Builds the project record.
    pub fn build(self) -> Project {
        Project {
            id: ProjectId(self.id),
            name: self.name,
            slug: format!("project-{}", self.id),
            created_at: Utc::now(),
            modules_config: self.modules_config,
        }
    }
}

/// A push event payload whose commits carry the given messages.
pub fn push_payload(messages: &[&str]) -> Value {
    let commits: Vec<Value> = messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            json!({
                "id": format!("{:040x}", i + 1),
                "message": message,
                "url": format!("https://gitlab.example.com/demo/commit/{:040x}", i + 1),
            })
        })
        .collect();

    json!({
        "object_kind": "push",
        "ref": "refs/heads/main",
        "commits": commits,
    })
}

/// An issue event payload with the given action and optional title.
pub fn issue_payload(action: &str, title: Option<&str>) -> Value {
    let mut attributes = json!({
        "action": action,
        "description": "created from the hosting service",
        "url": "https://gitlab.example.com/demo/issues/1",
    });
    if let Some(title) = title {
        attributes["title"] = json!(title);
    }

    json!({
        "object_kind": "issue",
        "object_attributes": attributes,
    })
}
