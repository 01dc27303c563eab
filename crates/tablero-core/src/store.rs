//! Project store contract and in-process implementation.
//!
//! The persistence layer is an external collaborator: the pipeline performs
//! simple point-reads by identifier and nothing else. The trait keeps the
//! gateway oblivious to where project records actually live; deployments
//! embed a store backed by the tracker's database, while standalone runs
//! and tests use [`MemoryProjectStore`].

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{Project, ProjectId},
};

/// Read-only access to project records.
///
/// Implementations must be safe for unlimited concurrent readers; the
/// gateway shares one instance across all in-flight requests.
#[async_trait]
pub trait ProjectStore: Send + Sync + std::fmt::Debug {
    /// Fetches a project by identifier.
    ///
    /// Returns `Ok(None)` when no such project exists. Infrastructure
    /// failures are reported as [`StoreError`] and surface as server
    /// faults, never as "not found".
    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// Verifies the store backend is reachable.
    ///
    /// Used by the readiness probe; must stay cheap.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// In-process project store backed by a map.
///
/// Seeded at startup from configuration when running standalone, and used
/// as the store double throughout the test suites.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: tokio::sync::RwLock<HashMap<ProjectId, Project>>,
}

impl MemoryProjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a project record.
    pub async fn insert(&self, project: Project) {
        self.projects.write().await.insert(project.id, project);
    }

    /// Number of projects currently held.
    pub async fn len(&self) -> usize {
        self.projects.read().await.len()
    }

    /// Returns whether the store holds no projects.
    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn project(id: i64) -> Project {
        Project {
            id: ProjectId(id),
            name: format!("project-{id}"),
            slug: format!("project-{id}"),
            created_at: Utc::now(),
            modules_config: None,
        }
    }

    #[tokio::test]
    async fn find_project_returns_inserted_record() {
        let store = MemoryProjectStore::new();
        store.insert(project(1)).await;

        let found = store.find_project(ProjectId(1)).await.unwrap();
        assert_eq!(found.unwrap().id, ProjectId(1));
    }

    #[tokio::test]
    async fn find_project_misses_unknown_id() {
        let store = MemoryProjectStore::new();
        store.insert(project(1)).await;

        assert!(store.find_project(ProjectId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_replaces_existing_record() {
        let store = MemoryProjectStore::new();
        store.insert(project(1)).await;

        let mut updated = project(1);
        updated.name = "renamed".into();
        store.insert(updated).await;

        assert_eq!(store.len().await, 1);
        let found = store.find_project(ProjectId(1)).await.unwrap().unwrap();
        assert_eq!(found.name, "renamed");
    }

    #[tokio::test]
    async fn memory_store_health_check_always_passes() {
        let store = MemoryProjectStore::new();
        assert!(store.health_check().await.is_ok());
    }
}
