use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::domain::search::SearchVector;

/// A user-owned project entry. The derived search column stays out of
/// this struct: clients can neither read nor set it, the repository
/// recomputes it from the three text fields on every write.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub configuration: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A search result row with its `ts_rank` score.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectHit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub configuration: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub rank: f32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewProject {
    #[validate(length(min = 1, max = 200, message = "Must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub technologies: Option<String>,

    #[serde(default)]
    pub configuration: Option<Value>,
}

#[derive(Debug)]
pub struct ProjectInsert {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub configuration: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProject {
    /// Absent text fields degrade to empty strings, never null; a missing
    /// configuration becomes the empty object.
    pub fn prepare_for_insert(&self, owner: Uuid) -> ProjectInsert {
        ProjectInsert {
            id: Uuid::new_v4(),
            user_id: owner,
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            technologies: self.technologies.clone().unwrap_or_default(),
            configuration: self
                .configuration
                .clone()
                .unwrap_or_else(|| Value::Object(Default::default())),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

impl ProjectInsert {
    pub fn search_vector(&self) -> SearchVector {
        SearchVector::build(&self.title, &self.description, &self.technologies)
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProjectChanges {
    #[validate(length(min = 1, max = 200, message = "Must be 1-200 characters"))]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub technologies: Option<String>,

    #[serde(default)]
    pub configuration: Option<Value>,
}

/// The row as it will be persisted, with the search vector recomputed
/// from the merged text fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedProject {
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub configuration: Value,
}

impl ProjectChanges {
    pub fn apply(&self, existing: &Project) -> MergedProject {
        MergedProject {
            title: self.title.clone().unwrap_or_else(|| existing.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| existing.description.clone()),
            technologies: self
                .technologies
                .clone()
                .unwrap_or_else(|| existing.technologies.clone()),
            configuration: self
                .configuration
                .clone()
                .unwrap_or_else(|| existing.configuration.clone()),
        }
    }
}

impl MergedProject {
    pub fn search_vector(&self) -> SearchVector {
        SearchVector::build(&self.title, &self.description, &self.technologies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::Weight;

    fn existing() -> Project {
        Project {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Chat App".into(),
            description: "A real-time chat tool".into(),
            technologies: "websockets, redis".into(),
            configuration: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn prepare_for_insert_defaults_missing_fields_to_empty() {
        let owner = Uuid::new_v4();
        let new_project = NewProject {
            title: "Chat App".into(),
            description: None,
            technologies: None,
            configuration: None,
        };

        let insert = new_project.prepare_for_insert(owner);
        assert_eq!(insert.user_id, owner);
        assert_eq!(insert.description, "");
        assert_eq!(insert.technologies, "");
        assert_eq!(insert.configuration, serde_json::json!({}));
        assert_eq!(insert.search_vector().weight_of("chat"), Some(Weight::A));
    }

    #[test]
    fn apply_keeps_unset_fields_and_recomputes_the_vector() {
        let project = existing();
        let changes = ProjectChanges {
            title: Some("Todo Board".into()),
            ..Default::default()
        };

        let merged = changes.apply(&project);
        assert_eq!(merged.title, "Todo Board");
        assert_eq!(merged.description, project.description);

        let vector = merged.search_vector();
        assert_eq!(vector.weight_of("todo"), Some(Weight::A));
        assert_eq!(vector.weight_of("board"), Some(Weight::A));
        // Old title tokens are gone from tier A; "chat" survives only
        // through the description at tier B.
        assert_eq!(vector.weight_of("chat"), Some(Weight::B));
        assert_eq!(vector.weight_of("app"), None);
    }

    #[test]
    fn unchanged_fields_yield_an_identical_vector() {
        let project = existing();
        let merged = ProjectChanges::default().apply(&project);
        assert_eq!(
            merged.search_vector().to_tsvector(),
            SearchVector::build(
                &project.title,
                &project.description,
                &project.technologies
            )
            .to_tsvector()
        );
    }
}
