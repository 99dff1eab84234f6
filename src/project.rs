//! Projects
//!
//! A project is a named, timestamped snapshot of a scene. The editor keeps a
//! live working list of objects separately; `objects` here is only what was
//! there at the last save.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::id::ProjectId;
use crate::scene::SceneObject;

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Current wall-clock time as a [`Timestamp`]
pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

/// A named container of scene objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub objects: Vec<SceneObject>,
}

impl Project {
    /// Create an empty project stamped with the current time
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id,
            name: name.into(),
            created_at: now,
            updated_at: now,
            objects: Vec::new(),
        }
    }

    /// A copy of this record holding `objects`, stamped `updated_at = at`
    pub fn saved_with(&self, objects: Vec<SceneObject>, at: Timestamp) -> Self {
        Self {
            objects,
            updated_at: at,
            ..self.clone()
        }
    }
}

/// One-way JSON export of a project with its live objects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectExport {
    #[serde(flatten)]
    pub project: Project,
}

impl ProjectExport {
    /// Export `project` with its objects replaced by the working list
    pub fn new(project: &Project, objects: &[SceneObject]) -> Self {
        Self {
            project: Project {
                objects: objects.to_vec(),
                ..project.clone()
            },
        }
    }

    /// Suggested download file name
    pub fn file_name(&self) -> String {
        format!("{}.json", self.project.name)
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ObjectId;
    use crate::scene::{make_object, ObjectKind, PrimitiveKind};

    #[test]
    fn test_new_project_timestamps() {
        let p = Project::new(ProjectId::new("p1"), "Demo");
        assert_eq!(p.created_at, p.updated_at);
        assert!(p.objects.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let p = Project::new(ProjectId::new("p1"), "Demo");
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["objects"], serde_json::json!([]));
    }

    #[test]
    fn test_saved_with_keeps_identity() {
        let p = Project::new(ProjectId::new("p1"), "Demo");
        let cube = make_object(ObjectKind::Primitive(PrimitiveKind::Cube), ObjectId::new("o1"));
        let saved = p.saved_with(vec![cube.clone()], p.created_at + 10);
        assert_eq!(saved.id, p.id);
        assert_eq!(saved.created_at, p.created_at);
        assert_eq!(saved.updated_at, p.created_at + 10);
        assert_eq!(saved.objects, vec![cube]);
    }

    #[test]
    fn test_export_uses_live_objects() {
        let p = Project::new(ProjectId::new("p1"), "My Scene");
        let cube = make_object(ObjectKind::Primitive(PrimitiveKind::Cube), ObjectId::new("o1"));
        let export = ProjectExport::new(&p, &[cube]);
        assert_eq!(export.file_name(), "My Scene.json");

        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["name"], "My Scene");
        assert_eq!(json["objects"][0]["type"], "cube");
        // The stored project is untouched
        assert!(p.objects.is_empty());
    }
}
