//! Editor state and data

use serde::{Deserialize, Serialize};

use crate::id::{ObjectId, ProjectId};
use crate::project::Project;
use crate::scene::SceneObject;

/// Background sky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyMode {
    #[default]
    Day,
    Night,
}

impl SkyMode {
    pub fn toggled(self) -> Self {
        match self {
            SkyMode::Day => SkyMode::Night,
            SkyMode::Night => SkyMode::Day,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkyMode::Day => "Day",
            SkyMode::Night => "Night",
        }
    }
}

/// Session view preferences (not stored per project)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPrefs {
    pub grid_visible: bool,
    /// Not clamped; the UI slider offers 0.5..=5
    pub grid_size: f64,
    pub sky_mode: SkyMode,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            grid_visible: true,
            grid_size: 1.0,
            sky_mode: SkyMode::Day,
        }
    }
}

/// Everything the editor knows during a session
///
/// `objects` is the live working list; `current_project.objects` is only the
/// snapshot from the last load or save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub current_project: Option<Project>,
    pub selected_object_id: Option<ObjectId>,
    pub objects: Vec<SceneObject>,
    pub projects: Vec<Project>,
    pub view: ViewPrefs,
}

impl EditorState {
    pub fn new(view: ViewPrefs) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    pub fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// The selected object, if the selection points at a live object
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected_object_id.as_ref().and_then(|id| self.object(id))
    }

    /// Light objects in the working list
    pub fn lights(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.is_light())
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn current_project_id(&self) -> Option<&ProjectId> {
        self.current_project.as_ref().map(|p| &p.id)
    }

    /// Whether the working list differs from the last saved snapshot
    pub fn has_unsaved_changes(&self) -> bool {
        self.current_project
            .as_ref()
            .is_some_and(|p| p.objects != self.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{make_object, LightKind, ObjectKind, PrimitiveKind};

    #[test]
    fn test_sky_mode_toggle() {
        assert_eq!(SkyMode::Day.toggled(), SkyMode::Night);
        assert_eq!(SkyMode::Night.toggled(), SkyMode::Day);
    }

    #[test]
    fn test_view_defaults() {
        let view = ViewPrefs::default();
        assert!(view.grid_visible);
        assert_eq!(view.grid_size, 1.0);
        assert_eq!(view.sky_mode, SkyMode::Day);
    }

    #[test]
    fn test_selected_object_requires_live_object() {
        let mut state = EditorState::default();
        state.selected_object_id = Some(ObjectId::new("ghost"));
        assert!(state.selected_object().is_none());

        let cube = make_object(ObjectKind::Primitive(PrimitiveKind::Cube), ObjectId::new("c"));
        state.objects.push(cube.clone());
        state.selected_object_id = Some(cube.id.clone());
        assert_eq!(state.selected_object(), Some(&cube));
    }

    #[test]
    fn test_lights_filter() {
        let mut state = EditorState::default();
        state
            .objects
            .push(make_object(ObjectKind::Primitive(PrimitiveKind::Cube), ObjectId::new("a")));
        state
            .objects
            .push(make_object(ObjectKind::Light(LightKind::Spot), ObjectId::new("b")));
        let lights: Vec<_> = state.lights().map(|o| o.id.as_str()).collect();
        assert_eq!(lights, vec!["b"]);
    }
}
