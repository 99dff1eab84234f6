//! Scene/Project Store
//!
//! Single source of truth for the project catalog, the working object list,
//! the selection and the view preferences. Every operation either applies
//! completely (and notifies observers once) or returns an error and leaves
//! state untouched.
//!
//! Persisting operations write the catalog *before* committing memory, so a
//! failed write never leaves the two disagreeing. Object edits only touch
//! memory; `save_project` is the one path that reconciles the working list
//! into storage.

use thiserror::Error;

use super::events::{Change, Observers, SubscriptionId};
use super::state::{EditorState, ViewPrefs};
use crate::id::{IdGenerator, ObjectId, ProjectId};
use crate::project::{now_millis, Project, ProjectExport};
use crate::scene::{
    make_object, Category, ObjectKind, ObjectPatch, SceneError, SceneObject,
};
use crate::storage::{KeyValueStore, StorageError, PROJECTS_KEY};

/// Suffix appended to the name of a duplicated object
pub const COPY_SUFFIX: &str = " Copy";

/// Store operation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("no project is open")]
    NoCurrentProject,

    /// Stored catalog exists but cannot be decoded
    #[error("stored project catalog is corrupt: {0}")]
    CorruptCatalog(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// The editor store
#[derive(Debug)]
pub struct EditorStore {
    state: EditorState,
    storage: Box<dyn KeyValueStore>,
    ids: IdGenerator,
    observers: Observers,
}

impl EditorStore {
    /// Create a store with default view preferences and an empty catalog
    ///
    /// Call [`EditorStore::load_projects_from_storage`] to pick up the
    /// persisted catalog.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_view(storage, ViewPrefs::default())
    }

    pub fn with_view(storage: Box<dyn KeyValueStore>, view: ViewPrefs) -> Self {
        Self {
            state: EditorState::new(view),
            storage,
            ids: IdGenerator::new(),
            observers: Observers::default(),
        }
    }

    /// Replace the identifier source (deterministic ids in tests)
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Observers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&Change, &EditorState) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self, change: Change) {
        log::debug!("store change: {:?}", change);
        self.observers.notify(&change, &self.state);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.state.objects
    }

    pub fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.state.object(id)
    }

    pub fn selected_object_id(&self) -> Option<&ObjectId> {
        self.state.selected_object_id.as_ref()
    }

    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.state.selected_object()
    }

    pub fn lights(&self) -> impl Iterator<Item = &SceneObject> {
        self.state.lights()
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.state.current_project.as_ref()
    }

    pub fn view(&self) -> &ViewPrefs {
        &self.state.view
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog persistence
    // ─────────────────────────────────────────────────────────────────────────

    fn persist_catalog(&mut self, projects: &[Project]) -> Result<(), StoreError> {
        let json = serde_json::to_string(projects).map_err(StorageError::from)?;
        self.storage.set(PROJECTS_KEY, &json).map_err(|e| {
            log::error!("failed to persist project catalog: {}", e);
            StoreError::from(e)
        })
    }

    /// Read the catalog from storage
    ///
    /// A missing key yields an empty catalog. Corrupt data and storage
    /// failures are reported and leave the in-memory catalog as it was.
    pub fn load_projects_from_storage(&mut self) -> Result<usize, StoreError> {
        let projects = match self.storage.get(PROJECTS_KEY)? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<Project>>(&raw).map_err(|e| {
                log::warn!("project catalog in storage is corrupt: {}", e);
                StoreError::CorruptCatalog(e.to_string())
            })?,
        };

        for project in &projects {
            self.ids.observe(project.id.as_str());
            for obj in &project.objects {
                self.ids.observe(obj.id.as_str());
            }
        }

        let count = projects.len();
        self.state.projects = projects;
        log::info!("loaded {} project(s) from storage", count);
        self.notify(Change::CatalogLoaded { count });
        Ok(count)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Project lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a project, persist the catalog and open it
    ///
    /// Names are not validated; an empty name is allowed.
    pub fn create_project(&mut self, name: &str) -> Result<ProjectId, StoreError> {
        let project = Project::new(self.ids.project_id(), name);
        let id = project.id.clone();

        let mut projects = self.state.projects.clone();
        projects.push(project.clone());
        self.persist_catalog(&projects)?;

        self.state.projects = projects;
        self.state.current_project = Some(project);
        self.state.objects = Vec::new();
        self.state.selected_object_id = None;

        log::info!("created project {:?} ({})", name, id);
        self.notify(Change::ProjectCreated(id.clone()));
        Ok(id)
    }

    /// Open a project from the catalog, replacing the working list
    pub fn load_project(&mut self, id: &ProjectId) -> Result<(), StoreError> {
        let project = self
            .state
            .project(id)
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound(id.clone()))?;

        self.state.objects = project.objects.clone();
        self.state.current_project = Some(project);
        self.state.selected_object_id = None;

        log::info!("opened project {}", id);
        self.notify(Change::ProjectLoaded(id.clone()));
        Ok(())
    }

    /// Write the working list into the current project and persist
    ///
    /// Returns `Ok(false)` when no project is open.
    pub fn save_project(&mut self) -> Result<bool, StoreError> {
        let Some(current) = &self.state.current_project else {
            return Ok(false);
        };

        let at = now_millis().max(current.updated_at);
        let saved = current.saved_with(self.state.objects.clone(), at);

        let mut found = false;
        let projects: Vec<Project> = self
            .state
            .projects
            .iter()
            .map(|p| {
                if p.id == saved.id {
                    found = true;
                    saved.clone()
                } else {
                    p.clone()
                }
            })
            .collect();
        if !found {
            log::warn!("current project {} is not in the catalog", saved.id);
        }
        self.persist_catalog(&projects)?;

        let id = saved.id.clone();
        self.state.projects = projects;
        self.state.current_project = Some(saved);

        log::info!("saved project {} ({} objects)", id, self.state.objects.len());
        self.notify(Change::ProjectSaved(id));
        Ok(true)
    }

    /// Remove a project from the catalog and persist
    ///
    /// Deleting the open project also closes it.
    pub fn delete_project(&mut self, id: &ProjectId) -> Result<(), StoreError> {
        if self.state.project(id).is_none() {
            return Err(StoreError::ProjectNotFound(id.clone()));
        }

        let projects: Vec<Project> = self
            .state
            .projects
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect();
        self.persist_catalog(&projects)?;

        self.state.projects = projects;
        let was_current = self.state.current_project_id() == Some(id);
        if was_current {
            self.state.current_project = None;
            self.state.objects = Vec::new();
            self.state.selected_object_id = None;
        }

        log::info!("deleted project {}", id);
        self.notify(Change::ProjectDeleted {
            id: id.clone(),
            was_current,
        });
        Ok(())
    }

    /// JSON export of the current project with the live working list
    pub fn export_current(&self) -> Result<ProjectExport, StoreError> {
        let project = self
            .state
            .current_project
            .as_ref()
            .ok_or(StoreError::NoCurrentProject)?;
        Ok(ProjectExport::new(project, &self.state.objects))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Objects
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a defaulted object to the working list (not persisted)
    pub fn add_object(&mut self, kind: ObjectKind) -> ObjectId {
        let obj = make_object(kind, self.ids.object_id());
        let id = obj.id.clone();
        self.state.objects.push(obj);
        self.notify(Change::ObjectAdded(id.clone()));
        id
    }

    /// [`EditorStore::add_object`] from a `(type, category)` string pair
    pub fn add_object_by_name(
        &mut self,
        type_name: &str,
        category: &str,
    ) -> Result<ObjectId, StoreError> {
        let category: Category = category.parse()?;
        let kind = ObjectKind::from_parts(type_name, category)?;
        Ok(self.add_object(kind))
    }

    /// Set the selection. The id is not checked against the working list.
    pub fn select_object(&mut self, id: Option<ObjectId>) {
        self.state.selected_object_id = id.clone();
        self.notify(Change::SelectionChanged(id));
    }

    /// Merge `patch` into the matching object
    pub fn update_object(&mut self, id: &ObjectId, patch: &ObjectPatch) -> Result<(), StoreError> {
        let obj = self
            .state
            .objects
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| StoreError::ObjectNotFound(id.clone()))?;
        patch.apply(obj);
        self.notify(Change::ObjectUpdated(id.clone()));
        Ok(())
    }

    /// Remove an object, clearing the selection if it pointed at it
    pub fn delete_object(&mut self, id: &ObjectId) -> Result<SceneObject, StoreError> {
        let index = self
            .state
            .objects
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| StoreError::ObjectNotFound(id.clone()))?;

        let removed = self.state.objects.remove(index);
        let was_selected = self.state.selected_object_id.as_ref() == Some(id);
        if was_selected {
            self.state.selected_object_id = None;
        }

        self.notify(Change::ObjectDeleted {
            id: id.clone(),
            was_selected,
        });
        Ok(removed)
    }

    /// Append a copy shifted one unit along x. The selection stays put.
    pub fn duplicate_object(&mut self, id: &ObjectId) -> Result<ObjectId, StoreError> {
        let source = self
            .state
            .object(id)
            .ok_or_else(|| StoreError::ObjectNotFound(id.clone()))?;

        let mut copy = source.clone();
        copy.id = self.ids.object_id();
        copy.name.push_str(COPY_SUFFIX);
        copy.position[0] += 1.0;

        let copy_id = copy.id.clone();
        self.state.objects.push(copy);
        self.notify(Change::ObjectDuplicated {
            source: id.clone(),
            copy: copy_id.clone(),
        });
        Ok(copy_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View preferences
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_grid(&mut self) {
        self.state.view.grid_visible = !self.state.view.grid_visible;
        self.notify(Change::ViewChanged);
    }

    /// Any value is accepted, including zero and negatives
    pub fn set_grid_size(&mut self, size: f64) {
        self.state.view.grid_size = size;
        self.notify(Change::ViewChanged);
    }

    pub fn toggle_sky_mode(&mut self) {
        self.state.view.sky_mode = self.state.view.sky_mode.toggled();
        self.notify(Change::ViewChanged);
    }
}
