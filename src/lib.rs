//! Orvian: scene and project store for a 3D scene editor
//!
//! Users place primitives, environment props and lights into a scene, tweak
//! transforms and materials, and keep named projects in local storage.
//! - `scene`: object model and the defaulting policy
//! - `editor`: the store that owns all session state, plus shortcuts
//! - `project`: project records and JSON export
//! - `storage`: synchronous key-value persistence
//! - `auth`: the signed-in user record
//! - `config`: user settings

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod auth;
pub mod config;
pub mod editor;
pub mod id;
pub mod project;
pub mod scene;
pub mod storage;

pub use editor::{EditorStore, StoreError};
pub use id::{ObjectId, ProjectId};
pub use project::Project;
pub use scene::{ObjectKind, ObjectPatch, SceneObject};
