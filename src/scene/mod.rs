//! Scene data model
//!
//! - `object`: scene objects, the kind/category union, transforms
//! - `color`: canonical `#rrggbb` colors
//! - `defaults`: the object defaulting policy
//! - `patch`: typed partial updates
//! - `library`: the palette of addable objects

mod color;
pub mod defaults;
pub mod library;
mod object;
mod patch;

pub use color::Color;
pub use defaults::{make_object, make_object_fresh};
pub use library::LibraryItem;
pub use object::*;
pub use patch::ObjectPatch;

use thiserror::Error;

/// Errors at the string boundary of the scene model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("unknown object type: {0}")]
    UnknownType(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("type {type_name} belongs to category {expected}, not {actual}")]
    CategoryMismatch {
        type_name: String,
        expected: Category,
        actual: Category,
    },

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
}
