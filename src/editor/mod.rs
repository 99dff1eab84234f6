//! Scene Editor
//!
//! - `state`: session state (working list, selection, catalog, view prefs)
//! - `store`: the store owning that state and every mutation
//! - `events`: observer registration and change notification
//! - `shortcuts`: keyboard bindings that drive the store

mod events;
pub mod shortcuts;
mod state;
mod store;

pub use events::{Change, Observers, SubscriptionId};
pub use state::*;
pub use store::*;
