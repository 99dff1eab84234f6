//! Keyboard Shortcuts
//!
//! Maps key events to editor commands. Commands go through the ordinary
//! store operations, exactly as a panel button would.
//!
//! # Example
//! ```ignore
//! let registry = ShortcutRegistry::with_defaults();
//! let event = KeyEvent::char('c');
//! if let Some(command) = registry.resolve(&event, &ShortcutContext::from_store(&store)) {
//!     command.apply(&mut store)?;
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use super::store::{EditorStore, StoreError};
use crate::id::ObjectId;
use crate::scene::{LightKind, ObjectKind, PrimitiveKind};

/// A physical key, as far as the editor cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character; letters compare case-insensitively
    Char(char),
    Delete,
    Backspace,
    Escape,
}

impl Key {
    fn normalized(self) -> Self {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// A key press with modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key: Option<Key>,
    pub ctrl: bool,
    /// Cmd on Mac
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
    /// The event target is a text input; shortcuts must not fire
    pub in_text_field: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Default::default()
        }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }

    fn any_modifier(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// Which modifiers a shortcut requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifiers {
    /// No modifier may be held
    None,
    /// Ctrl or Cmd must be held; others are ignored
    Command,
    /// Modifiers are ignored
    Any,
}

/// A keyboard shortcut (key + modifier requirement)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl Shortcut {
    /// Create a shortcut with just a key (no modifiers)
    pub fn key(key: Key) -> Self {
        Self {
            key: key.normalized(),
            modifiers: Modifiers::None,
        }
    }

    /// Create a shortcut with Ctrl/Cmd + key
    pub fn command(key: Key) -> Self {
        Self {
            key: key.normalized(),
            modifiers: Modifiers::Command,
        }
    }

    /// Create a shortcut that fires whatever modifiers are held
    pub fn any(key: Key) -> Self {
        Self {
            key: key.normalized(),
            modifiers: Modifiers::Any,
        }
    }

    /// Check if this shortcut matches the event
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let Some(key) = event.key else {
            return false;
        };
        if key.normalized() != self.key {
            return false;
        }
        match self.modifiers {
            Modifiers::None => !event.any_modifier(),
            Modifiers::Command => event.ctrl || event.meta,
            Modifiers::Any => true,
        }
    }

    /// Format shortcut for display (e.g., "Ctrl+D", "⌘D")
    pub fn display(&self) -> String {
        let mut out = String::new();
        if self.modifiers == Modifiers::Command {
            if cfg!(target_os = "macos") {
                out.push('⌘');
            } else {
                out.push_str("Ctrl+");
            }
        }
        match self.key {
            Key::Char(c) => out.push(c.to_ascii_uppercase()),
            Key::Delete => out.push_str("Del"),
            Key::Backspace => out.push_str("Backspace"),
            Key::Escape => out.push_str("Esc"),
        }
        out
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// What a shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Add(ObjectKind),
    DeleteSelected,
    DuplicateSelected,
    ClearSelection,
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added(ObjectId),
    Deleted(ObjectId),
    Duplicated(ObjectId),
    SelectionCleared,
    /// The command needed a selection and there was none
    Skipped,
}

impl EditorCommand {
    /// Run the command against the store
    pub fn apply(&self, store: &mut EditorStore) -> Result<CommandOutcome, StoreError> {
        match self {
            EditorCommand::Add(kind) => Ok(CommandOutcome::Added(store.add_object(*kind))),
            EditorCommand::DeleteSelected => match store.selected_object_id().cloned() {
                Some(id) => {
                    store.delete_object(&id)?;
                    Ok(CommandOutcome::Deleted(id))
                }
                None => Ok(CommandOutcome::Skipped),
            },
            EditorCommand::DuplicateSelected => match store.selected_object_id().cloned() {
                Some(id) => Ok(CommandOutcome::Duplicated(store.duplicate_object(&id)?)),
                None => Ok(CommandOutcome::Skipped),
            },
            EditorCommand::ClearSelection => {
                store.select_object(None);
                Ok(CommandOutcome::SelectionCleared)
            }
        }
    }
}

/// Context for checking whether a shortcut may fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortcutContext {
    pub has_selection: bool,
}

impl ShortcutContext {
    pub fn from_store(store: &EditorStore) -> Self {
        Self {
            has_selection: store.selected_object_id().is_some(),
        }
    }
}

type EnableFn = fn(&ShortcutContext) -> bool;

fn always_enabled(_: &ShortcutContext) -> bool {
    true
}

fn needs_selection(ctx: &ShortcutContext) -> bool {
    ctx.has_selection
}

/// A registered shortcut action
#[derive(Debug, Clone)]
pub struct Action {
    /// Unique identifier (e.g., "add.cube", "edit.delete")
    pub id: &'static str,
    pub label: &'static str,
    pub command: EditorCommand,
    pub shortcuts: Vec<Shortcut>,
    enabled_fn: EnableFn,
}

impl Action {
    pub fn new(id: &'static str, label: &'static str, command: EditorCommand) -> Self {
        Self {
            id,
            label,
            command,
            shortcuts: Vec::new(),
            enabled_fn: always_enabled,
        }
    }

    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcuts.push(shortcut);
        self
    }

    pub fn enabled_when(mut self, f: EnableFn) -> Self {
        self.enabled_fn = f;
        self
    }

    pub fn is_enabled(&self, ctx: &ShortcutContext) -> bool {
        (self.enabled_fn)(ctx)
    }

    /// Label with shortcut hint, e.g. "Duplicate (Ctrl+D)"
    pub fn tooltip(&self) -> String {
        match self.shortcuts.first() {
            Some(s) => format!("{} ({})", self.label, s.display()),
            None => self.label.to_string(),
        }
    }
}

/// Registry of shortcut actions, resolved in registration order
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    actions: Vec<Action>,
    by_shortcut: HashMap<Shortcut, &'static str>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The editor's default bindings
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let add = |id, label, key, kind| {
            Action::new(id, label, EditorCommand::Add(kind)).shortcut(Shortcut::key(Key::Char(key)))
        };

        registry.register(add("add.cube", "Add Cube", 'c', ObjectKind::Primitive(PrimitiveKind::Cube)));
        registry.register(add("add.sphere", "Add Sphere", 's', ObjectKind::Primitive(PrimitiveKind::Sphere)));
        registry.register(add("add.cylinder", "Add Cylinder", 'y', ObjectKind::Primitive(PrimitiveKind::Cylinder)));
        registry.register(add("add.plane", "Add Plane", 'p', ObjectKind::Primitive(PrimitiveKind::Plane)));
        registry.register(add("add.cone", "Add Cone", 'n', ObjectKind::Primitive(PrimitiveKind::Cone)));
        registry.register(add("add.torus", "Add Torus", 't', ObjectKind::Primitive(PrimitiveKind::Torus)));
        registry.register(add("add.sun", "Add Sun Light", 'l', ObjectKind::Light(LightKind::Directional)));

        registry.register(
            Action::new("edit.delete", "Delete", EditorCommand::DeleteSelected)
                .shortcut(Shortcut::any(Key::Delete))
                .shortcut(Shortcut::any(Key::Backspace))
                .enabled_when(needs_selection),
        );
        registry.register(
            Action::new("edit.duplicate", "Duplicate", EditorCommand::DuplicateSelected)
                .shortcut(Shortcut::command(Key::Char('d')))
                .enabled_when(needs_selection),
        );
        registry.register(
            Action::new("edit.deselect", "Deselect", EditorCommand::ClearSelection)
                .shortcut(Shortcut::key(Key::Escape))
                .enabled_when(needs_selection),
        );

        registry
    }

    /// Register an action; a shortcut already bound elsewhere is taken over
    pub fn register(&mut self, action: Action) {
        for shortcut in &action.shortcuts {
            if let Some(previous) = self.by_shortcut.insert(*shortcut, action.id) {
                log::warn!("shortcut {} moved from {} to {}", shortcut, previous, action.id);
                if let Some(old) = self.actions.iter_mut().find(|a| a.id == previous) {
                    old.shortcuts.retain(|s| s != shortcut);
                }
            }
        }
        self.actions.retain(|a| a.id != action.id);
        self.actions.push(action);
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Rebind an action to a single shortcut, refusing conflicts
    pub fn rebind(&mut self, id: &str, shortcut: Shortcut) -> Result<(), &'static str> {
        let Some(action) = self.actions.iter_mut().find(|a| a.id == id) else {
            return Err("Action not found");
        };
        if let Some(existing) = self.by_shortcut.get(&shortcut) {
            if *existing != action.id {
                return Err("Shortcut already in use");
            }
        }
        for old in action.shortcuts.drain(..) {
            self.by_shortcut.remove(&old);
        }
        action.shortcuts.push(shortcut);
        self.by_shortcut.insert(shortcut, action.id);
        Ok(())
    }

    /// Find the command for a key event, if any action is bound and enabled
    pub fn resolve(&self, event: &KeyEvent, ctx: &ShortcutContext) -> Option<EditorCommand> {
        if event.in_text_field {
            return None;
        }
        self.actions
            .iter()
            .filter(|a| a.is_enabled(ctx))
            .find(|a| a.shortcuts.iter().any(|s| s.matches(event)))
            .map(|a| a.command)
    }

    /// Resolve and apply in one step
    pub fn handle(
        &self,
        store: &mut EditorStore,
        event: &KeyEvent,
    ) -> Option<Result<CommandOutcome, StoreError>> {
        let command = self.resolve(event, &ShortcutContext::from_store(store))?;
        Some(command.apply(store))
    }
}
