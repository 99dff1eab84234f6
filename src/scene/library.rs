//! Object library
//!
//! The palette of addable objects with labels, descriptions and single-key
//! shortcuts. Ambient lights are addable through the store but are not
//! offered in the palette.

use super::{Category, EnvironmentKind, LightKind, ObjectKind, PrimitiveKind};

/// One palette entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryItem {
    pub kind: ObjectKind,
    pub label: &'static str,
    pub description: &'static str,
    /// Key that adds this item, shown as a hint
    pub shortcut: Option<char>,
}

const fn item(
    kind: ObjectKind,
    label: &'static str,
    description: &'static str,
    shortcut: Option<char>,
) -> LibraryItem {
    LibraryItem { kind, label, description, shortcut }
}

use ObjectKind::{Environment as Env, Light, Primitive as Prim};

pub const LIBRARY: &[LibraryItem] = &[
    // Primitives
    item(Prim(PrimitiveKind::Cube), "Cube", "Basic cube shape", Some('C')),
    item(Prim(PrimitiveKind::Sphere), "Sphere", "Spherical object", Some('S')),
    item(Prim(PrimitiveKind::Cylinder), "Cylinder", "Cylindrical shape", Some('Y')),
    item(Prim(PrimitiveKind::Plane), "Plane", "Flat plane surface", Some('P')),
    item(Prim(PrimitiveKind::Cone), "Cone", "Conical shape", Some('N')),
    item(Prim(PrimitiveKind::Torus), "Torus", "Donut shape", Some('T')),
    item(Prim(PrimitiveKind::Capsule), "Capsule", "Pill-shaped object", None),
    item(Prim(PrimitiveKind::Pyramid), "Pyramid", "Four-sided pyramid", None),
    // Environment
    item(Env(EnvironmentKind::Tree), "Tree", "Low-poly tree with trunk and leaves", None),
    item(Env(EnvironmentKind::Grass), "Grass Patch", "Textured grass plane", None),
    item(Env(EnvironmentKind::Rock), "Rock", "Natural stone boulder", None),
    item(Env(EnvironmentKind::Water), "Water", "Reflective water surface", None),
    item(Env(EnvironmentKind::Cloud), "Cloud", "Atmospheric cloud", None),
    item(Env(EnvironmentKind::Chair), "Chair", "Simple furniture chair", None),
    item(Env(EnvironmentKind::Table), "Table", "Simple furniture table", None),
    // Lights
    item(Light(LightKind::Directional), "Sun Light", "Directional light source", Some('L')),
    item(Light(LightKind::Point), "Point Light", "Omnidirectional point light", None),
    item(Light(LightKind::Spot), "Spot Light", "Focused spotlight", None),
];

/// Palette entries in `tab` (all categories when `None`) whose label or
/// description contains `search`, case-insensitively
pub fn filter(tab: Option<Category>, search: &str) -> impl Iterator<Item = &'static LibraryItem> {
    let needle = search.to_lowercase();
    LIBRARY.iter().filter(move |item| {
        let matches_tab = tab.map_or(true, |c| item.kind.category() == c);
        let matches_search = item.label.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle);
        matches_tab && matches_search
    })
}

/// Look up the palette entry for a kind
pub fn find(kind: ObjectKind) -> Option<&'static LibraryItem> {
    LIBRARY.iter().find(|item| item.kind == kind)
}
