//! Scene objects and their kinds
//!
//! The object kind is a tagged union whose variant *is* the category, so a
//! primitive can never carry the light category. On the wire the kind is
//! flattened into the two string fields `type` and `category`; a mismatched
//! pair is rejected when decoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Color, SceneError};
use crate::id::ObjectId;

/// Three-component vector (position, rotation in radians, scale)
pub type Vec3 = [f64; 3];

/// Object category, governs defaulting and rendering treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Primitive,
    Environment,
    Light,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Primitive, Category::Environment, Category::Light];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Primitive => "primitive",
            Category::Environment => "environment",
            Category::Light => "light",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| SceneError::UnknownCategory(s.to_string()))
    }
}

/// Basic geometric shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cylinder,
    Plane,
    Cone,
    Torus,
    Capsule,
    Pyramid,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Cube,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Plane,
        PrimitiveKind::Cone,
        PrimitiveKind::Torus,
        PrimitiveKind::Capsule,
        PrimitiveKind::Pyramid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "cube",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::Torus => "torus",
            PrimitiveKind::Capsule => "capsule",
            PrimitiveKind::Pyramid => "pyramid",
        }
    }
}

/// Environment props (vegetation, terrain, furniture)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentKind {
    Tree,
    Grass,
    Rock,
    Water,
    Cloud,
    Chair,
    Table,
}

impl EnvironmentKind {
    pub const ALL: [EnvironmentKind; 7] = [
        EnvironmentKind::Tree,
        EnvironmentKind::Grass,
        EnvironmentKind::Rock,
        EnvironmentKind::Water,
        EnvironmentKind::Cloud,
        EnvironmentKind::Chair,
        EnvironmentKind::Table,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnvironmentKind::Tree => "tree",
            EnvironmentKind::Grass => "grass",
            EnvironmentKind::Rock => "rock",
            EnvironmentKind::Water => "water",
            EnvironmentKind::Cloud => "cloud",
            EnvironmentKind::Chair => "chair",
            EnvironmentKind::Table => "table",
        }
    }
}

/// Light sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
    Ambient,
}

impl LightKind {
    pub const ALL: [LightKind; 4] = [
        LightKind::Directional,
        LightKind::Point,
        LightKind::Spot,
        LightKind::Ambient,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LightKind::Directional => "directional",
            LightKind::Point => "point",
            LightKind::Spot => "spot",
            LightKind::Ambient => "ambient",
        }
    }
}

/// What an object is. The variant determines the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawKind", into = "RawKind")]
pub enum ObjectKind {
    Primitive(PrimitiveKind),
    Environment(EnvironmentKind),
    Light(LightKind),
}

impl ObjectKind {
    pub fn category(&self) -> Category {
        match self {
            ObjectKind::Primitive(_) => Category::Primitive,
            ObjectKind::Environment(_) => Category::Environment,
            ObjectKind::Light(_) => Category::Light,
        }
    }

    /// Lower case type name (`"cube"`, `"water"`, `"spot"`)
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Primitive(k) => k.name(),
            ObjectKind::Environment(k) => k.name(),
            ObjectKind::Light(k) => k.name(),
        }
    }

    /// Default display name: the type name with its first letter capitalized
    pub fn display_name(&self) -> String {
        let name = self.type_name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Resolve a bare type name. Type names are unique across categories.
    pub fn from_type_name(name: &str) -> Result<Self, SceneError> {
        if let Some(k) = PrimitiveKind::ALL.into_iter().find(|k| k.name() == name) {
            return Ok(ObjectKind::Primitive(k));
        }
        if let Some(k) = EnvironmentKind::ALL.into_iter().find(|k| k.name() == name) {
            return Ok(ObjectKind::Environment(k));
        }
        if let Some(k) = LightKind::ALL.into_iter().find(|k| k.name() == name) {
            return Ok(ObjectKind::Light(k));
        }
        Err(SceneError::UnknownType(name.to_string()))
    }

    /// Resolve a `(type, category)` pair, rejecting inconsistent pairs
    pub fn from_parts(type_name: &str, category: Category) -> Result<Self, SceneError> {
        let kind = Self::from_type_name(type_name)?;
        if kind.category() != category {
            return Err(SceneError::CategoryMismatch {
                type_name: type_name.to_string(),
                expected: kind.category(),
                actual: category,
            });
        }
        Ok(kind)
    }

    /// Every kind, in palette order
    pub fn all() -> impl Iterator<Item = ObjectKind> {
        PrimitiveKind::ALL
            .into_iter()
            .map(ObjectKind::Primitive)
            .chain(EnvironmentKind::ALL.into_iter().map(ObjectKind::Environment))
            .chain(LightKind::ALL.into_iter().map(ObjectKind::Light))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category(), self.type_name())
    }
}

/// Wire form of [`ObjectKind`]
#[derive(Serialize, Deserialize)]
struct RawKind {
    #[serde(rename = "type")]
    type_name: String,
    category: Category,
}

impl TryFrom<RawKind> for ObjectKind {
    type Error = SceneError;

    fn try_from(raw: RawKind) -> Result<Self, Self::Error> {
        ObjectKind::from_parts(&raw.type_name, raw.category)
    }
}

impl From<ObjectKind> for RawKind {
    fn from(kind: ObjectKind) -> Self {
        RawKind {
            type_name: kind.type_name().to_string(),
            category: kind.category(),
        }
    }
}

fn default_cast_shadow() -> bool {
    true
}

/// One placed entity in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(flatten)]
    pub kind: ObjectKind,
    pub position: Vec3,
    /// Radians
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: Color,
    pub metalness: f64,
    pub roughness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// Only meaningful for lights; `None` reads as 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(default = "default_cast_shadow")]
    pub cast_shadow: bool,
}

impl SceneObject {
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn is_light(&self) -> bool {
        self.category() == Category::Light
    }

    /// Light intensity with the implicit default applied
    pub fn effective_intensity(&self) -> f64 {
        self.intensity.unwrap_or(1.0)
    }

    /// Rotation converted to degrees, for display
    pub fn rotation_degrees(&self) -> Vec3 {
        self.rotation.map(radians_to_degrees)
    }
}

pub fn degrees_to_radians(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn radians_to_degrees(rad: f64) -> f64 {
    rad.to_degrees()
}
