//! Object defaulting policy
//!
//! Builds a fully populated [`SceneObject`] for a kind: a shared base record,
//! then the light overlay or the per-type environment table. Primitives keep
//! the base record as is.

use super::{Color, EnvironmentKind, ObjectKind, SceneObject, Vec3};
use crate::id::{random_id, ObjectId};

/// Default surface color (violet)
pub const DEFAULT_COLOR: Color = Color::from_hex(0x8b5cf6);
pub const DEFAULT_METALNESS: f64 = 0.5;
pub const DEFAULT_ROUGHNESS: f64 = 0.5;
pub const DEFAULT_LIGHT_INTENSITY: f64 = 1.0;

/// Overrides applied on top of the base record for one environment type
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvironmentDefaults {
    pub color: Option<Color>,
    pub scale: Option<Vec3>,
    pub position: Option<Vec3>,
    pub metalness: Option<f64>,
    pub roughness: Option<f64>,
}

/// The environment table. Values are fixed for visual parity.
pub fn environment_defaults(kind: EnvironmentKind) -> EnvironmentDefaults {
    match kind {
        EnvironmentKind::Tree => EnvironmentDefaults {
            color: Some(Color::from_hex(0x2d5016)),
            scale: Some([1.0, 2.0, 1.0]),
            ..Default::default()
        },
        EnvironmentKind::Grass => EnvironmentDefaults {
            color: Some(Color::from_hex(0x4ade80)),
            scale: Some([5.0, 0.1, 5.0]),
            position: Some([0.0, 0.0, 0.0]),
            ..Default::default()
        },
        EnvironmentKind::Rock => EnvironmentDefaults {
            color: Some(Color::from_hex(0x6b7280)),
            metalness: Some(0.1),
            roughness: Some(0.9),
            ..Default::default()
        },
        EnvironmentKind::Water => EnvironmentDefaults {
            color: Some(Color::from_hex(0x0ea5e9)),
            metalness: Some(0.9),
            roughness: Some(0.1),
            scale: Some([10.0, 0.1, 10.0]),
            ..Default::default()
        },
        EnvironmentKind::Cloud => EnvironmentDefaults {
            color: Some(Color::WHITE),
            metalness: Some(0.0),
            roughness: Some(1.0),
            position: Some([0.0, 5.0, 0.0]),
            ..Default::default()
        },
        EnvironmentKind::Chair => EnvironmentDefaults {
            color: Some(DEFAULT_COLOR),
            ..Default::default()
        },
        EnvironmentKind::Table => EnvironmentDefaults {
            color: Some(Color::from_hex(0x78350f)),
            scale: Some([2.0, 0.1, 1.0]),
            ..Default::default()
        },
    }
}

impl EnvironmentDefaults {
    fn apply(&self, obj: &mut SceneObject) {
        if let Some(c) = self.color {
            obj.color = c;
        }
        if let Some(s) = self.scale {
            obj.scale = s;
        }
        if let Some(p) = self.position {
            obj.position = p;
        }
        if let Some(m) = self.metalness {
            obj.metalness = m;
        }
        if let Some(r) = self.roughness {
            obj.roughness = r;
        }
    }
}

/// Build a new object of the given kind with the given id
pub fn make_object(kind: ObjectKind, id: ObjectId) -> SceneObject {
    let mut obj = SceneObject {
        id,
        name: kind.display_name(),
        kind,
        position: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
        color: DEFAULT_COLOR,
        metalness: DEFAULT_METALNESS,
        roughness: DEFAULT_ROUGHNESS,
        texture: None,
        intensity: None,
        cast_shadow: true,
    };

    match kind {
        ObjectKind::Light(_) => {
            obj.intensity = Some(DEFAULT_LIGHT_INTENSITY);
            obj.color = Color::WHITE;
        }
        ObjectKind::Environment(env) => environment_defaults(env).apply(&mut obj),
        ObjectKind::Primitive(_) => {}
    }

    obj
}

/// Like [`make_object`], drawing a fresh random id
///
/// Outside a store there is no session registry, so uniqueness is only
/// probabilistic here.
pub fn make_object_fresh(kind: ObjectKind) -> SceneObject {
    make_object(kind, ObjectId::new(random_id(&mut rand::thread_rng())))
}
