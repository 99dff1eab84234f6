//! Typed partial updates
//!
//! An `ObjectPatch` names the fields to overwrite; every `None` leaves the
//! object's field alone. Identity and kind are not patchable.

use super::{degrees_to_radians, Color, SceneObject, Vec3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub name: Option<String>,
    pub position: Option<Vec3>,
    /// Radians
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub color: Option<Color>,
    pub metalness: Option<f64>,
    pub roughness: Option<f64>,
    /// `Some(None)` clears the texture
    pub texture: Option<Option<String>>,
    pub intensity: Option<f64>,
    pub cast_shadow: Option<bool>,
}

impl ObjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn rotation(mut self, radians: Vec3) -> Self {
        self.rotation = Some(radians);
        self
    }

    /// Set rotation from degrees (UI boundary); stored as radians
    pub fn rotation_degrees(mut self, degrees: Vec3) -> Self {
        self.rotation = Some(degrees.map(degrees_to_radians));
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn metalness(mut self, metalness: f64) -> Self {
        self.metalness = Some(metalness);
        self
    }

    pub fn roughness(mut self, roughness: f64) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn texture(mut self, texture: Option<String>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn intensity(mut self, intensity: f64) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn cast_shadow(mut self, cast_shadow: bool) -> Self {
        self.cast_shadow = Some(cast_shadow);
        self
    }

    /// True when applying this patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge the named fields into `obj`
    pub fn apply(&self, obj: &mut SceneObject) {
        if let Some(name) = &self.name {
            obj.name = name.clone();
        }
        if let Some(p) = self.position {
            obj.position = p;
        }
        if let Some(r) = self.rotation {
            obj.rotation = r;
        }
        if let Some(s) = self.scale {
            obj.scale = s;
        }
        if let Some(c) = self.color {
            obj.color = c;
        }
        if let Some(m) = self.metalness {
            obj.metalness = m;
        }
        if let Some(r) = self.roughness {
            obj.roughness = r;
        }
        if let Some(t) = &self.texture {
            obj.texture = t.clone();
        }
        if let Some(i) = self.intensity {
            obj.intensity = Some(i);
        }
        if let Some(c) = self.cast_shadow {
            obj.cast_shadow = c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ObjectId;
    use crate::scene::{make_object, ObjectKind, PrimitiveKind};

    fn sphere() -> SceneObject {
        make_object(ObjectKind::Primitive(PrimitiveKind::Sphere), ObjectId::new("s1"))
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let patch = ObjectPatch::new();
        assert!(patch.is_empty());
        let mut obj = sphere();
        patch.apply(&mut obj);
        assert_eq!(obj, sphere());
    }

    #[test]
    fn test_only_named_field_changes() {
        let mut obj = sphere();
        ObjectPatch::new().metalness(0.25).apply(&mut obj);

        let mut expected = sphere();
        expected.metalness = 0.25;
        assert_eq!(obj, expected);
    }

    #[test]
    fn test_permissive_values() {
        let mut obj = sphere();
        ObjectPatch::new()
            .scale([0.0, -2.0, 1.0])
            .metalness(3.0)
            .intensity(-1.0)
            .apply(&mut obj);
        assert_eq!(obj.scale, [0.0, -2.0, 1.0]);
        assert_eq!(obj.metalness, 3.0);
        assert_eq!(obj.intensity, Some(-1.0));
    }

    #[test]
    fn test_rotation_degrees_stored_as_radians() {
        let mut obj = sphere();
        ObjectPatch::new().rotation_degrees([180.0, 0.0, 0.0]).apply(&mut obj);
        assert!((obj.rotation[0] - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_texture_set_and_clear() {
        let mut obj = sphere();
        ObjectPatch::new().texture(Some("bricks".into())).apply(&mut obj);
        assert_eq!(obj.texture.as_deref(), Some("bricks"));
        ObjectPatch::new().texture(None).apply(&mut obj);
        assert_eq!(obj.texture, None);
    }
}
