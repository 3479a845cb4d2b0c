use serde::{Deserialize, Serialize};
use sketchbody_macro_tools::{Builder, Fields};

use crate::math::FloatNum;

/// Surface and bulk properties copied onto a body at creation.
#[derive(Builder, Fields, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[r]
pub struct Material {
    #[default = 1.0]
    density: FloatNum,
    #[default = 0.4]
    restitution: FloatNum,
    #[default = 0.5]
    static_friction: FloatNum,
    #[default = 0.3]
    dynamic_friction: FloatNum,
}

// name, density, restitution, static friction, dynamic friction
const PRESETS: [(&str, FloatNum, FloatNum, FloatNum, FloatNum); 7] = [
    ("rock", 0.6, 0.1, 0.6, 0.4),
    ("wood", 0.3, 0.2, 0.5, 0.3),
    ("metal", 1.2, 0.05, 0.4, 0.2),
    ("bouncyBall", 0.3, 0.8, 0.6, 0.4),
    ("superBall", 0.3, 0.95, 0.7, 0.5),
    ("pillow", 0.1, 0.2, 0.8, 0.6),
    ("static", 0.0, 0.4, 0.5, 0.3),
];

impl Material {
    pub const fn new(
        density: FloatNum,
        restitution: FloatNum,
        static_friction: FloatNum,
        dynamic_friction: FloatNum,
    ) -> Self {
        Self {
            density,
            restitution,
            static_friction,
            dynamic_friction,
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, ..)| *preset == name)
            .map(|&(_, density, restitution, static_friction, dynamic_friction)| {
                Self::new(density, restitution, static_friction, dynamic_friction)
            })
    }

    /// Named preset, `static` when the name is unknown.
    pub fn named(name: &str) -> Self {
        Self::preset(name).unwrap_or_else(|| {
            tracing::warn!(name, "unknown material, using static");
            Self::fixed()
        })
    }

    /// Zero density, never moves.
    pub fn fixed() -> Self {
        let (_, density, restitution, static_friction, dynamic_friction) = PRESETS[6];
        Self::new(density, restitution, static_friction, dynamic_friction)
    }

    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, ..)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let rock = Material::named("rock");
        assert_eq!(rock.density(), 0.6);
        assert_eq!(rock.restitution(), 0.1);

        let super_ball = Material::named("superBall");
        assert_eq!(super_ball.restitution(), 0.95);

        assert_eq!(Material::preset_names().count(), 7);
    }

    #[test]
    fn test_unknown_name_falls_back_to_static() {
        assert_eq!(Material::named("jelly"), Material::named("static"));
        assert_eq!(Material::named("jelly").density(), 0.);
        assert!(Material::preset("jelly").is_none());
    }

    #[test]
    fn test_builder_defaults() {
        let material = MaterialBuilder::new().restitution(1.0).build();
        assert_eq!(material.density(), 1.0);
        assert_eq!(material.restitution(), 1.0);
        assert_eq!(material.static_friction(), 0.5);
    }
}
