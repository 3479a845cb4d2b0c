use serde::{Deserialize, Serialize};
use sketchbody_macro_tools::{Builder, Fields};

use crate::{
    collision::{SolverParameters, SolverParametersBuilder},
    math::FloatNum,
};

use super::integrator::Integrator;

/// World configuration. Deserializes from camelCase keys, missing keys take
/// their defaults and unknown keys are ignored.
#[derive(Builder, Fields, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[r]
pub struct Settings {
    /// Velocity multiplier applied once per step.
    #[default = 1.0]
    linear_damping: FloatNum,
    #[default = 1.0]
    rotational_damping: FloatNum,
    /// Strength of the built in downward field.
    #[default = 9.8]
    gravity: FloatNum,
    /// Pairwise attraction is off unless positive.
    #[default = 0.0]
    gravitational_constant: FloatNum,
    #[r(copy)]
    integrator: Integrator,
    #[default = 1.0]
    penetration_percent: FloatNum,
    #[default = 0.02]
    penetration_slop: FloatNum,
    #[default = false]
    skip_separating_contacts: bool,
}

impl Settings {
    pub fn solver_parameters(&self) -> SolverParameters {
        SolverParametersBuilder::new()
            .penetration_percent(self.penetration_percent)
            .penetration_slop(self.penetration_slop)
            .skip_separating_contacts(self.skip_separating_contacts)
            .build()
    }

    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::LinearDamping(value) => self.linear_damping = value,
            Setting::RotationalDamping(value) => self.rotational_damping = value,
            Setting::Gravity(value) => self.gravity = value,
            Setting::GravitationalConstant(value) => self.gravitational_constant = value,
            Setting::Integrator(value) => self.integrator = value,
            Setting::PenetrationPercent(value) => self.penetration_percent = value,
            Setting::PenetrationSlop(value) => self.penetration_slop = value,
            Setting::SkipSeparatingContacts(value) => self.skip_separating_contacts = value,
        }
    }
}

/// Raw value of a live tuning call.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingValue {
    Number(FloatNum),
    Text(String),
    Flag(bool),
}

impl From<FloatNum> for SettingValue {
    fn from(value: FloatNum) -> Self {
        SettingValue::Number(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

/// One typed setting change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Setting {
    LinearDamping(FloatNum),
    RotationalDamping(FloatNum),
    Gravity(FloatNum),
    GravitationalConstant(FloatNum),
    Integrator(Integrator),
    PenetrationPercent(FloatNum),
    PenetrationSlop(FloatNum),
    SkipSeparatingContacts(bool),
}

impl Setting {
    /// `None` for unknown names or a value of the wrong kind.
    pub fn parse(name: &str, value: &SettingValue) -> Option<Self> {
        use SettingValue::*;
        let setting = match (name, value) {
            ("linearDamping", Number(v)) => Setting::LinearDamping(*v),
            ("rotationalDamping", Number(v)) => Setting::RotationalDamping(*v),
            ("gravity", Number(v)) => Setting::Gravity(*v),
            ("gravitationalConstant", Number(v)) => Setting::GravitationalConstant(*v),
            ("integrator", Text(v)) => Setting::Integrator(Integrator::from_name(v)),
            ("penetrationPercent", Number(v)) => Setting::PenetrationPercent(*v),
            ("penetrationSlop", Number(v)) => Setting::PenetrationSlop(*v),
            ("skipSeparatingContacts", Flag(v)) => Setting::SkipSeparatingContacts(*v),
            _ => return None,
        };
        Some(setting)
    }
}
