use std::panic;

use js_sys::Function;
use serde_wasm_bindgen::{from_value, to_value};
use sketchbody::prelude::*;
use wasm_bindgen::prelude::*;

use crate::common::{BodyState, WebBodyState, WebPhysicsOptions, WebPoint};

#[wasm_bindgen(js_name = "setPanicConsoleHook")]
pub fn set_panic_console_hook() {
    panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[wasm_bindgen(typescript_custom_section)]
const _: &str = include_str!("./type.d.ts");

/// The editor's handle on a physics world. Each body keeps the bounds it was
/// created with, `resizeBody` drives their resize notification.
#[wasm_bindgen]
pub struct WebPhysics {
    physics: Physics,
}

fn material_or_default(name: Option<String>) -> Material {
    name.map(|name| Physics::material(&name)).unwrap_or_default()
}

#[wasm_bindgen]
impl WebPhysics {
    #[wasm_bindgen(js_name = "addCircle")]
    pub fn add_circle(
        &mut self,
        center_x: FloatNum,
        center_y: FloatNum,
        radius: FloatNum,
        material: Option<String>,
    ) -> Result<ID, JsError> {
        let bounds = Bounds::new(
            (center_x - radius, center_y - radius),
            (center_x + radius, center_y + radius),
        );
        let body = Physics::new_body(
            ShapeKind::Circle,
            bounds.shared(),
            material_or_default(material),
        )?;
        Ok(self.physics.add_body(body))
    }

    #[wasm_bindgen(js_name = "addBox")]
    pub fn add_box(
        &mut self,
        x: FloatNum,
        y: FloatNum,
        width: FloatNum,
        height: FloatNum,
        material: Option<String>,
    ) -> Result<ID, JsError> {
        let bounds = Bounds::new((x, y), (x + width, y + height));
        let body = Physics::new_body(
            ShapeKind::Box,
            bounds.shared(),
            material_or_default(material),
        )?;
        Ok(self.physics.add_body(body))
    }

    #[wasm_bindgen(js_name = "addPolygon")]
    pub fn add_polygon(
        &mut self,
        vertices: Vec<WebPoint>,
        material: Option<String>,
    ) -> Result<ID, JsError> {
        let vertices = vertices
            .into_iter()
            .map(Point::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let bounds = Bounds::from_polygon(&vertices)?;
        let polygon = Polygon::new(vertices)?;
        let body = Body::new(
            bounds.shared(),
            Shape::Polygon(polygon),
            material_or_default(material),
        );
        Ok(self.physics.add_body(body))
    }

    /// `type_name` is one of `circle`, `box` or `polygon`; unknown names
    /// give a box.
    #[wasm_bindgen(js_name = "addBody")]
    pub fn add_body(
        &mut self,
        type_name: &str,
        min_x: FloatNum,
        min_y: FloatNum,
        max_x: FloatNum,
        max_y: FloatNum,
        material: &str,
    ) -> Result<ID, JsError> {
        let bounds = Bounds::new((min_x, min_y), (max_x, max_y));
        let body = Physics::new_body_named(type_name, bounds.shared(), material)?;
        Ok(self.physics.add_body(body))
    }

    #[wasm_bindgen(js_name = "removeBody")]
    pub fn remove_body(&mut self, id: ID) -> bool {
        self.physics.remove_body(id).is_some()
    }

    #[wasm_bindgen(js_name = "hasBody")]
    pub fn has_body(&self, id: ID) -> bool {
        self.physics.bodies().contains(id)
    }

    /// The body picks the new size up at the start of the next step.
    #[wasm_bindgen(js_name = "resizeBody")]
    pub fn resize_body(
        &mut self,
        id: ID,
        min_x: FloatNum,
        min_y: FloatNum,
        max_x: FloatNum,
        max_y: FloatNum,
    ) -> bool {
        let Some(body) = self.physics.body(id) else {
            return false;
        };
        body.bounds().borrow_mut().resize(min_x, min_y, max_x, max_y);
        true
    }

    #[wasm_bindgen(js_name = "isPointInsideBody")]
    pub fn is_point_inside_body(&self, id: ID, x: FloatNum, y: FloatNum) -> bool {
        self.physics
            .body(id)
            .map(|body| body.bounds().borrow().hit_test(x, y))
            .unwrap_or(false)
    }

    pub fn step(&mut self, t: FloatNum, dt: FloatNum) {
        self.physics.step(t, dt);
    }

    /// Numbers, strings and booleans are accepted. Returns whether the
    /// setting was applied.
    #[wasm_bindgen(js_name = "setSetting")]
    pub fn set_setting(&mut self, name: &str, value: JsValue) -> bool {
        let value = if let Some(number) = value.as_f64() {
            SettingValue::Number(number as FloatNum)
        } else if let Some(text) = value.as_string() {
            SettingValue::Text(text)
        } else if let Some(flag) = value.as_bool() {
            SettingValue::Flag(flag)
        } else {
            return false;
        };
        self.physics.set_setting(name, value)
    }

    #[wasm_bindgen(js_name = "setActive")]
    pub fn set_active(&mut self, id: ID, active: bool) -> bool {
        let Some(body) = self.physics.body_mut(id) else {
            return false;
        };
        if active {
            body.activate();
        } else {
            body.deactivate();
        }
        true
    }

    #[wasm_bindgen(js_name = "setVelocity")]
    pub fn set_velocity(&mut self, id: ID, x: FloatNum, y: FloatNum) -> bool {
        let Some(body) = self.physics.body_mut(id) else {
            return false;
        };
        body.set_velocity(|_| Vector::new(x, y));
        true
    }

    #[wasm_bindgen(js_name = "bodyState")]
    pub fn body_state(&self, id: ID) -> Result<Option<WebBodyState>, JsValue> {
        self.physics
            .body(id)
            .map(|body| -> Result<WebBodyState, JsValue> {
                Ok(to_value(&BodyState::from(body))?.into())
            })
            .transpose()
    }

    #[wasm_bindgen(skip_typescript, js_name = "forEachBody")]
    pub fn for_each_body(&self, callback: &Function) -> Result<(), JsValue> {
        let this = JsValue::null();
        for body in self.physics.bodies().iter() {
            let state = to_value(&BodyState::from(body))?;
            callback.call1(&this, &state)?;
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = "addDistanceConstraint")]
    pub fn add_distance_constraint(
        &mut self,
        body_a: ID,
        body_b: ID,
        distance: FloatNum,
    ) -> Result<ID, JsError> {
        let constraint = Physics::constraint_distance(body_a, body_b, distance);
        Ok(self.physics.add_constraint(constraint)?)
    }

    #[wasm_bindgen(js_name = "removeConstraint")]
    pub fn remove_constraint(&mut self, id: ID) -> bool {
        self.physics.remove_constraint(id).is_some()
    }

    #[wasm_bindgen(getter, js_name = "frameCount")]
    pub fn frame_count(&self) -> u64 {
        self.physics.frame_count()
    }

    #[wasm_bindgen(getter, js_name = "kineticEnergy")]
    pub fn kinetic_energy(&self) -> FloatNum {
        self.physics.total_kinetic_energy()
    }

    #[wasm_bindgen(getter, js_name = "potentialEnergy")]
    pub fn potential_energy(&self) -> FloatNum {
        self.physics.potential_energy()
    }

    #[wasm_bindgen(js_name = "bodyIds")]
    pub fn body_ids(&self) -> Vec<ID> {
        self.physics.bodies().iter().map(|body| body.id()).collect()
    }
}

/// Missing or `undefined` options give the default settings.
#[wasm_bindgen(js_name = "createPhysics")]
pub fn create_physics(options: Option<WebPhysicsOptions>) -> Result<WebPhysics, JsError> {
    let settings = match options {
        Some(options) => from_value::<Settings>(options.into())?,
        None => Settings::default(),
    };
    Ok(WebPhysics {
        physics: Physics::from_options(settings),
    })
}

/// The named material preset, `static` for unknown names.
#[wasm_bindgen]
pub fn material(name: &str) -> Result<JsValue, JsValue> {
    Ok(to_value(&Physics::material(name))?)
}

#[wasm_bindgen(js_name = "materialNames")]
pub fn material_names() -> Vec<JsValue> {
    Material::preset_names().map(JsValue::from).collect()
}
