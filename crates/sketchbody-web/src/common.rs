use serde::{Deserialize, Serialize};
use sketchbody::prelude::*;
use wasm_bindgen::prelude::*;

#[derive(Serialize, Deserialize, Clone, Copy, Default, Debug, PartialEq)]
pub struct Tuple2 {
    pub x: FloatNum,
    pub y: FloatNum,
}

impl From<Point> for Tuple2 {
    fn from(value: Point) -> Self {
        Tuple2 {
            x: value.x(),
            y: value.y(),
        }
    }
}

impl From<Vector> for Tuple2 {
    fn from(value: Vector) -> Self {
        Tuple2 {
            x: value.x(),
            y: value.y(),
        }
    }
}

impl From<Tuple2> for Point {
    fn from(value: Tuple2) -> Self {
        Point::new(value.x, value.y)
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "Point")]
    pub type WebPoint;
    #[wasm_bindgen(typescript_type = "PhysicsOptions")]
    pub type WebPhysicsOptions;
    #[wasm_bindgen(typescript_type = "BodyState")]
    pub type WebBodyState;
}

impl TryFrom<WebPoint> for Point {
    type Error = serde_wasm_bindgen::Error;

    fn try_from(value: WebPoint) -> Result<Self, Self::Error> {
        let value: Tuple2 = serde_wasm_bindgen::from_value(value.into())?;
        Ok(value.into())
    }
}

/// Snapshot of one body handed to the editor for drawing.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BodyState {
    pub id: ID,
    pub shape_type: &'static str,
    pub position: Tuple2,
    pub velocity: Tuple2,
    pub angle: FloatNum,
    pub angular_velocity: FloatNum,
    pub min: Tuple2,
    pub max: Tuple2,
    pub radius: FloatNum,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Tuple2>>,
    pub contacts: Vec<Tuple2>,
}

impl From<&Body> for BodyState {
    fn from(body: &Body) -> Self {
        let (min, max) = {
            let bounds = body.bounds().borrow();
            (bounds.min(), bounds.max())
        };

        BodyState {
            id: body.id(),
            shape_type: body.shape().kind().name(),
            position: body.position().into(),
            velocity: body.velocity().into(),
            angle: body.angle(),
            angular_velocity: body.angular_velocity(),
            min: min.into(),
            max: max.into(),
            radius: body.radius(),
            active: body.active(),
            vertices: body
                .shape()
                .as_polygon()
                .map(|polygon| polygon.vertices().iter().copied().map(Tuple2::from).collect()),
            contacts: body.debug_contacts().iter().copied().map(Tuple2::from).collect(),
        }
    }
}
