//! The shape tree: nodes, rings, settings and containment rules

mod node;
mod ring;
mod settings;

pub use node::{
    NodeKind, NodeStyle, OverlayOptions, PlacemarkOptions, PolygonOptions, ShapeNode,
};
pub use ring::{Coordinate, Ring};
pub use settings::{SettingValue, Settings};
