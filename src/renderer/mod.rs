//! KML renderer for generating output from shape trees
//!
//! Nodes are first rendered into an in-memory markup tree, which is then
//! written as text according to a [`KmlConfig`].

pub mod config;
pub mod kml;
pub mod markup;

pub use config::KmlConfig;
pub use kml::{render_node, render_settings, render_styles, KmlSerializer, Namespaces};
pub use markup::Element;
