//! Selectable SVG location maps: a stateless shape renderer plus single- and
//! multi-select controllers with full pointer and keyboard handling.
//!
//! The crate is UI-framework agnostic. A host loads a [`doc::MapDescriptor`],
//! builds a controller, forwards raw shape events to it as
//! [`input::LocationEvent`]s, and redraws from the controller's
//! [`render::RenderedMap`] whenever an [`input::Action`] asks it to.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`doc`] | Map and location model, JSON loading, positional ids |
//! | [`render`] | Stateless shape renderer, event multiplexing, SVG markup |
//! | [`checkbox`] | Multi-select controller (toggle semantics) |
//! | [`radio`] | Single-select controller (roving tab index, arrow navigation) |
//! | [`input`] | Event kinds, key codes, host actions |
//! | [`consts`] | Default classes, roles and tab indices |

pub mod checkbox;
pub mod consts;
pub mod doc;
pub mod input;
pub mod radio;
pub mod render;

pub use checkbox::{CheckboxOptions, CheckboxSvgMap};
pub use doc::{Location, MapDescriptor, MapError};
pub use input::{Action, EventKind, Key, LocationEvent};
pub use radio::{RadioOptions, RadioSvgMap};
pub use render::{MapConfig, PerLocation, RenderedMap, RenderedShape, ShapeHandle, SvgMapProps, render};
