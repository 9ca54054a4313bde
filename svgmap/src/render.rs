//! Shape renderer: maps a `MapDescriptor` to a tree of interactive shapes.
//!
//! This module is stateless. [`render`] receives read-only views of the map
//! and of the configuration and produces a [`RenderedMap`]. It does not
//! filter, reorder or deduplicate locations, and identical inputs always
//! produce identical output.
//!
//! Events are multiplexed, not interpreted: [`SvgMapProps::dispatch`] hands
//! each event to the single handler configured for its kind, the same handler
//! for every shape. Selection semantics live in the controllers built on top
//! (`checkbox`, `radio`).

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::consts::{DEFAULT_CLASS_NAME, DEFAULT_LOCATION_CLASS_NAME, DEFAULT_ROLE, DEFAULT_TAB_INDEX};
use crate::doc::{Location, MapDescriptor};
use crate::input::{EventKind, LocationEvent};

/// Event callback bound on every shape.
pub type Handler = Rc<dyn Fn(&mut LocationEvent)>;

/// Per-location computed value: called with the location and its index in map order.
pub type LocationFn<T> = Rc<dyn Fn(&Location, usize) -> T>;

/// A per-shape setting given either as a constant or as a function of the location.
#[derive(Clone)]
pub enum PerLocation<T> {
    Value(T),
    Func(LocationFn<T>),
}

impl<T: Clone> PerLocation<T> {
    /// Wrap a closure.
    pub fn func(f: impl Fn(&Location, usize) -> T + 'static) -> Self {
        Self::Func(Rc::new(f))
    }

    /// Resolve the setting for one location.
    #[must_use]
    pub fn resolve(&self, location: &Location, index: usize) -> T {
        match self {
            Self::Value(value) => value.clone(),
            Self::Func(f) => f(location, index),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PerLocation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<&str> for PerLocation<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl From<String> for PerLocation<String> {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<i32> for PerLocation<i32> {
    fn from(value: i32) -> Self {
        Self::Value(value)
    }
}

/// Pointer and focus callbacks passed straight through to every shape.
#[derive(Clone, Default)]
pub struct LocationHooks {
    pub on_mouse_over: Option<Handler>,
    pub on_mouse_out: Option<Handler>,
    pub on_mouse_move: Option<Handler>,
    pub on_focus: Option<Handler>,
    pub on_blur: Option<Handler>,
}

impl LocationHooks {
    /// The hook configured for `kind`. Click and key-down are never hooks.
    #[must_use]
    pub fn get(&self, kind: EventKind) -> Option<&Handler> {
        match kind {
            EventKind::MouseOver => self.on_mouse_over.as_ref(),
            EventKind::MouseOut => self.on_mouse_out.as_ref(),
            EventKind::MouseMove => self.on_mouse_move.as_ref(),
            EventKind::Focus => self.on_focus.as_ref(),
            EventKind::Blur => self.on_blur.as_ref(),
            EventKind::Click | EventKind::KeyDown => None,
        }
    }

    /// Call the hook for the event's kind, if any. Returns whether one ran.
    pub fn dispatch(&self, event: &mut LocationEvent) -> bool {
        match self.get(event.kind) {
            Some(hook) => {
                hook(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for LocationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<EventKind> = EventKind::ALL.into_iter().filter(|kind| self.get(*kind).is_some()).collect();
        f.debug_struct("LocationHooks").field("bound", &bound).finish()
    }
}

/// Host-facing configuration shared by the renderer and both controllers.
#[derive(Clone, Default)]
pub struct MapConfig {
    /// Container class. Defaults to `svg-map`.
    pub class_name: Option<String>,
    /// Accessible name of the container; falls back to the map's `label`.
    pub label: Option<String>,
    /// Per-shape class. Defaults to `svg-map__location`.
    pub location_class_name: Option<PerLocation<String>>,
    /// Per-shape accessible label. Defaults to the location name.
    pub location_aria_label: Option<LocationFn<String>>,
    pub hooks: LocationHooks,
    /// Opaque markup rendered before the shapes.
    pub children_before: Option<String>,
    /// Opaque markup rendered after the shapes.
    pub children_after: Option<String>,
}

impl fmt::Debug for MapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapConfig")
            .field("class_name", &self.class_name)
            .field("label", &self.label)
            .field("location_class_name", &self.location_class_name)
            .field("location_aria_label", &self.location_aria_label.as_ref().map(|_| ".."))
            .field("hooks", &self.hooks)
            .field("children_before", &self.children_before)
            .field("children_after", &self.children_after)
            .finish()
    }
}

/// Full renderer configuration: the shared config plus the controller-facing hooks.
#[derive(Clone, Default)]
pub struct SvgMapProps {
    pub config: MapConfig,
    /// Container role. Defaults to `none`.
    pub role: Option<String>,
    /// Per-shape role. Defaults to `none`.
    pub location_role: Option<String>,
    /// Per-shape tab index. Defaults to `0`.
    pub location_tab_index: Option<PerLocation<i32>>,
    /// Selected-state predicate. Defaults to always false.
    pub is_location_selected: Option<LocationFn<bool>>,
    pub on_location_click: Option<Handler>,
    pub on_location_key_down: Option<Handler>,
}

impl SvgMapProps {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// The handler bound for `kind`, if configured.
    #[must_use]
    pub fn handler(&self, kind: EventKind) -> Option<&Handler> {
        match kind {
            EventKind::Click => self.on_location_click.as_ref(),
            EventKind::KeyDown => self.on_location_key_down.as_ref(),
            _ => self.config.hooks.get(kind),
        }
    }

    /// Event kinds that have a handler, in binding order.
    #[must_use]
    pub fn bound_events(&self) -> Vec<EventKind> {
        EventKind::ALL.into_iter().filter(|kind| self.handler(*kind).is_some()).collect()
    }

    /// Hand the event to the handler configured for its kind.
    ///
    /// Returns whether a handler ran. No interpretation happens here.
    pub fn dispatch(&self, event: &mut LocationEvent) -> bool {
        match self.handler(event.kind) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for SvgMapProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgMapProps")
            .field("config", &self.config)
            .field("role", &self.role)
            .field("location_role", &self.location_role)
            .field("location_tab_index", &self.location_tab_index)
            .field("bound_events", &self.bound_events())
            .finish_non_exhaustive()
    }
}

/// Addressable reference to one rendered shape.
///
/// Only [`RenderedMap::resolve`] creates handles, so a handle always names a
/// shape that existed in the rendering it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShapeHandle {
    id: String,
    index: usize,
}

impl ShapeHandle {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position of the shape in map order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One rendered shape with every attribute resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedShape {
    pub id: String,
    pub index: usize,
    pub name: Option<String>,
    pub path: String,
    pub class_name: String,
    pub tab_index: i32,
    pub role: String,
    pub aria_label: Option<String>,
    pub aria_checked: bool,
}

impl RenderedShape {
    #[must_use]
    pub fn handle(&self) -> ShapeHandle {
        ShapeHandle { id: self.id.clone(), index: self.index }
    }
}

/// The rendered container and its shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMap {
    pub view_box: String,
    pub class_name: String,
    pub role: String,
    pub aria_label: Option<String>,
    pub children_before: Option<String>,
    pub children_after: Option<String>,
    pub shapes: Vec<RenderedShape>,
    #[serde(skip)]
    lookup: HashMap<String, usize>,
}

impl RenderedMap {
    /// Resolve an id to a handle. With duplicate ids the first shape wins.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<ShapeHandle> {
        self.lookup.get(id).map(|&index| ShapeHandle { id: id.to_owned(), index })
    }

    /// The shape a handle points to, if it belongs to this rendering.
    #[must_use]
    pub fn shape(&self, handle: &ShapeHandle) -> Option<&RenderedShape> {
        self.shapes.get(handle.index).filter(|shape| shape.id == handle.id)
    }

    /// Resolve an id straight to its rendered shape.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&RenderedShape> {
        self.lookup.get(id).and_then(|&index| self.shapes.get(index))
    }

    /// Handles for every shape, in map order.
    #[must_use]
    pub fn handles(&self) -> Vec<ShapeHandle> {
        self.shapes.iter().map(RenderedShape::handle).collect()
    }

    /// Serialize to SVG markup.
    ///
    /// Slot content is emitted verbatim; every attribute value is escaped.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\"");
        push_attr(&mut out, "viewBox", &self.view_box);
        push_attr(&mut out, "class", &self.class_name);
        push_attr(&mut out, "role", &self.role);
        if let Some(label) = &self.aria_label {
            push_attr(&mut out, "aria-label", label);
        }
        out.push('>');

        if let Some(before) = &self.children_before {
            out.push_str(before);
        }
        for shape in &self.shapes {
            out.push_str("<path");
            push_attr(&mut out, "id", &shape.id);
            if let Some(name) = &shape.name {
                push_attr(&mut out, "name", name);
            }
            push_attr(&mut out, "d", &shape.path);
            push_attr(&mut out, "class", &shape.class_name);
            push_attr(&mut out, "tabindex", &shape.tab_index.to_string());
            push_attr(&mut out, "role", &shape.role);
            if let Some(label) = &shape.aria_label {
                push_attr(&mut out, "aria-label", label);
            }
            push_attr(&mut out, "aria-checked", if shape.aria_checked { "true" } else { "false" });
            out.push_str("/>");
        }
        if let Some(after) = &self.children_after {
            out.push_str(after);
        }

        out.push_str("</svg>");
        out
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Render the map: one shape per location, in map order.
#[must_use]
pub fn render(map: &MapDescriptor, props: &SvgMapProps) -> RenderedMap {
    let config = &props.config;
    let ids = map.location_ids();
    let location_role = props.location_role.as_deref().unwrap_or(DEFAULT_ROLE);

    let mut lookup = HashMap::with_capacity(ids.len());
    let shapes: Vec<RenderedShape> = map
        .locations
        .iter()
        .zip(ids)
        .enumerate()
        .map(|(index, (location, id))| {
            lookup.entry(id.clone()).or_insert(index);
            RenderedShape {
                id,
                index,
                name: location.name.clone(),
                path: location.path.clone(),
                class_name: config
                    .location_class_name
                    .as_ref()
                    .map_or_else(|| DEFAULT_LOCATION_CLASS_NAME.to_owned(), |c| c.resolve(location, index)),
                tab_index: props
                    .location_tab_index
                    .as_ref()
                    .map_or(DEFAULT_TAB_INDEX, |t| t.resolve(location, index)),
                role: location_role.to_owned(),
                aria_label: match &config.location_aria_label {
                    Some(label) => Some(label(location, index)),
                    None => location.name.clone(),
                },
                aria_checked: props.is_location_selected.as_ref().is_some_and(|selected| selected(location, index)),
            }
        })
        .collect();

    RenderedMap {
        view_box: map.view_box.clone(),
        class_name: config.class_name.clone().unwrap_or_else(|| DEFAULT_CLASS_NAME.to_owned()),
        role: props.role.clone().unwrap_or_else(|| DEFAULT_ROLE.to_owned()),
        aria_label: config.label.clone().or_else(|| map.label.clone()),
        children_before: config.children_before.clone(),
        children_after: config.children_after.clone(),
        shapes,
        lookup,
    }
}
