//! Single-select map with radio-group keyboard semantics.
//!
//! At most one location is selected. Selecting the already-selected location
//! is a no-op (no toggle-off, no notification). Arrow keys move the selection
//! circularly in map order starting from the focused shape, and a roving tab
//! index keeps exactly one shape tab-reachable: the selected one, or the first
//! location when nothing is selected.
//!
//! The ordered handle list used for navigation and resolution is captured once
//! in [`RadioSvgMap::mount`] and never rebuilt. Locations are not expected to
//! change while mounted.

#[cfg(test)]
#[path = "radio_test.rs"]
mod radio_test;

use std::rc::Rc;

use tracing::debug;

use crate::consts::{RADIO_GROUP_ROLE, RADIO_ROLE, TAB_REACHABLE, TAB_UNREACHABLE};
use crate::doc::{Location, MapDescriptor};
use crate::input::{Action, Direction, EventKind, LocationEvent};
use crate::render::{self, MapConfig, PerLocation, RenderedMap, RenderedShape, ShapeHandle, SvgMapProps};

/// Change callback: receives the newly selected shape.
pub type RadioChange = Box<dyn FnMut(&RenderedShape)>;

/// Construction options for [`RadioSvgMap`].
#[derive(Default)]
pub struct RadioOptions {
    pub config: MapConfig,
    /// Initially selected id.
    pub selected_location_id: Option<String>,
    pub on_change: Option<RadioChange>,
}

impl RadioOptions {
    #[must_use]
    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.selected_location_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_on_change(mut self, on_change: impl FnMut(&RenderedShape) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }
}

/// Index of the neighbor of `current` in a circular list of `len` items.
///
/// An unknown `current` behaves like position -1: `Next` lands on the first
/// item and `Previous` on the second to last. Returns `None` for an empty list.
#[must_use]
pub fn neighbor_index(current: Option<usize>, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = match (current, direction) {
        (Some(i), Direction::Next) => (i + 1) % len,
        (Some(i), Direction::Previous) => (i + len - 1) % len,
        (None, Direction::Next) => 0,
        (None, Direction::Previous) => (2 * len - 2) % len,
    };
    Some(index)
}

/// Single-select controller over a [`render`]ed map.
pub struct RadioSvgMap {
    map: MapDescriptor,
    config: MapConfig,
    selected_location_id: Option<String>,
    on_change: Option<RadioChange>,
    view: RenderedMap,
    locations: Vec<ShapeHandle>,
    focused: Option<ShapeHandle>,
    mounted: bool,
}

impl RadioSvgMap {
    /// Build the controller and perform the first render.
    #[must_use]
    pub fn new(map: MapDescriptor, options: RadioOptions) -> Self {
        let RadioOptions { config, selected_location_id, on_change } = options;
        let view = render::render(&map, &Self::props_for(&map, &config, selected_location_id.as_deref()));
        Self {
            map,
            config,
            selected_location_id,
            on_change,
            view,
            locations: Vec::new(),
            focused: None,
            mounted: false,
        }
    }

    /// Capture the handle list and, when both a callback and a resolvable
    /// initial id exist, notify `on_change` once. Later calls do nothing.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.locations = self.view.handles();
        debug!(locations = self.locations.len(), selected = ?self.selected_location_id, "radio map mounted");

        let Some(selected) = self.selected_location_id.as_deref() else {
            return;
        };
        let Some(on_change) = self.on_change.as_mut() else {
            return;
        };
        if let Some(shape) = self.locations.iter().find(|h| h.id() == selected).and_then(|h| self.view.shape(h)) {
            on_change(shape);
        }
    }

    /// Renderer configuration for the current state. Click and key-down stay
    /// unbound; [`Self::dispatch`] handles them.
    fn props(&self) -> SvgMapProps {
        Self::props_for(&self.map, &self.config, self.selected_location_id.as_deref())
    }

    fn props_for(map: &MapDescriptor, config: &MapConfig, selected: Option<&str>) -> SvgMapProps {
        let selected_index = selected.and_then(|id| map.location_ids().iter().position(|x| x == id));
        let reachable = selected_index.unwrap_or(0);
        SvgMapProps {
            config: config.clone(),
            role: Some(RADIO_GROUP_ROLE.to_owned()),
            location_role: Some(RADIO_ROLE.to_owned()),
            location_tab_index: Some(PerLocation::func(move |_, index| {
                if index == reachable { TAB_REACHABLE } else { TAB_UNREACHABLE }
            })),
            is_location_selected: Some(Rc::new(move |_: &Location, index: usize| selected_index == Some(index))),
            on_location_click: None,
            on_location_key_down: None,
        }
    }

    /// Route one event. This is the only entry point for shape events.
    ///
    /// Click and key-down are interpreted here and never reach the renderer's
    /// multiplexer. Before [`Self::mount`] they are dropped without touching
    /// the event, so no change notification can precede the mount one. Every
    /// other kind goes straight to the host's hooks.
    pub fn dispatch(&mut self, event: &mut LocationEvent) -> Vec<Action> {
        match event.kind {
            EventKind::Click | EventKind::KeyDown if !self.mounted => {
                debug!(kind = ?event.kind, location = %event.target, "event before mount ignored");
                Vec::new()
            }
            EventKind::Click => self.handle_location_click(event),
            EventKind::KeyDown => self.handle_location_key_down(event),
            _ => {
                self.config.hooks.dispatch(event);
                Vec::new()
            }
        }
    }

    fn handle_location_click(&mut self, event: &mut LocationEvent) -> Vec<Action> {
        event.prevent_default();
        self.select_location(&event.target)
    }

    fn handle_location_key_down(&mut self, event: &mut LocationEvent) -> Vec<Action> {
        let Some(key) = event.key else {
            return Vec::new();
        };
        if key.is_activation() {
            event.prevent_default();
            return self.select_location(&event.target);
        }
        let Some(direction) = key.direction() else {
            return Vec::new();
        };
        event.prevent_default();

        let current = self.locations.iter().position(|h| h.id() == event.target);
        let Some(target) = neighbor_index(current, self.locations.len(), direction)
            .and_then(|next| self.locations.get(next))
            .map(|h| h.id().to_owned())
        else {
            return Vec::new();
        };
        self.select_location(&target)
    }

    fn select_location(&mut self, id: &str) -> Vec<Action> {
        let Some(handle) = self.locations.iter().find(|h| h.id() == id).cloned() else {
            debug!(id, "radio select ignored: unknown location");
            return Vec::new();
        };
        if self.selected_location_id.as_deref() == Some(handle.id()) {
            return Vec::new();
        }

        self.selected_location_id = Some(handle.id().to_owned());
        self.view = render::render(&self.map, &self.props());
        self.focused = Some(handle.clone());
        debug!(id, index = handle.index(), "radio selected");

        if let Some(on_change) = self.on_change.as_mut() {
            if let Some(shape) = self.view.shape(&handle) {
                on_change(shape);
            }
        }
        vec![Action::RenderNeeded, Action::Focus(handle)]
    }

    #[must_use]
    pub fn selected_location_id(&self) -> Option<&str> {
        self.selected_location_id.as_deref()
    }

    /// Shape focused by the last selection, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&ShapeHandle> {
        self.focused.as_ref()
    }

    /// Handles captured at mount, in map order. Empty before mount.
    #[must_use]
    pub fn locations(&self) -> &[ShapeHandle] {
        &self.locations
    }

    /// The current rendering.
    #[must_use]
    pub fn view(&self) -> &RenderedMap {
        &self.view
    }

    #[must_use]
    pub fn map(&self) -> &MapDescriptor {
        &self.map
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}
