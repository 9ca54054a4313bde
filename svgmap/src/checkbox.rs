//! Multi-select map: every location toggles independently.
//!
//! The controller owns `selected_location_ids`, an insertion-ordered list of
//! ids. Click or spacebar on a shape flips that id's membership, re-renders,
//! and reports the full selection (resolved to rendered shapes, unresolvable
//! ids dropped) to `on_change`. Every shape stays tab-reachable.

#[cfg(test)]
#[path = "checkbox_test.rs"]
mod checkbox_test;

use std::rc::Rc;

use tracing::debug;

use crate::consts::{CHECKBOX_GROUP_ROLE, CHECKBOX_ROLE, TAB_REACHABLE};
use crate::doc::{Location, MapDescriptor};
use crate::input::{Action, EventKind, LocationEvent};
use crate::render::{self, MapConfig, PerLocation, RenderedMap, RenderedShape, SvgMapProps};

/// Change callback: receives every selected shape, in selection order.
pub type CheckboxChange = Box<dyn FnMut(&[&RenderedShape])>;

/// Construction options for [`CheckboxSvgMap`].
#[derive(Default)]
pub struct CheckboxOptions {
    pub config: MapConfig,
    /// Initially selected ids. Unknown ids are kept but never resolve.
    pub selected_location_ids: Vec<String>,
    pub on_change: Option<CheckboxChange>,
}

impl CheckboxOptions {
    #[must_use]
    pub fn with_selected<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_location_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_on_change(mut self, on_change: impl FnMut(&[&RenderedShape]) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }
}

/// Flip membership of `id`. Returns `true` when the id was added.
pub fn toggle(selected: &mut Vec<String>, id: &str) -> bool {
    match selected.iter().position(|s| s == id) {
        Some(pos) => {
            selected.remove(pos);
            false
        }
        None => {
            selected.push(id.to_owned());
            true
        }
    }
}

/// Multi-select controller over a [`render`]ed map.
pub struct CheckboxSvgMap {
    map: MapDescriptor,
    config: MapConfig,
    selected_location_ids: Vec<String>,
    on_change: Option<CheckboxChange>,
    view: RenderedMap,
    mounted: bool,
}

impl CheckboxSvgMap {
    /// Build the controller and perform the first render.
    #[must_use]
    pub fn new(map: MapDescriptor, options: CheckboxOptions) -> Self {
        let CheckboxOptions { config, selected_location_ids, on_change } = options;
        let view = render::render(&map, &Self::props_for(&map, &config, &selected_location_ids));
        Self { map, config, selected_location_ids, on_change, view, mounted: false }
    }

    /// Finish mounting. Notifies `on_change` once with the initial selection,
    /// empty or not, when a callback is configured. Later calls do nothing.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        debug!(selected = self.selected_location_ids.len(), "checkbox map mounted");
        self.notify();
    }

    /// Renderer configuration for the current state. Click and key-down stay
    /// unbound; [`Self::dispatch`] handles them.
    fn props(&self) -> SvgMapProps {
        Self::props_for(&self.map, &self.config, &self.selected_location_ids)
    }

    fn props_for(map: &MapDescriptor, config: &MapConfig, selected: &[String]) -> SvgMapProps {
        let ids = map.location_ids();
        let selected = selected.to_vec();
        SvgMapProps {
            config: config.clone(),
            role: Some(CHECKBOX_GROUP_ROLE.to_owned()),
            location_role: Some(CHECKBOX_ROLE.to_owned()),
            location_tab_index: Some(PerLocation::Value(TAB_REACHABLE)),
            is_location_selected: Some(Rc::new(move |_: &Location, index: usize| {
                ids.get(index).is_some_and(|id| selected.contains(id))
            })),
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
        self.toggle_location(&event.target)
    }

    fn handle_location_key_down(&mut self, event: &mut LocationEvent) -> Vec<Action> {
        if !event.key.is_some_and(|key| key.is_activation()) {
            return Vec::new();
        }
        event.prevent_default();
        self.toggle_location(&event.target)
    }

    fn toggle_location(&mut self, id: &str) -> Vec<Action> {
        let added = toggle(&mut self.selected_location_ids, id);
        debug!(id, added, selected = self.selected_location_ids.len(), "checkbox toggled");
        self.view = render::render(&self.map, &self.props());
        self.notify();
        vec![Action::RenderNeeded]
    }

    fn notify(&mut self) {
        let Some(on_change) = self.on_change.as_mut() else {
            return;
        };
        let shapes: Vec<&RenderedShape> =
            self.selected_location_ids.iter().filter_map(|id| self.view.find(id)).collect();
        on_change(&shapes);
    }

    /// Selected ids in insertion order, including ids that do not resolve.
    #[must_use]
    pub fn selected_location_ids(&self) -> &[String] {
        &self.selected_location_ids
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
