//! Shared constants for the svgmap crate.

// ── Renderer defaults ───────────────────────────────────────────

/// Container class applied when no `class_name` is configured.
pub const DEFAULT_CLASS_NAME: &str = "svg-map";

/// Per-shape class applied when no `location_class_name` is configured.
pub const DEFAULT_LOCATION_CLASS_NAME: &str = "svg-map__location";

/// ARIA role used for the container and for shapes when none is configured.
///
/// Keeps shapes inert to assistive tech unless a controller opts them in.
pub const DEFAULT_ROLE: &str = "none";

/// Tab index applied to every shape when none is configured.
pub const DEFAULT_TAB_INDEX: i32 = 0;

// ── Roving tab index ────────────────────────────────────────────

/// Tab index of a shape that is reachable with the Tab key.
pub const TAB_REACHABLE: i32 = 0;

/// Tab index of a shape that is focusable only programmatically.
pub const TAB_UNREACHABLE: i32 = -1;

// ── Roles ───────────────────────────────────────────────────────

/// Container role for the multi-select map.
pub const CHECKBOX_GROUP_ROLE: &str = "group";

/// Shape role for the multi-select map.
pub const CHECKBOX_ROLE: &str = "checkbox";

/// Container role for the single-select map.
pub const RADIO_GROUP_ROLE: &str = "radiogroup";

/// Shape role for the single-select map.
pub const RADIO_ROLE: &str = "radio";

// ── Ids ─────────────────────────────────────────────────────────

/// Prefix of the positional id synthesized for locations without an `id`.
pub const FALLBACK_ID_PREFIX: &str = "location-";
