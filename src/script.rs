//! Event scripts: textual shape events replayed against a mounted map.
//!
//! DESIGN
//! ======
//! Each `--event` argument is one event, `KIND:TARGET` or, for key presses,
//! `key:TARGET:KEY`. `KEY` is either a numeric DOM key code or a browser key
//! name understood by [`Key::from_name`]. Targets are resolved shape ids, so
//! positional ids (`location-3`) work for locations without an explicit id.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use svgmap::{EventKind, Key, LocationEvent};

/// Error returned by [`parse_event`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("event `{0}` is not KIND:TARGET")]
    Malformed(String),
    #[error("unknown event kind `{0}`")]
    UnknownKind(String),
    #[error("key event `{0}` is not key:TARGET:KEY")]
    MissingKey(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Parse one event spec.
///
/// # Errors
///
/// Returns a [`ScriptError`] naming the part of the spec that did not parse.
pub fn parse_event(spec: &str) -> Result<LocationEvent, ScriptError> {
    let (kind, rest) = spec
        .split_once(':')
        .filter(|(_, rest)| !rest.is_empty())
        .ok_or_else(|| ScriptError::Malformed(spec.to_owned()))?;

    let kind = match kind {
        "over" => EventKind::MouseOver,
        "out" => EventKind::MouseOut,
        "move" => EventKind::MouseMove,
        "click" => EventKind::Click,
        "key" => {
            let (target, key) = rest
                .rsplit_once(':')
                .filter(|(target, key)| !target.is_empty() && !key.is_empty())
                .ok_or_else(|| ScriptError::MissingKey(spec.to_owned()))?;
            return Ok(LocationEvent::key_down(target, parse_key(key)?));
        }
        "focus" => EventKind::Focus,
        "blur" => EventKind::Blur,
        other => return Err(ScriptError::UnknownKind(other.to_owned())),
    };
    Ok(LocationEvent::new(kind, rest))
}

fn parse_key(key: &str) -> Result<Key, ScriptError> {
    if let Ok(code) = key.parse::<u32>() {
        return Ok(Key(code));
    }
    Key::from_name(key).ok_or_else(|| ScriptError::UnknownKey(key.to_owned()))
}
