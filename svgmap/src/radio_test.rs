use std::cell::RefCell;

use super::*;
use crate::input::Key;

fn fake_map() -> MapDescriptor {
    MapDescriptor::new(
        "0 0 100 100",
        vec![
            Location::new("M 0 0 L 10 0 Z").with_id("id0").with_name("name0"),
            Location::new("M 10 0 L 20 0 Z").with_id("id1").with_name("name1"),
            Location::new("M 20 0 L 30 0 Z").with_id("id2").with_name("name2"),
        ],
    )
    .with_label("label")
}

type Calls = Rc<RefCell<Vec<String>>>;

fn mounted_with(options: RadioOptions) -> (RadioSvgMap, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut map = RadioSvgMap::new(fake_map(), options.with_on_change(move |shape| sink.borrow_mut().push(shape.id.clone())));
    map.mount();
    (map, calls)
}

fn mounted() -> RadioSvgMap {
    let mut map = RadioSvgMap::new(fake_map(), RadioOptions::default());
    map.mount();
    map
}

fn checked(map: &RadioSvgMap, id: &str) -> bool {
    map.view().find(id).is_some_and(|s| s.aria_checked)
}

fn tab_index(map: &RadioSvgMap, id: &str) -> Option<i32> {
    map.view().find(id).map(|s| s.tab_index)
}

fn press(map: &mut RadioSvgMap, id: &str, key: Key) -> LocationEvent {
    let mut ev = LocationEvent::key_down(id, key);
    map.dispatch(&mut ev);
    ev
}

/// Exactly one shape is tab-reachable and every other one is not.
fn assert_single_tab_stop(map: &RadioSvgMap) {
    let reachable = map.view().shapes.iter().filter(|s| s.tab_index == 0).count();
    let unreachable = map.view().shapes.iter().filter(|s| s.tab_index == -1).count();
    assert_eq!(reachable, 1);
    assert_eq!(unreachable, map.view().shapes.len() - 1);
}

// =============================================================
// Neighbor index
// =============================================================

#[test]
fn neighbor_index_wraps() {
    assert_eq!(neighbor_index(Some(0), 3, Direction::Next), Some(1));
    assert_eq!(neighbor_index(Some(2), 3, Direction::Next), Some(0));
    assert_eq!(neighbor_index(Some(0), 3, Direction::Previous), Some(2));
    assert_eq!(neighbor_index(Some(1), 3, Direction::Previous), Some(0));
}

#[test]
fn neighbor_index_unknown_current() {
    assert_eq!(neighbor_index(None, 3, Direction::Next), Some(0));
    assert_eq!(neighbor_index(None, 3, Direction::Previous), Some(1));
    assert_eq!(neighbor_index(None, 1, Direction::Previous), Some(0));
}

#[test]
fn neighbor_index_empty() {
    assert_eq!(neighbor_index(None, 0, Direction::Next), None);
    assert_eq!(neighbor_index(Some(0), 0, Direction::Previous), None);
}

// =============================================================
// Mouse
// =============================================================

#[test]
fn click_selects_unselected_location() {
    let mut map = mounted();
    assert!(!checked(&map, "id0"));
    let mut ev = LocationEvent::click("id0");
    let actions = map.dispatch(&mut ev);
    assert!(checked(&map, "id0"));
    assert!(ev.is_default_prevented());
    let handle = map.view().resolve("id0").unwrap();
    assert_eq!(actions, vec![Action::RenderNeeded, Action::Focus(handle)]);
}

#[test]
fn click_on_selected_location_keeps_it_selected() {
    let mut map = mounted();
    map.dispatch(&mut LocationEvent::click("id0"));
    let mut ev = LocationEvent::click("id0");
    let actions = map.dispatch(&mut ev);
    assert!(checked(&map, "id0"));
    assert!(actions.is_empty());
    assert!(ev.is_default_prevented());
}

#[test]
fn click_moves_selection() {
    let mut map = mounted();
    map.dispatch(&mut LocationEvent::click("id0"));
    assert!(checked(&map, "id0"));
    assert!(!checked(&map, "id1"));
    map.dispatch(&mut LocationEvent::click("id1"));
    assert!(!checked(&map, "id0"));
    assert!(checked(&map, "id1"));
    assert_eq!(map.view().shapes.iter().filter(|s| s.aria_checked).count(), 1);
}

#[test]
fn selected_location_becomes_the_tab_stop() {
    let mut map = mounted();
    assert_eq!(tab_index(&map, "id0"), Some(0));
    assert_eq!(tab_index(&map, "id1"), Some(-1));
    map.dispatch(&mut LocationEvent::click("id1"));
    assert_eq!(tab_index(&map, "id0"), Some(-1));
    assert_eq!(tab_index(&map, "id1"), Some(0));
}

#[test]
fn click_on_unknown_target_is_noop() {
    let (mut map, calls) = mounted_with(RadioOptions::default());
    assert!(map.dispatch(&mut LocationEvent::click("ghost")).is_empty());
    assert_eq!(map.selected_location_id(), None);
    assert!(calls.borrow().is_empty());
}

#[test]
fn events_before_mount_are_ignored() {
    let mut map = RadioSvgMap::new(fake_map(), RadioOptions::default());
    let mut click = LocationEvent::click("id1");
    assert!(map.dispatch(&mut click).is_empty());
    assert!(!click.is_default_prevented());
    let mut arrow = LocationEvent::key_down("id1", Key::ARROW_RIGHT);
    assert!(map.dispatch(&mut arrow).is_empty());
    assert!(!arrow.is_default_prevented());
    assert_eq!(map.selected_location_id(), None);
    assert!(map.locations().is_empty());
}

#[test]
fn click_and_key_down_are_handled_by_dispatch_only() {
    let mut map = mounted();
    assert!(map.props().bound_events().is_empty());
    let mut ev = LocationEvent::key_down("id0", Key::ARROW_DOWN);
    assert!(!map.props().dispatch(&mut ev));
    assert_eq!(map.selected_location_id(), None);

    let actions = map.dispatch(&mut ev);
    assert!(ev.is_default_prevented());
    assert_eq!(map.selected_location_id(), Some("id1"));
    assert_eq!(actions.len(), 2);
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn spacebar_selects_focused_location() {
    let mut map = mounted();
    let ev = press(&mut map, "id1", Key::SPACE);
    assert!(checked(&map, "id1"));
    assert!(ev.is_default_prevented());
}

#[test]
fn spacebar_on_selected_location_keeps_it_selected() {
    let mut map = mounted();
    press(&mut map, "id1", Key::SPACE);
    press(&mut map, "id1", Key::SPACE);
    assert!(checked(&map, "id1"));
}

#[test]
fn down_and_right_select_next_location() {
    let mut map = mounted();
    press(&mut map, "id0", Key::ARROW_DOWN);
    assert!(checked(&map, "id1"));
    press(&mut map, "id1", Key::ARROW_RIGHT);
    assert!(checked(&map, "id2"));
}

#[test]
fn next_wraps_to_first_location() {
    let mut map = mounted();
    press(&mut map, "id0", Key::ARROW_DOWN);
    press(&mut map, "id1", Key::ARROW_DOWN);
    press(&mut map, "id2", Key::ARROW_DOWN);
    assert!(checked(&map, "id0"));
    assert_eq!(map.focused().map(ShapeHandle::id), Some("id0"));
}

#[test]
fn up_and_left_select_previous_location() {
    let mut map = mounted();
    press(&mut map, "id0", Key::ARROW_UP);
    assert!(checked(&map, "id2"));
    press(&mut map, "id2", Key::ARROW_LEFT);
    assert!(checked(&map, "id1"));
}

#[test]
fn navigation_starts_from_focused_not_selected() {
    let mut map = mounted();
    map.dispatch(&mut LocationEvent::click("id0"));
    press(&mut map, "id1", Key::ARROW_RIGHT);
    assert!(checked(&map, "id2"));
}

#[test]
fn arrow_onto_selected_location_is_noop() {
    let (mut map, calls) = mounted_with(RadioOptions::default().with_selected("id1"));
    let ev = press(&mut map, "id0", Key::ARROW_RIGHT);
    assert!(ev.is_default_prevented());
    assert!(checked(&map, "id1"));
    assert!(calls.borrow().len() == 1);
}

#[test]
fn arrow_keys_prevent_default() {
    let mut map = mounted();
    for key in [Key::ARROW_LEFT, Key::ARROW_UP, Key::ARROW_RIGHT, Key::ARROW_DOWN] {
        assert!(press(&mut map, "id0", key).is_default_prevented());
    }
}

#[test]
fn other_keys_are_ignored() {
    let (mut map, calls) = mounted_with(RadioOptions::default());
    for code in [9, 13, 27, 31, 33, 36] {
        let ev = press(&mut map, "id0", Key(code));
        assert!(!ev.is_default_prevented());
    }
    assert_eq!(map.selected_location_id(), None);
    assert!(calls.borrow().is_empty());
}

#[test]
fn keyboard_selection_moves_focus() {
    let mut map = mounted();
    let actions = map.dispatch(&mut LocationEvent::key_down("id2", Key::ARROW_RIGHT));
    let first = map.view().resolve("id0").unwrap();
    assert_eq!(actions.last(), Some(&Action::Focus(first.clone())));
    assert_eq!(map.focused(), Some(&first));
}

#[test]
fn tab_stop_invariant_holds_through_navigation() {
    let mut map = mounted();
    assert_single_tab_stop(&map);
    for (id, key) in [("id0", Key::ARROW_DOWN), ("id1", Key::ARROW_DOWN), ("id2", Key::ARROW_DOWN), ("id0", Key::ARROW_UP)] {
        press(&mut map, id, key);
        assert_single_tab_stop(&map);
    }
    assert_eq!(tab_index(&map, "id2"), Some(0));
}

// =============================================================
// Communication
// =============================================================

#[test]
fn initial_id_is_selected() {
    let map = RadioSvgMap::new(fake_map(), RadioOptions::default().with_selected("id1"));
    assert!(checked(&map, "id1"));
    assert_eq!(tab_index(&map, "id1"), Some(0));
    assert_single_tab_stop(&map);
}

#[test]
fn mount_without_initial_id_does_not_notify() {
    let (_, calls) = mounted_with(RadioOptions::default());
    assert!(calls.borrow().is_empty());
}

#[test]
fn mount_with_initial_id_notifies_once() {
    let (mut map, calls) = mounted_with(RadioOptions::default().with_selected("id1"));
    map.mount();
    assert_eq!(*calls.borrow(), vec!["id1"]);
}

#[test]
fn mount_with_unresolvable_initial_id_does_not_notify() {
    let (map, calls) = mounted_with(RadioOptions::default().with_selected("ghost"));
    assert!(calls.borrow().is_empty());
    assert_eq!(map.selected_location_id(), Some("ghost"));
    assert_eq!(tab_index(&map, "id0"), Some(0));
    assert_single_tab_stop(&map);
}

#[test]
fn select_notifies_with_handle() {
    let (mut map, calls) = mounted_with(RadioOptions::default());
    map.dispatch(&mut LocationEvent::click("id1"));
    assert_eq!(*calls.borrow(), vec!["id1"]);
}

#[test]
fn reselect_does_not_notify() {
    let (mut map, calls) = mounted_with(RadioOptions::default().with_selected("id1"));
    map.dispatch(&mut LocationEvent::click("id1"));
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn notified_shape_reflects_new_state() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let options = RadioOptions::default()
        .with_on_change(move |shape| sink.borrow_mut().push((shape.id.clone(), shape.aria_checked, shape.tab_index)));
    let mut map = RadioSvgMap::new(fake_map(), options);
    map.mount();
    map.dispatch(&mut LocationEvent::click("id2"));
    assert_eq!(*seen.borrow(), vec![("id2".to_owned(), true, 0)]);
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn renders_radio_roles() {
    let map = mounted();
    assert_eq!(map.view().role, "radiogroup");
    assert!(map.view().shapes.iter().all(|s| s.role == "radio"));
}

#[test]
fn handle_cache_matches_map_order() {
    let map = mounted();
    let ids: Vec<&str> = map.locations().iter().map(ShapeHandle::id).collect();
    assert_eq!(ids, vec!["id0", "id1", "id2"]);
}

#[test]
fn first_location_without_ids_is_tab_stop() {
    let locations = vec![Location::new("M 0 0 Z"), Location::new("M 1 1 Z"), Location::new("M 2 2 Z")];
    let mut map = RadioSvgMap::new(MapDescriptor::new("0 0 1 1", locations), RadioOptions::default());
    map.mount();
    assert_single_tab_stop(&map);
    assert_eq!(map.view().shapes[0].tab_index, 0);
    map.dispatch(&mut LocationEvent::key_down("location-0", Key::ARROW_DOWN));
    assert_eq!(map.selected_location_id(), Some("location-1"));
}

#[test]
fn passes_custom_config_through() {
    let options = RadioOptions {
        config: MapConfig {
            class_name: Some("className".into()),
            location_class_name: Some("locationClassName".into()),
            children_before: Some("<text>childrenBefore</text>".into()),
            children_after: Some("<text>childrenAfter</text>".into()),
            ..MapConfig::default()
        },
        ..RadioOptions::default()
    };
    let map = RadioSvgMap::new(fake_map(), options);
    let view = map.view();
    assert_eq!(view.class_name, "className");
    assert_eq!(view.children_before.as_deref(), Some("<text>childrenBefore</text>"));
    assert_eq!(view.children_after.as_deref(), Some("<text>childrenAfter</text>"));
    assert!(view.shapes.iter().all(|s| s.class_name == "locationClassName"));
}

#[test]
fn focus_event_goes_to_host_hook_only() {
    let focused = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&focused);
    let options = RadioOptions {
        config: MapConfig {
            hooks: crate::render::LocationHooks {
                on_focus: Some(Rc::new(move |ev: &mut LocationEvent| sink.borrow_mut().push(ev.target.clone()))),
                ..Default::default()
            },
            ..MapConfig::default()
        },
        ..RadioOptions::default()
    };
    let mut map = RadioSvgMap::new(fake_map(), options);
    map.mount();
    assert!(map.dispatch(&mut LocationEvent::new(EventKind::Focus, "id2")).is_empty());
    assert_eq!(*focused.borrow(), vec!["id2"]);
    assert_eq!(map.selected_location_id(), None);
}
