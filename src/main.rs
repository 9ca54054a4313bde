mod script;


use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};
use svgmap::render::{Handler, LocationHooks};
use svgmap::{
    Action, CheckboxOptions, CheckboxSvgMap, LocationEvent, MapConfig, MapDescriptor, MapError,
    RadioOptions, RadioSvgMap, RenderedMap, SvgMapProps,
};
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid map: {0}")]
    Map(#[from] MapError),
    #[error("invalid event: {0}")]
    Script(#[from] script::ScriptError),
    #[error("radio mode accepts at most one --select, got {0}")]
    TooManySelected(usize),
    #[error("failed to encode rendering: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mapselect", about = "Render a selectable SVG map and replay shape events against it")]
struct Cli {
    /// Map descriptor JSON (`viewBox`, `locations`, optional `label`).
    map: PathBuf,

    #[arg(long, value_enum, env = "SVGMAP_MODE", default_value_t = Mode::Plain)]
    mode: Mode,

    /// Initially selected location id. Repeatable in checkbox mode.
    #[arg(long = "select")]
    selected: Vec<String>,

    /// Event to replay after mount, e.g. `click:id0` or `key:id0:ArrowRight`.
    #[arg(long = "event")]
    events: Vec<String>,

    #[arg(long, value_enum, env = "SVGMAP_FORMAT", default_value_t = Format::Svg)]
    format: Format,

    #[arg(long)]
    class_name: Option<String>,

    #[arg(long)]
    location_class_name: Option<String>,

    /// Accessible name for the container; overrides the map's label.
    #[arg(long)]
    label: Option<String>,

    /// Markup placed before the shapes.
    #[arg(long)]
    before: Option<String>,

    /// Markup placed after the shapes.
    #[arg(long)]
    after: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    Checkbox,
    Radio,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Svg,
    Json,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let raw = std::fs::read_to_string(&cli.map).map_err(|source| CliError::Read { path: cli.map.clone(), source })?;
    let map = MapDescriptor::from_json(&raw)?;
    let events = cli.events.iter().map(|spec| script::parse_event(spec)).collect::<Result<Vec<_>, _>>()?;
    info!(locations = map.locations.len(), events = events.len(), mode = ?cli.mode, "map loaded");

    let config = config_from(&cli);
    let view = match cli.mode {
        Mode::Plain => run_plain(&map, config, events),
        Mode::Checkbox => run_checkbox(map, config, &cli.selected, events),
        Mode::Radio => run_radio(map, config, &cli.selected, events)?,
    };

    let out = match cli.format {
        Format::Svg => view.to_svg(),
        Format::Json => serde_json::to_string_pretty(&view)?,
    };
    println!("{out}");
    Ok(())
}

fn config_from(cli: &Cli) -> MapConfig {
    MapConfig {
        class_name: cli.class_name.clone(),
        label: cli.label.clone(),
        location_class_name: cli.location_class_name.as_deref().map(Into::into),
        hooks: logging_hooks(),
        children_before: cli.before.clone(),
        children_after: cli.after.clone(),
        ..MapConfig::default()
    }
}

fn log_event() -> Handler {
    Rc::new(|event: &mut LocationEvent| info!(kind = ?event.kind, location = %event.target, "location event"))
}

fn logging_hooks() -> LocationHooks {
    LocationHooks {
        on_mouse_over: Some(log_event()),
        on_mouse_out: Some(log_event()),
        on_mouse_move: Some(log_event()),
        on_focus: Some(log_event()),
        on_blur: Some(log_event()),
    }
}

fn run_plain(map: &MapDescriptor, config: MapConfig, events: Vec<LocationEvent>) -> RenderedMap {
    let props = SvgMapProps {
        on_location_click: Some(log_event()),
        on_location_key_down: Some(log_event()),
        ..SvgMapProps::new(config)
    };
    for mut event in events {
        props.dispatch(&mut event);
    }
    svgmap::render(map, &props)
}

fn run_checkbox(map: MapDescriptor, config: MapConfig, selected: &[String], events: Vec<LocationEvent>) -> RenderedMap {
    let options = CheckboxOptions { config, ..CheckboxOptions::default() }
        .with_selected(selected.iter().cloned())
        .with_on_change(|shapes| {
            let ids: Vec<&str> = shapes.iter().map(|s| s.id.as_str()).collect();
            info!(?ids, "selection changed");
        });
    let mut controller = CheckboxSvgMap::new(map, options);
    controller.mount();
    for mut event in events {
        log_actions(&controller.dispatch(&mut event));
    }
    controller.view().clone()
}

fn run_radio(
    map: MapDescriptor,
    config: MapConfig,
    selected: &[String],
    events: Vec<LocationEvent>,
) -> Result<RenderedMap, CliError> {
    if selected.len() > 1 {
        return Err(CliError::TooManySelected(selected.len()));
    }
    let mut options = RadioOptions { config, ..RadioOptions::default() }
        .with_on_change(|shape| info!(id = %shape.id, index = shape.index, "selection changed"));
    if let Some(id) = selected.first() {
        options = options.with_selected(id.clone());
    }
    let mut controller = RadioSvgMap::new(map, options);
    controller.mount();
    for mut event in events {
        log_actions(&controller.dispatch(&mut event));
    }
    Ok(controller.view().clone())
}

fn log_actions(actions: &[Action]) {
    for action in actions {
        match action {
            Action::RenderNeeded => info!("render needed"),
            Action::Focus(handle) => info!(id = handle.id(), index = handle.index(), "focus moved"),
        }
    }
}
