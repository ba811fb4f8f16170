// src/main.rs
use log::{error, info, warn};
use nannou::prelude::*;

use gridlines::{
    config::{Config, PanelConfig},
    controllers::{OscCommand, OscController},
    models::{GridOptions, DEFAULT_COLUMNS},
    render::{draw_canvas, parse_color},
    services::{Document, Element, ElementId, Viewport},
    views::GridManager,
};

struct Panel {
    config: PanelConfig,
    element: ElementId,
}

struct Model {
    // Host & grids
    document: Document,
    manager: GridManager,
    panels: Vec<Panel>,
    columns: u32,

    // Comms
    osc_controller: Option<OscController>,

    // Style
    background: Rgba,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            std::process::exit(1);
        }
    };

    let window_id = app
        .new_window()
        .title(&config.window.title)
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .resized(resized)
        .build()
        .expect("Failed to build window");
    let window = app.window(window_id).expect("Window was just created");
    let (width, height) = window.inner_size_points();
    let scale_factor = window.scale_factor();

    let mut document = Document::new(Viewport::new(
        width as f64,
        height as f64,
        Some(scale_factor as f64),
    ));

    // Panels become host elements
    let panels: Vec<Panel> = config
        .panels
        .iter()
        .map(|panel| {
            let mut element = Element::new(&panel.tag)
                .with_id(&panel.name)
                .with_rect(panel.rect_in(width as f64, height as f64))
                .with_hidden(panel.hidden);
            for class in &panel.classes {
                element = element.with_class(class);
            }
            for (name, value) in &panel.attributes {
                element = element.with_attribute(name, value);
            }
            Panel {
                config: panel.clone(),
                element: document.append(element),
            }
        })
        .collect();

    // Grids
    let mut manager = GridManager::new();
    let grid_options = if config.grids.is_empty() {
        vec![GridOptions::new("[data-grid]")]
    } else {
        config.grids.clone()
    };
    for options in &grid_options {
        if let Err(e) = manager.init_grid(&mut document, options) {
            error!("Could not initialise grid {:?}: {}", options.targets, e);
        }
    }
    let columns = manager
        .grids()
        .first()
        .map_or(DEFAULT_COLUMNS, |g| g.spec().columns);

    // OSC
    let osc_controller = if config.osc.enabled {
        match OscController::new(config.osc.rx_port) {
            Ok(controller) => {
                info!("Listening for OSC on port {}", config.osc.rx_port);
                Some(controller)
            }
            Err(e) => {
                warn!("OSC disabled, could not bind port {}: {}", config.osc.rx_port, e);
                None
            }
        }
    } else {
        None
    };

    let background = parse_color(&config.style.background).unwrap_or_else(|| {
        warn!("Unsupported background color {:?}", config.style.background);
        rgba(1.0, 1.0, 1.0, 1.0)
    });

    Model {
        document,
        manager,
        panels,
        columns,
        osc_controller,
        background,
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    let columns = model.columns;
    match key {
        Key::Up => set_columns(model, columns.saturating_add(1)),
        Key::Down => set_columns(model, columns.saturating_sub(1).max(1)),
        Key::Key1 => toggle_panel(app, model, 0),
        Key::Key2 => toggle_panel(app, model, 1),
        Key::Key3 => toggle_panel(app, model, 2),
        Key::Key4 => toggle_panel(app, model, 3),
        Key::Key5 => toggle_panel(app, model, 4),
        Key::Key6 => toggle_panel(app, model, 5),
        Key::Key7 => toggle_panel(app, model, 6),
        Key::Key8 => toggle_panel(app, model, 7),
        Key::Key9 => toggle_panel(app, model, 8),
        Key::P => print_state(model),
        _ => (),
    }
}

fn resized(app: &App, model: &mut Model, size: Vec2) {
    model.document.resize_viewport(size.x as f64, size.y as f64);
    model
        .document
        .set_device_pixel_ratio(Some(app.main_window().scale_factor() as f64));
    layout_panels(model);

    let painted = model.manager.handle_resize(&mut model.document);
    info!("Resized to {}x{}, repainted {} grid(s)", size.x, size.y, painted);
}

fn update(app: &App, model: &mut Model, _update: Update) {
    // Process OSC messages
    if let Some(osc_controller) = model.osc_controller.as_mut() {
        osc_controller.process_messages();
    }
    launch_commands(app, model);

    // Pending grids whose panel became visible
    for id in model.manager.handle_visibility(&mut model.document) {
        info!("{} became visible", id);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(model.background);

    let window = app.window_rect();
    for element in model.document.elements().filter(|e| !e.hidden) {
        if let Some(canvas) = element.canvas() {
            draw_canvas(&draw, canvas, &element.rect, &window);
        }
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!("Failed to render frame: {:?}", e);
    }
}

// ******************************* Panels & columns *******************************

fn layout_panels(model: &mut Model) {
    let Some(viewport) = model.document.viewport().copied() else {
        return;
    };
    for panel in &model.panels {
        if let Some(element) = model.document.element_mut(panel.element) {
            element.rect = panel.config.rect_in(viewport.width, viewport.height);
        }
    }
}

fn set_panel_visibility(app: &App, model: &mut Model, index: usize, visible: bool) {
    let Some(panel) = model.panels.get(index) else {
        return;
    };
    if let Some(element) = model.document.element_mut(panel.element) {
        element.hidden = !visible;
        info!("Panel {} {}", panel.config.name, if visible { "shown" } else { "hidden" });
    }
    // a panel that comes back may have missed resizes while hidden
    model
        .document
        .set_device_pixel_ratio(Some(app.main_window().scale_factor() as f64));
    layout_panels(model);
    model.manager.handle_resize(&mut model.document);
}

fn toggle_panel(app: &App, model: &mut Model, index: usize) {
    let Some(visible) = model
        .panels
        .get(index)
        .and_then(|p| model.document.element(p.element))
        .map(|e| e.hidden)
    else {
        return;
    };
    set_panel_visibility(app, model, index, visible);
}

fn set_columns(model: &mut Model, columns: u32) {
    match model.manager.set_columns(&mut model.document, columns) {
        Ok(painted) => {
            model.columns = columns;
            info!("Columns set to {} ({} grid(s) repainted)", columns, painted);
        }
        Err(e) => warn!("{}", e),
    }
}

fn print_state(model: &Model) {
    for grid in model.manager.grids() {
        let name = model
            .panels
            .iter()
            .find(|p| p.element == grid.element())
            .map_or("?", |p| p.config.name.as_str());
        let raster = grid
            .layout()
            .map(|l| format!("{}x{} @{}", l.pixel_size().0, l.pixel_size().1, l.ratio))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} [{}] {} {} columns={} raster={} paints={}",
            grid.id(),
            name,
            grid.state(),
            grid.spec().variant,
            grid.spec().columns,
            raster,
            grid.paint_count()
        );
    }
}

// ******************************* OSC Launcher *******************************

fn launch_commands(app: &App, model: &mut Model) {
    let Some(osc_controller) = model.osc_controller.as_mut() else {
        return;
    };
    for command in osc_controller.take_commands() {
        match command {
            OscCommand::SetColumns { columns } => set_columns(model, columns),
            OscCommand::SetTargetColumns { selector, columns } => {
                match model
                    .manager
                    .set_columns_for(&mut model.document, &selector, columns)
                {
                    Ok(painted) => info!("{} -> {} columns ({} repainted)", selector, columns, painted),
                    Err(e) => warn!("{}", e),
                }
            }
            OscCommand::SetPanelVisibility { panel, visible } => {
                match model.panels.iter().position(|p| p.config.name == panel) {
                    Some(index) => set_panel_visibility(app, model, index, visible),
                    None => warn!("No panel named {:?}", panel),
                }
            }
        }
    }
}
