//! Lights Out demo application
//!
//! Runs a headless Lights Out board on the grid engine. The frame loop is
//! driven from a queued frame source and the system clock, clicks are
//! injected at random, and draw calls are recorded instead of rasterized.
//!
//! Usage: `lights_out [scene.toml|scene.ron]`

mod tiles;

use grid_engine::foundation::logging;
use grid_engine::foundation::random::{random_element, random_in_range};
use grid_engine::prelude::*;
use rand::Rng;
use std::time::Duration;
use tiles::{Board, Scoreboard, Tile, TILE};

const MAX_FRAMES: u32 = 600;
const CLICK_EVERY: u32 = 20;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Default)]
struct RunStats {
    frames: u32,
    draw_calls: usize,
    handled: u32,
    dropped: u32,
}

fn load_config() -> Result<SceneConfig, Box<dyn std::error::Error>> {
    if let Some(path) = std::env::args().nth(1) {
        log::info!("Loading scene config from {}", path);
        return Ok(SceneConfig::load_from_file(path)?);
    }

    Ok(SceneConfig {
        canvas_fraction: 0.9,
        viewport: Some((800, 600)),
        grid: GridSettings::new(5, 5)?,
        ..SceneConfig::default()
    })
}

fn populate(scene: &mut SceneManager<CommandRenderer>, grid: GridSettings) -> Result<(), SceneError> {
    let mut rng = rand::thread_rng();

    scene.add(Board::new(grid))?;
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            scene.add(Tile::new(column, row, rng.gen_bool(0.4)))?;
        }
    }
    scene.add(tiles::cursor())?;
    scene.add(Scoreboard::new())?;

    log::info!("Scene populated with {} entities", scene.registry().len());
    Ok(())
}

/// Click the centre of a random tile, or now and then a random pixel
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn click_somewhere(scene: &mut SceneManager<CommandRenderer>) -> Result<ClickOutcome, SceneError> {
    let grid = *scene.renderer().grid();
    let (x, y) = if random_in_range(0, 4)? == 0 {
        (
            random_in_range(0, grid.canvas_width() as i32)? as f32,
            random_in_range(0, grid.canvas_height() as i32)? as f32,
        )
    } else {
        let centres: Vec<(f32, f32)> = scene
            .registry()
            .by_kind(TILE)
            .iter()
            .map(|view| {
                let core = view.core();
                (grid.scale_to_grid(core.x() + 0.5), grid.scale_to_grid(core.y() + 0.5))
            })
            .collect();
        match random_element(&centres) {
            Some(&centre) => centre,
            None => return Ok(ClickOutcome::Dropped),
        }
    };

    log::debug!("Clicking at ({:.0}, {:.0})", x, y);
    Ok(scene.click(x, y))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    log::info!("Starting Lights Out demo");
    let config = load_config()?;

    let frames = QueuedFrameSource::new();
    let faults = FaultLog::new();
    let renderer = CommandRenderer::new(GridMetrics::from_config(&config));
    let mut scene = SceneManager::new(&config, renderer, Box::new(SystemClock::new()), Box::new(frames.clone()))?
        .with_faults(Box::new(faults.clone()))
        .with_audio(Box::new(SilentAudio));

    populate(&mut scene, config.grid)?;
    scene.request_redraw();
    scene.start();

    let mut stats = RunStats::default();
    while stats.frames < MAX_FRAMES {
        let Some(kind) = frames.pop() else {
            log::info!("Frame loop stopped");
            break;
        };
        scene.on_frame(kind);
        stats.frames += 1;
        stats.draw_calls += scene.renderer_mut().take_commands().len();

        if stats.frames % CLICK_EVERY == 0 && scene.is_running() {
            match click_somewhere(&mut scene)? {
                ClickOutcome::Handled(_) => stats.handled += 1,
                ClickOutcome::Dropped => stats.dropped += 1,
            }
        }
        std::thread::sleep(FRAME_INTERVAL);
    }
    scene.stop();

    log::info!(
        "Ran {} frames ({:.1}ms last), {} draw calls, {} clicks handled, {} dropped",
        stats.frames,
        scene.frame().frame_time(),
        stats.draw_calls,
        stats.handled,
        stats.dropped
    );
    for fault in faults.faults() {
        log::warn!("{}", fault);
    }
    Ok(())
}
