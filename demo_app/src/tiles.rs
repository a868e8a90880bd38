//! Entities of the Lights Out board

use grid_engine::prelude::*;

/// Kind of [`Tile`]
pub const TILE: EntityKind = EntityKind::new("Tile");

const BOARD_COLOR: Color = Color::from_rgb(24, 24, 32);
const LIT_COLOR: Color = Color::from_rgb(250, 210, 90);
const UNLIT_COLOR: Color = Color::from_rgb(60, 60, 80);
const CLICK_SOUND: &str = "sounds/click.wav";
const WIN_SOUND: &str = "sounds/win.ogg";
const CURSOR_TAG: &str = "cursor";

/// Background covering the whole grid; sits at the bottom of the order
pub struct Board {
    core: EntityCore,
    background: ImageHandle,
}

impl Board {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(grid: GridSettings) -> Self {
        Self {
            core: EntityCore::new(0.0, 0.0, grid.columns() as f32, grid.rows() as f32).with_sorting_order(0),
            background: ImageHandle::new("images/board.png"),
        }
    }
}

impl Entity for Board {
    fn kind(&self) -> EntityKind {
        EntityKind::new("Board")
    }

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn on_start(&mut self, ctx: &mut SceneContext) -> EntityResult {
        let grid = ctx.grid_settings();
        log::info!("Board {}x{} ready", grid.columns(), grid.rows());
        Ok(())
    }

    fn on_draw(&mut self, renderer: &mut dyn Renderer, _ctx: &mut SceneContext) -> EntityResult {
        renderer.clear_frame();
        renderer.fill(BOARD_COLOR);
        renderer.draw_background_image(&self.background);
        Ok(())
    }
}

/// One light; clicking it flips it and its four neighbours
pub struct Tile {
    core: EntityCore,
    column: i32,
    row: i32,
    lit: bool,
}

impl Tile {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn new(column: u32, row: u32, lit: bool) -> Self {
        Self {
            core: EntityCore::new(column as f32, row as f32, 1.0, 1.0)
                .with_sorting_order(1)
                .with_tag("tile"),
            column: column as i32,
            row: row as i32,
            lit,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn toggle(&mut self) {
        self.lit = !self.lit;
    }

    fn is_neighbour_of(&self, column: i32, row: i32) -> bool {
        (self.column - column).abs() + (self.row - row).abs() == 1
    }
}

impl Entity for Tile {
    fn kind(&self) -> EntityKind {
        TILE
    }

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn on_draw(&mut self, renderer: &mut dyn Renderer, _ctx: &mut SceneContext) -> EntityResult {
        let color = if self.lit { LIT_COLOR } else { UNLIT_COLOR };
        let core = &self.core;
        renderer.draw_grid_rect(core.x(), core.y(), core.width(), core.height(), color, Some(Stroke::default()));
        Ok(())
    }

    fn on_mouse_click(&mut self, position: GridPoint, ctx: &mut SceneContext) -> EntityResult<bool> {
        log::debug!("Tile ({}, {}) clicked at cell {}", self.column, self.row, position);
        self.toggle();

        // the clicked tile is checked out, so it never shows up here
        let neighbours: Vec<EntityId> = ctx
            .registry()
            .by_kind(TILE)
            .into_iter()
            .filter_map(|view| view.downcast::<Tile>())
            .filter(|tile| tile.is_neighbour_of(self.column, self.row))
            .map(|tile| tile.id())
            .collect();
        for id in neighbours {
            if let Some(tile) = ctx.registry_mut().get_as_mut::<Tile>(id) {
                tile.toggle();
            }
        }

        let cursor = ctx.registry().by_tag(CURSOR_TAG).first().map(|view| view.id());
        if let Some(id) = cursor {
            if let Some(sprite) = ctx.registry_mut().get_as_mut::<Sprite>(id) {
                sprite.core_mut().go_to(self.core.x(), self.core.y());
                sprite.set_visible(true);
            }
        }

        ctx.audio().play_sound(CLICK_SOUND, false, 0.6);
        ctx.request_redraw();
        Ok(true)
    }
}

/// Sprite marking the last tile clicked; lets clicks through to the tile
pub fn cursor() -> Sprite {
    Sprite::from_core(EntityCore::new(0.0, 0.0, 1.0, 1.0).with_sorting_order(2).with_tag(CURSOR_TAG))
        .with_image(ImageHandle::new("images/cursor.png"))
}

/// Invisible bookkeeper that ends the game once every light is out
pub struct Scoreboard {
    core: EntityCore,
    elapsed_ms: f64,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            core: EntityCore::new(0.0, 0.0, 0.0, 0.0).with_sorting_order(3),
            elapsed_ms: 0.0,
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Scoreboard {
    fn kind(&self) -> EntityKind {
        EntityKind::new("Scoreboard")
    }

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn update(&mut self, delta_time: f64, ctx: &mut SceneContext) -> EntityResult {
        self.elapsed_ms += delta_time;
        let lit = ctx
            .registry()
            .by_kind(TILE)
            .iter()
            .filter_map(|view| view.downcast::<Tile>())
            .filter(|tile| tile.is_lit())
            .count();

        if lit == 0 {
            log::info!("All lights out after {:.1}s", self.elapsed_ms / 1000.0);
            ctx.audio().play_sound(WIN_SOUND, false, 1.0);
            ctx.stop();
        }
        Ok(())
    }
}
