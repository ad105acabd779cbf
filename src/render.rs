//! World-to-compositor bridge.
//!
//! Builds content producers from world state each frame: the
//! camera-projected map panel and the HUD readout. The host registers
//! these with a [`Compositor`] and asks it for the frame.

use voidharvest_core::World;
use voidharvest_rendering::{
    Anchor, Bounds, Compositor, Glyph, GlyphPanel, HAlign, Layer, Rgb, StyleFlags, TvFrame,
    VAlign, Z_BACKGROUND, Z_CONTENT,
};

use crate::components::{Camera, PlayerStats, Position, Sprite, Tile, TileKind};

fn tile_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Star => Rgb::new(255, 214, 90),
        TileKind::Galaxy | TileKind::GalaxyCore => Rgb::new(186, 134, 255),
        TileKind::Planet => Rgb::new(92, 201, 120),
        TileKind::Forest => Rgb::new(60, 160, 70),
        TileKind::Mountain => Rgb::new(150, 140, 130),
        TileKind::River => Rgb::new(80, 150, 240),
        TileKind::Lava => Rgb::new(240, 90, 40),
        TileKind::Nebula => Rgb::new(200, 110, 200),
        TileKind::Asteroid | TileKind::Comet => Rgb::new(170, 170, 170),
        TileKind::Unknown => Rgb::new(120, 120, 120),
    }
}

/// Builds the camera-projected map panel for the `Game` layer.
///
/// Tiles draw first, sprites over them; anything outside the player's
/// camera viewport is culled.
#[must_use]
pub fn map_panel(world: &World) -> GlyphPanel {
    let player = world.player_entity();
    let cam = world.get::<Camera>(player).unwrap_or_default();
    let (width, height) = (cam.width.max(0) as usize, cam.height.max(0) as usize);
    let mut panel = GlyphPanel::filled(
        Layer::Game,
        Z_BACKGROUND,
        Bounds::new(width, height),
        Glyph::default(),
    );

    let mut place = |x: f64, y: f64, glyph: char, color: Rgb, bold: bool| {
        let sx = x as i32 - cam.x;
        let sy = y as i32 - cam.y;
        if sx < 0 || sy < 0 {
            return;
        }
        let mut cell = Glyph::solid(glyph, color);
        if bold {
            cell = cell.with_style(StyleFlags::from_bits(StyleFlags::BOLD));
        }
        panel.set_cell(sx as usize, sy as usize, cell);
    };

    world.view2::<Position, Tile>().each(|_, pos, tile| {
        place(pos.x, pos.y, tile.glyph, tile_color(tile.kind), false);
    });
    world.view2::<Position, Sprite>().each(|_, pos, sprite| {
        place(pos.x, pos.y, sprite.glyph, Rgb::new(80, 220, 240), true);
    });
    panel
}

/// Builds the bottom-left HUD readout of ship stats.
#[must_use]
pub fn hud_panel(world: &World) -> GlyphPanel {
    let stats = world
        .get::<PlayerStats>(world.player_entity())
        .unwrap_or_default();
    let text = format!(
        "FUEL {:>3}  HULL {:>3}  DRIVE {}",
        stats.fuel, stats.hull, stats.drive
    );
    let cells: Vec<Glyph> = text
        .chars()
        .map(|ch| Glyph::solid(ch, Rgb::new(180, 220, 180)))
        .collect();
    let mut panel = GlyphPanel::from_cells(Layer::Hud, Z_CONTENT, vec![cells]);
    panel.set_anchor(Anchor {
        horizontal: HAlign::Left,
        vertical: VAlign::Bottom,
        offset_x: 1,
        offset_y: -1,
    });
    panel
}

/// Registers the standard frame: map, HUD, and the TV frame border.
pub fn register_frame(world: &World, compositor: &mut Compositor) {
    compositor.unregister_all();
    compositor.register_content(Box::new(map_panel(world)));
    compositor.register_content(Box::new(hud_panel(world)));
    let (width, height) = compositor.dimensions();
    compositor.register_content(Box::new(TvFrame::new(width, height)));
}
