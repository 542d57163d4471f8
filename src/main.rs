//! Tofu GL demo host
//!
//! Minimal host loop around the rasterizer:
//! - Loads `tofu.ron` display settings (defaults when missing)
//! - Draws plain, scaled, mirrored, rotated and scaled+rotated sprites every frame
//! - Overlays a frame, a ring, a filled triangle and a point
//! - Cycles part of the palette through the shifting table
//! - Press P for a screenshot, Escape to quit

use std::path::Path;

use log::{error, info, warn};
use macroquad::prelude::{
    clear_background, draw_texture_ex, get_time, is_key_pressed, next_frame, screen_height, screen_width, vec2,
    Conf, DrawTextureParams, FilterMode, KeyCode, Texture2D, BLACK, WHITE,
};
use tofu_gl::gl::{load_config, Bank, Context, DisplayConfig, DrawMode, GlError, Pixel, Point, Rectangle, Surface};
use tofu_gl::VERSION;

const CONFIG_PATH: &str = "tofu.ron";
const CELL: usize = 16;
/// Indices 1..=CYCLE_LEN take part in palette cycling
const CYCLE_LEN: usize = 15;

fn display_config() -> DisplayConfig {
    if !Path::new(CONFIG_PATH).exists() {
        return DisplayConfig::default();
    }
    match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("can't load '{}': {}, using defaults", CONFIG_PATH, e);
            DisplayConfig::default()
        }
    }
}

/// Window size in pixels, saturating at `i32::MAX`
fn window_size(config: &DisplayConfig) -> (i32, i32) {
    let side = |length: usize| {
        let scaled = u32::try_from(length).unwrap_or(u32::MAX).saturating_mul(config.scale);
        i32::try_from(scaled).unwrap_or(i32::MAX)
    };
    (side(config.width), side(config.height))
}

fn window_conf() -> Conf {
    let config = display_config();
    let (window_width, window_height) = window_size(&config);
    Conf {
        window_title: format!("Tofu GL v{}", VERSION),
        window_width,
        window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Two 16x16 cells: concentric rings over the cycling range, and a checkerboard
fn demo_bank() -> Result<Bank, GlError> {
    let mut data: Vec<Pixel> = vec![0; CELL * 2 * CELL];
    let half = CELL as f32 / 2.0;
    for y in 0..CELL {
        for x in 0..CELL {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let distance = (dx * dx + dy * dy).sqrt();
            data[y * CELL * 2 + x] = if distance < half {
                1 + (distance as usize % CYCLE_LEN) as Pixel
            } else {
                0
            };
            data[y * CELL * 2 + CELL + x] = if ((x / 4) + (y / 4)) % 2 == 0 { 7 } else { 12 };
        }
    }
    let atlas = Surface::from_indexes(CELL * 2, CELL, data)?;
    Bank::new(atlas, CELL, CELL)
}

fn cycle_mapping(offset: usize) -> Vec<(Pixel, Pixel)> {
    (0..CYCLE_LEN)
        .map(|i| ((1 + i) as Pixel, (1 + (i + offset) % CYCLE_LEN) as Pixel))
        .collect()
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = display_config();
    let mut context = match Context::from_config(&config) {
        Ok(context) => context,
        Err(e) => {
            error!("can't create context: {}", e);
            return;
        }
    };
    let bank = match demo_bank() {
        Ok(bank) => bank,
        Err(e) => {
            error!("can't build demo bank: {}", e);
            return;
        }
    };

    info!("=== Tofu GL v{} ({}x{}) ===", VERSION, context.width(), context.height());

    let width = context.width() as i32;
    let height = context.height() as i32;
    let cell = CELL as i32;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let time = get_time() as f32;
        context.clear();

        let cycle = cycle_mapping((time * 8.0) as usize);
        context.set_shifting(Some(cycle.as_slice()));
        bank.sprite(&mut context, 0, Point::new(16, 16), 0.0, 1.0, 1.0);
        bank.sprite(&mut context, 0, Point::new(56, 24), 0.0, 3.0, 2.0);
        context.set_shifting(None);

        bank.sprite(&mut context, 1, Point::new(width / 2, height / 2), time, 2.0, 2.0);
        bank.sprite(&mut context, 1, Point::new(width - 2 * cell, height - 2 * cell), -time * 0.5, 1.0, 1.0);
        bank.sprite(&mut context, 0, Point::new(20, height - 28), 0.0, 1.5, 1.5);
        bank.sprite(&mut context, 1, Point::new(56, height - 28), time * 0.25, -1.5, 1.5);

        context.rectangle(DrawMode::Line, Rectangle::new(0, 0, width, height), 7);
        context.circle(DrawMode::Line, Point::new(width / 2, height / 2), 3 * cell, 12);
        let wobble = ((time * 2.0).sin() * 8.0) as i32;
        let triangle = [
            Point::new(width - 56, 12),
            Point::new(width - 12, 12 + wobble.abs()),
            Point::new(width - 34 + wobble, 48),
        ];
        context.polygon(DrawMode::Fill, &triangle, 5);
        context.point(Point::new(width / 2, height / 2), 15);

        if is_key_pressed(KeyCode::P) && context.screenshot("screenshot.png") {
            info!("screenshot saved to 'screenshot.png'");
        }

        clear_background(BLACK);

        let texture = Texture2D::from_rgba8(context.width() as u16, context.height() as u16, &context.to_rgba_bytes());
        texture.set_filter(FilterMode::Nearest);

        // Largest integer scale that fits the window
        let scale = (screen_width() / context.width() as f32)
            .min(screen_height() / context.height() as f32)
            .floor()
            .max(1.0);
        let draw_w = context.width() as f32 * scale;
        let draw_h = context.height() as f32 * scale;
        draw_texture_ex(
            &texture,
            ((screen_width() - draw_w) / 2.0).floor(),
            ((screen_height() - draw_h) / 2.0).floor(),
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(draw_w, draw_h)),
                ..Default::default()
            },
        );

        next_frame().await;
    }

    context.terminate();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_mapping_wraps() {
        let mapping = cycle_mapping(14);
        assert_eq!(mapping.len(), CYCLE_LEN);
        assert_eq!(mapping[0], (1, 15));
        assert_eq!(mapping[1], (2, 1));
        assert!(mapping.iter().all(|&(_, to)| (1..=CYCLE_LEN as Pixel).contains(&to)));
    }

    #[test]
    fn test_window_size_saturates() {
        let config = DisplayConfig::default();
        assert_eq!(window_size(&config), (960, 720));

        let huge = DisplayConfig {
            width: 100_000,
            height: usize::MAX,
            scale: u32::MAX,
            ..DisplayConfig::default()
        };
        assert_eq!(window_size(&huge), (i32::MAX, i32::MAX));
    }

    #[test]
    fn test_demo_bank() {
        let bank = demo_bank().unwrap();
        assert_eq!(bank.len(), 2);
        // corners of the ring cell are outside the circle
        assert_eq!(bank.atlas().get(0, 0), Some(0));
        assert_eq!(bank.atlas().get(8, 8), Some(1));
    }
}
