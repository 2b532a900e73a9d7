//! Sprite demo: a grid of tinted tiles, a spinning sprite on the command-list
//! transform, a triangle fan, a centered quad, and an image loaded from disk.
//!
//! Usage: `tessera-demo [path/to/image.png]`
//! Set `RUST_LOG=tessera_engine=debug` for per-frame batch statistics.

use anyhow::Result;
use winit::dpi::LogicalSize;

use tessera_engine::canvas::{Canvas2d, CanvasConfig};
use tessera_engine::coords::Rect;
use tessera_engine::core::{App, AppControl, FrameCtx};
use tessera_engine::device::GpuInit;
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::paint::Rgba;
use tessera_engine::texture::TextureId;
use tessera_engine::transform::{AffineTransform, TransformCommandList};
use tessera_engine::window::{Runtime, RuntimeConfig};

const TILE: f32 = 48.0;

struct Sprites {
    canvas: Canvas2d,
    checker: TextureId,
    gradient: TextureId,
    photo: TextureId,
}

impl Sprites {
    fn new(mut canvas: Canvas2d, photo_path: &str) -> Result<Self> {
        let checker = canvas.create_texture_from_pixels(&checkerboard(16), 16, 16)?;
        let gradient = canvas.create_texture_from_pixels(&gradient_rgb(32), 32, 1)?;
        let photo = canvas.load_texture_file(photo_path);
        Ok(Self {
            canvas,
            checker,
            gradient,
            photo,
        })
    }

    fn draw(&mut self, t: f32) {
        let c = &mut self.canvas;
        let (w, h) = {
            let vp = c.batch().viewport();
            (vp.width, vp.height)
        };

        // Grid: one texture, so the whole grid is a single run.
        c.set_transform(AffineTransform::identity());
        let cols = (w / TILE) as usize;
        let rows = (h / TILE) as usize;
        for row in 0..rows {
            for col in 0..cols {
                let phase = t + (row + col) as f32 * 0.3;
                let tint = Rgba::new(
                    127.5 + 127.5 * phase.sin(),
                    127.5 + 127.5 * (phase * 0.7).cos(),
                    200.0,
                    255.0,
                );
                let dst = Rect::new(col as f32 * TILE, row as f32 * TILE, TILE - 2.0, TILE - 2.0);
                report(c.draw_image_tinted(self.checker, Rect::new(0.0, 0.0, 16.0, 16.0), dst, tint));
            }
        }

        // Spinning sprite on the command-list strategy. Commands replay in
        // order, so rotating before translating spins it about its center.
        let mut spin = TransformCommandList::new();
        spin.rotate(t * 45.0);
        spin.translate(w * 0.5, h * 0.5);
        c.set_transform(spin);
        report(c.draw_image(
            self.photo,
            Rect::new(0.0, 0.0, 128.0, 128.0),
            Rect::new(-96.0, -96.0, 192.0, 192.0),
        ));

        // Triangle fan: a hexagon colored from the gradient texture.
        c.set_transform(AffineTransform::identity());
        c.translate(w * 0.2, h * 0.5);
        let (src, dst, colors) = hexagon(80.0, t);
        report(c.draw_triangle_fan(self.gradient, &src, &dst, &colors));

        // Centered quad: the center vertex blends the four corner colors.
        c.reset_transform();
        c.translate(w * 0.8, h * 0.5);
        c.shear(0.25 * t.sin(), 0.0);
        report(c.draw_quad_centered(
            self.checker,
            &[0.0, 16.0, 16.0, 16.0, 16.0, 0.0, 0.0, 0.0],
            &[-70.0, 70.0, 70.0, 70.0, 70.0, -70.0, -70.0, -70.0],
            &[
                255.0, 0.0, 0.0, 255.0,
                0.0, 255.0, 0.0, 255.0,
                0.0, 0.0, 255.0, 255.0,
                255.0, 255.0, 0.0, 255.0,
            ],
        ));
    }
}

struct DemoApp {
    photo_path: String,
    sprites: Option<Sprites>,
    elapsed: f32,
}

impl App for DemoApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.elapsed += ctx.time.dt;
        if ctx.time.frame_index % 120 == 0 {
            ctx.window
                .set_title(&format!("tessera demo · {:.0} fps", ctx.time.fps()));
        }

        let t = self.elapsed;
        let photo_path = &self.photo_path;
        let sprites = &mut self.sprites;
        let mut failed = false;

        let control = ctx.render(|rctx, target| {
            if sprites.is_none() {
                let created = Canvas2d::from_render_ctx(rctx, CanvasConfig::default())
                    .map_err(anyhow::Error::from)
                    .and_then(|canvas| Sprites::new(canvas, photo_path));
                match created {
                    Ok(s) => *sprites = Some(s),
                    Err(e) => {
                        log::error!("failed to set up the canvas: {e:#}");
                        failed = true;
                        return;
                    }
                }
            }
            let Some(s) = sprites.as_mut() else { return };

            s.canvas.sync_surface(rctx);
            s.canvas.begin_frame();
            s.draw(t);
            s.canvas.end_frame();
            s.canvas.render_frame();
            s.canvas.encode(target);
        });

        if failed { AppControl::Exit } else { control }
    }
}

fn report(result: Result<(), tessera_engine::DrawError>) {
    if let Err(e) = result {
        log::debug!("draw skipped: {e}");
    }
}

/// Square RGBA checkerboard with 4-texel cells.
fn checkerboard(size: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let v = if (x / 4 + y / 4) % 2 == 0 { 255 } else { 96 };
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
    }
    rgba
}

/// Packed RGB ramp; expanded to RGBA on upload.
fn gradient_rgb(width: u32) -> Vec<u8> {
    (0..width)
        .flat_map(|x| {
            let v = (x * 255 / width.max(1)) as u8;
            [v, 64, 255 - v]
        })
        .collect()
}

fn hexagon(radius: f32, t: f32) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let mut src = Vec::with_capacity(12);
    let mut dst = Vec::with_capacity(12);
    let mut colors = Vec::with_capacity(24);
    for k in 0..6 {
        let a = t + k as f32 * std::f32::consts::FRAC_PI_3;
        dst.extend_from_slice(&[radius * a.cos(), radius * a.sin()]);
        src.extend_from_slice(&[k as f32 * 5.0 + 0.5, 0.5]);
        colors.extend_from_slice(&[255.0, 255.0, 255.0, 255.0]);
    }
    (src, dst, colors)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let photo_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/sprite.png".to_string());
    log::info!("loading {photo_path} in the background");

    let config = RuntimeConfig {
        title: "tessera demo".to_string(),
        initial_size: LogicalSize::new(1024.0, 640.0),
    };
    let app = DemoApp {
        photo_path,
        sprites: None,
        elapsed: 0.0,
    };

    Runtime::run(config, GpuInit::default(), app)
}
