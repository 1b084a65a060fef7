//! Canvas2D renderer
//!
//! Green-on-black terminal look: typed letters glow, the next letter of the
//! locked word is white, the rest are dim. Drawing errors are ignored; a bad
//! frame is simply replaced by the next one.

use rand::Rng;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::fx::{SHAKE_MAGNITUDE, ScreenFx};
use crate::sim::{FrameView, ParticleKind, WordView};

const WORD_FONT: &str = "bold 32px \"Share Tech Mono\", monospace";
const BANNER_FONT: &str = "bold 80px \"Share Tech Mono\", monospace";
const TYPED: &str = "#0f0";
const NEXT: &str = "#fff";
const PENDING: &str = "#005500";
const PARTICLE_SIZE: f64 = 3.0;

fn particle_color(kind: ParticleKind) -> &'static str {
    match kind {
        ParticleKind::Spark => "#0f0",
        ParticleKind::Blast => "#f00",
    }
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Canvas size in pixels
    pub fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn render(&self, view: &FrameView, fx: &ScreenFx) {
        let ctx = &self.ctx;
        let (w, h) = (view.field_width as f64, view.field_height as f64);

        ctx.save();
        if fx.shaking() {
            let mut rng = rand::rng();
            let dx = (rng.random::<f64>() - 0.5) * SHAKE_MAGNITUDE as f64;
            let dy = (rng.random::<f64>() - 0.5) * SHAKE_MAGNITUDE as f64;
            let _ = ctx.translate(dx, dy);
        }

        // Translucent clear leaves a short trail
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
        ctx.fill_rect(-SHAKE_MAGNITUDE as f64, -SHAKE_MAGNITUDE as f64, w + 20.0, h + 20.0);

        ctx.set_font(WORD_FONT);
        ctx.set_text_baseline("middle");
        ctx.set_text_align("left");

        if let Some(target) = view.target() {
            self.draw_beam(target, w, h);
        }
        for word in &view.words {
            self.draw_word(word);
        }

        for p in view.particles {
            ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
            ctx.set_fill_style_str(particle_color(p.kind));
            ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, PARTICLE_SIZE, PARTICLE_SIZE);
        }
        ctx.set_global_alpha(1.0);
        ctx.restore();

        if fx.flashing() {
            ctx.set_fill_style_str("rgba(255, 0, 0, 0.2)");
            ctx.fill_rect(0.0, 0.0, w, h);
        }

        if let Some(banner) = fx.banner() {
            self.draw_banner(banner.level, banner.alpha(), banner.scale(), w, h);
        }
    }

    fn text_width(&self, text: &str) -> f64 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }

    /// Beam from the player's position to the locked word
    fn draw_beam(&self, word: &WordView, field_w: f64, field_h: f64) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str("rgba(0, 255, 0, 0.3)");
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(field_w / 2.0, field_h);
        ctx.line_to(word.x as f64, word.y as f64 + 10.0);
        ctx.stroke();
    }

    fn draw_word(&self, word: &WordView) {
        let ctx = &self.ctx;
        let width = self.text_width(word.text);
        let y = word.y as f64;
        let start_x = word.x as f64 - width / 2.0;

        if word.targeted {
            ctx.set_stroke_style_str(TYPED);
            ctx.set_line_width(2.0);
            ctx.stroke_rect(start_x - 5.0, y - 15.0, width + 10.0, 30.0);
        }

        let (typed, rest) = word.split();
        let mut cursor = start_x;

        if !typed.is_empty() {
            ctx.set_fill_style_str(TYPED);
            ctx.set_shadow_blur(10.0);
            ctx.set_shadow_color(TYPED);
            let _ = ctx.fill_text(typed, cursor, y);
            cursor += self.text_width(typed);
        }

        // Next letter of the locked word stands out
        let pending = match rest.chars().next() {
            Some(next) if word.targeted => {
                let (glyph, tail) = rest.split_at(next.len_utf8());
                ctx.set_fill_style_str(NEXT);
                ctx.set_shadow_blur(5.0);
                ctx.set_shadow_color(NEXT);
                let _ = ctx.fill_text(glyph, cursor, y);
                cursor += self.text_width(glyph);
                tail
            }
            _ => rest,
        };

        ctx.set_shadow_blur(0.0);
        if !pending.is_empty() {
            ctx.set_fill_style_str(PENDING);
            let _ = ctx.fill_text(pending, cursor, y);
        }
    }

    fn draw_banner(&self, level: u32, alpha: f32, scale: f32, w: f64, h: f64) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha as f64);
        let _ = ctx.translate(w / 2.0, h / 2.0);
        let _ = ctx.scale(scale as f64, scale as f64);
        ctx.set_font(BANNER_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str(TYPED);
        ctx.set_shadow_blur(20.0);
        ctx.set_shadow_color(TYPED);
        let _ = ctx.fill_text(&format!("LEVEL {}", level), 0.0, 0.0);
        ctx.restore();
    }
}
