//! Canvas 2D renderer
//!
//! Pure function of the current state: reads entity containers, writes
//! pixels. Never mutates gameplay state; the shake magnitude it reads is
//! decayed by the simulation tick.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::assets::Assets;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::GameState;

pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    assets: Assets,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, assets: Assets) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            assets,
        })
    }

    /// Draw one frame from the current state
    pub fn render(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.save();

        // Screen shake: randomized offset proportional to the magnitude
        if state.screen_shake > 0.0 && settings.effective_screen_shake() {
            let shake = state.screen_shake as f64;
            let _ = ctx.translate(
                (js_sys::Math::random() * 2.0 - 1.0) * shake,
                (js_sys::Math::random() * 2.0 - 1.0) * shake,
            );
        }

        // Background, stretched to the canvas; skipped until loaded
        if self.assets.background.complete() {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &self.assets.background,
                0.0,
                0.0,
                w,
                h,
            );
        }

        // Ground strip
        ctx.set_fill_style_str("#deb887");
        ctx.fill_rect(0.0, h - GROUND_HEIGHT as f64, w, GROUND_HEIGHT as f64);

        self.draw_player(state);
        self.draw_enemies(state);
        self.draw_boss(state);
        self.draw_bullets(state);
        self.draw_explosions(state);

        if settings.show_hud {
            self.draw_hud(state);
        }

        ctx.restore();
    }

    fn draw_player(&self, state: &GameState) {
        let sprite = self.assets.player_sprite(state.character);
        if sprite.complete() {
            let p = &state.player;
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                sprite,
                p.pos.x as f64,
                p.pos.y as f64,
                p.size.x as f64,
                p.size.y as f64,
            );
        }
    }

    fn draw_enemies(&self, state: &GameState) {
        let ctx = &self.ctx;
        for e in &state.enemies {
            let (ew, eh) = (e.size.x as f64, e.size.y as f64);
            ctx.save();
            let _ = ctx.translate(e.pos.x as f64, e.pos.y as f64);

            // Body capsule
            ctx.set_fill_style_str("#3aff8a");
            ctx.set_stroke_style_str("#76ffbd");
            ctx.set_line_width(4.0);
            rounded_rect(ctx, ew, eh, 14.0);
            ctx.fill();
            ctx.stroke();

            // Eye
            ctx.set_fill_style_str("#ffffff");
            ctx.begin_path();
            let _ = ctx.arc(ew / 2.0, eh / 2.0, 12.0, 0.0, std::f64::consts::TAU);
            ctx.fill();
            ctx.set_fill_style_str("#000");
            ctx.begin_path();
            let _ = ctx.arc(ew / 2.0, eh / 2.0, 6.0, 0.0, std::f64::consts::TAU);
            ctx.fill();

            // Antenna
            ctx.set_stroke_style_str("#3aff8a");
            ctx.set_line_width(4.0);
            ctx.begin_path();
            ctx.move_to(ew / 2.0, 0.0);
            ctx.line_to(ew / 2.0, -15.0);
            ctx.stroke();

            ctx.restore();
        }
    }

    fn draw_boss(&self, state: &GameState) {
        let Some(boss) = &state.boss else {
            return;
        };
        let ctx = &self.ctx;
        let (bw, bh) = (boss.size.x as f64, boss.size.y as f64);

        ctx.save();
        let _ = ctx.translate(boss.pos.x as f64, boss.pos.y as f64);

        // Body capsule
        ctx.set_fill_style_str("#37c471");
        ctx.set_stroke_style_str("#0c4023");
        ctx.set_line_width(6.0);
        rounded_rect(ctx, bw, bh, 40.0);
        ctx.fill();
        ctx.stroke();

        // Antenna
        ctx.begin_path();
        ctx.move_to(bw / 2.0, -30.0);
        ctx.line_to(bw / 2.0, 15.0);
        ctx.stroke();

        // Single large eye
        ctx.set_fill_style_str("#ffffff");
        ctx.begin_path();
        let _ = ctx.ellipse(bw / 2.0, bh / 3.0, 35.0, 45.0, 0.0, 0.0, std::f64::consts::TAU);
        ctx.fill();
        ctx.set_fill_style_str("#ff3333");
        ctx.begin_path();
        let _ = ctx.arc(bw / 2.0, bh / 3.0, 22.0, 0.0, std::f64::consts::TAU);
        ctx.fill();

        // Legs
        ctx.begin_path();
        ctx.move_to(bw * 0.2, bh * 0.5);
        ctx.line_to(bw * 0.05, bh * 0.7);
        ctx.stroke();
        ctx.begin_path();
        ctx.move_to(bw * 0.8, bh * 0.5);
        ctx.line_to(bw * 0.95, bh * 0.7);
        ctx.stroke();

        // Health bar scaled to remaining hp
        ctx.set_fill_style_str("red");
        let frac = boss.hp as f64 / BOSS_HP as f64;
        ctx.fill_rect(0.0, -20.0, bw * frac, 12.0);

        ctx.restore();
    }

    fn draw_bullets(&self, state: &GameState) {
        let ctx = &self.ctx;

        // Enemy bullets: filled circles
        ctx.set_fill_style_str("#ff00ff");
        for b in &state.enemy_bullets {
            ctx.begin_path();
            let _ = ctx.arc(
                b.pos.x as f64,
                b.pos.y as f64,
                b.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }

        // Player bullets: filled squares in the character's color
        let half = PLAYER_BULLET_HALF as f64;
        for b in &state.bullets {
            ctx.set_fill_style_str(b.color);
            ctx.fill_rect(
                b.pos.x as f64 - half,
                b.pos.y as f64 - half,
                half * 2.0,
                half * 2.0,
            );
        }
    }

    fn draw_explosions(&self, state: &GameState) {
        let ctx = &self.ctx;
        for p in &state.explosions {
            let life = p.life as f64;
            ctx.set_global_alpha(life);
            // Hue shifts from orange toward yellow as the particle fades
            let hue = 30.0 + (1.0 - life) * 40.0;
            ctx.set_fill_style_str(&format!("hsl({hue},100%,60%)"));
            ctx.begin_path();
            let _ = ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                (p.size * p.life) as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
            ctx.set_global_alpha(1.0);
        }
    }

    fn draw_hud(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("white");
        ctx.set_font("22px Comic Sans MS");
        let _ = ctx.fill_text(&format!("Lives: {}", state.lives), 20.0, 30.0);
        let _ = ctx.fill_text(&format!("Score: {}", state.score), 150.0, 30.0);
        let _ = ctx.fill_text(&format!("Kills: {}", state.kills), 280.0, 30.0);
    }
}

/// Trace a rounded-rect path at the current origin
fn rounded_rect(ctx: &CanvasRenderingContext2d, w: f64, h: f64, r: f64) {
    ctx.begin_path();
    ctx.move_to(r, 0.0);
    let _ = ctx.arc_to(w, 0.0, w, h, r);
    let _ = ctx.arc_to(w, h, 0.0, h, r);
    let _ = ctx.arc_to(0.0, h, 0.0, 0.0, r);
    let _ = ctx.arc_to(0.0, 0.0, w, 0.0, r);
    ctx.close_path();
}

/// Pointer position helper shared with input handling
pub fn canvas_point(canvas: &HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(client_x - rect.left() as f32, client_y - rect.top() as f32)
}
