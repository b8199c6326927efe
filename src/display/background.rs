//! "Warp speed" background: stars streaking out from the center and
//! rotating squares growing until they leave the screen.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::BackgroundSettings;

use super::frame::{Rgb, Shape};

const POLYGON_START_RADIUS: f32 = 10.0;
const POLYGON_START_BRIGHTNESS: f32 = 0.55;
/// Degrees per tick.
const POLYGON_SPIN: f32 = 0.3;

#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    brightness: f32,
}

#[derive(Debug, Clone)]
struct Polygon {
    radius: f32,
    rotation: f32,
    brightness: f32,
}

pub struct WarpField {
    settings: BackgroundSettings,
    width: f32,
    height: f32,
    rng: StdRng,
    stars: Vec<Star>,
    polygons: Vec<Polygon>,
    spawn_counter: u32,
    /// Frames held still since the last throttled step.
    held: u32,
}

impl WarpField {
    /// Build a field already fast-forwarded so the first frame is in motion.
    pub fn new(settings: &BackgroundSettings, width: u32, height: u32, seed: u64) -> Self {
        let mut field = Self {
            settings: settings.clone(),
            width: width as f32,
            height: height as f32,
            rng: StdRng::seed_from_u64(seed),
            stars: Vec::new(),
            polygons: Vec::new(),
            spawn_counter: 0,
            held: 0,
        };
        field.reseed(seed);
        field
    }

    /// Throw away the current layout, scatter new stars and fast-forward.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.polygons.clear();
        self.spawn_counter = 0;
        self.held = 0;
        let mut stars = Vec::with_capacity(self.settings.star_count);
        for _ in 0..self.settings.star_count {
            let (x, y) = self.random_position();
            let brightness = self.rng.r#gen::<f32>();
            stars.push(Star { x, y, brightness });
        }
        self.stars = stars;
        for _ in 0..self.settings.fast_forward_ticks {
            self.step();
        }
        debug!(
            seed,
            stars = self.star_count(),
            polygons = self.polygon_count(),
            "background seeded"
        );
    }

    /// Advance one rendered frame: a simulation step, unless
    /// `throttle_frames` says to hold the picture for this frame.
    pub fn advance(&mut self) {
        if self.held < self.settings.throttle_frames {
            self.held += 1;
            return;
        }
        self.held = 0;
        self.step();
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        let limit = self.width * 1.5;
        for p in &mut self.polygons {
            p.brightness = (p.brightness + 0.025).min(1.0);
            p.rotation -= POLYGON_SPIN;
            p.radius *= 1.0 + self.settings.warp_speed;
        }
        self.polygons.retain(|p| p.radius <= limit);

        if self.settings.polygons {
            self.spawn_counter += 1;
            if self.spawn_counter >= self.settings.polygon_spawn_every || self.polygons.is_empty() {
                self.spawn_counter = 0;
                self.polygons.push(Polygon {
                    radius: POLYGON_START_RADIUS,
                    rotation: 0.0,
                    brightness: POLYGON_START_BRIGHTNESS,
                });
            }
        }

        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        let margin = self.settings.star_size;
        for i in 0..self.stars.len() {
            let star = &mut self.stars[i];
            star.x += (star.x - cx) * self.settings.warp_speed;
            star.y += (star.y - cy) * self.settings.warp_speed;
            star.brightness = (star.brightness + 0.01).min(1.0);

            let off_canvas = star.x > self.width + margin
                || star.x < -margin
                || star.y > self.height + margin
                || star.y < -margin;
            if off_canvas {
                let (x, y) = self.random_position();
                self.stars[i] = Star {
                    x,
                    y,
                    brightness: 0.0,
                };
            }
        }
    }

    /// Shapes to draw, polygons under stars.
    pub fn shapes(&self, color: Rgb) -> Vec<Shape> {
        let (cx, cy) = ((self.width * 0.5).round(), (self.height * 0.5).round());
        let polygons = self.polygons.iter().map(|p| Shape::Polygon {
            cx,
            cy,
            radius: p.radius,
            rotation: p.rotation,
            sides: 4,
            color: color.scaled(p.brightness * 0.6),
        });
        let stars = self.stars.iter().map(|s| Shape::Square {
            x: s.x,
            y: s.y,
            size: self.settings.star_size * s.brightness,
            color: color.scaled(s.brightness),
        });
        polygons.chain(stars).collect()
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    fn random_position(&mut self) -> (f32, f32) {
        let x = self.rng.gen_range(0..self.width.max(1.0) as u32) as f32;
        let y = self.rng.gen_range(0..self.height.max(1.0) as u32) as f32;
        (x, y)
    }
}
