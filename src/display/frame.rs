//! The composed frame handed to the output device each tick.
//!
//! A frame is a scene description in canvas pixel coordinates (origin top
//! left); rasterizing it is up to the sink.

use std::f32::consts::PI;
use std::path::PathBuf;

use crate::error::Result;

use super::icons::IconAsset;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Volume bar and background effect.
    pub const ACCENT: Rgb = Rgb(255, 0, 152);
    /// Token-id label.
    pub const LABEL: Rgb = Rgb(255, 222, 243);

    pub fn scaled(self, f: f32) -> Rgb {
        let f = f.clamp(0.0, 1.0);
        let c = |v: u8| (v as f32 * f).round() as u8;
        Rgb(c(self.0), c(self.1), c(self.2))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled square with its top-left corner at `(x, y)`.
    Square { x: f32, y: f32, size: f32, color: Rgb },
    /// Regular polygon outline inscribed in a circle.
    Polygon {
        cx: f32,
        cy: f32,
        radius: f32,
        /// Degrees.
        rotation: f32,
        sides: u8,
        color: Rgb,
    },
}

impl Shape {
    /// Corner points of a polygon; empty for other shapes.
    pub fn vertices(&self) -> Vec<(f32, f32)> {
        match *self {
            Shape::Polygon {
                cx,
                cy,
                radius,
                rotation,
                sides,
                ..
            } if sides >= 3 => (0..sides)
                .map(|i| {
                    let a = rotation.to_radians() + 2.0 * PI * i as f32 / sides as f32;
                    (cx + radius * a.cos(), cy + radius * a.sin())
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollLine {
    pub text: String,
    /// Left edge of the text; negative once it scrolls off to the left.
    pub x: i32,
    /// Top edge of the text line.
    pub y: i32,
    pub glyph_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Static bitmap under everything else.
    pub backdrop: Option<PathBuf>,
    pub background: Vec<Shape>,
    /// Font for the scroll line and the label; sinks without a rasterizer
    /// use their own.
    pub font: Option<PathBuf>,
    pub label: Option<String>,
    /// Width of the volume bar in pixels.
    pub volume_bar: Option<u32>,
    pub volume_bar_height: u32,
    pub action: Option<IconAsset>,
    /// Phase of the "waiting for the cartridge" indicator.
    pub pause_indicator: Option<u8>,
    pub scroll: Option<ScrollLine>,
}

/// Output device for composed frames.
pub trait FrameSink {
    fn push(&mut self, frame: &Frame) -> Result<()>;
}
