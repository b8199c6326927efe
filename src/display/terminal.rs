//! Terminal preview of the appliance screen.
//!
//! Draws each frame on a braille canvas so the jukebox can be run and
//! poked at on a desktop without the SPI panel attached.

use std::io::Stdout;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Rectangle};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::{Error, Result};

use super::frame::{Frame, FrameSink, Rgb, Shape};

const HELP: &str =
    " a/b/x/y buttons | 1-9 cartridge | 0 unknown | r remove | g glitch | +/- volume | q quit ";

pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalSink {
    /// Switch the terminal to raw mode on the alternate screen.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn leave(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// The preview can't draw bitmaps, so a backdrop shows as a dim fill.
fn backdrop_color(frame: &Frame) -> Color {
    if frame.backdrop.is_some() {
        Color::Rgb(12, 10, 28)
    } else {
        Color::Black
    }
}

fn paint(ctx: &mut Context<'_>, frame: &Frame) {
    let h = frame.height as f64;
    // frame y grows downwards, canvas y grows upwards
    let flip = |y: f32| h - y as f64;

    for shape in &frame.background {
        match shape {
            Shape::Square { x, y, size, color: c } => ctx.draw(&Rectangle {
                x: *x as f64,
                y: flip(*y + *size),
                width: *size as f64,
                height: *size as f64,
                color: color(*c),
            }),
            Shape::Polygon { color: c, .. } => {
                let v = shape.vertices();
                for (i, a) in v.iter().enumerate() {
                    let b = v[(i + 1) % v.len()];
                    ctx.draw(&CanvasLine::new(
                        a.0 as f64,
                        flip(a.1),
                        b.0 as f64,
                        flip(b.1),
                        color(*c),
                    ));
                }
            }
        }
    }
    ctx.layer();

    if let Some(label) = &frame.label {
        let x = (frame.width as f64 - label.chars().count() as f64 * 6.0).max(0.0) / 2.0;
        ctx.print(x, h / 2.0, Span::styled(label.clone(), Style::default().fg(color(Rgb::LABEL))));
    }

    if let Some(bar) = frame.volume_bar {
        for row in 0..frame.volume_bar_height {
            ctx.draw(&CanvasLine::new(0.0, row as f64, bar as f64, row as f64, color(Rgb::ACCENT)));
        }
    }

    if let Some(asset) = &frame.action {
        let text = format!("{} {}", asset.icon.glyph(), asset.icon.name());
        ctx.print(8.0, h - 12.0, Span::styled(text, Style::default().fg(Color::White)));
    }

    if let Some(phase) = frame.pause_indicator {
        let dots = ".".repeat(phase as usize + 1);
        ctx.print(frame.width as f64 - 40.0, h - 12.0, Span::raw(dots));
    }

    if let Some(line) = &frame.scroll {
        // skip the glyphs already scrolled off the left edge
        let glyph = line.glyph_width.max(1) as i32;
        let hidden = if line.x < 0 { (-line.x + glyph - 1) / glyph } else { 0 };
        let visible: String = line.text.chars().skip(hidden as usize).collect();
        let x = line.x + hidden * glyph;
        if !visible.is_empty() && x < frame.width as i32 {
            ctx.print(
                x as f64,
                flip(line.y as f32),
                Span::styled(visible, Style::default().fg(color(Rgb::WHITE))),
            );
        }
    }
}

impl FrameSink for TerminalSink {
    fn push(&mut self, frame: &Frame) -> Result<()> {
        self.terminal
            .draw(|f| {
                let canvas = Canvas::default()
                    .block(Block::bordered().title(" jukebox ").title_bottom(HELP))
                    .marker(Marker::Braille)
                    .background_color(backdrop_color(frame))
                    .x_bounds([0.0, frame.width as f64])
                    .y_bounds([0.0, frame.height as f64])
                    .paint(|ctx| paint(ctx, frame));
                f.render_widget(canvas, f.area());
            })
            .map_err(|e| Error::Display(e.to_string()))?;
        Ok(())
    }
}
