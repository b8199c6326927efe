//! Keyboard-driven stand-ins for the reader, knob and buttons.
//!
//! A background thread reads terminal key events and turns them into button
//! presses (sent over a channel, like edge-triggered interrupts would) and
//! into changes of a shared "what is on the reader / where is the knob" state
//! that the simulated adapters report when polled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::token::TokenId;

use super::buttons::{ButtonLabel, ButtonPress};
use super::sensors::{TokenReader, VolumeSensor};

/// How long a simulated read glitch blinds the reader.
const GLITCH: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SimKey {
    Button(ButtonLabel),
    /// Put the n-th known cartridge (0-based) on the reader.
    Place(usize),
    PlaceUnknown,
    Remove,
    Glitch,
    VolumeUp,
    VolumeDown,
    Quit,
}

pub(crate) fn map_key(code: KeyCode) -> Option<SimKey> {
    let key = match code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => SimKey::Button(ButtonLabel::A),
            'b' => SimKey::Button(ButtonLabel::B),
            'x' => SimKey::Button(ButtonLabel::X),
            'y' => SimKey::Button(ButtonLabel::Y),
            '0' => SimKey::PlaceUnknown,
            d @ '1'..='9' => SimKey::Place(d as usize - '1' as usize),
            'r' => SimKey::Remove,
            'g' => SimKey::Glitch,
            '+' | '=' => SimKey::VolumeUp,
            '-' => SimKey::VolumeDown,
            'q' => SimKey::Quit,
            _ => return None,
        },
        KeyCode::Backspace | KeyCode::Delete => SimKey::Remove,
        KeyCode::Up | KeyCode::Right => SimKey::VolumeUp,
        KeyCode::Down | KeyCode::Left => SimKey::VolumeDown,
        KeyCode::Esc => SimKey::Quit,
        _ => return None,
    };
    Some(key)
}

#[derive(Debug)]
struct Bench {
    token: Option<TokenId>,
    blind_until: Option<Instant>,
    volume: i32,
}

type SharedBench = Arc<Mutex<Bench>>;

pub struct SimulatedReader {
    bench: SharedBench,
}

impl TokenReader for SimulatedReader {
    fn poll(&mut self) -> Option<TokenId> {
        let bench = self.bench.lock().ok()?;
        if bench.blind_until.is_some_and(|t| Instant::now() < t) {
            return None;
        }
        bench.token.clone()
    }
}

pub struct SimulatedKnob {
    bench: SharedBench,
}

impl VolumeSensor for SimulatedKnob {
    fn read(&mut self) -> Result<i32> {
        self.bench
            .lock()
            .map(|b| b.volume)
            .map_err(|_| Error::Sensor("simulated knob state poisoned".to_string()))
    }
}

/// Handles to the simulated peripherals plus the keyboard thread.
pub struct Simulator {
    pub reader: SimulatedReader,
    pub knob: SimulatedKnob,
    quit: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl Simulator {
    /// Start reading the keyboard. `cartridges` are the ids keys `1`-`9` place.
    pub fn spawn(
        cartridges: Vec<TokenId>,
        unknown: TokenId,
        full_scale: i32,
        buttons: Sender<ButtonPress>,
    ) -> Self {
        let bench: SharedBench = Arc::new(Mutex::new(Bench {
            token: None,
            blind_until: None,
            volume: full_scale / 2,
        }));
        let quit = Arc::new(AtomicBool::new(false));

        let thread_bench = Arc::clone(&bench);
        let thread_quit = Arc::clone(&quit);
        let step = (full_scale / 20).max(1);
        let join = thread::spawn(move || {
            while !thread_quit.load(Ordering::Relaxed) {
                let key = match event::poll(Duration::from_millis(100)) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(k)) if k.kind == KeyEventKind::Press => map_key(k.code),
                        Ok(_) => None,
                        Err(e) => {
                            warn!("keyboard read failed: {e}");
                            None
                        }
                    },
                    Ok(false) => None,
                    Err(e) => {
                        warn!("keyboard poll failed, stopping simulator input: {e}");
                        thread_quit.store(true, Ordering::Relaxed);
                        break;
                    }
                };
                let Some(key) = key else {
                    continue;
                };
                debug!(?key, "simulator key");

                if let SimKey::Button(label) = key {
                    let press = ButtonPress {
                        label,
                        at: Instant::now(),
                    };
                    if buttons.send(press).is_err() {
                        break;
                    }
                    continue;
                }
                if key == SimKey::Quit {
                    thread_quit.store(true, Ordering::Relaxed);
                    break;
                }

                let Ok(mut b) = thread_bench.lock() else {
                    break;
                };
                match key {
                    SimKey::Place(n) => {
                        if let Some(id) = cartridges.get(n) {
                            b.token = Some(id.clone());
                        }
                    }
                    SimKey::PlaceUnknown => b.token = Some(unknown.clone()),
                    SimKey::Remove => b.token = None,
                    SimKey::Glitch => b.blind_until = Some(Instant::now() + GLITCH),
                    SimKey::VolumeUp => b.volume = (b.volume + step).min(full_scale),
                    SimKey::VolumeDown => b.volume = (b.volume - step).max(0),
                    SimKey::Button(_) | SimKey::Quit => {}
                }
            }
        });

        Self {
            reader: SimulatedReader {
                bench: Arc::clone(&bench),
            },
            knob: SimulatedKnob { bench },
            quit,
            join: Some(join),
        }
    }

    /// Set once the user asks to quit.
    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    /// Stop the keyboard thread and wait for it.
    pub fn shutdown(&mut self) {
        self.quit.store(true, Ordering::Relaxed);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
