//! Terminal rendering of the map surface.

use std::collections::HashMap;
use std::io::{self, Write};

use console::{style, Color};
use solotrav::coord::Position;
use solotrav::map::{Layer, LayerId, MapSurface, StatusTone};

/// Prints map changes as lines of text.
///
/// Marker moves are not printed; the status line that follows each sample
/// already reflects the new position.
pub struct TerminalSurface<W: Write + Send> {
    out: W,
    layers: HashMap<LayerId, Layer>,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            layers: HashMap::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        // Terminal write failures are not recoverable here.
        let _ = writeln!(self.out, "{}", text.as_ref());
        let _ = self.out.flush();
    }
}

fn describe(layer: &Layer) -> String {
    match layer {
        Layer::UserMarker { position, popup } => format!("{} at {}", popup, position),
        Layer::GeofenceCircle {
            center,
            radius_meters,
        } => format!("Geofence: {} m around {}", radius_meters, center),
        Layer::PlaceMarker { place, icon } => {
            let marker = match ansi256(icon.color) {
                Some(color) => style("+").fg(Color::Color256(color)).to_string(),
                None => "+".to_string(),
            };
            format!(
                "{} [{}] {} at {}",
                marker, icon.glyph, place.label, place.position
            )
        }
    }
}

/// Nearest xterm-256 color cube entry for a `#rrggbb` color.
fn ansi256(hex: &str) -> Option<u8> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(hex.get(i..i + 2)?, 16)
            .ok()
            .map(|v| ((v as u16 * 5 + 127) / 255) as u8)
    };
    Some(16 + 36 * channel(0)? + 6 * channel(2)? + channel(4)?)
}

impl<W: Write + Send> MapSurface for TerminalSurface<W> {
    fn open(&mut self, center: Position, zoom: u8) {
        self.line(format!("Map opened at {} (zoom {})", center, zoom));
    }

    fn add_layer(&mut self, id: LayerId, layer: Layer) {
        self.line(describe(&layer));
        self.layers.insert(id, layer);
    }

    fn move_layer(&mut self, id: LayerId, position: Position) {
        if let Some(Layer::UserMarker { position: current, .. }) = self.layers.get_mut(&id) {
            *current = position;
        }
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }

    fn pan_to(&mut self, _position: Position) {}

    fn set_status(&mut self, text: &str, tone: StatusTone) {
        let styled = match tone {
            StatusTone::Neutral => text.to_string(),
            StatusTone::Affirmative => style(text).green().to_string(),
            StatusTone::Warning => style(text).red().bold().to_string(),
        };
        self.line(styled);
    }

    fn alert(&mut self, message: &str) {
        self.line(format!("{} {}", style("!").yellow(), message));
    }

    fn fatal(&mut self, message: &str) {
        self.line(format!("{} {}", style("Error:").red().bold(), message));
    }
}
