//! Parsing of interactive `track` commands.

use solotrav::app::AppEvent;
use solotrav::coord::Position;
use solotrav::places::PlaceCategory;

/// Usage shown at session start and for `help`.
pub const HELP: &str = "\
Commands:
  click <lat> <lon>   set the geofence center
  radius <meters>     change the geofence radius
  police              show nearby police stations
  hospital            show nearby hospitals
  help                show this help
  quit                end the session";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Event(AppEvent),
    Help,
    Empty,
}

/// Parse one input line.
///
/// The radius argument is passed through untouched; the session decides
/// whether it is acceptable.
pub fn parse_command(line: &str) -> Result<Input, String> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Input::Empty);
    };

    let event = match command.to_lowercase().as_str() {
        "click" => {
            let lat = parse_coordinate(parts.next(), "latitude")?;
            let lon = parse_coordinate(parts.next(), "longitude")?;
            let position = Position::try_new(lat, lon).map_err(|e| e.to_string())?;
            AppEvent::MapClicked(position)
        }
        "radius" => {
            let value = line.trim_start()[command.len()..].trim();
            AppEvent::RadiusInput(value.to_string())
        }
        "police" => AppEvent::FindNearby(PlaceCategory::Police),
        "hospital" => AppEvent::FindNearby(PlaceCategory::Hospital),
        "quit" | "exit" => AppEvent::Quit,
        "help" => return Ok(Input::Help),
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Input::Event(event))
}

fn parse_coordinate(value: Option<&str>, name: &str) -> Result<f64, String> {
    let value = value.ok_or_else(|| format!("Missing {}. Usage: click <lat> <lon>", name))?;
    value
        .parse()
        .map_err(|_| format!("Invalid {} '{}'", name, value))
}
