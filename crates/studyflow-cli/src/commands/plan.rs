//! Day planning command.

use studyflow_core::error::ParseError;
use studyflow_core::planner::Planner;
use studyflow_core::scheduler::{parse_date, WindowSpec};
use studyflow_core::storage::UserDb;

/// Parse `HH:MM-HH:MM` into a window spec. Time validation happens in the
/// core when the spec is resolved.
fn parse_window_arg(value: &str) -> Result<WindowSpec, ParseError> {
    let (start, end) = value.split_once('-').ok_or_else(|| ParseError::InvalidWindow {
        value: value.to_string(),
    })?;
    Ok(WindowSpec {
        start: start.to_string(),
        end: end.to_string(),
    })
}

pub fn run(
    user: &str,
    date: &str,
    windows: &[String],
    session: Option<String>,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_date(date)?;
    let specs = windows
        .iter()
        .map(|w| parse_window_arg(w))
        .collect::<Result<Vec<_>, _>>()?;

    let db = UserDb::open()?;
    let narrator = super::narrator(offline)?;
    let response = Planner::new(&db, narrator.as_ref()).plan_day(user, date, &specs, session)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
