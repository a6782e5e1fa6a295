//! Reflection command.

use studyflow_core::reflection::ReflectionService;
use studyflow_core::scheduler::parse_date;
use studyflow_core::storage::UserDb;

#[allow(clippy::too_many_arguments)]
pub fn run(
    user: &str,
    completed: Vec<String>,
    partial: Vec<String>,
    difficulty: u32,
    notes: String,
    date: Option<&str>,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = date.map(parse_date).transpose()?;

    let db = UserDb::open()?;
    let narrator = super::narrator(offline)?;
    let response = ReflectionService::new(&db, narrator.as_ref()).reflect(
        user, completed, partial, difficulty, notes, date,
    )?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
