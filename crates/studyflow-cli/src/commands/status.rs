//! Progress status command.

use studyflow_core::memory::MemoryService;
use studyflow_core::storage::UserDb;

pub fn run(user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = UserDb::open()?;
    let status = MemoryService::new(&db).status(user)?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
