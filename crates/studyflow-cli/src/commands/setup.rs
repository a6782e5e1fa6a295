//! User setup command.

use std::io::Read;

use serde::Deserialize;
use studyflow_core::memory::MemoryService;
use studyflow_core::profile::ProfileOverrides;
use studyflow_core::storage::UserDb;
use studyflow_core::task::{Course, Task};

/// JSON payload accepted by `setup --file`.
#[derive(Deserialize)]
struct SetupPayload {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    profile: ProfileOverrides,
}

pub fn run(user: &str, file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };
    let payload: SetupPayload = serde_json::from_str(&raw)?;

    let db = UserDb::open()?;
    let summary = MemoryService::new(&db).setup_user(
        user,
        payload.courses,
        payload.tasks,
        &payload.profile,
    )?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
