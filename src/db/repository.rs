//! Case persistence behind the `CaseRepository` seam.
//!
//! The pipeline only reads by module and appends new cases, so the trait
//! stays that narrow. `SqliteCaseRepository` is the production adapter.

use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params_from_iter, Connection};
use uuid::Uuid;

use super::sqlite::{open_database, open_memory_database};
use super::DatabaseError;
use crate::models::{CaseRecord, Module, Mood, NewCaseRecord};

/// Storage for historical support cases.
pub trait CaseRepository: Send + Sync {
    /// All cases whose module is one of `modules`. No ordering guarantee.
    fn find_by_module_in(&self, modules: &[Module]) -> Result<Vec<CaseRecord>, DatabaseError>;

    /// Persist a new case, assigning its identifier.
    fn save(&self, record: NewCaseRecord) -> Result<CaseRecord, DatabaseError>;
}

/// SQLite-backed repository. One connection, serialized behind a mutex.
pub struct SqliteCaseRepository {
    conn: Mutex<Connection>,
}

impl SqliteCaseRepository {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::new(open_database(path)?))
    }

    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(open_memory_database()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }
}

type CaseRow = (String, String, String, String, i32, String, String, DateTime<Utc>);

fn case_from_row(row: CaseRow) -> Result<CaseRecord, DatabaseError> {
    let (id, problem, solution, upsell, prints, mood, module, created_at) = row;
    Ok(CaseRecord {
        id: Uuid::parse_str(&id).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        problem,
        solution,
        upsell,
        prints: prints != 0,
        mood: Mood::from_str(&mood)?,
        module: Module::from_str(&module)?,
        created_at,
    })
}

impl CaseRepository for SqliteCaseRepository {
    fn find_by_module_in(&self, modules: &[Module]) -> Result<Vec<CaseRecord>, DatabaseError> {
        if modules.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=modules.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT id, problem, solution, upsell, prints, mood, module, created_at
             FROM cases WHERE module IN ({placeholders})"
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(modules.iter().map(|m| m.as_str())), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i32>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, DateTime<Utc>>(7)?,
            ))
        })?;

        let mut cases = Vec::new();
        for row in rows {
            cases.push(case_from_row(row?)?);
        }
        Ok(cases)
    }

    fn save(&self, record: NewCaseRecord) -> Result<CaseRecord, DatabaseError> {
        let saved = record.into_record(Uuid::new_v4(), Utc::now());

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO cases (id, problem, solution, upsell, prints, mood, module, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                saved.id.to_string(),
                saved.problem,
                saved.solution,
                saved.upsell,
                saved.prints as i32,
                saved.mood.as_str(),
                saved.module.as_str(),
                saved.created_at,
            ],
        )?;

        tracing::debug!(case_id = %saved.id, module = %saved.module, "Case saved");
        Ok(saved)
    }
}
