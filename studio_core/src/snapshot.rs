//! Serializable snapshot of the full ledger state.
//!
//! A snapshot holds the four entity collections in insertion order plus the
//! next-ID counters. It is the only shape exchanged with persistence.

use crate::{Client, Equipment, Error, Result, Session, Staff};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Next identifier to hand out for each collection
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NextIds {
    pub client: u32,
    pub staff: u32,
    pub equipment: u32,
    pub session: u32,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            client: 1,
            staff: 1,
            equipment: 1,
            session: 1,
        }
    }
}

/// Complete structural copy of a ledger
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    pub clients: Vec<Client>,
    pub staff: Vec<Staff>,
    pub equipment: Vec<Equipment>,
    pub sessions: Vec<Session>,
    pub next_ids: NextIds,
}

impl LedgerSnapshot {
    /// Check the snapshot can be loaded and return counters safe to resume from
    ///
    /// Duplicate IDs within a collection are rejected, as is any ID or counter
    /// at `u32::MAX`. A counter at or below an existing ID is raised past it so
    /// imported IDs are never reissued.
    pub fn validate(&self) -> Result<NextIds> {
        let client_max = max_unique("client", self.clients.iter().map(|c| c.id.get()))?;
        let staff_max = max_unique("staff", self.staff.iter().map(|s| s.id.get()))?;
        let equipment_max =
            max_unique("equipment", self.equipment.iter().map(|e| e.id.get()))?;
        let session_max = max_unique("session", self.sessions.iter().map(|s| s.id.get()))?;

        let next_ids = NextIds {
            client: resume_counter("client", self.next_ids.client, client_max)?,
            staff: resume_counter("staff", self.next_ids.staff, staff_max)?,
            equipment: resume_counter("equipment", self.next_ids.equipment, equipment_max)?,
            session: resume_counter("session", self.next_ids.session, session_max)?,
        };

        self.warn_on_inconsistent_availability();
        Ok(next_ids)
    }

    fn warn_on_inconsistent_availability(&self) {
        let reserved: HashSet<_> = self
            .sessions
            .iter()
            .filter(|s| s.status.is_active())
            .flat_map(|s| s.equipment_ids.iter().copied())
            .collect();

        for item in &self.equipment {
            if reserved.contains(&item.id) == item.available {
                tracing::warn!(
                    "Equipment #{} availability ({}) disagrees with active sessions",
                    item.id,
                    item.available
                );
            }
        }
    }
}

fn max_unique(entity: &str, ids: impl Iterator<Item = u32>) -> Result<u32> {
    let mut seen = HashSet::new();
    let mut max = 0;
    for id in ids {
        if id == 0 || id == u32::MAX {
            return Err(Error::persistence(format!("{} id {} is not valid", entity, id)));
        }
        if !seen.insert(id) {
            return Err(Error::persistence(format!(
                "duplicate {} id {} in snapshot",
                entity, id
            )));
        }
        max = max.max(id);
    }
    Ok(max)
}

fn resume_counter(entity: &str, stored: u32, max_id: u32) -> Result<u32> {
    if stored == u32::MAX {
        return Err(Error::persistence(format!(
            "{} counter {} leaves no ids to assign",
            entity, stored
        )));
    }
    // max_id is below u32::MAX here
    let floor = max_id + 1;
    if stored < floor {
        tracing::warn!(
            "Snapshot {} counter {} is behind existing ids, resuming at {}",
            entity,
            stored,
            floor
        );
        Ok(floor)
    } else {
        Ok(stored)
    }
}
