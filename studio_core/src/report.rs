//! Session reports: CSV export and revenue summaries.

use crate::{Ledger, Result, Session, SessionStatus};
use rust_decimal::Decimal;
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    session_id: u32,
    scheduled_at: String,
    client_id: u32,
    client_name: String,
    staff_id: u32,
    staff_name: String,
    session_type: String,
    location: String,
    duration_hours: u32,
    equipment: String,
    status: String,
    total_cost: String,
}

impl CsvRow {
    fn new(ledger: &Ledger, session: &Session) -> Self {
        let client_name = ledger
            .find_client(session.client_id)
            .map(|c| c.contact.full_name())
            .unwrap_or_default();
        let staff_name = ledger
            .find_staff(session.staff_id)
            .map(|s| s.contact.full_name())
            .unwrap_or_default();
        let equipment = session
            .equipment_ids
            .iter()
            .map(|id| {
                ledger
                    .find_equipment(*id)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .collect::<Vec<_>>()
            .join("; ");

        CsvRow {
            session_id: session.id.get(),
            scheduled_at: session.scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
            client_id: session.client_id.get(),
            client_name,
            staff_id: session.staff_id.get(),
            staff_name,
            session_type: session.session_type.clone(),
            location: session.location.clone(),
            duration_hours: session.duration_hours,
            equipment,
            status: session.status.to_string(),
            total_cost: session.total_cost.to_string(),
        }
    }
}

/// Append sessions to a CSV report, writing headers only for a new file
///
/// Returns the number of rows written.
pub fn write_sessions_csv<'a, I>(path: &Path, ledger: &Ledger, sessions: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Session>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    let mut count = 0;
    for session in sessions {
        writer.serialize(CsvRow::new(ledger, session))?;
        count += 1;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Wrote {} sessions to {:?}", count, path);
    Ok(count)
}

/// Session counts and value by status
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevenueSummary {
    pub planned: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Value of completed sessions
    pub earned: Decimal,
    /// Value of planned and in-progress sessions
    pub booked: Decimal,
    /// Value of cancelled sessions
    pub cancelled_value: Decimal,
}

/// Summarize every session in the ledger
pub fn revenue_summary(ledger: &Ledger) -> RevenueSummary {
    let mut summary = RevenueSummary::default();
    for session in ledger.sessions() {
        match session.status {
            SessionStatus::Planned => {
                summary.planned += 1;
                summary.booked += session.total_cost;
            }
            SessionStatus::InProgress => {
                summary.in_progress += 1;
                summary.booked += session.total_cost;
            }
            SessionStatus::Completed => {
                summary.completed += 1;
                summary.earned += session.total_cost;
            }
            SessionStatus::Cancelled => {
                summary.cancelled += 1;
                summary.cancelled_value += session.total_cost;
            }
        }
    }
    summary
}
