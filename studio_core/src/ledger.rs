//! The in-memory ledger of clients, staff, equipment and sessions.
//!
//! The ledger owns every collection and the ID counters, and is the only
//! place entities are created or change state. All operations are
//! synchronous and either fully apply or leave the ledger untouched.

use crate::pricing::session_cost;
use crate::snapshot::{LedgerSnapshot, NextIds};
use crate::{
    BookingRequest, Client, ClientId, Equipment, EquipmentId, Error, NewClient, NewEquipment,
    NewStaff, Result, Session, SessionId, SessionStatus, SessionTransition, Staff, StaffId,
    DEFAULT_CONDITION,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How strictly bookings check their references
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Reject bookings whose client ID does not resolve.
    ///
    /// When false the session is still booked and only the client's
    /// session counter update is skipped.
    #[serde(default)]
    pub require_known_client: bool,
}

/// Authoritative holder of all studio state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    clients: Vec<Client>,
    staff: Vec<Staff>,
    equipment: Vec<Equipment>,
    sessions: Vec<Session>,
    next_ids: NextIds,
    policy: BookingPolicy,
}

/// Take the next ID from a counter; the counter only moves on success
fn allocate(entity: &str, counter: &mut u32) -> Result<u32> {
    let id = *counter;
    *counter = id
        .checked_add(1)
        .ok_or_else(|| Error::validation(format!("{} ids exhausted", entity)))?;
    Ok(id)
}

impl Ledger {
    /// Create an empty ledger with the lenient booking policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: BookingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a ledger from a snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot, policy: BookingPolicy) -> Result<Self> {
        let mut ledger = Self::with_policy(policy);
        ledger.import_state(snapshot)?;
        Ok(ledger)
    }

    pub fn policy(&self) -> BookingPolicy {
        self.policy
    }

    pub fn next_ids(&self) -> NextIds {
        self.next_ids
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register a client; fails only when client IDs are exhausted
    pub fn add_client(&mut self, data: NewClient) -> Result<Client> {
        let client = Client {
            id: ClientId(allocate("client", &mut self.next_ids.client)?),
            contact: data.contact,
            registered_at: Utc::now(),
            sessions_count: 0,
        };
        tracing::info!("Registered client #{} ({})", client.id, client.contact.full_name());
        self.clients.push(client.clone());
        Ok(client)
    }

    /// Register a staff member; fails on a negative hourly rate
    pub fn add_staff(&mut self, data: NewStaff) -> Result<Staff> {
        if data.hourly_rate < Decimal::ZERO {
            return Err(Error::validation(format!(
                "hourly rate must not be negative (got {})",
                data.hourly_rate
            )));
        }

        let staff = Staff {
            id: StaffId(allocate("staff", &mut self.next_ids.staff)?),
            contact: data.contact,
            specialization: data.specialization,
            hourly_rate: data.hourly_rate,
            experience_years: data.experience_years,
        };
        tracing::info!(
            "Registered staff #{} ({}) at {}/h",
            staff.id,
            staff.contact.full_name(),
            staff.hourly_rate
        );
        self.staff.push(staff.clone());
        Ok(staff)
    }

    /// Register an equipment item as available; fails on a negative price
    pub fn add_equipment(&mut self, data: NewEquipment) -> Result<Equipment> {
        if data.rental_price < Decimal::ZERO {
            return Err(Error::validation(format!(
                "rental price must not be negative (got {})",
                data.rental_price
            )));
        }

        let condition = data
            .condition
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONDITION.to_string());

        let item = Equipment {
            id: EquipmentId(allocate("equipment", &mut self.next_ids.equipment)?),
            name: data.name,
            category: data.category,
            model: data.model,
            rental_price: data.rental_price,
            available: true,
            condition,
        };
        tracing::info!("Registered equipment #{} ({})", item.id, item.name);
        self.equipment.push(item.clone());
        Ok(item)
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn find_client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn find_staff(&self, id: StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn find_equipment(&self, id: EquipmentId) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn find_session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Equipment not reserved by any active session, in insertion order
    pub fn list_available_equipment(&self) -> Vec<&Equipment> {
        self.equipment.iter().filter(|e| e.available).collect()
    }

    pub fn find_sessions_by_client(&self, id: ClientId) -> Vec<&Session> {
        self.sessions.iter().filter(|s| s.client_id == id).collect()
    }

    pub fn find_sessions_by_staff(&self, id: StaffId) -> Vec<&Session> {
        self.sessions.iter().filter(|s| s.staff_id == id).collect()
    }

    // ------------------------------------------------------------------------
    // Booking
    // ------------------------------------------------------------------------

    /// Book a session and reserve its equipment
    ///
    /// Every check runs before anything is mutated, so a failed booking
    /// reserves nothing and consumes no session ID. Repeated equipment IDs
    /// are collapsed to their first occurrence.
    pub fn book_session(&mut self, request: BookingRequest) -> Result<Session> {
        if request.duration_hours == 0 {
            return Err(Error::validation("duration must be at least one hour"));
        }

        let hourly_rate = self
            .find_staff(request.staff_id)
            .map(|s| s.hourly_rate)
            .ok_or_else(|| {
                Error::validation(format!("staff #{} does not exist", request.staff_id))
            })?;

        let client_known = self.find_client(request.client_id).is_some();
        if !client_known && self.policy.require_known_client {
            return Err(Error::validation(format!(
                "client #{} does not exist",
                request.client_id
            )));
        }

        let mut seen = HashSet::new();
        let equipment_ids: Vec<EquipmentId> = request
            .equipment_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let mut indices = Vec::with_capacity(equipment_ids.len());
        for id in &equipment_ids {
            let idx = self
                .equipment
                .iter()
                .position(|e| e.id == *id)
                .ok_or_else(|| Error::validation(format!("equipment #{} does not exist", id)))?;
            indices.push(idx);
        }

        if let Some(taken) = indices
            .iter()
            .map(|&idx| &self.equipment[idx])
            .find(|e| !e.available)
        {
            tracing::warn!("Booking rejected: equipment #{} is reserved", taken.id);
            return Err(Error::BookingConflict {
                equipment_id: taken.id,
                name: taken.name.clone(),
            });
        }

        let total_cost = session_cost(
            hourly_rate,
            indices.iter().map(|&idx| self.equipment[idx].rental_price),
            request.duration_hours,
        )
        .ok_or_else(|| Error::validation("session cost overflows"))?;

        let id = SessionId(allocate("session", &mut self.next_ids.session)?);
        for &idx in &indices {
            self.equipment[idx].available = false;
        }

        let session = Session {
            id,
            client_id: request.client_id,
            staff_id: request.staff_id,
            equipment_ids,
            scheduled_at: request.scheduled_at,
            duration_hours: request.duration_hours,
            session_type: request.session_type,
            location: request.location,
            status: SessionStatus::Planned,
            total_cost,
        };
        self.sessions.push(session.clone());

        match self.clients.iter_mut().find(|c| c.id == session.client_id) {
            Some(client) => client.sessions_count += 1,
            None => tracing::warn!(
                "Session #{} references unknown client #{}; session counter not updated",
                session.id,
                session.client_id
            ),
        }

        tracing::info!(
            "Booked session #{} for client #{} with staff #{} ({} h, cost {})",
            session.id,
            session.client_id,
            session.staff_id,
            session.duration_hours,
            session.total_cost
        );
        Ok(session)
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Move a planned session to in-progress
    pub fn start_session(&mut self, id: SessionId) -> Result<Session> {
        self.transition(id, SessionTransition::Start)
    }

    /// Mark a session completed and release its equipment
    pub fn complete_session(&mut self, id: SessionId) -> Result<Session> {
        self.transition(id, SessionTransition::Complete)
    }

    /// Mark a session cancelled and release its equipment
    pub fn cancel_session(&mut self, id: SessionId) -> Result<Session> {
        self.transition(id, SessionTransition::Cancel)
    }

    fn transition(&mut self, id: SessionId, transition: SessionTransition) -> Result<Session> {
        let idx = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::not_found("session", id.get()))?;

        let from = self.sessions[idx].status;
        let to = transition
            .target(from)
            .ok_or(Error::InvalidTransition {
                session_id: id,
                from,
                action: transition.verb(),
            })?;

        let session = &mut self.sessions[idx];
        session.status = to;

        if !to.is_active() {
            // Release unconditionally, whatever the current flags say
            let held = &session.equipment_ids;
            for item in self.equipment.iter_mut().filter(|e| held.contains(&e.id)) {
                item.available = true;
            }
            tracing::debug!("Released {} equipment item(s) from session #{}", held.len(), id);
        }

        tracing::info!("Session #{} {} -> {}", id, from, to);
        Ok(self.sessions[idx].clone())
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    pub fn export_state(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            clients: self.clients.clone(),
            staff: self.staff.clone(),
            equipment: self.equipment.clone(),
            sessions: self.sessions.clone(),
            next_ids: self.next_ids,
        }
    }

    /// Replace all state with the snapshot's contents
    ///
    /// The snapshot is validated first; on error the ledger is unchanged.
    /// The booking policy is not part of the snapshot and is kept.
    pub fn import_state(&mut self, snapshot: LedgerSnapshot) -> Result<()> {
        let next_ids = snapshot.validate()?;

        self.clients = snapshot.clients;
        self.staff = snapshot.staff;
        self.equipment = snapshot.equipment;
        self.sessions = snapshot.sessions;
        self.next_ids = next_ids;

        tracing::debug!(
            "Imported {} clients, {} staff, {} equipment, {} sessions",
            self.clients.len(),
            self.staff.len(),
            self.equipment.len(),
            self.sessions.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Contact, EquipmentCategory};
    use chrono::NaiveDate;

    fn contact(first: &str, last: &str) -> Contact {
        Contact {
            first_name: first.into(),
            last_name: last.into(),
            phone: "+79161234567".into(),
            email: format!("{}@mail.example", first.to_lowercase()),
        }
    }

    fn new_staff(rate: i64) -> NewStaff {
        NewStaff {
            contact: contact("Maria", "Petrova"),
            specialization: "Portrait".into(),
            hourly_rate: Decimal::from(rate),
            experience_years: 5,
        }
    }

    fn new_equipment(name: &str, price: i64) -> NewEquipment {
        NewEquipment {
            name: name.into(),
            category: EquipmentCategory::Optic,
            model: "85mm f/1.8".into(),
            rental_price: Decimal::from(price),
            condition: None,
        }
    }

    fn booking(staff: u32, equipment: &[u32], hours: u32) -> BookingRequest {
        BookingRequest {
            client_id: ClientId(1),
            staff_id: StaffId(staff),
            equipment_ids: equipment.iter().copied().map(EquipmentId).collect(),
            scheduled_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            duration_hours: hours,
            session_type: "Portrait".into(),
            location: "Studio A".into(),
        }
    }

    /// Client 1, staff 1 at 2000/h, equipment 1 "Lens" at 500/h
    fn studio() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_client(NewClient {
                contact: contact("Anna", "Ivanova"),
            })
            .unwrap();
        ledger.add_staff(new_staff(2000)).unwrap();
        ledger.add_equipment(new_equipment("Lens", 500)).unwrap();
        ledger
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut ledger = Ledger::new();
        let first = ledger.add_client(NewClient::default()).unwrap();
        let second = ledger.add_client(NewClient::default()).unwrap();
        assert_eq!(first.id, ClientId(1));
        assert_eq!(second.id, ClientId(2));
        assert_eq!(first.sessions_count, 0);

        let staff = ledger.add_staff(new_staff(100)).unwrap();
        assert_eq!(staff.id, StaffId(1));
    }

    #[test]
    fn test_add_equipment_defaults() {
        let mut ledger = Ledger::new();
        let item = ledger.add_equipment(new_equipment("Lens", 500)).unwrap();
        assert!(item.available);
        assert_eq!(item.condition, DEFAULT_CONDITION);

        let mut blank = new_equipment("Softbox", 300);
        blank.condition = Some("  ".into());
        let item = ledger.add_equipment(blank).unwrap();
        assert_eq!(item.condition, DEFAULT_CONDITION);
    }

    #[test]
    fn test_negative_prices_rejected() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.add_staff(new_staff(-1)),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            ledger.add_equipment(new_equipment("Lens", -5)),
            Err(Error::Validation(_))
        ));
        assert!(ledger.staff().is_empty());
        assert!(ledger.equipment().is_empty());
        assert_eq!(ledger.next_ids(), NextIds::default());
    }

    #[test]
    fn test_lookup_missing_returns_none() {
        let ledger = studio();
        assert!(ledger.find_client(ClientId(99)).is_none());
        assert!(ledger.find_staff(StaffId(99)).is_none());
        assert!(ledger.find_equipment(EquipmentId(99)).is_none());
        assert!(ledger.find_session(SessionId(1)).is_none());
    }

    #[test]
    fn test_book_session_example() {
        let mut ledger = studio();

        let session = ledger.book_session(booking(1, &[1], 2)).unwrap();

        assert_eq!(session.id, SessionId(1));
        assert_eq!(session.status, SessionStatus::Planned);
        assert_eq!(session.total_cost, Decimal::from(5000));
        assert!(!ledger.find_equipment(EquipmentId(1)).unwrap().available);
        assert_eq!(ledger.find_client(ClientId(1)).unwrap().sessions_count, 1);
    }

    #[test]
    fn test_booking_conflict_is_all_or_nothing() {
        crate::logging::init_test();
        let mut ledger = studio();
        ledger.add_equipment(new_equipment("Flash", 300)).unwrap();
        ledger.book_session(booking(1, &[1], 1)).unwrap();

        let err = ledger.book_session(booking(1, &[2, 1], 1)).unwrap_err();
        match err {
            Error::BookingConflict { equipment_id, name } => {
                assert_eq!(equipment_id, EquipmentId(1));
                assert_eq!(name, "Lens");
            }
            other => panic!("Expected BookingConflict, got {:?}", other),
        }

        // Flash was free and must stay free
        assert!(ledger.find_equipment(EquipmentId(2)).unwrap().available);
        assert!(!ledger.find_equipment(EquipmentId(1)).unwrap().available);
        assert_eq!(ledger.sessions().len(), 1);
        assert_eq!(ledger.find_client(ClientId(1)).unwrap().sessions_count, 1);
        assert_eq!(ledger.next_ids().session, 2);
    }

    #[test]
    fn test_booking_validation_errors() {
        let mut ledger = studio();
        let before = ledger.clone();

        assert!(matches!(
            ledger.book_session(booking(1, &[1], 0)),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            ledger.book_session(booking(7, &[1], 1)),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            ledger.book_session(booking(1, &[1, 42], 1)),
            Err(Error::Validation(_))
        ));

        assert_eq!(ledger, before);
    }

    #[test]
    fn test_duplicate_equipment_ids_collapsed() {
        let mut ledger = studio();
        let session = ledger.book_session(booking(1, &[1, 1, 1], 2)).unwrap();
        assert_eq!(session.equipment_ids, vec![EquipmentId(1)]);
        assert_eq!(session.total_cost, Decimal::from(5000));
    }

    #[test]
    fn test_unknown_client_is_lenient_by_default() {
        let mut ledger = studio();
        let mut request = booking(1, &[], 1);
        request.client_id = ClientId(77);

        let session = ledger.book_session(request).unwrap();
        assert_eq!(session.client_id, ClientId(77));
        assert_eq!(ledger.find_client(ClientId(1)).unwrap().sessions_count, 0);
    }

    #[test]
    fn test_unknown_client_rejected_when_required() {
        let mut ledger = Ledger::with_policy(BookingPolicy {
            require_known_client: true,
        });
        ledger.add_staff(new_staff(1000)).unwrap();
        let mut request = booking(1, &[], 1);
        request.client_id = ClientId(77);

        assert!(matches!(
            ledger.book_session(request),
            Err(Error::Validation(_))
        ));
        assert!(ledger.sessions().is_empty());
    }

    #[test]
    fn test_cost_fixed_at_booking_time() {
        let mut ledger = studio();
        let session = ledger.book_session(booking(1, &[1], 2)).unwrap();
        ledger.complete_session(session.id).unwrap();

        // A later staff member with a different rate does not touch old costs
        ledger.add_staff(new_staff(9999)).unwrap();
        assert_eq!(
            ledger.find_session(session.id).unwrap().total_cost,
            Decimal::from(5000)
        );
    }

    #[test]
    fn test_complete_releases_equipment() {
        let mut ledger = studio();
        let session = ledger.book_session(booking(1, &[1], 2)).unwrap();

        let done = ledger.complete_session(session.id).unwrap();
        assert_eq!(done.status, SessionStatus::Completed);
        assert!(ledger.find_equipment(EquipmentId(1)).unwrap().available);

        // Equipment can be booked again
        ledger.book_session(booking(1, &[1], 1)).unwrap();
    }

    #[test]
    fn test_complete_missing_session_is_not_found() {
        let mut ledger = studio();
        ledger.book_session(booking(1, &[1], 1)).unwrap();
        let before = ledger.clone();

        let err = ledger.complete_session(SessionId(42)).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "session", id: 42 }));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_start_then_cancel() {
        let mut ledger = studio();
        let session = ledger.book_session(booking(1, &[1], 1)).unwrap();

        let started = ledger.start_session(session.id).unwrap();
        assert_eq!(started.status, SessionStatus::InProgress);
        assert!(!ledger.find_equipment(EquipmentId(1)).unwrap().available);

        let cancelled = ledger.cancel_session(session.id).unwrap();
        assert_eq!(cancelled.status, SessionStatus::Cancelled);
        assert!(ledger.find_equipment(EquipmentId(1)).unwrap().available);

        // Cancellation does not roll back the client's counter
        assert_eq!(ledger.find_client(ClientId(1)).unwrap().sessions_count, 1);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut ledger = studio();
        let session = ledger.book_session(booking(1, &[], 1)).unwrap();
        ledger.complete_session(session.id).unwrap();

        for result in [
            ledger.start_session(session.id),
            ledger.complete_session(session.id),
            ledger.cancel_session(session.id),
        ] {
            assert!(matches!(
                result,
                Err(Error::InvalidTransition {
                    from: SessionStatus::Completed,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let mut ledger = studio();
        let session = ledger.book_session(booking(1, &[], 1)).unwrap();
        ledger.start_session(session.id).unwrap();
        assert!(matches!(
            ledger.start_session(session.id),
            Err(Error::InvalidTransition { action: "start", .. })
        ));
    }

    #[test]
    fn test_session_queries_preserve_order() {
        let mut ledger = studio();
        ledger.add_staff(new_staff(1500)).unwrap();
        ledger.book_session(booking(1, &[], 1)).unwrap();
        ledger.book_session(booking(2, &[], 1)).unwrap();
        ledger.book_session(booking(1, &[], 3)).unwrap();

        let ids: Vec<_> = ledger
            .find_sessions_by_staff(StaffId(1))
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![SessionId(1), SessionId(3)]);
        assert_eq!(ledger.find_sessions_by_client(ClientId(1)).len(), 3);
        assert!(ledger.find_sessions_by_client(ClientId(9)).is_empty());
    }

    #[test]
    fn test_list_available_equipment() {
        let mut ledger = studio();
        ledger.add_equipment(new_equipment("Flash", 300)).unwrap();
        ledger.add_equipment(new_equipment("Backdrop", 100)).unwrap();
        ledger.book_session(booking(1, &[2], 1)).unwrap();

        let names: Vec<_> = ledger
            .list_available_equipment()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Lens", "Backdrop"]);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut ledger = studio();
        ledger.book_session(booking(1, &[1], 2)).unwrap();

        let mut restored = Ledger::new();
        restored.import_state(ledger.export_state()).unwrap();
        assert_eq!(restored, ledger);

        // Counters survive the round trip
        let next = restored.add_client(NewClient::default()).unwrap();
        assert_eq!(next.id, ClientId(2));
    }

    #[test]
    fn test_failed_import_keeps_state() {
        let mut ledger = studio();
        let before = ledger.clone();

        let mut bad = ledger.export_state();
        let dup = bad.equipment[0].clone();
        bad.equipment.push(dup);

        assert!(matches!(
            ledger.import_state(bad),
            Err(Error::Persistence(_))
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_import_rejects_max_id() {
        let mut ledger = studio();
        let before = ledger.clone();

        let mut bad = ledger.export_state();
        bad.clients[0].id = ClientId(u32::MAX);

        assert!(matches!(
            ledger.import_state(bad),
            Err(Error::Persistence(_))
        ));
        assert_eq!(ledger, before);
        assert_eq!(ledger.add_client(NewClient::default()).unwrap().id, ClientId(2));
    }

    #[test]
    fn test_exhausted_ids_are_a_validation_error() {
        let mut snapshot = LedgerSnapshot::default();
        snapshot.next_ids.client = u32::MAX - 1;
        let mut ledger = Ledger::new();
        ledger.import_state(snapshot).unwrap();

        let last = ledger.add_client(NewClient::default()).unwrap();
        assert_eq!(last.id, ClientId(u32::MAX - 1));
        let before = ledger.clone();

        assert!(matches!(
            ledger.add_client(NewClient::default()),
            Err(Error::Validation(_))
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_cost_overflow_books_nothing() {
        let mut ledger = studio();
        let staff = ledger
            .add_staff(NewStaff {
                hourly_rate: Decimal::MAX,
                ..new_staff(0)
            })
            .unwrap();
        let before = ledger.clone();

        let result = ledger.book_session(booking(staff.id.get(), &[1], 2));

        match result {
            Err(Error::Validation(msg)) => assert!(msg.contains("session cost overflows")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(ledger, before);
        assert!(ledger.find_equipment(EquipmentId(1)).unwrap().available);
        assert_eq!(ledger.next_ids().session, 1);
    }
}
