//! Concurrent vehicle-to-ticket registry.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::ticket::Ticket;

/// Maps a vehicle id to its most recent ticket.
///
/// Lock-free concurrent access via `DashMap`; callers get owned snapshots and
/// the registry keeps the authoritative copy. Entries are never removed:
/// released tickets stay for historical analytics, and re-parking the same
/// vehicle overwrites its previous ticket.
#[derive(Default)]
pub struct TicketRegistry {
    tickets: DashMap<String, Ticket>,
}

impl TicketRegistry {
    pub fn new() -> Self {
        Self {
            tickets: DashMap::new(),
        }
    }

    /// Record a freshly minted ticket, replacing any released predecessor.
    pub fn insert(&self, ticket: Ticket) {
        self.tickets
            .insert(ticket.vehicle_id().to_string(), ticket);
    }

    /// Snapshot of the vehicle's most recent ticket.
    pub fn get(&self, vehicle_id: &str) -> Option<Ticket> {
        self.tickets.get(vehicle_id).map(|t| t.value().clone())
    }

    /// True if the vehicle holds a ticket with no exit stamp.
    pub fn is_active(&self, vehicle_id: &str) -> bool {
        self.tickets
            .get(vehicle_id)
            .is_some_and(|t| t.is_active())
    }

    /// Atomically close the vehicle's active ticket.
    ///
    /// Returns the closed snapshot, or `None` if the vehicle has no ticket or
    /// the ticket was already closed. Two racing release calls for the same
    /// vehicle get exactly one winner here, under the entry's lock.
    pub fn close_active(
        &self,
        vehicle_id: &str,
        exit_gate_id: &str,
        unparked_at: DateTime<Utc>,
    ) -> Option<Ticket> {
        let mut entry = self.tickets.get_mut(vehicle_id)?;
        if !entry.is_active() {
            return None;
        }
        entry.close(exit_gate_id.to_string(), unparked_at);
        Some(entry.value().clone())
    }

    /// Number of vehicles ever ticketed, released ones included.
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::ticket::TicketId;

    fn ticket(id: u64, vehicle_id: &str) -> Ticket {
        Ticket::new(
            TicketId::new(id),
            "SPOT01".to_string(),
            "GATE01".to_string(),
            vehicle_id.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn insert_then_get_returns_snapshot() {
        let registry = TicketRegistry::new();
        assert!(registry.is_empty());

        registry.insert(ticket(1, "VEHICLE01"));

        let snapshot = registry.get("VEHICLE01").unwrap();
        assert_eq!(snapshot.id(), TicketId::new(1));
        assert!(registry.is_active("VEHICLE01"));
        assert!(!registry.is_active("VEHICLE99"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn close_active_stamps_exactly_once() {
        let registry = TicketRegistry::new();
        registry.insert(ticket(1, "VEHICLE01"));

        let closed = registry.close_active("VEHICLE01", "GATE02", Utc::now());
        assert!(closed.is_some_and(|t| !t.is_active()));
        assert!(!registry.is_active("VEHICLE01"));

        // Second close finds no active ticket.
        assert!(registry.close_active("VEHICLE01", "GATE02", Utc::now()).is_none());
        // Unknown vehicle likewise.
        assert!(registry.close_active("VEHICLE99", "GATE02", Utc::now()).is_none());
    }

    #[test]
    fn reparking_overwrites_released_ticket() {
        let registry = TicketRegistry::new();
        registry.insert(ticket(1, "VEHICLE01"));
        registry.close_active("VEHICLE01", "GATE02", Utc::now());

        registry.insert(ticket(2, "VEHICLE01"));

        let snapshot = registry.get("VEHICLE01").unwrap();
        assert_eq!(snapshot.id(), TicketId::new(2));
        assert!(snapshot.is_active());
        // Still one vehicle in the history.
        assert_eq!(registry.len(), 1);
    }
}
