//! Ticket: one allocation lifecycle, from claim to release.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Cost per elapsed millisecond of parking.
pub const COST_PER_MILLI: f64 = 10.0;

/// Monotonically unique ticket identifier, minted from a shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketId(u64);

impl TicketId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record of one parking lifecycle.
///
/// Entry fields are fixed at creation. Exit fields are stamped exactly once,
/// by [`Ticket::close`] on the release path, and the ticket is terminal from
/// then on.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    id: TicketId,
    spot_id: String,
    entry_gate_id: String,
    vehicle_id: String,
    parked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_gate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unparked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
}

impl Ticket {
    pub(crate) fn new(
        id: TicketId,
        spot_id: String,
        entry_gate_id: String,
        vehicle_id: String,
        parked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            spot_id,
            entry_gate_id,
            vehicle_id,
            parked_at,
            exit_gate_id: None,
            unparked_at: None,
            cost: None,
        }
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn spot_id(&self) -> &str {
        &self.spot_id
    }

    pub fn entry_gate_id(&self) -> &str {
        &self.entry_gate_id
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn parked_at(&self) -> DateTime<Utc> {
        self.parked_at
    }

    pub fn exit_gate_id(&self) -> Option<&str> {
        self.exit_gate_id.as_deref()
    }

    pub fn unparked_at(&self) -> Option<DateTime<Utc>> {
        self.unparked_at
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// True while the vehicle is still parked on this ticket.
    pub fn is_active(&self) -> bool {
        self.unparked_at.is_none()
    }

    /// Stamp exit details and the cost for the elapsed stay.
    ///
    /// Cost is linear in wall-clock time: [`COST_PER_MILLI`] per elapsed
    /// millisecond, clamped at zero for a non-monotonic clock.
    pub(crate) fn close(&mut self, exit_gate_id: String, unparked_at: DateTime<Utc>) {
        let elapsed_ms = unparked_at
            .signed_duration_since(self.parked_at)
            .num_milliseconds()
            .max(0);
        self.cost = Some(COST_PER_MILLI * elapsed_ms as f64);
        self.exit_gate_id = Some(exit_gate_id);
        self.unparked_at = Some(unparked_at);
    }
}
