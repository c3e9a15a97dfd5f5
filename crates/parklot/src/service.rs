//! ParkingService: lot-wide allocation coordination.
//!
//! The service owns:
//! - Lot configuration (floors and gates, fixed at construction)
//! - The ticket registry and the ticket id counter
//! - The candidate strategy driving spot assignment
//!
//! Spot-level mutual exclusion lives inside each [`Spot`]; the service never
//! takes a lot-wide lock. Competing park calls race on `try_claim` candidate
//! by candidate, and a loser simply moves on to its next candidate.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::Serialize;

use crate::floor::Floor;
use crate::gate::{Gate, GateType};
use crate::registry::TicketRegistry;
use crate::spot::Spot;
use crate::strategy::{NearestStrategy, ParkingStrategy};
use crate::ticket::{Ticket, TicketId};
use crate::vehicle::Vehicle;

#[derive(Debug, thiserror::Error)]
pub enum ParkError {
    /// The gate id is not part of this lot (caller contract).
    #[error("unknown gate '{0}'")]
    UnknownGate(String),
    /// Park requests must arrive through an entry gate (caller contract).
    #[error("gate '{0}' is not an entry gate")]
    NotAnEntryGate(String),
    /// The vehicle already holds an active ticket.
    #[error("vehicle '{0}' is already parked")]
    AlreadyParked(String),
    /// Every compatible spot was occupied when tried.
    #[error("no spot available for vehicle '{0}'")]
    LotFull(String),
}

#[derive(Debug, thiserror::Error)]
pub enum UnparkError {
    /// The gate id is not part of this lot (caller contract).
    #[error("unknown gate '{0}'")]
    UnknownGate(String),
    /// The vehicle holds no active ticket (caller contract).
    #[error("vehicle '{0}' is not parked")]
    NotParked(String),
    /// The ticket's spot is on no floor. Floors are immutable after
    /// construction, so this indicates corrupted lot data.
    #[error("spot '{0}' is not on any floor")]
    SpotMissing(String),
}

/// Point-in-time occupancy counts for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct OccupancySnapshot {
    pub floors: Vec<FloorOccupancy>,
    /// Vehicles ticketed over the life of the service, released ones included.
    pub tickets_issued: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloorOccupancy {
    pub occupied: usize,
    pub total: usize,
}

impl OccupancySnapshot {
    pub fn occupied(&self) -> usize {
        self.floors.iter().map(|f| f.occupied).sum()
    }

    pub fn total(&self) -> usize {
        self.floors.iter().map(|f| f.total).sum()
    }

    /// Lot-wide occupancy rate in percent; 0 for a lot with no spots.
    pub fn rate_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.occupied() as f64 * 100.0 / total as f64
    }
}

/// Coordinates parking and release across the whole lot.
///
/// Explicitly constructed and passed to callers; each test builds its own
/// instance over its own floors. Share across threads with `Arc` — all
/// operations take `&self`.
pub struct ParkingService {
    floors: Vec<Floor>,
    gates: Vec<Gate>,
    registry: TicketRegistry,
    ticket_counter: AtomicU64,
    strategy: Box<dyn ParkingStrategy>,
}

impl ParkingService {
    /// Build a service over a fixed lot layout, using [`NearestStrategy`].
    pub fn new(floors: Vec<Floor>, gates: Vec<Gate>) -> Self {
        Self {
            floors,
            gates,
            registry: TicketRegistry::new(),
            ticket_counter: AtomicU64::new(0),
            strategy: Box::new(NearestStrategy),
        }
    }

    /// Replace the default candidate strategy.
    pub fn with_strategy(mut self, strategy: impl ParkingStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    fn gate(&self, gate_id: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id() == gate_id)
    }

    fn next_ticket_id(&self) -> TicketId {
        // Relaxed: uniqueness is the only contract here, no ordering promise.
        TicketId::new(self.ticket_counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Park a vehicle arriving at an entry gate.
    ///
    /// Walks the strategy's candidate sequence and claims the first free spot.
    /// Losing a claim race to a concurrent park is not an error; the walk
    /// moves on until a claim lands or the sequence is exhausted.
    pub fn park(&self, vehicle: &Vehicle, gate_id: &str) -> Result<Ticket, ParkError> {
        let gate = self
            .gate(gate_id)
            .ok_or_else(|| ParkError::UnknownGate(gate_id.to_string()))?;
        if !gate.is_entry() {
            return Err(ParkError::NotAnEntryGate(gate_id.to_string()));
        }

        if self.registry.is_active(vehicle.id()) {
            tracing::debug!(vehicle = %vehicle.id(), "park rejected: already parked");
            return Err(ParkError::AlreadyParked(vehicle.id().to_string()));
        }

        let Some(spot) = self.assign_spot(vehicle, gate) else {
            tracing::debug!(
                vehicle = %vehicle.id(),
                vehicle_type = ?vehicle.vehicle_type(),
                "park rejected: no compatible spot free"
            );
            return Err(ParkError::LotFull(vehicle.id().to_string()));
        };

        let ticket = Ticket::new(
            self.next_ticket_id(),
            spot.id().to_string(),
            gate.id().to_string(),
            vehicle.id().to_string(),
            Utc::now(),
        );
        self.registry.insert(ticket.clone());
        tracing::info!(
            vehicle = %vehicle.id(),
            spot = %spot.id(),
            ticket = %ticket.id(),
            "vehicle parked"
        );
        Ok(ticket)
    }

    /// Claim loop: the first candidate that accepts the claim wins.
    fn assign_spot(&self, vehicle: &Vehicle, gate: &Gate) -> Option<&Spot> {
        self.strategy
            .candidates(vehicle, gate, &self.floors)
            .find(|spot| spot.try_claim(vehicle.id()))
    }

    /// Release a parked vehicle through a gate.
    ///
    /// The ticket is closed under its registry entry lock before the spot is
    /// freed, so of two racing releases for the same vehicle exactly one wins
    /// and the loser cannot free a spot that has since been re-claimed.
    pub fn unpark(&self, vehicle: &Vehicle, gate_id: &str) -> Result<Ticket, UnparkError> {
        let gate = self
            .gate(gate_id)
            .ok_or_else(|| UnparkError::UnknownGate(gate_id.to_string()))?;

        let Some(ticket) = self.registry.get(vehicle.id()) else {
            return Err(UnparkError::NotParked(vehicle.id().to_string()));
        };
        if !ticket.is_active() {
            return Err(UnparkError::NotParked(vehicle.id().to_string()));
        }

        let Some(spot) = self.floors.iter().find_map(|f| f.spot(ticket.spot_id())) else {
            debug_assert!(false, "ticket references unknown spot {}", ticket.spot_id());
            tracing::error!(
                vehicle = %vehicle.id(),
                spot = %ticket.spot_id(),
                "ticket references a spot on no floor"
            );
            return Err(UnparkError::SpotMissing(ticket.spot_id().to_string()));
        };

        let Some(closed) = self
            .registry
            .close_active(vehicle.id(), gate.id(), Utc::now())
        else {
            // Lost the race to a concurrent release of the same vehicle.
            return Err(UnparkError::NotParked(vehicle.id().to_string()));
        };
        spot.release();
        tracing::info!(
            vehicle = %vehicle.id(),
            spot = %closed.spot_id(),
            ticket = %closed.id(),
            cost = closed.cost().unwrap_or(0.0),
            "vehicle unparked"
        );
        Ok(closed)
    }

    /// Most recent ticket for a vehicle, if any.
    pub fn ticket_for(&self, vehicle_id: &str) -> Option<Ticket> {
        self.registry.get(vehicle_id)
    }

    /// Vehicles ticketed over the life of the service.
    pub fn tickets_issued(&self) -> usize {
        self.registry.len()
    }

    /// Point-in-time occupancy counts per floor.
    pub fn occupancy(&self) -> OccupancySnapshot {
        let floors = self
            .floors
            .iter()
            .map(|floor| {
                let total = floor.len();
                let occupied = total - floor.available_spots().len();
                FloorOccupancy { occupied, total }
            })
            .collect();
        OccupancySnapshot {
            floors,
            tickets_issued: self.registry.len(),
        }
    }
}
