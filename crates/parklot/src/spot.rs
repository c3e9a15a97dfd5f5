//! Parking spot with an atomic check-and-claim protocol.
//!
//! Occupancy is the only mutable state in the lot, and it is guarded here:
//! the check and the set in `try_claim` happen inside one critical section,
//! so two concurrent claimants can never both observe the spot as free.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Size class of a parking spot, restricting which vehicle types may occupy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotSize {
    Small,
    Medium,
    Large,
}

impl SpotSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl std::fmt::Display for SpotSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parking spot.
///
/// Created once at lot setup, claimed and released many times, never removed.
#[derive(Debug)]
pub struct Spot {
    id: String,
    size: SpotSize,
    occupant: Mutex<Option<String>>,
}

impl Spot {
    pub fn new(id: impl Into<String>, size: SpotSize) -> Self {
        Self {
            id: id.into(),
            size,
            occupant: Mutex::new(None),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> SpotSize {
        self.size
    }

    /// Atomically claim the spot for `vehicle_id`.
    ///
    /// Returns `false` with no state change if the spot is already occupied.
    /// This is the sole claiming mutator; callers racing here get exactly one
    /// winner per free spot.
    pub fn try_claim(&self, vehicle_id: &str) -> bool {
        let mut occupant = self.lock_occupant();
        if occupant.is_some() {
            return false;
        }
        *occupant = Some(vehicle_id.to_string());
        tracing::debug!(spot = %self.id, vehicle = %vehicle_id, "spot claimed");
        true
    }

    /// Free the spot. Idempotent: releasing an already-free spot is a no-op.
    pub fn release(&self) {
        let mut occupant = self.lock_occupant();
        if let Some(vehicle_id) = occupant.take() {
            tracing::debug!(spot = %self.id, vehicle = %vehicle_id, "spot released");
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.lock_occupant().is_some()
    }

    /// Current occupant, if any.
    pub fn occupant(&self) -> Option<String> {
        self.lock_occupant().clone()
    }

    /// The occupant is a plain `Option`, valid even if a holder panicked, so a
    /// poisoned lock is recovered rather than propagated.
    fn lock_occupant(&self) -> MutexGuard<'_, Option<String>> {
        self.occupant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use super::*;

    #[test]
    fn claim_and_release_round_trip() {
        let spot = Spot::new("SPOT01", SpotSize::Small);

        assert!(!spot.is_occupied());
        assert!(spot.try_claim("VEHICLE01"));
        assert!(spot.is_occupied());
        assert_eq!(spot.occupant().as_deref(), Some("VEHICLE01"));

        spot.release();
        assert!(!spot.is_occupied());
        assert_eq!(spot.occupant(), None);
    }

    #[test]
    fn claim_fails_when_occupied() {
        let spot = Spot::new("SPOT01", SpotSize::Small);

        assert!(spot.try_claim("VEHICLE01"));
        assert!(!spot.try_claim("VEHICLE02"));

        // Loser's attempt left the winner in place.
        assert_eq!(spot.occupant().as_deref(), Some("VEHICLE01"));
    }

    #[test]
    fn release_is_idempotent() {
        let spot = Spot::new("SPOT01", SpotSize::Medium);

        spot.try_claim("VEHICLE01");
        spot.release();
        spot.release();
        assert!(!spot.is_occupied());

        // Releasing a never-claimed spot is also fine.
        let fresh = Spot::new("SPOT02", SpotSize::Medium);
        fresh.release();
        assert!(!fresh.is_occupied());
    }

    #[test]
    fn exactly_one_claim_wins_under_contention() {
        let spot = Arc::new(Spot::new("SPOT01", SpotSize::Small));
        let contenders = 8;
        let barrier = Arc::new(Barrier::new(contenders));

        let handles: Vec<_> = (0..contenders)
            .map(|i| {
                let spot = Arc::clone(&spot);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    let vehicle_id = format!("VEHICLE{i}");
                    barrier.wait();
                    (vehicle_id.clone(), spot.try_claim(&vehicle_id))
                })
            })
            .collect();

        let outcomes: Vec<(String, bool)> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: Vec<&String> = outcomes
            .iter()
            .filter(|(_, won)| *won)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(spot.occupant().as_ref(), Some(winners[0]));
    }
}
