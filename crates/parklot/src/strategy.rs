//! Candidate selection: which spots a vehicle should try, in what order.

use crate::floor::Floor;
use crate::gate::Gate;
use crate::spot::Spot;
use crate::vehicle::Vehicle;

/// Orders the spots a vehicle should attempt to claim.
///
/// Implementations return a lazy, finite, single-pass iterator. Laziness is
/// part of the contract: the availability of a floor must be sampled when
/// iteration reaches that floor, not when `candidates` is called, so a long
/// claim walk keeps observing concurrent claims and releases on later floors.
/// The sequence ending without a match is a valid empty result, not an error.
pub trait ParkingStrategy: Send + Sync {
    fn candidates<'a>(
        &self,
        vehicle: &Vehicle,
        entry_gate: &Gate,
        floors: &'a [Floor],
    ) -> Box<dyn Iterator<Item = &'a Spot> + 'a>;
}

/// Default strategy: lowest floor first, construction order within a floor,
/// filtered to the sizes the vehicle may occupy.
///
/// The entry gate is accepted but unused; it exists for strategies that rank
/// spots by distance from the gate.
#[derive(Debug, Default)]
pub struct NearestStrategy;

impl ParkingStrategy for NearestStrategy {
    fn candidates<'a>(
        &self,
        vehicle: &Vehicle,
        _entry_gate: &Gate,
        floors: &'a [Floor],
    ) -> Box<dyn Iterator<Item = &'a Spot> + 'a> {
        let vehicle_type = vehicle.vehicle_type();
        Box::new(floors.iter().flat_map(move |floor| {
            // Availability is sampled here, when the walk reaches this floor.
            floor
                .available_spots()
                .into_iter()
                .filter(move |spot| vehicle_type.may_occupy(spot.size()))
        }))
    }
}
