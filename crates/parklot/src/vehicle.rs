//! Vehicles and the vehicle-to-spot compatibility table.

use serde::{Deserialize, Serialize};

use crate::spot::SpotSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Car,
    Truck,
}

impl VehicleType {
    /// Spot sizes this vehicle type may occupy, in no particular priority.
    ///
    /// The table is total by construction: every variant maps to a non-empty
    /// slice, so an unmapped vehicle type cannot exist.
    pub fn allowed_spot_sizes(&self) -> &'static [SpotSize] {
        match self {
            Self::Bike => &[SpotSize::Small],
            Self::Car => &[SpotSize::Medium, SpotSize::Large],
            Self::Truck => &[SpotSize::Large],
        }
    }

    pub fn may_occupy(&self, size: SpotSize) -> bool {
        self.allowed_spot_sizes().contains(&size)
    }
}

/// A vehicle competing for a spot.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: String,
    vehicle_type: VehicleType,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, vehicle_type: VehicleType) -> Self {
        Self {
            id: id.into(),
            vehicle_type,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_table_is_total_and_non_empty() {
        for vehicle_type in [VehicleType::Bike, VehicleType::Car, VehicleType::Truck] {
            assert!(!vehicle_type.allowed_spot_sizes().is_empty());
        }
    }

    #[test]
    fn bikes_fit_small_only() {
        assert!(VehicleType::Bike.may_occupy(SpotSize::Small));
        assert!(!VehicleType::Bike.may_occupy(SpotSize::Medium));
        assert!(!VehicleType::Bike.may_occupy(SpotSize::Large));
    }

    #[test]
    fn cars_fit_medium_and_large() {
        assert!(!VehicleType::Car.may_occupy(SpotSize::Small));
        assert!(VehicleType::Car.may_occupy(SpotSize::Medium));
        assert!(VehicleType::Car.may_occupy(SpotSize::Large));
    }

    #[test]
    fn trucks_fit_large_only() {
        assert!(!VehicleType::Truck.may_occupy(SpotSize::Small));
        assert!(!VehicleType::Truck.may_occupy(SpotSize::Medium));
        assert!(VehicleType::Truck.may_occupy(SpotSize::Large));
    }
}
