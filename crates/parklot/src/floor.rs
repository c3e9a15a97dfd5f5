//! A floor: immutable spot membership with a thread-safe availability snapshot.

use std::collections::HashMap;

use thiserror::Error;

use crate::spot::Spot;

/// Errors raised while assembling lot configuration.
#[derive(Debug, Error)]
pub enum LotConfigError {
    #[error("duplicate spot id '{0}' on the same floor")]
    DuplicateSpotId(String),
}

/// A floor of the parking lot.
///
/// Membership is fixed at construction; only spot occupancy mutates
/// afterwards, and that is guarded inside each [`Spot`]. Reads here need no
/// synchronization of their own.
pub struct Floor {
    spots: Vec<Spot>,
    index: HashMap<String, usize>,
}

impl Floor {
    /// Build a floor from spots in priority order.
    pub fn new(spots: Vec<Spot>) -> Result<Self, LotConfigError> {
        let mut index = HashMap::with_capacity(spots.len());
        for (i, spot) in spots.iter().enumerate() {
            if index.insert(spot.id().to_string(), i).is_some() {
                return Err(LotConfigError::DuplicateSpotId(spot.id().to_string()));
            }
        }
        Ok(Self { spots, index })
    }

    /// Spots currently unoccupied, in construction order.
    ///
    /// This is a point-in-time snapshot: concurrent traffic may claim any of
    /// these spots before the caller acts. Callers resolve that race with
    /// [`Spot::try_claim`], never by trusting the snapshot.
    pub fn available_spots(&self) -> Vec<&Spot> {
        self.spots.iter().filter(|s| !s.is_occupied()).collect()
    }

    pub fn spot(&self, id: &str) -> Option<&Spot> {
        self.index.get(id).map(|&i| &self.spots[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spot::SpotSize;

    fn floor() -> Floor {
        Floor::new(vec![
            Spot::new("SPOT01", SpotSize::Small),
            Spot::new("SPOT02", SpotSize::Medium),
            Spot::new("SPOT03", SpotSize::Large),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_spot_ids() {
        let result = Floor::new(vec![
            Spot::new("SPOT01", SpotSize::Small),
            Spot::new("SPOT01", SpotSize::Large),
        ]);
        assert!(matches!(
            result,
            Err(LotConfigError::DuplicateSpotId(id)) if id == "SPOT01"
        ));
    }

    #[test]
    fn lookups_over_membership() {
        let floor = floor();

        assert_eq!(floor.len(), 3);
        assert!(!floor.is_empty());
        assert!(floor.contains("SPOT02"));
        assert!(!floor.contains("SPOT99"));
        assert_eq!(floor.spot("SPOT03").map(|s| s.size()), Some(SpotSize::Large));
        assert!(floor.spot("SPOT99").is_none());
    }

    #[test]
    fn availability_snapshot_excludes_claimed_spots() {
        let floor = floor();
        assert_eq!(floor.available_spots().len(), 3);

        floor.spot("SPOT02").unwrap().try_claim("VEHICLE01");

        let available: Vec<&str> = floor.available_spots().iter().map(|s| s.id()).collect();
        assert_eq!(available, ["SPOT01", "SPOT03"]);

        floor.spot("SPOT02").unwrap().release();
        assert_eq!(floor.available_spots().len(), 3);
    }

    #[test]
    fn snapshot_preserves_construction_order() {
        let floor = floor();
        let ids: Vec<&str> = floor.available_spots().iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["SPOT01", "SPOT02", "SPOT03"]);
    }
}
