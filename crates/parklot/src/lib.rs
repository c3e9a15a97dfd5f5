//! parklot: concurrent spot-allocation engine for partitioned parking lots.
//!
//! A lot is a fixed set of [`Floor`]s, each owning [`Spot`]s of a size class.
//! [`ParkingService`] coordinates competing park requests: a
//! [`ParkingStrategy`] produces a lazy candidate sequence and the service
//! claims the first spot that accepts, relying only on the spot's atomic
//! check-and-claim for correctness under contention. Each successful claim is
//! tracked by a [`Ticket`] until release, when the stay is costed.

mod floor;
mod gate;
mod registry;
mod service;
mod spot;
mod strategy;
mod ticket;
mod vehicle;

pub use floor::{Floor, LotConfigError};
pub use gate::{Gate, GateType};
pub use registry::TicketRegistry;
pub use service::{FloorOccupancy, OccupancySnapshot, ParkError, ParkingService, UnparkError};
pub use spot::{Spot, SpotSize};
pub use strategy::{NearestStrategy, ParkingStrategy};
pub use ticket::{COST_PER_MILLI, Ticket, TicketId};
pub use vehicle::{Vehicle, VehicleType};
