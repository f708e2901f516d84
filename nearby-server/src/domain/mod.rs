//! Domain types for the nearby-transit service.
//!
//! This module contains the core model types that represent validated
//! transit data. Types enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod coordinate;
mod prediction;
mod stop;
mod walk;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use prediction::{Prediction, RouteInfo, RouteType};
pub use stop::Stop;
pub use walk::{WalkEstimate, WalkSource};
