//! openrouteservice integration for walking directions.

mod client;
mod error;

pub use client::{RoutingClient, RoutingConfig};
pub use error::RoutingError;
