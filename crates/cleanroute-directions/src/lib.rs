//! External collaborator clients: route geometry and geocoding.
//!
//! Unlike the PM2.5 providers, failures here are caller-visible: with no
//! route there is nothing to score, so errors propagate instead of
//! degrading to an absent value.

pub mod graphhopper;
pub mod opencage;

pub use graphhopper::GraphHopperClient;
pub use opencage::OpenCageClient;
