//! Ride fixture loading.
//!
//! The app ships with a bundled ride list so it is usable out of the box; an
//! operator can point `AUTOSTOP_RIDES_PATH` at an alternative file with the
//! same shape.

use std::path::Path;

use tracing::info;

use crate::error::FixtureError;

use super::model::Ride;

/// Fixture compiled into the binary.
const BUNDLED_RIDES: &str = include_str!("../../data/rides.json");

/// Parse the bundled ride fixture.
///
/// The fixture is part of the build, so a parse failure here means the
/// binary itself is broken; callers treat it as fatal.
pub fn default_rides() -> Result<Vec<Ride>, FixtureError> {
    let rides: Vec<Ride> =
        serde_json::from_str(BUNDLED_RIDES).map_err(|source| FixtureError::Parse {
            path: "data/rides.json".into(),
            source,
        })?;
    info!(count = rides.len(), "Loaded bundled ride fixture");
    Ok(rides)
}

/// Load a ride fixture from `path` instead of the bundled one.
pub fn load_rides(path: &Path) -> Result<Vec<Ride>, FixtureError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rides: Vec<Ride> =
        serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), count = rides.len(), "Loaded ride fixture");
    Ok(rides)
}
