//! Application state — the in-memory session store of the AutoStop UI.
//!
//! The container holds the rider's role, availability and authentication
//! flags, the profile being filled in, and the ride list seeded from the
//! static fixture. UI components read and write it through the REST surface
//! and follow changes over the WebSocket event stream.

pub mod container;
pub mod fixture;
pub mod model;
pub mod routes;
pub mod ws;

pub use container::StateContainer;
pub use model::{
    Profile, ProfileUpdate, Ride, RideStatus, RiderRole, SessionSnapshot, StateEvent,
};
pub use routes::{StateRouteState, state_routes};
pub use ws::ws_routes;
