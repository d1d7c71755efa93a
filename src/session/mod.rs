//! Session gate — redirects users to onboarding until the completion flag
//! is persisted.
//!
//! The client router asks the gate about every navigation target; the answer
//! is either "proceed" or "redirect to the onboarding path". Without a
//! settings store the gate stands open.

pub mod gate;
pub mod routes;

pub use gate::{GateDecision, SessionGate, settings_keys};
pub use routes::{SessionRouteState, session_routes};
