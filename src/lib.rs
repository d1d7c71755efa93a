//! AutoStop — session and state core for the carpool app.

pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod store;
