//! Domain models for the RootCause Advisory Platform

pub mod admin;
pub mod farmer;
pub mod prediction;
pub mod weather;

pub use admin::*;
pub use farmer::*;
pub use prediction::*;
pub use weather::*;
