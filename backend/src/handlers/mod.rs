//! HTTP handlers for the RootCause Advisory Platform

pub mod admin;
pub mod auth;
pub mod farmer;
pub mod health;
pub mod prediction;
pub mod weather;

pub use admin::*;
pub use auth::*;
pub use farmer::*;
pub use health::*;
pub use prediction::*;
pub use weather::*;
