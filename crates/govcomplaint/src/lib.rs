//! Complaint lifecycle and authorization service.
//!
//! The library is split along the seams described in the service design: the
//! `accounts` module owns actor identity, registration, and login; the
//! `complaints` module owns the complaint lifecycle, the authorization rules
//! gating every mutation, and the store contracts the deployable binary wires
//! up with concrete implementations.

pub mod accounts;
pub mod complaints;
pub mod config;
pub mod error;
pub mod telemetry;
