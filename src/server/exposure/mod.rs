//! API Exposure modules for different protocols
//!
//! Each exposure type consumes the handler state and produces a Router for
//! that protocol. REST is the only one served today.

pub mod rest;

pub use rest::RestExposure;
