//! uptrack server library: HTTP surface and configuration
//!
//! Split out of the binary so integration tests can drive the real
//! router without a listening socket.

pub mod api;
pub mod config;
