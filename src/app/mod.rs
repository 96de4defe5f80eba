//! Application core: pure panel logic, zero I/O.
//!
//! The control loop, command dispatch and outbound events live here.
//! All interaction with the pins happens through the **port traits**
//! defined in [`ports`], keeping this layer testable against a simulated
//! line set.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
