//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the orchestration rules for the EasyDrink
//! appliance: draining the event queue into the FSM and turning its
//! commands into port calls.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
