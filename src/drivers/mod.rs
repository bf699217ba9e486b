//! Actuator and input drivers, hardware initialisation, and the heartbeat timer.

pub mod alarm;
pub mod encoder;
pub mod heater;
pub mod hw_init;
pub mod hw_timer;
pub mod pump;
pub mod ready_led;
