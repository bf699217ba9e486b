//! GPIO / peripheral pin assignments for the EasyDrink main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Heating element (SSR, active HIGH)
// ---------------------------------------------------------------------------

pub const HEATER_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Brew pump (MOSFET low-side switch, active HIGH)
// ---------------------------------------------------------------------------

pub const PUMP_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// "Drink ready" indicator LED
// ---------------------------------------------------------------------------

pub const READY_LED_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor — 10 kΩ @ 25 °C, voltage-divider to ADC.
/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const WATER_TEMP_ADC_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Rotary encoder (KY-040: A/B quadrature + push switch, all active-low)
// ---------------------------------------------------------------------------

pub const ENCODER_A_GPIO: i32 = 4;
pub const ENCODER_B_GPIO: i32 = 5;
pub const ENCODER_SW_GPIO: i32 = 6;
