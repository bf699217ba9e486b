//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements     | Connects to                      |
//! |-------------|----------------|----------------------------------|
//! | `hardware`  | ClockPort      | Software RTC on esp_timer        |
//! |             | SensorPort     | ESP32 ADC (thermistor)           |
//! |             | ActuatorPort   | Heater SSR, pump, ready LED GPIO |
//! |             | AlarmPort      | Alarm comparator                 |
//! | `display`   | DisplayPort    | Serial log (LCD stand-in)        |
//! | `log_sink`  | EventSink      | Serial log output                |
//! | `time`      | ClockPort      | ESP32 system timer               |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
