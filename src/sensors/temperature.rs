//! NTC thermistor water-temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage-divider with a fixed 10 kOhm resistor, read via
//! the ESP32-S3 ADC. The simplified Beta (Steinhart-Hart) equation
//! converts resistance to temperature.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH8 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

static SIM_WATER_TEMP_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_water_temp_adc(raw: u16) {
    SIM_WATER_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
/// Near either rail the thermistor is open or shorted.
const RAIL_MARGIN_V: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub raw: u16,
    pub celsius: f32,
}

impl TemperatureReading {
    /// Rounded to whole degrees, the resolution the FSM works in.
    pub fn whole_degrees(&self) -> i16 {
        self.celsius.round() as i16
    }
}

pub struct TemperatureSensor {
    _adc_gpio: i32,
}

impl TemperatureSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&self) -> Result<TemperatureReading, SensorError> {
        let raw = self.read_adc()?;
        let celsius = adc_to_celsius(raw)?;
        Ok(TemperatureReading { raw, celsius })
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_WATER_TEMP)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_WATER_TEMP_ADC.load(Ordering::Relaxed))
    }
}

fn adc_to_celsius(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= (V_REF - RAIL_MARGIN_V) {
        return Err(SensorError::OutOfRange);
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::OutOfRange);
    }
    Ok((1.0 / inv_t) - 273.15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midscale_is_room_temperature() {
        let c = adc_to_celsius(2048).unwrap();
        assert!((c - 25.0).abs() < 0.5, "got {c}");
    }

    #[test]
    fn brewing_range_converts() {
        // 85 °C puts the NTC near 1.09 kOhm → ~401 counts.
        let c = adc_to_celsius(401).unwrap();
        assert!((c - 85.0).abs() < 1.0, "got {c}");
    }

    #[test]
    fn hotter_reads_fewer_counts() {
        let cool = adc_to_celsius(3000).unwrap();
        let hot = adc_to_celsius(500).unwrap();
        assert!(hot > cool);
    }

    #[test]
    fn rails_are_faults() {
        assert_eq!(adc_to_celsius(0), Err(SensorError::OutOfRange));
        assert_eq!(adc_to_celsius(4095), Err(SensorError::OutOfRange));
    }

    #[test]
    fn whole_degrees_rounds() {
        let r = TemperatureReading { raw: 0, celsius: 84.6 };
        assert_eq!(r.whole_degrees(), 85);
    }
}
