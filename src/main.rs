//! EasyDrink Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single event-driven main loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter            LogDisplay       LogEventSink      │
//! │  (Clock+Sensor+Actuator     (DisplayPort)    (EventSink)       │
//! │   +Alarm)                                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  FSM · StateData · views                               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  esp_timer heartbeat ─▶ EVENT_QUEUE ◀─ encoder poll / alarm    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info};

use easydrink::adapters::display::LogDisplay;
use easydrink::adapters::hardware::HardwareAdapter;
use easydrink::adapters::log_sink::LogEventSink;
use easydrink::adapters::time::SoftRtc;
use easydrink::app::service::AppService;
use easydrink::clock::ClockTime;
use easydrink::config::SystemConfig;
use easydrink::drivers::encoder::RotaryEncoder;
use easydrink::drivers::hw_init::{self, GpioInput};
use easydrink::drivers::hw_timer;
use easydrink::drivers::pump::PumpDriver;
use easydrink::events::{EVENT_QUEUE, Event, push_event};
use easydrink::pins;
use easydrink::sensors::SensorHub;
use easydrink::sensors::temperature::TemperatureSensor;

/// Water temperature assumed until the first good thermistor read.
const AMBIENT_WATER_C: i16 = 20;

/// Main loop period; the encoder is sampled once per pass.
const POLL_INTERVAL_MS: u32 = 1;

// `FreeRtos::delay_ms` rounds to scheduler ticks.
const _: () = assert!(
    esp_idf_svc::sys::CONFIG_FREERTOS_HZ >= 1000,
    "encoder polling needs a 1 kHz FreeRTOS tick, see sdkconfig.defaults"
);

fn push_or_count(event: Event) {
    // A full queue bumps its dropped counter; `step()` reports it.
    let _ = push_event(event);
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  EasyDrink v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}", e);
        return Err(e.into());
    }

    let mut encoder = RotaryEncoder::new(
        GpioInput::new(pins::ENCODER_A_GPIO),
        GpioInput::new(pins::ENCODER_B_GPIO),
        GpioInput::new(pins::ENCODER_SW_GPIO),
    );

    // ── 4. Adapters ───────────────────────────────────────────
    let sensor_hub = SensorHub::new(
        TemperatureSensor::new(pins::WATER_TEMP_ADC_GPIO),
        AMBIENT_WATER_C,
        config.sensor_fault_after_reads,
    );
    let mut hw = HardwareAdapter::new(
        SoftRtc::new(ClockTime::MIDNIGHT),
        sensor_hub,
        PumpDriver::new(config.brew_duration_ms()),
    );
    let mut display = LogDisplay::new();
    let mut log_sink = LogEventSink::new();

    // ── 5. App service ────────────────────────────────────────
    let mut app = AppService::new(config.clone(), ClockTime::MIDNIGHT);
    app.start(&mut hw, &mut display, &mut log_sink);

    // The heartbeat goes last so no tick is queued before the FSM runs.
    hw_timer::start_timers(config.tick_interval_ms, config.redraw_every_ticks)?;

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    loop {
        let now_ms = hw_init::uptime_ms();

        // Infallible pins; the match keeps the error type honest.
        match encoder.poll(now_ms, push_or_count) {
            Ok(()) => {}
            Err(e) => match e {},
        }

        if hw.poll_alarm() {
            info!("Alarm fired");
            push_or_count(Event::Alarm);
        }

        app.step(&EVENT_QUEUE, &mut hw, &mut display, &mut log_sink);

        FreeRtos::delay_ms(POLL_INTERVAL_MS);
    }
}
