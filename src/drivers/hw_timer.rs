//! Heartbeat timer using ESP-IDF's esp_timer API.
//!
//! One periodic timer pushes `NextTick` into the lock-free SPSC queue and,
//! every `redraw_every_ticks` ticks, a `Redraw` after it.  The host build
//! starts no timer; tests push heartbeat events onto their own queues.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely push to the queue, which only uses atomics.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::events::{EVENT_QUEUE, Event, EventQueue};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use super::hw_init::HwInitError;

static TICKS: AtomicU32 = AtomicU32::new(0);
static REDRAW_EVERY: AtomicU32 = AtomicU32::new(1);

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// Push the heartbeat events for one tick onto the global queue.
pub fn on_tick() {
    let n = TICKS.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
    emit_tick(&EVENT_QUEUE, n, REDRAW_EVERY.load(Ordering::Relaxed));
}

/// A full queue drops the event and bumps the overflow counter; the main
/// loop reports it, so the push results are discarded here.
fn emit_tick<const N: usize>(queue: &EventQueue<N>, tick: u32, redraw_every: u32) {
    let _ = queue.push(Event::NextTick);
    if tick % redraw_every.max(1) == 0 {
        let _ = queue.push(Event::Redraw);
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    on_tick();
}

/// Start the periodic heartbeat.
#[cfg(target_os = "espidf")]
pub fn start_timers(tick_interval_ms: u32, redraw_every_ticks: u32) -> Result<(), HwInitError> {
    REDRAW_EVERY.store(redraw_every_ticks.max(1), Ordering::Relaxed);

    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before any timer callback fires.  The callback
    // only calls push_event(), which is lock-free.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"tick".as_ptr(),
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerFailed(ret));
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(tick_interval_ms) * 1_000);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerFailed(ret));
        }
    }

    info!(
        "hw_timer: tick every {}ms, redraw every {} tick(s)",
        tick_interval_ms, redraw_every_ticks
    );
    Ok(())
}

/// Host build: only records the redraw interval.  No heartbeat runs.
#[cfg(not(target_os = "espidf"))]
pub fn start_timers(_tick_interval_ms: u32, redraw_every_ticks: u32) -> Result<(), super::hw_init::HwInitError> {
    REDRAW_EVERY.store(redraw_every_ticks.max(1), Ordering::Relaxed);
    log::info!("hw_timer(sim): timer not started, no heartbeat");
    Ok(())
}
