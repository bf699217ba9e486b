//! Rotary encoder driver: quadrature rotation plus debounced push switch.
//!
//! ## Hardware
//!
//! KY-040 style module: A/B contacts and the switch are all active-low
//! with pull-ups, so the detent rest position reads `A = B = high`.
//!
//! ## Decoding
//!
//! Each poll feeds the (A, B) pair through a 16-entry transition table.
//! Valid quarter-steps accumulate ±1; bounce produces an invalid or
//! reversing transition that cancels out.  A detent is reported only when
//! the contacts return to rest with at least half a cycle accumulated.
//!
//! | Output          | Condition                                   |
//! |-----------------|---------------------------------------------|
//! | `EncoderInc`    | clockwise detent                            |
//! | `EncoderDec`    | counter-clockwise detent                    |
//! | `EncoderPress`  | switch held low for `DEBOUNCE_MS`           |
//!
//! Pins are anything implementing `embedded_hal::digital::InputPin`, so the
//! decoder runs unchanged against `hw_init::GpioInput` and test mocks.

use embedded_hal::digital::InputPin;

use crate::events::Event;

const DEBOUNCE_MS: u32 = 20;
const REST: u8 = 0b11;

/// Indexed by `(prev << 2) | curr`, where a state is `(A << 1) | B`.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

// ── Quadrature decoder ────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    prev: u8,
    accum: i8,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            prev: REST,
            accum: 0,
        }
    }

    /// Feed the current contact levels (`true` = high).
    pub fn update(&mut self, a: bool, b: bool) -> Option<Rotation> {
        let curr = (u8::from(a) << 1) | u8::from(b);
        if curr == self.prev {
            return None;
        }
        let idx = usize::from((self.prev << 2) | curr);
        self.accum = self.accum.saturating_add(TRANSITIONS[idx]);
        self.prev = curr;

        if curr != REST {
            return None;
        }
        let accum = core::mem::take(&mut self.accum);
        match accum {
            2.. => Some(Rotation::Clockwise),
            ..=-2 => Some(Rotation::CounterClockwise),
            _ => None,
        }
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Switch debouncer ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct PressDebouncer {
    stable: bool,
    candidate: bool,
    since_ms: u32,
}

impl PressDebouncer {
    /// Feed the raw switch level (`true` = pressed).  Returns `true` once
    /// per debounced press, on the press edge.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> bool {
        if pressed != self.candidate {
            self.candidate = pressed;
            self.since_ms = now_ms;
            return false;
        }
        if pressed != self.stable && now_ms.wrapping_sub(self.since_ms) >= DEBOUNCE_MS {
            self.stable = pressed;
            return pressed;
        }
        false
    }
}

// ── Driver ────────────────────────────────────────────────────

pub struct RotaryEncoder<P> {
    a: P,
    b: P,
    sw: P,
    decoder: QuadratureDecoder,
    press: PressDebouncer,
}

impl<P: InputPin> RotaryEncoder<P> {
    pub fn new(a: P, b: P, sw: P) -> Self {
        Self {
            a,
            b,
            sw,
            decoder: QuadratureDecoder::new(),
            press: PressDebouncer::default(),
        }
    }

    /// Sample the pins once and hand any resulting events to `emit`.
    /// Call at ~1 kHz; slower polling loses quarter-steps on fast spins.
    pub fn poll(&mut self, now_ms: u32, mut emit: impl FnMut(Event)) -> Result<(), P::Error> {
        let a = self.a.is_high()?;
        let b = self.b.is_high()?;
        let pressed = self.sw.is_low()?;

        match self.decoder.update(a, b) {
            Some(Rotation::Clockwise) => emit(Event::EncoderInc),
            Some(Rotation::CounterClockwise) => emit(Event::EncoderDec),
            None => {}
        }
        if self.press.update(pressed, now_ms) {
            emit(Event::EncoderPress);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use std::rc::Rc;

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    #[derive(Clone)]
    struct MockPin(Rc<Cell<bool>>);

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0.get())
        }
        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0.get())
        }
    }

    fn pin() -> MockPin {
        MockPin(Rc::new(Cell::new(true)))
    }

    #[test]
    fn full_cycle_is_one_detent() {
        let mut d = QuadratureDecoder::new();
        let out: Vec<_> = CW.iter().filter_map(|&(a, b)| d.update(a, b)).collect();
        assert_eq!(out, vec![Rotation::Clockwise]);
        let out: Vec<_> = CCW.iter().filter_map(|&(a, b)| d.update(a, b)).collect();
        assert_eq!(out, vec![Rotation::CounterClockwise]);
    }

    #[test]
    fn contact_bounce_cancels_out() {
        let mut d = QuadratureDecoder::new();
        // Wiggle one quarter-step and come back.
        assert_eq!(d.update(false, true), None);
        assert_eq!(d.update(true, true), None);
        assert_eq!(d.update(false, true), None);
        assert_eq!(d.update(true, true), None);
    }

    #[test]
    fn press_needs_stable_level() {
        let mut p = PressDebouncer::default();
        assert!(!p.update(true, 0));
        assert!(!p.update(false, 5));
        assert!(!p.update(true, 6));
        assert!(!p.update(true, 20));
        assert!(p.update(true, 26));
        // Held: no repeat.
        assert!(!p.update(true, 500));
        // Release then press again.
        assert!(!p.update(false, 510));
        assert!(!p.update(false, 540));
        assert!(!p.update(true, 550));
        assert!(p.update(true, 575));
    }

    #[test]
    fn driver_emits_rotation_and_press() {
        let (a, b, sw) = (pin(), pin(), pin());
        let mut enc = RotaryEncoder::new(a.clone(), b.clone(), sw.clone());
        let mut events = Vec::new();
        let mut now = 0;

        for (la, lb) in CW.iter().chain(CW.iter()).chain(CCW.iter()) {
            a.0.set(*la);
            b.0.set(*lb);
            now += 1;
            enc.poll(now, |e| events.push(e)).unwrap();
        }
        sw.0.set(false);
        for _ in 0..30 {
            now += 1;
            enc.poll(now, |e| events.push(e)).unwrap();
        }

        assert_eq!(
            events,
            vec![
                Event::EncoderInc,
                Event::EncoderInc,
                Event::EncoderDec,
                Event::EncoderPress
            ]
        );
    }
}
