//! Log-backed display adapter.
//!
//! Stands in for the 16×2 character LCD: each frame that differs from the
//! one on screen is written to the log as a single boxed line.

use log::info;

use crate::app::ports::DisplayPort;
use crate::fsm::views::Frame;

#[derive(Default)]
pub struct LogDisplay {
    shown: Frame,
    frames_written: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame currently on screen.
    pub fn shown(&self) -> &Frame {
        &self.shown
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }
}

impl DisplayPort for LogDisplay {
    fn render(&mut self, frame: &Frame) {
        if *frame == self.shown {
            return;
        }
        self.shown = frame.clone();
        self.frames_written = self.frames_written.wrapping_add(1);
        info!("LCD {}", frame);
    }
}
