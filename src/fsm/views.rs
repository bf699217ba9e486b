//! Per-state render routines.
//!
//! A view turns [`StateData`] into a two-line [`Frame`] for a 16×2
//! character display.  Views are read-only by signature; the display port
//! decides how a frame reaches the glass.

use core::fmt::{self, Write};

use heapless::String;

use super::context::StateData;

/// Characters per display line.
pub const DISPLAY_COLS: usize = 16;

pub type Line = String<DISPLAY_COLS>;

/// One full screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub top: Line,
    pub bottom: Line,
}

impl Frame {
    /// Build a frame from two formatted lines.  Text past column 16 is cut.
    pub fn new(top: fmt::Arguments<'_>, bottom: fmt::Arguments<'_>) -> Self {
        Self {
            top: line(top),
            bottom: line(bottom),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{:<16}|{:<16}|", self.top.as_str(), self.bottom.as_str())
    }
}

/// Writes into a fixed line, silently dropping whatever does not fit.
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

fn line(args: fmt::Arguments<'_>) -> Line {
    let mut buf = Line::new();
    let _ = Truncating(&mut buf).write_fmt(args);
    buf
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

pub fn standby(data: &StateData) -> Frame {
    Frame::new(
        format_args!("{}", data.curr_time),
        format_args!(
            "Alarm {:02}:{:02}",
            data.alarm_time.hour, data.alarm_time.minute
        ),
    )
}

pub fn time_hour(data: &StateData) -> Frame {
    Frame::new(
        format_args!("Set time"),
        format_args!("[{:02}]:{:02}", data.curr_time.hour, data.curr_time.minute),
    )
}

pub fn time_minute(data: &StateData) -> Frame {
    Frame::new(
        format_args!("Set time"),
        format_args!("{:02}:[{:02}]", data.curr_time.hour, data.curr_time.minute),
    )
}

pub fn alarm_hour(data: &StateData) -> Frame {
    Frame::new(
        format_args!("Set alarm"),
        format_args!("[{:02}]:{:02}", data.alarm_time.hour, data.alarm_time.minute),
    )
}

pub fn alarm_minute(data: &StateData) -> Frame {
    Frame::new(
        format_args!("Set alarm"),
        format_args!("{:02}:[{:02}]", data.alarm_time.hour, data.alarm_time.minute),
    )
}

pub fn heating(data: &StateData) -> Frame {
    Frame::new(
        format_args!("Heating..."),
        format_args!("Target {:>3}C", data.temperature),
    )
}

pub fn brewing(_data: &StateData) -> Frame {
    Frame::new(format_args!("Brewing..."), format_args!("Please wait"))
}

pub fn drink_done(_data: &StateData) -> Frame {
    Frame::new(format_args!("Drink ready!"), format_args!("Press to dismiss"))
}
