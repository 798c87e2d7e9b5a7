// Energy Monitor - System Events & Data Types

use crate::store::DeviceName;

// ---------------------------------------------------------------------------
// Operating Mode
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Compare each capture against the trained devices.
    #[default]
    Identify,
    /// Accumulate the sensor level once per second.
    Counter,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Identify => Self::Counter,
            Self::Counter => Self::Identify,
        }
    }

    /// Human-readable label (kept for debugging/logging purposes).
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Identify => "identify",
            Self::Counter => "counter",
        }
    }
}

// ---------------------------------------------------------------------------
// Monitor Events - one per loop iteration, consumed by the presentation layer
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Identification pass finished.  `device` is `None` when nothing matched.
    Identified { level: u16, device: Option<DeviceName> },
    /// Counter mode poll.  `ticked` is set when the one-second gate opened.
    Counter { level: u16, total: u32, ticked: bool },
}

impl MonitorEvent {
    pub fn matched(&self) -> bool {
        matches!(self, Self::Identified { device: Some(_), .. })
    }
}

// ---------------------------------------------------------------------------
// Button Events
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// "A" button: train the next free slot.
    Train,
    /// "B" button: toggle counter mode.
    ToggleCounter,
}
