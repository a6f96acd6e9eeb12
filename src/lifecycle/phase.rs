//! Server lifecycle phase tracking.
//!
//! ```text
//! Idle → Listening → ShuttingDown → Stopped
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

/// Where a server is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Listening,
    ShuttingDown,
    Stopped,
}

impl Phase {
    fn as_u8(self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::Listening => 1,
            Phase::ShuttingDown => 2,
            Phase::Stopped => 3,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Phase::Idle,
            1 => Phase::Listening,
            2 => Phase::ShuttingDown,
            _ => Phase::Stopped,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Listening => "listening",
            Phase::ShuttingDown => "shutting_down",
            Phase::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Lock-free holder for the current phase.
#[derive(Debug)]
pub struct PhaseCell(AtomicU8);

impl PhaseCell {
    pub fn new(phase: Phase) -> Self {
        Self(AtomicU8::new(phase.as_u8()))
    }

    pub fn get(&self) -> Phase {
        Phase::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub fn set(&self, phase: Phase) {
        self.0.store(phase.as_u8(), Ordering::SeqCst);
    }

    /// Move from `from` to `to`; fails with the actual phase otherwise.
    pub fn transition(&self, from: Phase, to: Phase) -> Result<(), Phase> {
        self.0
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(Phase::from_u8)
    }
}

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new(Phase::Idle)
    }
}
