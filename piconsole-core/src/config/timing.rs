//! Sequencer timing
//!
//! Times are either milliseconds of blocking delay or counts of control
//! loop ticks. None of them are self-calibrating.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing of the power sequencer control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequencerTiming {
    /// Sleep at the end of every loop iteration (ms)
    pub tick_ms: u32,
    /// Gap between the two samples that confirm an input change (ms)
    pub debounce_ms: u32,
    /// Time the fan runs before the Pi supply is enabled (ms)
    pub fan_settle_ms: u32,
    /// Ticks per half period of a blinking LED
    pub blink_ticks: u8,
    /// Ticks between the Pi shutting down and its supply being cut
    pub shutdown_wait_ticks: u16,
    /// Ticks the switch must stay released after power is cut
    pub guard_ticks: u8,
}

impl SequencerTiming {
    /// 10ms tick, 0.5s blink, 8s shutdown wait, 1s release guard
    pub const DEFAULT: Self = Self {
        tick_ms: 10,
        debounce_ms: 10,
        fan_settle_ms: 500,
        blink_ticks: 25,
        shutdown_wait_ticks: 800,
        guard_ticks: 100,
    };
}

impl Default for SequencerTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}
