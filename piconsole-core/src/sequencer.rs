//! Power sequencer control loop
//!
//! Polls the expander once per tick, renders the status LED and walks the
//! state machine. Every wait is a blocking call on the injected delay, so
//! a tick that performs a transition runs longer than the tick period.

use embedded_hal::delay::DelayNs;

use crate::config::SequencerTiming;
use crate::leds::{render, Blink, Colour};
use crate::state::{Action, Event, Sample, State};
use crate::traits::GpioExpander;

/// A transition taken during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateChange {
    pub from: State,
    pub to: State,
    pub event: Event,
}

/// Cooperative power sequencer
///
/// Owns the expander driver (and with it the output shadow), the delay
/// provider, the current state and both tick counters.
pub struct PowerSequencer<X, D> {
    expander: X,
    delay: D,
    timing: SequencerTiming,
    state: State,
    blink: Blink,
    /// Ticks spent in `PowerDownWait`
    shutdown_ticks: u16,
}

impl<X: GpioExpander, D: DelayNs> PowerSequencer<X, D> {
    /// Create a sequencer in the `Off` state
    ///
    /// The expander must already be configured.
    pub fn new(expander: X, delay: D, timing: SequencerTiming) -> Self {
        Self {
            expander,
            delay,
            blink: Blink::new(timing.blink_ticks),
            timing,
            state: State::Off,
            shutdown_ticks: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Access the expander driver
    pub fn expander(&self) -> &X {
        &self.expander
    }

    /// Run the control loop forever, reporting every transition
    pub fn run(&mut self, mut on_change: impl FnMut(StateChange)) -> ! {
        loop {
            if let Some(change) = self.tick() {
                on_change(change);
            }
        }
    }

    /// Run one loop iteration
    ///
    /// Renders the LED, advances the blink phase, evaluates transitions
    /// and finally sleeps for one tick period.
    pub fn tick(&mut self) -> Option<StateChange> {
        self.show(render(self.state, self.blink.is_on()));
        self.blink.advance();

        let change = self.evaluate();

        self.delay.delay_ms(self.timing.tick_ms);
        change
    }

    fn evaluate(&mut self) -> Option<StateChange> {
        let event = if self.state.is_timed() {
            self.countdown()?
        } else {
            self.debounced_event()?
        };

        Some(self.apply(event))
    }

    fn countdown(&mut self) -> Option<Event> {
        self.shutdown_ticks = self.shutdown_ticks.saturating_add(1);
        (self.shutdown_ticks >= self.timing.shutdown_wait_ticks).then_some(Event::ShutdownElapsed)
    }

    /// Sample twice, a debounce delay apart, and return the event only if
    /// both samples agree
    fn debounced_event(&mut self) -> Option<Event> {
        let event = self.state.observe(self.sample()?)?;

        self.delay.delay_ms(self.timing.debounce_ms);

        let confirmed = self.state.observe(self.sample()?)?;
        (confirmed == event).then_some(event)
    }

    fn sample(&mut self) -> Option<Sample> {
        self.expander.read_gpio().ok().map(Sample::from_gpio)
    }

    fn apply(&mut self, event: Event) -> StateChange {
        let from = self.state;
        let (to, actions) = from.transition(event);

        self.state = to;
        if to.is_timed() {
            self.shutdown_ticks = 0;
        }

        for action in actions {
            self.perform(action);
        }

        StateChange { from, to, event }
    }

    fn perform(&mut self, action: Action) {
        // Output writes are fire-and-forget; the next tick re-renders from
        // the shadow and re-samples the inputs
        match action {
            Action::Set(pin) => {
                let _ = self.expander.set_pins(pin.mask());
            }
            Action::Clear(pin) => {
                let _ = self.expander.clear_pins(pin.mask());
            }
            Action::FanSettle => self.delay.delay_ms(self.timing.fan_settle_ms),
            Action::AwaitSwitchRelease => self.await_switch_release(),
        }
    }

    /// Block until the switch has read released for a full guard window
    ///
    /// Stops a user still holding the button after a shutdown from
    /// immediately powering the console back up.
    fn await_switch_release(&mut self) {
        self.show(Colour::Blue);

        let mut remaining = self.timing.guard_ticks;
        while remaining > 0 {
            remaining -= 1;
            // A failed read counts as released
            if self.sample().is_some_and(|s| s.switch_pressed) {
                remaining = self.timing.guard_ticks;
            }
            self.delay.delay_ms(self.timing.tick_ms);
        }
    }

    fn show(&mut self, colour: Colour) {
        let value = colour.apply(self.expander.output_shadow());
        let _ = self.expander.write_gpio(value);
    }
}
