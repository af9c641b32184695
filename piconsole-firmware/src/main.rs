//! piconsole - Power Controller Firmware
//!
//! Sequences the Raspberry Pi supply and cooling fan of a games console
//! from its power button. All console-side I/O goes through an MCP23008
//! expander on a bit-banged I2C bus.
//!
//! The controller runs a single blocking loop inside the main task; there
//! is nothing else for the executor to schedule.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Flex;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use piconsole_core::config::{ExpanderConfig, SequencerTiming};
use piconsole_core::sequencer::PowerSequencer;
use piconsole_drivers::bus::{I2cTiming, SoftI2c};
use piconsole_drivers::expander::Mcp23008;

use crate::bus::FlexLine;

mod bus;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("piconsole power controller starting...");

    let p = embassy_rp::init(Default::default());

    // Expander bus: SCL on GPIO3, SDA on GPIO4
    let scl = FlexLine::new(Flex::new(p.PIN_3));
    let sda = FlexLine::new(Flex::new(p.PIN_4));

    let mut i2c = SoftI2c::new(scl, sda, Delay, I2cTiming::DEFAULT);
    match i2c.initialize() {
        Ok(()) => info!("I2C bus idle"),
        // Carry on; every tick rewrites the LEDs and re-samples the inputs
        Err(e) => warn!("I2C bus not idle: {:?}", e),
    }

    let mut expander = Mcp23008::new(i2c, ExpanderConfig::DEFAULT);
    match expander.configure() {
        Ok(()) => info!("Expander configured"),
        Err(e) => warn!("Expander configuration failed: {:?}", e),
    }

    let mut sequencer = PowerSequencer::new(expander, Delay, SequencerTiming::DEFAULT);
    info!("Power sequencer running");

    sequencer.run(|change| {
        info!("{:?} -> {:?} on {:?}", change.from, change.to, change.event);
    })
}
