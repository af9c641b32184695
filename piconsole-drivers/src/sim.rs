//! Simulated open-drain bus for driver tests
//!
//! Both bus lines are wired-AND between the master (the [`SimLine`]s handed
//! to the driver under test) and a bit-level model of an MCP23008. The
//! model decodes start and stop conditions, shifts bytes in on rising clock
//! edges and drives its acknowledge and read data on falling edges, the same
//! way a real device does. The register pointer does not auto-increment.
//! Reading GPIO returns the output latch on IODIR output bits and the
//! externally driven [`Sim::inputs`] on input bits.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use piconsole_core::config::EXPANDER_ADDRESS;
use piconsole_hal::OpenDrainLine;

use crate::bus::{I2cTiming, SoftI2c};
use crate::expander::Register;

/// Registers in the modelled device
pub const REGISTER_COUNT: usize = 11;

/// Line levels seen on one rising clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockPulse {
    /// Level of SDA as the clock rose
    pub sda_high: bool,
    /// Whether the master had let go of SDA
    pub master_released_sda: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Address,
    Register,
    WriteData,
    ReadData,
    /// Addressed to someone else, or the master has finished reading
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Scl,
    Sda,
}

/// Bus wiring plus the device model
pub struct Sim {
    pub address: u8,
    /// Device answers its address at all
    pub present: bool,
    /// Device refuses register and data bytes
    pub nack_data: bool,
    /// Something outside the master holds SDA low
    pub sda_stuck_low: bool,
    pub registers: [u8; REGISTER_COUNT],
    /// Levels driven onto the expander pins from outside
    pub inputs: u8,
    /// (register, value) for every completed register write
    pub writes: Vec<(u8, u8)>,
    pub pulses: Vec<ClockPulse>,
    pub starts: usize,
    pub stops: usize,
    scl_driven: bool,
    sda_driven: bool,
    device_sda_low: bool,
    phase: Phase,
    bits: u8,
    shift: u8,
    pointer: u8,
    master_acked: bool,
}

impl Sim {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            present: true,
            nack_data: false,
            sda_stuck_low: false,
            registers: [0; REGISTER_COUNT],
            inputs: 0,
            writes: Vec::new(),
            pulses: Vec::new(),
            starts: 0,
            stops: 0,
            scl_driven: false,
            sda_driven: false,
            device_sda_low: false,
            phase: Phase::Idle,
            bits: 0,
            shift: 0,
            pointer: 0,
            master_acked: false,
        }
    }

    pub fn scl(&self) -> bool {
        !self.scl_driven
    }

    pub fn sda(&self) -> bool {
        !(self.sda_driven || self.device_sda_low || self.sda_stuck_low)
    }

    fn drive(&mut self, line: Line, low: bool) {
        let (scl, sda) = (self.scl(), self.sda());
        match line {
            Line::Scl => self.scl_driven = low,
            Line::Sda => self.sda_driven = low,
        }
        let (scl_now, sda_now) = (self.scl(), self.sda());

        if scl && scl_now {
            if sda && !sda_now {
                self.on_start();
            } else if !sda && sda_now {
                self.on_stop();
            }
        } else if !scl && scl_now {
            self.pulses.push(ClockPulse {
                sda_high: sda_now,
                master_released_sda: !self.sda_driven,
            });
            self.on_rise(sda_now);
        } else if scl && !scl_now {
            self.on_fall();
        }
    }

    fn on_start(&mut self) {
        self.starts += 1;
        self.phase = Phase::Address;
        self.bits = 0;
        self.shift = 0;
        self.device_sda_low = false;
    }

    fn on_stop(&mut self) {
        self.stops += 1;
        self.phase = Phase::Idle;
        self.device_sda_low = false;
    }

    fn on_rise(&mut self, sda: bool) {
        match self.phase {
            Phase::Idle | Phase::Ignore => {}
            Phase::ReadData => {
                self.bits = self.bits.saturating_add(1);
                if self.bits == 9 {
                    self.master_acked = !sda;
                }
            }
            Phase::Address | Phase::Register | Phase::WriteData => {
                self.bits = self.bits.saturating_add(1);
                if self.bits <= 8 {
                    self.shift = (self.shift << 1) | sda as u8;
                }
            }
        }
    }

    fn on_fall(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Ignore => {}
            Phase::ReadData => match self.bits {
                // Let the master drive the ack slot
                8 => self.device_sda_low = false,
                9 if self.master_acked => self.load(),
                9 => {
                    self.phase = Phase::Ignore;
                    self.device_sda_low = false;
                }
                n if n < 8 => self.present_bit(n),
                _ => {}
            },
            Phase::Address | Phase::Register | Phase::WriteData => match self.bits {
                8 => self.device_sda_low = self.accepts(),
                9 => {
                    self.device_sda_low = false;
                    self.bits = 0;
                    self.byte_received();
                }
                _ => {}
            },
        }
    }

    fn accepts(&self) -> bool {
        match self.phase {
            Phase::Address => self.present && self.shift >> 1 == self.address,
            _ => !self.nack_data,
        }
    }

    fn byte_received(&mut self) {
        match self.phase {
            Phase::Address if self.accepts() => {
                if self.shift & 1 == 1 {
                    self.phase = Phase::ReadData;
                    self.load();
                } else {
                    self.phase = Phase::Register;
                }
            }
            Phase::Address => self.phase = Phase::Ignore,
            Phase::Register if !self.nack_data => {
                self.pointer = self.shift;
                self.phase = Phase::WriteData;
            }
            Phase::WriteData if !self.nack_data => {
                if let Some(reg) = self.registers.get_mut(self.pointer as usize) {
                    *reg = self.shift;
                }
                self.writes.push((self.pointer, self.shift));
            }
            _ => self.phase = Phase::Ignore,
        }
    }

    /// Value the device returns for a register read
    pub fn read_value(&self, register: u8) -> u8 {
        let value = self.registers.get(register as usize).copied().unwrap_or(0);
        if register == Register::Gpio.addr() {
            let inputs = self.registers[Register::Iodir.addr() as usize];
            (value & !inputs) | (self.inputs & inputs)
        } else {
            value
        }
    }

    /// Latch the addressed register and present its MSB
    fn load(&mut self) {
        self.shift = self.read_value(self.pointer);
        self.bits = 0;
        self.present_bit(0);
    }

    fn present_bit(&mut self, index: u8) {
        self.device_sda_low = (self.shift >> (7 - index)) & 1 == 0;
    }
}

/// Master side of one simulated bus wire
pub struct SimLine {
    bus: Rc<RefCell<Sim>>,
    line: Line,
}

impl SimLine {
    pub fn new(bus: &Rc<RefCell<Sim>>, line: Line) -> Self {
        Self {
            bus: Rc::clone(bus),
            line,
        }
    }
}

impl OpenDrainLine for SimLine {
    fn release(&mut self) {
        self.bus.borrow_mut().drive(self.line, false);
    }

    fn drive_low(&mut self) {
        self.bus.borrow_mut().drive(self.line, true);
    }

    fn is_high(&mut self) -> bool {
        let bus = self.bus.borrow();
        match self.line {
            Line::Scl => bus.scl(),
            Line::Sda => bus.sda(),
        }
    }
}

/// Delay that returns immediately
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub type SimI2c = SoftI2c<SimLine, SimLine, NoopDelay>;

/// A bus with the device at the console's expander address, and a master
/// wired to it
pub fn sim_bus() -> (Rc<RefCell<Sim>>, SimI2c) {
    let sim = Rc::new(RefCell::new(Sim::new(EXPANDER_ADDRESS)));
    let scl = SimLine::new(&sim, Line::Scl);
    let sda = SimLine::new(&sim, Line::Sda);
    let i2c = SoftI2c::new(scl, sda, NoopDelay, I2cTiming::DEFAULT);
    (sim, i2c)
}
