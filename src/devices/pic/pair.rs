/*
    pic8259_core

    devices::pic::pair.rs

    Owns the two chips and everything that requires seeing both of them at
    once: cascading the slave's output into the master's line 2, the
    acknowledge cycle, the polled-read/poll-ack paths (which can reach
    across into the peer chip), and driving the outward CPU-facing wire.

    Each `PicUnit` carries only its own index, not a reference back to this
    struct - the "peer" is a lookup the pair performs, never ownership.
*/

use anyhow::Result;

use crate::bus::{DeviceRunTimeUnit, IoDevice};
use crate::config::PicPairConfig;
use crate::devices::pic::io;
use crate::devices::pic::snapshot::PicPairSnapshot;
use crate::devices::pic::unit::{PicUnit, UnitId};
use crate::error::PicError;
use crate::observer::{NullObserver, Observer};
use crate::wire::OutputWire;

/// The cascade input line on the master that the slave's output is wired
/// to, fixed by the PC architecture.
const CASCADE_LINE: u8 = 2;
const SPURIOUS_LINE: u8 = 7;

pub struct PicPair<W: OutputWire, O: Observer = NullObserver> {
    units: [PicUnit; 2],
    config: PicPairConfig,
    wire: W,
    observer: O,
    /// Sticky record of the one fatal condition this core can raise
    /// (`PicError::LevelTriggeredIcw1Unsupported`), set when it arrives
    /// through `IoDevice::write_u8` - the only entry point with no `Result`
    /// of its own to carry it back to the caller. `write_port` still returns
    /// the error directly and does not touch this field.
    halt_error: Option<PicError>,
}

impl<W: OutputWire> PicPair<W, NullObserver> {
    pub fn new(config: PicPairConfig, wire: W) -> Self {
        Self::with_observer(config, wire, NullObserver)
    }
}

impl<W: OutputWire, O: Observer> PicPair<W, O> {
    pub fn with_observer(config: PicPairConfig, wire: W, observer: O) -> Self {
        let mut pair = Self {
            units: [
                PicUnit::new(UnitId::Master, config.master.elcr_mask),
                PicUnit::new(UnitId::Slave, config.slave.elcr_mask),
            ],
            config,
            wire,
            observer,
            halt_error: None,
        };
        pair.recompute();
        pair
    }

    pub fn unit(&self, which: UnitId) -> &PicUnit {
        &self.units[which.index()]
    }

    pub fn unit_mut(&mut self, which: UnitId) -> &mut PicUnit {
        &mut self.units[which.index()]
    }

    pub fn config(&self) -> &PicPairConfig {
        &self.config
    }

    pub fn wire(&self) -> &W {
        &self.wire
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Snapshot both units' persisted registers (§3/§6), version 1.
    pub fn snapshot(&self) -> PicPairSnapshot {
        PicPairSnapshot::new(&self.units[0], &self.units[1])
    }

    /// Restore both units' registers from a snapshot taken earlier, then
    /// re-evaluate the cascade line and the outward wire - a restored ISR/IRR
    /// can change what's pending without any new line-input or port access
    /// having occurred.
    pub fn restore(&mut self, snap: &PicPairSnapshot) {
        snap.master.apply_to(&mut self.units[0]);
        snap.slave.apply_to(&mut self.units[1]);
        self.recompute();
    }

    /// Whether the pair has hit the one fatal, unrecoverable condition it
    /// can raise (ICW1 requesting level-sensitive mode) through
    /// `IoDevice::write_u8`, which has no `Result` of its own to report it.
    /// Callers driving the pair through `write_port` directly already get
    /// this as a returned `Err` and never need to consult this flag.
    pub fn halted(&self) -> bool {
        self.halt_error.is_some()
    }

    /// Take the recorded halt condition, if any, clearing it. A host
    /// embedding this pair behind `IoDevice` should check `halted()` (or
    /// drain this) after every `write_u8` and halt the emulated machine
    /// itself, per §7 - the core does not and cannot do that on its own.
    pub fn take_halt_error(&mut self) -> Option<PicError> {
        self.halt_error.take()
    }

    /// Power-on/construction reset: every register including both ELCRs.
    pub fn reset_cold(&mut self) {
        self.units[0].reset_cold();
        self.units[1].reset_cold();
        self.recompute();
    }

    /// Machine reset: every register except the ELCRs, which PIIX-class
    /// chipsets preserve across a warm reset.
    pub fn reset_warm(&mut self) {
        self.units[0].reset_warm();
        self.units[1].reset_warm();
        self.recompute();
    }

    /// Feed a level transition on flat line `line` (0..=15): 0..=7 address
    /// the master directly, 8..=15 address the slave's local lines 0..=7.
    pub fn set_line(&mut self, line: u8, level: bool) {
        debug_assert!(line < 16);
        if line < 8 {
            self.units[0].set_line(line, level);
        } else {
            self.units[1].set_line(line - 8, level);
        }
        self.observer.on_set_line(line, level);
        self.recompute();
    }

    /// Recompute the cascade line and the outward CPU-facing wire. Called
    /// after every entry point that can change either chip's pending
    /// computation. The cascade feed is re-driven unconditionally on every
    /// call; because it's edge-triggered on the master (mandatorily, per
    /// its ELCR mask) repeated calls with the same level are no-ops.
    fn recompute(&mut self) {
        let slave_pending = self.units[1].pending().is_some();
        self.units[0].set_line(CASCADE_LINE, slave_pending);

        if self.units[0].pending().is_some() {
            self.wire.raise();
        } else {
            self.wire.lower();
        }
    }

    /// Resolve which unit acknowledges a polled read and release it
    /// unconditionally (IRR and ISR both cleared, no ISR latch). When the
    /// slave is the one acknowledged, the master's cascade bit (line 2) is
    /// cleared alongside it, matching the bus-sniffed behavior of real
    /// PIIX-era chipsets.
    ///
    /// Real 8259 silicon sets bit 7 of this byte when an interrupt was
    /// pending; this core returns the bare line number (0..=7) in every
    /// case, matching the source it was modeled on. Guest software that
    /// tests bit 7 will misbehave regardless of which behavior is chosen.
    fn polled_ack(&mut self, which: UnitId) -> u8 {
        match self.units[which.index()].pending() {
            Some(line) => {
                self.units[which.index()].clear_irr_isr(line);
                if which == UnitId::Slave {
                    self.units[0].clear_irr_isr(CASCADE_LINE);
                }
                line
            }
            None => SPURIOUS_LINE,
        }
    }

    /// Interrupt-acknowledge cycle. Returns the 8-bit vector the CPU would
    /// read off the bus during INTA.
    pub fn ack(&mut self) -> u8 {
        let irq = match self.units[0].pending() {
            Some(irq) => irq,
            None => {
                // Spurious IRQ on the master: no ISR bit latched, nothing
                // to re-evaluate.
                return self.units[0].irq_base + SPURIOUS_LINE;
            }
        };

        let vector = if irq == CASCADE_LINE {
            match self.units[1].pending() {
                Some(irq2) => {
                    self.units[1].intack(irq2);
                    self.observer.on_ack(UnitId::Slave, irq2, self.units[1].irq_base + irq2);
                    self.units[1].irq_base + irq2
                }
                None => {
                    // Spurious IRQ on the slave controller: no ISR bit
                    // latched on the slave, but the master still sees a
                    // real cascade request and must be acknowledged below.
                    self.units[1].irq_base + SPURIOUS_LINE
                }
            }
        } else {
            self.units[0].irq_base + irq
        };

        self.units[0].intack(irq);
        self.observer.on_ack(UnitId::Master, irq, vector);
        self.recompute();
        vector
    }

    /// Memory-mapped acknowledge: two polled reads, master then (if it
    /// routed through the cascade) slave, returning `slave_result + 8`.
    /// Primes `read_reg_select` on the master so the next data-port read
    /// sees ISR, matching the source's side effect.
    pub fn ack_mmio(&mut self) -> u8 {
        let mut result = self.polled_ack(UnitId::Master);
        if result == CASCADE_LINE {
            result = self.polled_ack(UnitId::Slave) + 8;
        }
        self.units[0].read_reg_select = true;
        self.recompute();
        result
    }

    /// Write to `which`'s port `offset` (0 = command, 1 = data).
    pub fn write_port(&mut self, which: UnitId, offset: u8, val: u8) -> Result<()> {
        let unit = &mut self.units[which.index()];
        if offset == 0 {
            io::write_control(unit, val)?;
        } else {
            io::write_data(unit, val);
        }
        self.recompute();
        Ok(())
    }

    /// Read `which`'s port `offset` (0 = command, 1 = data).
    pub fn read_port(&mut self, which: UnitId, offset: u8) -> u8 {
        if offset != 0 {
            return io::read_data(&self.units[which.index()]);
        }

        if self.units[which.index()].poll {
            self.units[which.index()].poll = false;
            let result = self.polled_ack(which);
            self.recompute();
            result
        } else {
            io::read_control(&self.units[which.index()])
        }
    }

    /// ELCR port write: value is masked per chip by construction.
    pub fn write_elcr(&mut self, which: UnitId, val: u8) {
        self.units[which.index()].elcr.write(val);
    }

    /// ELCR port read: the stored (already-masked) value, unchanged.
    pub fn read_elcr(&self, which: UnitId) -> u8 {
        self.units[which.index()].elcr.read()
    }

    fn decode_port(&self, port: u16) -> Option<(UnitId, u8)> {
        let m = &self.config.master;
        let s = &self.config.slave;
        if port == m.base_port || port == m.base_port + 1 {
            Some((UnitId::Master, (port - m.base_port) as u8))
        } else if port == s.base_port || port == s.base_port + 1 {
            Some((UnitId::Slave, (port - s.base_port) as u8))
        } else {
            None
        }
    }

    fn decode_elcr_port(&self, port: u16) -> Option<UnitId> {
        if port == self.config.master.elcr_port {
            Some(UnitId::Master)
        } else if port == self.config.slave.elcr_port {
            Some(UnitId::Slave)
        } else {
            None
        }
    }
}

impl<W: OutputWire, O: Observer> IoDevice for PicPair<W, O> {
    fn read_u8(&mut self, port: u16, _delta: DeviceRunTimeUnit) -> u8 {
        if let Some((which, offset)) = self.decode_port(port) {
            self.read_port(which, offset)
        } else if let Some(which) = self.decode_elcr_port(port) {
            self.read_elcr(which)
        } else {
            log::warn!("pic: read from unmapped port {:#06x}", port);
            crate::bus::NO_IO_BYTE
        }
    }

    fn write_u8(&mut self, port: u16, data: u8, _delta: DeviceRunTimeUnit) {
        if let Some((which, offset)) = self.decode_port(port) {
            if let Err(e) = self.write_port(which, offset, data) {
                log::error!("pic: {}", e);
                if let Ok(pic_err) = e.downcast::<PicError>() {
                    self.halt_error.get_or_insert(pic_err);
                }
            }
        } else if let Some(which) = self.decode_elcr_port(port) {
            self.write_elcr(which, data);
        } else {
            log::warn!("pic: write to unmapped port {:#06x} = {:#04x}", port, data);
        }
    }

    fn port_list(&self) -> Vec<(String, u16)> {
        vec![
            ("PIC Master Command".to_string(), self.config.master.base_port),
            ("PIC Master Data".to_string(), self.config.master.base_port + 1),
            ("PIC Master ELCR".to_string(), self.config.master.elcr_port),
            ("PIC Slave Command".to_string(), self.config.slave.base_port),
            ("PIC Slave Data".to_string(), self.config.slave.base_port + 1),
            ("PIC Slave ELCR".to_string(), self.config.slave.elcr_port),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::NullWire;

    fn pair() -> PicPair<NullWire> {
        PicPair::new(PicPairConfig::default(), NullWire::default())
    }

    fn init_master(p: &mut PicPair<NullWire>) {
        p.write_port(UnitId::Master, 0, 0x11).unwrap();
        p.write_port(UnitId::Master, 1, 0x20).unwrap();
        p.write_port(UnitId::Master, 1, 0x04).unwrap();
        p.write_port(UnitId::Master, 1, 0x01).unwrap();
    }

    fn init_both(p: &mut PicPair<NullWire>) {
        init_master(p);
        p.write_port(UnitId::Slave, 0, 0x11).unwrap();
        p.write_port(UnitId::Slave, 1, 0x28).unwrap();
        p.write_port(UnitId::Slave, 1, 0x02).unwrap();
        p.write_port(UnitId::Slave, 1, 0x01).unwrap();
        p.write_port(UnitId::Master, 1, 0x00).unwrap();
        p.write_port(UnitId::Slave, 1, 0x00).unwrap();
    }

    #[test]
    fn scenario_1_initialize_master() {
        let mut p = pair();
        init_master(&mut p);
        assert_eq!(p.unit(UnitId::Master).irq_base, 0x20);
        assert_eq!(p.unit(UnitId::Master).init4, true);
        assert_eq!(p.unit(UnitId::Master).auto_eoi, false);
        assert_eq!(p.unit(UnitId::Master).init_state, crate::InitState::Idle);
    }

    #[test]
    fn scenario_2_masked_request_is_suppressed() {
        let mut p = pair();
        init_master(&mut p);
        p.write_port(UnitId::Master, 1, 0xFF).unwrap();
        p.set_line(0, true);
        assert_eq!(p.wire.level, false);
        assert_eq!(p.unit(UnitId::Master).irr & 1, 1);
    }

    #[test]
    fn scenario_3_basic_ack_sequence() {
        let mut p = pair();
        init_master(&mut p);
        p.write_port(UnitId::Master, 1, 0x00).unwrap();
        p.set_line(3, true);
        assert!(p.wire.level);
        let vec = p.ack();
        assert_eq!(vec, 0x23);
        assert_eq!(p.unit(UnitId::Master).isr, 0x08);
        assert_eq!(p.unit(UnitId::Master).irr & 0x08, 0);
        assert!(!p.wire.level);
    }

    #[test]
    fn scenario_4_cascade_path() {
        let mut p = pair();
        init_both(&mut p);
        p.set_line(10, true);
        assert!(p.wire.level, "master output raised via IRR bit 2");
        let vec = p.ack();
        assert_eq!(vec, 0x28 + (10 - 8));
        assert_eq!(p.unit(UnitId::Slave).isr & (1 << 2), 1 << 2);
        assert_eq!(p.unit(UnitId::Master).isr & (1 << 2), 1 << 2);
    }

    #[test]
    fn scenario_5_eoi_with_rotation() {
        let mut p = pair();
        init_master(&mut p);
        p.write_port(UnitId::Master, 1, 0x00).unwrap();
        p.set_line(3, true);
        p.ack();
        p.write_port(UnitId::Master, 0, 0xA0).unwrap(); // OCW2 cmd=5
        assert_eq!(p.unit(UnitId::Master).isr, 0);
        assert_eq!(p.unit(UnitId::Master).priority_add, (3 + 1) & 7);
    }

    #[test]
    fn scenario_6_polled_read() {
        let mut p = pair();
        init_master(&mut p);
        p.write_port(UnitId::Master, 1, 0x00).unwrap();
        p.set_line(5, true);
        p.write_port(UnitId::Master, 0, 0x0C).unwrap(); // OCW3 poll
        let val = p.read_port(UnitId::Master, 0);
        assert_eq!(val, 5);
        assert_eq!(p.unit(UnitId::Master).irr & (1 << 5), 0);
        assert_eq!(p.unit(UnitId::Master).isr & (1 << 5), 0);
        assert!(!p.wire.level);
    }

    #[test]
    fn level_sensitive_icw1_is_fatal_but_not_a_panic() {
        let mut p = pair();
        let err = p.write_port(UnitId::Master, 0, 0x19);
        assert!(err.is_err());
    }

    #[test]
    fn level_sensitive_icw1_through_io_device_sets_halt_flag() {
        let mut p = pair();
        assert!(!p.halted());
        IoDevice::write_u8(&mut p, 0x20, 0x19, DeviceRunTimeUnit::SystemTicks(0));
        assert!(p.halted());
        let err = p.take_halt_error();
        assert!(matches!(err, Some(PicError::LevelTriggeredIcw1Unsupported { unit: UnitId::Master })));
        assert!(!p.halted(), "take_halt_error clears the sticky flag");
    }

    #[test]
    fn snapshot_restore_round_trips_through_a_live_pair() {
        let mut p = pair();
        init_both(&mut p);
        p.set_line(10, true);
        p.ack();

        let snap = p.snapshot();
        assert_eq!(snap.master.isr, p.unit(UnitId::Master).isr);
        assert_eq!(snap.slave.isr, p.unit(UnitId::Slave).isr);

        let mut restored = pair();
        restored.restore(&snap);
        assert_eq!(restored.unit(UnitId::Master).isr, p.unit(UnitId::Master).isr);
        assert_eq!(restored.unit(UnitId::Slave).isr, p.unit(UnitId::Slave).isr);
        assert_eq!(restored.unit(UnitId::Master).irq_base, p.unit(UnitId::Master).irq_base);
        assert_eq!(restored.unit(UnitId::Slave).irq_base, p.unit(UnitId::Slave).irq_base);
        // Restoring a pending request (without re-driving set_line) must still
        // raise the outward wire - recompute() runs as part of restore().
        assert_eq!(restored.wire.level, p.wire.level);
    }

    #[test]
    fn unit_mut_allows_direct_register_manipulation() {
        let mut p = pair();
        p.unit_mut(UnitId::Slave).irq_base = 0x28;
        assert_eq!(p.unit(UnitId::Slave).irq_base, 0x28);
    }

    #[test]
    fn ack_mmio_primes_isr_read_select() {
        let mut p = pair();
        init_both(&mut p);
        p.set_line(10, true);
        let result = p.ack_mmio();
        assert_eq!(result, 8 + 2);
        assert!(p.unit(UnitId::Master).read_reg_select);
    }
}
