/*
    pic8259_core

    devices::pic::snapshot.rs

    The persisted per-unit field set (version 1): exactly the sixteen
    fields listed below, each stored as an 8-bit value, in this order. This
    mirrors the source's VMStateField table but through serde rather than a
    bespoke save-file format - serializing the fields is this crate's job;
    picking a wire format and writing it to disk is the host's.
*/

use serde::{Deserialize, Serialize};

use crate::devices::pic::unit::{InitState, PicUnit, UnitId};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicUnitSnapshot {
    pub last_irr: u8,
    pub irr: u8,
    pub imr: u8,
    pub isr: u8,
    pub priority_add: u8,
    pub irq_base: u8,
    pub read_reg_select: u8,
    pub poll: u8,
    pub special_mask: u8,
    pub init_state: u8,
    pub auto_eoi: u8,
    pub rotate_on_auto_eoi: u8,
    pub special_fully_nested_mode: u8,
    pub init4: u8,
    pub single_mode: u8,
    pub elcr: u8,
}

impl From<&PicUnit> for PicUnitSnapshot {
    fn from(u: &PicUnit) -> Self {
        Self {
            last_irr: u.last_irr,
            irr: u.irr,
            imr: u.imr,
            isr: u.isr,
            priority_add: u.priority_add,
            irq_base: u.irq_base,
            read_reg_select: u.read_reg_select as u8,
            poll: u.poll as u8,
            special_mask: u.special_mask as u8,
            init_state: u.init_state.as_u8(),
            auto_eoi: u.auto_eoi as u8,
            rotate_on_auto_eoi: u.rotate_on_auto_eoi as u8,
            special_fully_nested_mode: u.special_fully_nested_mode as u8,
            init4: u.init4 as u8,
            single_mode: u.single_mode as u8,
            elcr: u.elcr.raw(),
        }
    }
}

impl PicUnitSnapshot {
    /// Restore `unit`'s registers from this snapshot. `unit.id` and the
    /// ELCR's writable-bit mask (fixed wiring, not a register) are left
    /// untouched.
    pub fn apply_to(&self, unit: &mut PicUnit) {
        unit.last_irr = self.last_irr;
        unit.irr = self.irr;
        unit.imr = self.imr;
        unit.isr = self.isr;
        unit.priority_add = self.priority_add;
        unit.irq_base = self.irq_base;
        unit.read_reg_select = self.read_reg_select != 0;
        unit.poll = self.poll != 0;
        unit.special_mask = self.special_mask != 0;
        unit.init_state = InitState::from_u8(self.init_state);
        unit.auto_eoi = self.auto_eoi != 0;
        unit.rotate_on_auto_eoi = self.rotate_on_auto_eoi != 0;
        unit.special_fully_nested_mode = self.special_fully_nested_mode != 0;
        unit.init4 = self.init4 != 0;
        unit.single_mode = self.single_mode != 0;
        unit.elcr.set_raw(self.elcr);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicPairSnapshot {
    pub version: u32,
    pub master: PicUnitSnapshot,
    pub slave: PicUnitSnapshot,
}

impl PicPairSnapshot {
    pub fn new(master: &PicUnit, slave: &PicUnit) -> Self {
        debug_assert_eq!(master.id, UnitId::Master);
        debug_assert_eq!(slave.id, UnitId::Slave);
        Self {
            version: SNAPSHOT_VERSION,
            master: PicUnitSnapshot::from(master),
            slave: PicUnitSnapshot::from(slave),
        }
    }
}
