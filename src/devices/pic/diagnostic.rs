/*
    pic8259_core

    devices::pic::diagnostic.rs

    Text dump of both chips' visible state, in the fixed format a host's
    monitor/debug printer is expected to emit verbatim. The source reaches
    for a module-level "the one PIC" global to print this; here the pair is
    an explicit parameter, since its process-wide identity was an accident
    of the original's single-machine assumption, not a requirement.
*/

use crate::devices::pic::unit::PicUnit;
use std::fmt::Write as _;

fn format_unit(index: usize, unit: &PicUnit) -> String {
    format!(
        "pic{}: irr={:02X} imr={:02X} isr={:02X} hprio={} irq_base={:02X} rr_sel={} elcr={:02X} fnm={}",
        index,
        unit.irr,
        unit.imr,
        unit.isr,
        unit.priority_add,
        unit.irq_base,
        unit.read_reg_select as u8,
        unit.elcr.read(),
        unit.special_fully_nested_mode as u8,
    )
}

/// One line per unit, master then slave.
pub fn format_pair(master: &PicUnit, slave: &PicUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_unit(0, master));
    let _ = write!(out, "{}", format_unit(1, slave));
    out
}
