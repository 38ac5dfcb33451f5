/*
    pic8259_core

    devices::pic::io.rs

    Decodes writes/reads to a single chip's two data-port offsets. Kept as
    free functions over `&mut PicUnit` rather than methods so the ICW/OCW
    case analysis reads as one linear state machine, with a fatal arm for
    the one unsupported configuration instead of a silent fall-through.

    Cross-unit effects (the cascade wire, the poll one-shot's peer-clearing,
    recomputing the outward INTR line) are not decided here - they belong to
    the pair, which calls these functions and then reacts to what changed.
*/

use crate::devices::pic::unit::{InitState, PicUnit};
use crate::error::PicError;

const ICW1_BIT: u8 = 0b0001_0000;
const ICW1_LEVEL_SENSITIVE_BIT: u8 = 0b0000_1000;
const ICW1_SINGLE_MODE_BIT: u8 = 0b0000_0010;
const ICW1_ICW4_BIT: u8 = 0b0000_0001;

const OCW3_BIT: u8 = 0b0000_1000;
const OCW3_POLL_BIT: u8 = 0b0000_0100;
const OCW3_RR_BIT: u8 = 0b0000_0010;
const OCW3_ESMM_BIT: u8 = 0b0100_0000;
const OCW3_SMM_BIT: u8 = 0b0010_0000;

/// Write to a chip's command port (offset 0): ICW1, OCW2 or OCW3.
pub fn write_control(unit: &mut PicUnit, val: u8) -> Result<(), PicError> {
    if val & ICW1_BIT != 0 {
        write_icw1(unit, val)
    } else if val & OCW3_BIT != 0 {
        write_ocw3(unit, val);
        Ok(())
    } else {
        write_ocw2(unit, val);
        Ok(())
    }
}

fn write_icw1(unit: &mut PicUnit, val: u8) -> Result<(), PicError> {
    unit.reset_warm();
    unit.init_state = InitState::AwaitIcw2;
    unit.init4 = val & ICW1_ICW4_BIT != 0;
    unit.single_mode = val & ICW1_SINGLE_MODE_BIT != 0;

    log::debug!(
        "pic{}: ICW1={:#04x} init4={} single_mode={}",
        unit.id.index(),
        val,
        unit.init4,
        unit.single_mode
    );

    if val & ICW1_LEVEL_SENSITIVE_BIT != 0 {
        log::error!(
            "pic{}: ICW1 requested level-sensitive IRQ mode, which is not supported",
            unit.id.index()
        );
        return Err(PicError::LevelTriggeredIcw1Unsupported { unit: unit.id });
    }
    Ok(())
}

fn write_ocw3(unit: &mut PicUnit, val: u8) {
    if val & OCW3_POLL_BIT != 0 {
        unit.poll = true;
    }
    if val & OCW3_RR_BIT != 0 {
        unit.read_reg_select = val & 1 != 0;
    }
    if val & OCW3_ESMM_BIT != 0 {
        unit.special_mask = val & OCW3_SMM_BIT != 0;
    }
}

fn write_ocw2(unit: &mut PicUnit, val: u8) {
    let cmd = val >> 5;
    match cmd {
        0 | 4 => {
            unit.rotate_on_auto_eoi = cmd >> 2 != 0;
        }
        1 | 5 => {
            // Non-specific EOI, cmd 5 also rotates.
            let p = unit.priority(unit.isr);
            if p != 8 {
                let line = (p + unit.priority_add) & 7;
                unit.isr &= !(1 << line);
                if cmd == 5 {
                    unit.priority_add = (line + 1) & 7;
                }
            }
        }
        3 => {
            // Specific EOI.
            let line = val & 7;
            unit.isr &= !(1 << line);
        }
        6 => {
            // Set priority, no EOI.
            unit.priority_add = (val + 1) & 7;
        }
        7 => {
            // Specific EOI with rotate.
            let line = val & 7;
            unit.isr &= !(1 << line);
            unit.priority_add = (line + 1) & 7;
        }
        2 => {
            // Real silicon ignores this bit pattern; keep the no-op explicit.
        }
        _ => unreachable!("OCW2 sub-command is a 3-bit field"),
    }
}

/// Write to a chip's data port (offset 1): multiplexed by `init_state`.
pub fn write_data(unit: &mut PicUnit, val: u8) {
    match unit.init_state {
        InitState::Idle => {
            unit.imr = val;
        }
        InitState::AwaitIcw2 => {
            unit.irq_base = val & 0xF8;
            unit.init_state = if unit.single_mode {
                if unit.init4 {
                    InitState::AwaitIcw4
                } else {
                    InitState::Idle
                }
            } else {
                InitState::AwaitIcw3
            };
        }
        InitState::AwaitIcw3 => {
            // Cascade wiring is fixed by construction, not programmed here.
            unit.init_state = if unit.init4 { InitState::AwaitIcw4 } else { InitState::Idle };
        }
        InitState::AwaitIcw4 => {
            unit.special_fully_nested_mode = (val >> 4) & 1 != 0;
            unit.auto_eoi = (val >> 1) & 1 != 0;
            unit.init_state = InitState::Idle;
        }
    }
}

/// Read a chip's command port (offset 0) outside of the poll one-shot,
/// which the pair handles itself since it can affect the peer chip.
pub fn read_control(unit: &PicUnit) -> u8 {
    if unit.read_reg_select {
        unit.isr
    } else {
        unit.irr
    }
}

/// Read a chip's data port (offset 1): always the IMR.
pub fn read_data(unit: &PicUnit) -> u8 {
    unit.imr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::pic::unit::UnitId;

    fn unit() -> PicUnit {
        PicUnit::new(UnitId::Master, 0xF8)
    }

    #[test]
    fn icw_sequence_programs_base_and_mode() {
        let mut u = unit();
        write_control(&mut u, 0x11).unwrap(); // ICW1, init4=1, single_mode=0
        write_data(&mut u, 0x20); // ICW2
        write_data(&mut u, 0x04); // ICW3 (ignored in single mode but still consumed)
        write_data(&mut u, 0x01); // ICW4
        assert_eq!(u.irq_base, 0x20);
        assert_eq!(u.init4, true);
        assert_eq!(u.auto_eoi, false);
        assert_eq!(u.init_state, InitState::Idle);
    }

    #[test]
    fn level_sensitive_icw1_is_rejected() {
        let mut u = unit();
        let err = write_control(&mut u, 0x11 | 0x08).unwrap_err();
        assert_eq!(err, PicError::LevelTriggeredIcw1Unsupported { unit: u.id });
    }

    #[test]
    fn ocw1_sets_imr_only_when_idle() {
        let mut u = unit();
        write_data(&mut u, 0xAB);
        assert_eq!(u.imr, 0xAB);
    }

    #[test]
    fn ocw2_rotate_on_eoi_updates_priority_add_p8() {
        let mut u = unit();
        u.isr = 1 << 3;
        write_control(&mut u, 0b1010_0000).unwrap(); // cmd=5, non-specific rotate EOI
        assert_eq!(u.isr, 0);
        assert_eq!(u.priority_add, (3 + 1) & 7);
    }

    #[test]
    fn ocw3_poll_and_read_select_and_special_mask() {
        let mut u = unit();
        write_control(&mut u, 0b0000_1100).unwrap(); // OCW3, poll
        assert!(u.poll);
        write_control(&mut u, 0b0000_1011).unwrap(); // OCW3, rr=1 -> ISR
        assert!(u.read_reg_select);
        write_control(&mut u, 0b0110_1010).unwrap(); // OCW3, esmm=1, smm=1, is_ocw3=1
        assert!(u.special_mask);
    }
}
