/*
    pic8259_core

    error.rs

    Defines the error conditions the PIC core can raise. Most 8259 "errors"
    are simply software-visible hardware behaviors (spurious IRQs, for
    example) and are not represented here at all - this enum exists only for
    the one genuinely fatal condition the source hardware does not define
    behavior for.
*/

use std::error::Error;
use std::fmt::{self, Display};

use crate::devices::pic::unit::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PicError {
    /// ICW1 requested the level-sensitive-IRQ option (bit 3). Real 8259
    /// hardware behavior in this mode is not emulated; the caller should
    /// treat this as fatal to the emulated machine.
    LevelTriggeredIcw1Unsupported { unit: UnitId },
}

impl Error for PicError {}

impl Display for PicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PicError::LevelTriggeredIcw1Unsupported { unit } => write!(
                f,
                "pic{}: ICW1 requested level-sensitive IRQ mode, which is not supported",
                unit.index()
            ),
        }
    }
}
