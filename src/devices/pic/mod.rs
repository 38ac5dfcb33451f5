/*
    pic8259_core

    devices::pic::mod.rs

    Implements the 8259A Programmable Interrupt Controller pair: two
    cascaded chips (master, slave) plus the PIIX-style Edge/Level Control
    Register that selects each line's trigger mode.
*/

pub mod diagnostic;
pub mod elcr;
pub mod io;
pub mod pair;
pub mod snapshot;
pub mod unit;

pub use pair::PicPair;
pub use unit::{InitState, PicUnit, UnitId};
