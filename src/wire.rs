/*
    pic8259_core

    wire.rs

    The outward interrupt-wire contract. A pair raises/lowers its master's
    INT output toward whatever the host wires it to (normally the CPU core's
    INTR line); the slave's output is wired internally to the master's line
    2 and never needs to leave the crate.
*/

/// A level-based output line. `raise`/`lower` are idempotent: calling either
/// twice in a row with no change in between has no additional effect.
pub trait OutputWire {
    fn raise(&mut self);
    fn lower(&mut self);
}

/// An `OutputWire` with no host behind it, for unit tests and for pairs
/// constructed before a host has supplied its own CPU-facing sink.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullWire {
    pub level: bool,
}

impl OutputWire for NullWire {
    fn raise(&mut self) {
        self.level = true;
    }
    fn lower(&mut self) {
        self.level = false;
    }
}
