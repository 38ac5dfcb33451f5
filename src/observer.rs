/*
    pic8259_core

    observer.rs

    Debug counters and IRQ-latency timestamps are diagnostic only, and in the
    source they live behind `DEBUG_IRQ_COUNT`/`DEBUG_IRQ_LATENCY` compile-time
    flags wired directly into the hot path. Here they're a pluggable observer
    instead, attached by the host if it wants them; the core itself never
    reads statistics back out of a `PicPair`.
*/

use crate::devices::pic::unit::UnitId;

/// Hook for instrumentation external to the PIC's own semantics. Default
/// implementations are no-ops, so a host only overrides what it needs.
pub trait Observer {
    fn on_set_line(&mut self, _line: u8, _level: bool) {}
    fn on_ack(&mut self, _unit: UnitId, _line: u8, _vector: u8) {}
}

/// Zero-cost default observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {}
