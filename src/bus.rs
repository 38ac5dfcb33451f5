/*
    pic8259_core

    bus.rs

    The narrow slice of a host system bus this core actually needs: the
    byte-wide port device trait devices register themselves under. The bus
    fabric itself (address decode across many devices, MMIO, wait states)
    is a host concern and lives outside this crate.
*/

/// The byte read back from a port no device claimed.
pub const NO_IO_BYTE: u8 = 0xFF;

/// Unit of elapsed time a device may be given when servicing a port access.
/// Devices that don't care about timing (this one doesn't) simply ignore it.
#[derive(Copy, Clone, Debug)]
pub enum DeviceRunTimeUnit {
    SystemTicks(u32),
    Microseconds(f64),
}

/// A byte-addressable I/O port device. Wider-than-byte accesses are not
/// representable by this trait; rejecting them is the enclosing decoder's
/// job, not the device's.
pub trait IoDevice {
    fn read_u8(&mut self, port: u16, delta: DeviceRunTimeUnit) -> u8;
    fn write_u8(&mut self, port: u16, data: u8, delta: DeviceRunTimeUnit);
    fn port_list(&self) -> Vec<(String, u16)>;
}
