/*
    pic8259_core

    config.rs

    Construction-time configuration for a PicPair. The legacy PC values
    (ports 0x20/0xA0, ELCR at 0x4D0/0x4D1, masks 0xF8/0xDE) are the only
    configuration real hardware ever shipped with, but a host embedding this
    core for testing or for a non-PC-compatible cascade wants to be able to
    say so explicitly rather than have it hardcoded two layers down.
*/

pub const MASTER_BASE_PORT: u16 = 0x20;
pub const SLAVE_BASE_PORT: u16 = 0xA0;
pub const MASTER_ELCR_PORT: u16 = 0x4D0;
pub const SLAVE_ELCR_PORT: u16 = 0x4D1;
pub const MASTER_ELCR_MASK: u8 = 0xF8;
pub const SLAVE_ELCR_MASK: u8 = 0xDE;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnitConfig {
    pub base_port: u16,
    pub elcr_port: u16,
    pub elcr_mask: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PicPairConfig {
    pub master: UnitConfig,
    pub slave: UnitConfig,
}

impl Default for PicPairConfig {
    fn default() -> Self {
        Self {
            master: UnitConfig {
                base_port: MASTER_BASE_PORT,
                elcr_port: MASTER_ELCR_PORT,
                elcr_mask: MASTER_ELCR_MASK,
            },
            slave: UnitConfig {
                base_port: SLAVE_BASE_PORT,
                elcr_port: SLAVE_ELCR_PORT,
                elcr_mask: SLAVE_ELCR_MASK,
            },
        }
    }
}
