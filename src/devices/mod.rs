/*
    pic8259_core

    devices::mod.rs
*/

pub mod pic;
