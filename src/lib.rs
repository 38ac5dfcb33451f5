/*
    pic8259_core

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the "Software"),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    lib.rs

    A cascaded 8259A PIC pair, with ELCR, byte-exact with the legacy PC
    interrupt architecture.
*/

#![allow(dead_code)]

pub mod bus;
pub mod config;
pub mod devices;
pub mod error;
pub mod observer;
pub mod wire;

pub use devices::pic::{
    diagnostic,
    elcr::Elcr,
    io as port_io,
    pair::PicPair,
    snapshot::{PicPairSnapshot, PicUnitSnapshot},
    unit::{InitState, PicUnit, UnitId},
};
pub use error::PicError;
