//! Wraparound timestamps for the DW1000 UWB transceiver
//!
//! The DW1000 measures time with a 40-bit counter that ticks at 128 times its
//! 499.2 MHz base clock. This crate provides [`WrapTime`], a value type for
//! such tick counts, that can be:
//!
//! - decoded from, and encoded to, the 5-byte format of the DW1000's time
//!   registers,
//! - converted to microseconds, or to the distance a radio signal travels in
//!   the given time,
//! - added, subtracted and scaled, with an explicit step to fold the result
//!   back into the 40-bit range after the counter has overflowed.
//!
//! Reading timestamps from the radio, and two-way ranging on top of them, are
//! the job of the driver.
//!
//! [`WrapTime`]: time/struct.WrapTime.html


#![no_std]

#![deny(missing_docs)]


#[cfg(feature = "std")]
extern crate std;


pub mod error;
pub mod time;
pub mod util;


pub use crate::{
    error::Error,
    time::{
        WrapTime,
        DISTANCE_OF_RADIO,
        LEN_STAMP,
        TIME_OVERFLOW,
        TIME_RES,
        TIME_RES_INV,
    },
};
