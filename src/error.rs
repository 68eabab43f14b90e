//! Errors that can occur when doing arithmetic with [`WrapTime`]
//!
//! [`WrapTime`]: ../time/struct.WrapTime.html


use core::fmt;


/// An error that can occur when dividing a time value
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Attempted to divide by a time value of zero ticks
    DivisionByZero,

    /// The factor passed to a division has no finite reciprocal
    ///
    /// Division by a factor is computed as a multiplication with `1 / factor`,
    /// so this covers a factor of zero as well as NaN.
    NonFiniteFactor,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DivisionByZero =>
                write!(f, "division by a time value of zero ticks"),
            Error::NonFiniteFactor =>
                write!(f, "division factor has no finite reciprocal"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
