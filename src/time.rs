//! Time-related types based on the DW1000's system time
//!
//! The DW1000 counts time in units of 1/(128 * 499.2 MHz), about 15.65 ps, in
//! a 40-bit register that overflows roughly every 17.2 seconds. [`WrapTime`]
//! holds such a counter value in a wider, signed field, so that differences of
//! timestamps can go negative before being folded back with
//! [`WrapTime::wrap`].
//!
//! [`WrapTime`]: struct.WrapTime.html
//! [`WrapTime::wrap`]: struct.WrapTime.html#method.wrap


use core::{
    fmt,
    ops::{
        Add,
        AddAssign,
        Mul,
        MulAssign,
        Sub,
        SubAssign,
    },
};

use byte::{
    check_len,
    TryRead,
    TryWrite,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::Error;


/// Duration of one tick in microseconds
pub const TIME_RES: f64 = 0.000015650040064103;

/// Number of ticks per microsecond
pub const TIME_RES_INV: f64 = 63897.6;

/// The value at which the 40-bit system time counter overflows, in ticks
pub const TIME_OVERFLOW: i64 = 0x100_0000_0000;

/// The maximum value of 40-bit system time stamps.
pub const TIME_MAX: i64 = TIME_OVERFLOW - 1;

/// Distance in meters a radio signal travels during one tick
pub const DISTANCE_OF_RADIO: f64 = 0.0046917639786159;

/// Number of ticks a radio signal needs to travel one meter
pub const DISTANCE_OF_RADIO_INV: f64 = 213.139451293;

/// Length of an encoded timestamp in bytes
pub const LEN_STAMP: usize = 5;

/// Factor for [`WrapTime::from_scaled`], if the value is in seconds
///
/// [`WrapTime::from_scaled`]: struct.WrapTime.html#method.from_scaled
pub const SECONDS: f64 = 1e6;

/// Factor for [`WrapTime::from_scaled`], if the value is in milliseconds
///
/// [`WrapTime::from_scaled`]: struct.WrapTime.html#method.from_scaled
pub const MILLISECONDS: f64 = 1e3;

/// Factor for [`WrapTime::from_scaled`], if the value is in microseconds
///
/// [`WrapTime::from_scaled`]: struct.WrapTime.html#method.from_scaled
pub const MICROSECONDS: f64 = 1.0;

/// Factor for [`WrapTime::from_scaled`], if the value is in nanoseconds
///
/// [`WrapTime::from_scaled`]: struct.WrapTime.html#method.from_scaled
pub const NANOSECONDS: f64 = 1e-3;


/// A DW1000 timestamp or time interval, in ticks
///
/// Can hold any `i64`, but values decoded from the DW1000 are always within
/// 0 <= `ticks` <= 2^40 - 1. Arithmetic never wraps at 40 bits on its own;
/// call [`WrapTime::wrap`] after subtracting timestamps.
///
/// [`WrapTime::wrap`]: #method.wrap
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WrapTime(i64);

impl WrapTime {
    /// A time value of zero ticks
    pub const ZERO: WrapTime = WrapTime(0);

    /// Creates a new instance of `WrapTime` from a raw tick count
    pub const fn new(ticks: i64) -> Self {
        WrapTime(ticks)
    }

    /// Decodes a timestamp as read from one of the DW1000's time registers
    ///
    /// The bytes are interpreted as a little-endian, 40-bit unsigned number.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use dw1000_time::WrapTime;
    ///
    /// let time = WrapTime::from_encoded([0x01, 0x02, 0x00, 0x00, 0x80]);
    /// assert_eq!(time.ticks(), 0x80_0000_0201);
    /// ```
    pub fn from_encoded(bytes: [u8; LEN_STAMP]) -> Self {
        let mut buffer = [0; 8];
        buffer[..LEN_STAMP].copy_from_slice(&bytes);

        WrapTime(i64::from_le_bytes(buffer))
    }

    /// Creates an instance of `WrapTime` from a number of microseconds
    ///
    /// Anything below the resolution of a tick is truncated toward zero.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use dw1000_time::WrapTime;
    ///
    /// assert_eq!(WrapTime::from_micros(1.0).ticks(), 63897);
    /// assert_eq!(WrapTime::from_micros(-1.0).ticks(), -63897);
    /// ```
    pub fn from_micros(time_us: f64) -> Self {
        WrapTime((time_us * TIME_RES_INV) as i64)
    }

    /// Creates an instance of `WrapTime` from a value in arbitrary units
    ///
    /// `factor_us` is the length of one unit of `value` in microseconds. See
    /// [`SECONDS`], [`MILLISECONDS`], [`MICROSECONDS`] and [`NANOSECONDS`].
    ///
    /// The product is reduced by [`TIME_OVERFLOW`] using a floating point
    /// remainder, which keeps the sign of the product. Note that the reduction
    /// happens in microseconds, before the conversion to ticks, so it only
    /// takes effect for products of more than 2^40 microseconds.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use dw1000_time::{
    ///     time::MILLISECONDS,
    ///     WrapTime,
    /// };
    ///
    /// let time = WrapTime::from_scaled(2, MILLISECONDS);
    /// assert_eq!(time.ticks(), WrapTime::from_micros(2000.0).ticks());
    /// ```
    ///
    /// [`SECONDS`]: constant.SECONDS.html
    /// [`MILLISECONDS`]: constant.MILLISECONDS.html
    /// [`MICROSECONDS`]: constant.MICROSECONDS.html
    /// [`NANOSECONDS`]: constant.NANOSECONDS.html
    /// [`TIME_OVERFLOW`]: constant.TIME_OVERFLOW.html
    pub fn from_scaled(value: i64, factor_us: f64) -> Self {
        let time_us = (value as f64 * factor_us) % TIME_OVERFLOW as f64;
        Self::from_micros(time_us)
    }

    /// Overwrites this value with another one
    pub fn assign(&mut self, other: WrapTime) -> &mut Self {
        self.0 = other.0;
        self
    }

    /// Returns the raw tick count
    ///
    /// No normalization is applied.
    pub fn ticks(&self) -> i64 {
        self.0
    }

    /// Encodes the timestamp in the format used by the DW1000's registers
    ///
    /// Only the lowest 40 bits are kept. Call [`WrapTime::wrap`] first, if the
    /// value could be negative.
    ///
    /// [`WrapTime::wrap`]: #method.wrap
    pub fn encode(&self) -> [u8; LEN_STAMP] {
        let mut bytes = [0; LEN_STAMP];
        bytes.copy_from_slice(&self.0.to_le_bytes()[..LEN_STAMP]);
        bytes
    }

    /// Returns the time in microseconds
    ///
    /// The tick count is reduced by [`TIME_OVERFLOW`] using a floating point
    /// remainder, so a negative tick count yields a negative result. Use
    /// [`WrapTime::wrap`] or [`WrapTime::normalized`] first, if that's not
    /// what you want.
    ///
    /// [`TIME_OVERFLOW`]: constant.TIME_OVERFLOW.html
    /// [`WrapTime::wrap`]: #method.wrap
    /// [`WrapTime::normalized`]: #method.normalized
    pub fn as_micros(&self) -> f64 {
        self.reduced() * TIME_RES
    }

    /// Returns the distance a radio signal travels during this time, in meters
    ///
    /// Reduces the tick count the same way [`WrapTime::as_micros`] does.
    ///
    /// [`WrapTime::as_micros`]: #method.as_micros
    pub fn as_meters(&self) -> f64 {
        self.reduced() * DISTANCE_OF_RADIO
    }

    /// Indicates whether the value is a valid DW1000 timestamp
    ///
    /// The upper bound is inclusive: a value of exactly [`TIME_OVERFLOW`] is
    /// still accepted, as it encodes to zero.
    ///
    /// [`TIME_OVERFLOW`]: constant.TIME_OVERFLOW.html
    pub fn is_valid(&self) -> bool {
        0 <= self.0 && self.0 <= TIME_OVERFLOW
    }

    /// Folds a negative value back into the 40-bit range
    ///
    /// Adds [`TIME_OVERFLOW`] once, if the tick count is negative. This undoes
    /// a single overflow, as it happens when subtracting an earlier timestamp
    /// from a later one across an overflow of the counter. Values that are
    /// larger than [`TIME_MAX`] are left alone.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use dw1000_time::{
    ///     time::TIME_MAX,
    ///     WrapTime,
    /// };
    ///
    /// let earlier = WrapTime::new(TIME_MAX - 50);
    /// let later   = WrapTime::new(49);
    ///
    /// let mut duration = later - earlier;
    /// assert_eq!(duration.wrap().ticks(), 100);
    /// ```
    ///
    /// [`TIME_OVERFLOW`]: constant.TIME_OVERFLOW.html
    /// [`TIME_MAX`]: constant.TIME_MAX.html
    pub fn wrap(&mut self) -> &mut Self {
        if self.0 < 0 {
            self.0 += TIME_OVERFLOW;
        }
        self
    }

    /// Returns the value reduced into 0 <= `ticks` <= [`TIME_MAX`]
    ///
    /// Unlike [`WrapTime::wrap`], this folds back any number of overflows, in
    /// either direction.
    ///
    /// [`TIME_MAX`]: constant.TIME_MAX.html
    /// [`WrapTime::wrap`]: #method.wrap
    pub fn normalized(self) -> Self {
        WrapTime(self.0.rem_euclid(TIME_OVERFLOW))
    }

    /// Multiplies the tick count by a factor, truncating toward zero
    pub fn scale(self, factor: f64) -> Self {
        WrapTime((self.0 as f64 * factor) as i64)
    }

    /// Adds another value in place
    ///
    /// Same as `+=`, but returns `self`, so it can be chained:
    ///
    /// ``` rust
    /// use dw1000_time::WrapTime;
    ///
    /// let mut time = WrapTime::new(10);
    /// time.increment_by(WrapTime::new(5)).scale_by(2.0);
    /// assert_eq!(time.ticks(), 30);
    /// ```
    pub fn increment_by(&mut self, other: WrapTime) -> &mut Self {
        self.0 = self.0.wrapping_add(other.0);
        self
    }

    /// Subtracts another value in place
    ///
    /// Same as `-=`, but returns `self`. The result may be negative; chain
    /// [`WrapTime::wrap`] to fold it back.
    ///
    /// [`WrapTime::wrap`]: #method.wrap
    pub fn decrement_by(&mut self, other: WrapTime) -> &mut Self {
        self.0 = self.0.wrapping_sub(other.0);
        self
    }

    /// Scales the tick count in place
    ///
    /// Same as `*=`, but returns `self`.
    pub fn scale_by(&mut self, factor: f64) -> &mut Self {
        *self = self.scale(factor);
        self
    }

    /// Multiplies the tick counts of two values
    ///
    /// The result is only meaningful if one of the operands is a plain number
    /// stored as ticks, not an actual time. To scale a time, use
    /// [`WrapTime::scale`] instead.
    ///
    /// [`WrapTime::scale`]: #method.scale
    pub fn multiply_tickwise(self, other: WrapTime) -> Self {
        WrapTime(self.0.wrapping_mul(other.0))
    }

    /// Divides the tick count by a factor
    ///
    /// This multiplies by `1 / factor`, so the result is truncated the same
    /// way [`WrapTime::scale`] truncates, after rounding errors from computing
    /// the reciprocal.
    ///
    /// Returns [`Error::NonFiniteFactor`], if `1 / factor` is not finite.
    ///
    /// # Example
    ///
    /// ``` rust
    /// use dw1000_time::{
    ///     Error,
    ///     WrapTime,
    /// };
    ///
    /// let time = WrapTime::new(1000);
    ///
    /// assert_eq!(time.divide(4.0), Ok(WrapTime::new(250)));
    /// assert_eq!(time.divide(0.0), Err(Error::NonFiniteFactor));
    /// ```
    ///
    /// [`WrapTime::scale`]: #method.scale
    /// [`Error::NonFiniteFactor`]: ../error/enum.Error.html#variant.NonFiniteFactor
    pub fn divide(self, factor: f64) -> Result<Self, Error> {
        let reciprocal = 1.0 / factor;
        if !reciprocal.is_finite() {
            return Err(Error::NonFiniteFactor);
        }

        Ok(self.scale(reciprocal))
    }

    /// Divides the tick counts of two values, truncating toward zero
    ///
    /// Returns [`Error::DivisionByZero`], if `other` is zero ticks.
    ///
    /// [`Error::DivisionByZero`]: ../error/enum.Error.html#variant.DivisionByZero
    pub fn divide_tickwise(self, other: WrapTime) -> Result<Self, Error> {
        if other.0 == 0 {
            return Err(Error::DivisionByZero);
        }

        Ok(WrapTime(self.0.wrapping_div(other.0)))
    }

    /// Writes the tick count as a decimal number, followed by a line break
    pub fn print<W>(&self, w: &mut W) -> fmt::Result
        where W: fmt::Write
    {
        writeln!(w, "{}", self)
    }

    fn reduced(&self) -> f64 {
        self.0 as f64 % TIME_OVERFLOW as f64
    }
}

impl Add<WrapTime> for WrapTime {
    type Output = WrapTime;

    fn add(mut self, rhs: WrapTime) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<WrapTime> for WrapTime {
    fn add_assign(&mut self, rhs: WrapTime) {
        self.increment_by(rhs);
    }
}

impl Sub<WrapTime> for WrapTime {
    type Output = WrapTime;

    fn sub(mut self, rhs: WrapTime) -> Self::Output {
        self -= rhs;
        self
    }
}

impl SubAssign<WrapTime> for WrapTime {
    fn sub_assign(&mut self, rhs: WrapTime) {
        self.decrement_by(rhs);
    }
}

impl Mul<f64> for WrapTime {
    type Output = WrapTime;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl MulAssign<f64> for WrapTime {
    fn mul_assign(&mut self, rhs: f64) {
        self.scale_by(rhs);
    }
}

impl fmt::Display for WrapTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'a> TryRead<'a> for WrapTime {
    fn try_read(bytes: &'a [u8], _: ()) -> byte::Result<(Self, usize)> {
        check_len(bytes, LEN_STAMP)?;

        let mut encoded = [0; LEN_STAMP];
        encoded.copy_from_slice(&bytes[..LEN_STAMP]);

        Ok((WrapTime::from_encoded(encoded), LEN_STAMP))
    }
}

impl TryWrite for WrapTime {
    fn try_write(self, bytes: &mut [u8], _: ()) -> byte::Result<usize> {
        check_len(bytes, LEN_STAMP)?;
        bytes[..LEN_STAMP].copy_from_slice(&self.encode());
        Ok(LEN_STAMP)
    }
}
