//! Contains utility functions that are useful when working with `WrapTime`

use core::fmt;

use embedded_hal::serial;
use nb::block;

use crate::WrapTime;


/// Writes a time value to a serial port, for debugging
///
/// Writes the tick count as a decimal number, followed by a line break, then
/// flushes the port. Blocks until all bytes have been written.
pub fn print_serial<S>(serial: &mut S, time: WrapTime) -> Result<(), S::Error>
    where S: serial::Write<u8>
{
    let mut writer = SerialWriter {
        serial,
        error: None,
    };

    if time.print(&mut writer).is_err() {
        // `SerialWriter` only fails if the serial port does.
        if let Some(error) = writer.error {
            return Err(error);
        }
    }

    block!(writer.serial.flush())
}


struct SerialWriter<'s, S>
    where S: serial::Write<u8>
{
    serial: &'s mut S,
    error:  Option<S::Error>,
}

impl<S> fmt::Write for SerialWriter<'_, S>
    where S: serial::Write<u8>
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            if let Err(error) = block!(self.serial.write(b)) {
                self.error = Some(error);
                return Err(fmt::Error);
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use heapless::Vec;

    use super::*;
    use crate::time::TIME_MAX;

    #[derive(Default)]
    struct MockSerial {
        written: Vec<u8, 32>,
        flushed: bool,
        fail_after: Option<usize>,
    }

    #[derive(Debug, PartialEq)]
    struct MockError;

    impl serial::Write<u8> for MockSerial {
        type Error = MockError;

        fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
            if self.fail_after == Some(self.written.len()) {
                return Err(nb::Error::Other(MockError));
            }

            self.written.push(word).map_err(|_| nb::Error::Other(MockError))
        }

        fn flush(&mut self) -> nb::Result<(), Self::Error> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn print_zero() {
        let mut serial = MockSerial::default();
        print_serial(&mut serial, WrapTime::ZERO).unwrap();

        assert_eq!(&serial.written[..], b"0\n");
        assert!(serial.flushed);
    }

    #[test]
    fn print_max() {
        let mut serial = MockSerial::default();
        print_serial(&mut serial, WrapTime::new(TIME_MAX)).unwrap();

        assert_eq!(&serial.written[..], b"1099511627775\n");
    }

    #[test]
    fn print_reports_serial_error() {
        let mut serial = MockSerial {
            fail_after: Some(2),
            ..MockSerial::default()
        };

        let result = print_serial(&mut serial, WrapTime::new(12345));

        assert_eq!(result, Err(MockError));
        assert_eq!(&serial.written[..], b"12");
        assert!(!serial.flushed);
    }
}
