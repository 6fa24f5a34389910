//! Pad sample source trait and error type.

use snes_proto::{BusError, SnesBus, SnesButtons};

/// Error type for sampling the pad.
///
/// Carries which line failed but not the HAL error itself, so that the
/// main cycle does not have to be generic over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// Latch line could not be driven.
    Latch,
    /// Clock line could not be driven.
    Clock,
    /// Data line could not be read.
    Data,
}

impl<E> From<BusError<E>> for SampleError {
    fn from(err: BusError<E>) -> Self {
        match err {
            BusError::Latch(_) => SampleError::Latch,
            BusError::Clock(_) => SampleError::Clock,
            BusError::Data(_) => SampleError::Data,
        }
    }
}

/// Blocking source of pad samples.
///
/// One call performs one full bus read. Implementations busy-wait; the
/// main cycle calls this from thread mode where that is acceptable.
pub trait SampleSource {
    /// Read the current button state.
    fn sample(&mut self) -> Result<SnesButtons, SampleError>;
}

impl<LATCH, CLOCK, DATA, D, E> SampleSource for SnesBus<LATCH, CLOCK, DATA, D>
where
    LATCH: embedded_hal::digital::OutputPin<Error = E>,
    CLOCK: embedded_hal::digital::OutputPin<Error = E>,
    DATA: embedded_hal::digital::InputPin<Error = E>,
    D: embedded_hal::delay::DelayNs,
{
    fn sample(&mut self) -> Result<SnesButtons, SampleError> {
        Ok(self.read()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_error_conversion() {
        assert_eq!(SampleError::from(BusError::Latch(())), SampleError::Latch);
        assert_eq!(SampleError::from(BusError::Clock(7u8)), SampleError::Clock);
        assert_eq!(SampleError::from(BusError::Data("io")), SampleError::Data);
    }
}
