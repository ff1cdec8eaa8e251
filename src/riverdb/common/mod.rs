mod errors;
mod bytes;
mod coarse_clock;
mod math;

pub use self::errors::{Error, ErrorKind, ErrorSeverity, Result};
pub use self::bytes::{bytes_to_slice_mut, unsplit_bytes};
pub use self::coarse_clock::{coarse_monotonic_now, coarse_monotonic_clock_updater};
pub use self::math::fast_modulo32;