pub mod config;
pub mod common;
pub mod pg;
pub mod server;

pub use self::common::{Error, ErrorKind, ErrorSeverity, Result};
pub use self::common::coarse_monotonic_now;
