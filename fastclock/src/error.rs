// Licensed under the Apache-2.0 license

use thiserror_no_std::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    #[error("the process-wide clock is already initialized")]
    AlreadyInitialized,
}
