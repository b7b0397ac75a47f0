//! Constants for the fetch module (timeouts, retry defaults).

/// Default HTTP connect timeout (60 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 60;

/// Default total request timeout (2 minutes, covers PDF bodies).
pub const TOTAL_TIMEOUT_SECS: u64 = 120;

/// Default maximum attempts per unit of work (including the first).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff range for PDF and paper detail fetches, in whole seconds.
pub const FILE_BACKOFF_SECS: (u64, u64) = (5, 15);

/// Backoff range for year index fetches, in whole seconds.
pub const YEAR_BACKOFF_SECS: (u64, u64) = (10, 30);
