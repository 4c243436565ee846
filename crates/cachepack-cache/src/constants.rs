//! Transfer tuning constants shared with the upload/download layer.

use std::time::Duration;

/// Default number of retry attempts.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

/// Default delay between retry attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(5000);

/// Socket idle timeout during download. A download that receives no traffic
/// for this long is aborted.
pub const SOCKET_TIMEOUT: Duration = Duration::from_millis(5000);
