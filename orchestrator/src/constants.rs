//! Application-wide constants for the restart cycle timings and HTTP limits

use std::time::Duration;

/// Countdown sequence constants
pub mod countdown {
    use super::Duration;

    /// How far ahead of the trigger instant the warning sequence begins
    pub const LEAD_WINDOW: Duration = Duration::from_secs(30 * 60);

    /// Ordered warning milestones: lead-time label and the wait that follows
    /// its dispatch. The waits must sum to [`LEAD_WINDOW`] so the final
    /// warning lands on the trigger instant.
    pub const MILESTONES: [(&str, Duration); 4] = [
        ("30 minutes", Duration::from_secs(900)),
        ("15 minutes", Duration::from_secs(600)),
        ("5 minutes", Duration::from_secs(240)),
        ("1 minute", Duration::from_secs(60)),
    ];
}

/// Recovery polling constants
pub mod polling {
    /// Default interval between status queries after a restart
    pub const DEFAULT_STATUS_POLL_INTERVAL_SECONDS: u64 = 30;
}

/// HTTP client constants
pub mod http {
    use super::Duration;

    /// Timeout for panel and broadcast requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}
