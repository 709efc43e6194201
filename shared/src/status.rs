/// How often the client re-checks `/health`.
pub const HEALTH_POLL_INTERVAL_MS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Up,
    Down,
}

/// `Some(status)` when a response arrived, `None` when the request itself failed.
pub fn probe_is_up(response_status: Option<u16>) -> bool {
    matches!(response_status, Some(status) if (200..300).contains(&status))
}

/// Liveness state behind the server-down banner.
#[derive(Debug, Clone, Default)]
pub struct StatusMonitor {
    status: ServerStatus,
    consecutive_failures: u32,
}

impl StatusMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    pub fn banner_visible(&self) -> bool {
        self.status == ServerStatus::Down
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Fold one probe result in. Returns the new status if it changed.
    pub fn record(&mut self, response_status: Option<u16>) -> Option<ServerStatus> {
        let next = if probe_is_up(response_status) {
            self.consecutive_failures = 0;
            ServerStatus::Up
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            ServerStatus::Down
        };

        if next == self.status {
            return None;
        }
        self.status = next;
        Some(next)
    }
}
