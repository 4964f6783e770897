use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Capture flow counters
#[derive(Clone, Debug, Default)]
pub struct CaptureStatus {
    pub last_capture_time: Option<SystemTime>,
    pub capture_count: u64,
    pub saved_count: u64,
    pub skipped_count: u64,
    pub ignored_count: u64,
    pub error_count: u64,
    pub current_message: String,
}

impl CaptureStatus {
    pub fn summary(&self) -> String {
        format!(
            "{} captured, {} saved, {} skipped, {} ignored, {} errors",
            self.capture_count,
            self.saved_count,
            self.skipped_count,
            self.ignored_count,
            self.error_count
        )
    }
}

/// Application status
pub struct AppStatus {
    pub capture: Arc<RwLock<CaptureStatus>>,
}

impl AppStatus {
    pub fn new() -> Self {
        Self {
            capture: Arc::new(RwLock::new(CaptureStatus::default())),
        }
    }
}

impl Default for AppStatus {
    fn default() -> Self {
        Self::new()
    }
}
