use loan_guidance_core::analysis::LoanAdvisor;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; read-only for the life of the process
    pub advisor: Arc<LoanAdvisor>,

    /// Application start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(advisor: LoanAdvisor) -> Self {
        Self {
            advisor: Arc::new(advisor),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
