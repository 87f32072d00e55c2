use std::time::Duration;

pub fn attempt_started(destination: &str, attempt: u32, max: u32) -> String {
    format!("[{destination}] Sending (attempt {attempt}/{max})")
}

pub fn rate_limited(destination: &str, attempt: u32, max: u32, wait: Duration) -> String {
    format!(
        "[{destination}] Rate limited (attempt {attempt}/{max}). Retrying in {:.2}s...",
        wait.as_secs_f64()
    )
}

pub fn delivered(destination: &str, status: u16) -> String {
    format!("[{destination}] Delivered (HTTP {status})")
}

pub fn delivered_after_retry(destination: &str, attempts: u32, status: u16) -> String {
    format!("[{destination}] Delivered on attempt {attempts} (HTTP {status})")
}

pub fn budget_exhausted(destination: &str, attempts: u32) -> String {
    format!("[{destination}] Still rate limited after {attempts} attempts, giving up")
}

pub fn send_failed(destination: &str, err: &dyn std::fmt::Display) -> String {
    format!("[{destination}] Send failed: {err}")
}

pub fn config_loaded(path: &str, destinations: usize) -> String {
    format!("Loaded configuration from {path} ({destinations} destination(s))")
}

pub const STARTING: &str = "Starting Courier...";
pub const CANCELLED: &str = "Interrupted, abandoning delivery";
