use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use once_cell::sync::Lazy;
use chrono::Local;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Initialize logging to a file
pub fn init() -> std::io::Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lazypick")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join(format!("lazypick_{}.log", timestamp));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    *LOG_FILE.lock().unwrap() = Some(file);

    log("=== lazypick started ===");

    Ok(log_path)
}

/// Log a message with timestamp
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Log a page fetch being dispatched
pub fn log_fetch(scope: &str, page: u32) {
    log(&format!("--> fetch {} page {}", scope, page));
}

/// Log a stale response being discarded.
///
/// Discards are normal operation (scope changed or pages reordered) and are
/// never surfaced to the user; this line is the only place they are visible.
pub fn log_stale_discard(scope: &str, page: u32, reason: &str) {
    log(&format!("[STALE] discarded {} page {} ({})", scope, page, reason));
}

/// Log an empty page that still claims more pages remain
pub fn log_empty_page_anomaly(scope: &str, page: u32, total_pages: u32) {
    log(&format!(
        "[ANOMALY] {} page {} returned no items but reports {} total pages",
        scope, page, total_pages
    ));
}
