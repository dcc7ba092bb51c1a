mod password;

pub use password::*;

pub(crate) fn is_jpeg_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}

/// Name under which an unveiled file is stored when the hidden name is unusable
pub const FALLBACK_FILE_NAME: &str = "unveiled.bin";
