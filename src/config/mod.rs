use std::env;

/// Runtime configuration for the conversion service
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Maximum upload size in bytes (default: 256 MB)
    pub max_file_size: usize,

    /// Number of Unicode characters shown in the preview (default: 1000)
    pub preview_chars: usize,

    /// Upper bound for a single conversion in seconds (default: 120)
    pub convert_timeout_secs: u64,

    /// Converter type: "extract" or "fixed" (default: "extract")
    pub converter_type: String,

    /// Listen address (default: "127.0.0.1:3000")
    pub bind_addr: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_file_size: 256 * 1024 * 1024, // 256 MB
            preview_chars: 1000,
            convert_timeout_secs: 120,
            converter_type: "extract".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            preview_chars: env::var("PREVIEW_CHARS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.preview_chars),

            convert_timeout_secs: env::var("CONVERT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.convert_timeout_secs),

            converter_type: env::var("CONVERTER_TYPE").unwrap_or(default.converter_type),

            bind_addr: env::var("BIND_ADDR").unwrap_or(default.bind_addr),
        }
    }

    /// Create config for development and tests (small uploads, short timeout)
    pub fn development() -> Self {
        Self {
            max_file_size: 16 * 1024 * 1024,
            preview_chars: 1000,
            convert_timeout_secs: 30,
            converter_type: "extract".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}
