//! Environment-driven configuration.

use std::path::PathBuf;

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the listener on.
    pub host: String,
    /// Port to bind; 0 asks the OS for an ephemeral port.
    pub port: u16,
    /// Root directory for the static front-end.
    pub static_dir: PathBuf,
}

impl Config {
    /// Build a configuration from environment variables.
    ///
    /// - `HOST` - bind address (default `0.0.0.0`)
    /// - `PORT` - listen port; unset or invalid falls back to an
    ///   OS-assigned ephemeral port
    /// - `STATIC_DIR` - front-end root (default `public`)
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: resolve_port(std::env::var("PORT").ok().as_deref()),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
        }
    }
}

/// Parse the configured port, falling back to 0 (ephemeral) when the value
/// is unset, non-numeric, or out of range.
fn resolve_port(value: Option<&str>) -> u16 {
    match value.and_then(|v| v.parse::<u16>().ok()) {
        Some(p) if p > 0 => p,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_port_is_used() {
        assert_eq!(resolve_port(Some("8080")), 8080);
    }

    #[test]
    fn missing_or_invalid_port_falls_back_to_ephemeral() {
        assert_eq!(resolve_port(None), 0);
        assert_eq!(resolve_port(Some("")), 0);
        assert_eq!(resolve_port(Some("notaport")), 0);
        assert_eq!(resolve_port(Some("70000")), 0);
        assert_eq!(resolve_port(Some("-1")), 0);
    }
}
