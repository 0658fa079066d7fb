//! Codec settings shared by every format.

use winlz_aplib::DEFAULT_WINDOW;
use winlz_xpress::XpressLevel;

use crate::format::Backend;

/// Settings applied when building a codec for a [`Format`](crate::Format).
///
/// Fields that do not apply to the chosen format are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Implementation to use.
    pub backend: Backend,
    /// XPRESS match-finder effort.
    pub level: XpressLevel,
    /// aPLib match window in bytes.
    pub window: usize,
}

impl CodecConfig {
    /// Pure Rust backend, default level and window.
    pub const DEFAULT: Self = Self {
        backend: Backend::Rust,
        level: XpressLevel::DEFAULT,
        window: DEFAULT_WINDOW,
    };

    /// Default settings on `backend`.
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            ..Self::DEFAULT
        }
    }

    /// Set the XPRESS level.
    pub fn with_level(mut self, level: XpressLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the aPLib window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.backend, Backend::Rust);
        assert_eq!(config.level, XpressLevel::DEFAULT);
        assert_eq!(config.window, 8192);
    }

    #[test]
    fn test_builders() {
        let config = CodecConfig::new(Backend::Native)
            .with_level(XpressLevel::MIN)
            .with_window(1024);
        assert_eq!(config.backend, Backend::Native);
        assert_eq!(config.level.level(), 1);
        assert_eq!(config.window, 1024);
    }
}
