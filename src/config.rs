//! Construction-time settings for [`RingBuffer`](crate::RingBuffer).

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Whether bulk transfers move the cursors themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CursorMode {
    /// `write_from` and `read_into` advance their cursor after copying.
    #[default]
    Auto,
    /// `write_from` and `read_into` only copy. The caller publishes the
    /// data with [`advance_write`](crate::RingBuffer::advance_write) and
    /// releases it with [`advance_read`](crate::RingBuffer::advance_read).
    Manual,
}

/// Settings for a new ring buffer.
///
/// # Examples
/// ```
/// # use cyclic_buffer::{Config, CursorMode, RingBuffer};
/// let buf = RingBuffer::<u8>::with_config(
///     Config::new().capacity(64).cursor_mode(CursorMode::Manual),
/// );
/// assert_eq!(buf.capacity(), 64);
/// assert_eq!(buf.cursor_mode(), CursorMode::Manual);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Number of slots to allocate. One slot is always kept free, so at
    /// most `capacity - 1` items are stored at once.
    pub capacity: usize,
    pub cursor_mode: CursorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            cursor_mode: CursorMode::Auto,
        }
    }

    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub const fn cursor_mode(mut self, cursor_mode: CursorMode) -> Self {
        self.cursor_mode = cursor_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.cursor_mode, CursorMode::Auto);
        assert_eq!(Config::new(), config);
    }

    #[test]
    fn test_const_builder() {
        const SMALL: Config = Config::new().capacity(8).cursor_mode(CursorMode::Manual);
        assert_eq!(SMALL.capacity, 8);
        assert_eq!(SMALL.cursor_mode, CursorMode::Manual);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"cursor_mode":"manual"}"#).unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.cursor_mode, CursorMode::Manual);

        let config: Config = serde_json::from_str(r#"{"capacity":16}"#).unwrap();
        assert_eq!(config, Config::new().capacity(16));
    }
}
