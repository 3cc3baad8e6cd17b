/// Default number of trailing bytes searched for the local file header.
pub const DEFAULT_SEARCH_WINDOW: usize = 1024;

/// What to do when a central directory record is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptionPolicy {
    /// Drop every name and report the archive as corrupt.
    #[default]
    Abort,
    /// Keep the names read before the corrupt record.
    KeepPartial,
}

#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Trailing bytes searched for the local file header. 0 searches the whole buffer.
    pub search_window: usize,

    /// Handling of truncated records. Default: abort.
    pub corruption: CorruptionPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            search_window: DEFAULT_SEARCH_WINDOW,
            corruption: CorruptionPolicy::Abort,
        }
    }
}
