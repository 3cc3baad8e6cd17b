//! Signature search over raw bytes.
//!
//! A plain left-to-right scan: host files handled here are small enough that
//! the O(H·N) worst case does not matter.

use tracing::debug;

/// Find the lowest offset at which `needle` occurs in `haystack`.
///
/// Returns `None` when the needle is absent, empty, or longer than the
/// haystack. Never reads outside `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Find `needle` within the last `window` bytes of `haystack`.
///
/// The returned offset is relative to the start of `haystack`. A `window` of
/// zero searches the whole buffer.
pub fn find_in_tail(haystack: &[u8], needle: &[u8], window: usize) -> Option<usize> {
    let start = if window == 0 {
        0
    } else {
        haystack.len().saturating_sub(window)
    };

    let found = find(&haystack[start..], needle).map(|i| start + i);
    debug!(window_start = start, ?found, "tail signature search");
    found
}
