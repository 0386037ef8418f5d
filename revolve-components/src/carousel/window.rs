//! Which slots are worth painting.

use std::ops::Range;

/// Slots within `beyond + 1` of `index`, clamped to a sequence of `len`
/// slots.
///
/// The focused slot and its direct neighbours are always included so a drag
/// in either direction reveals something painted.
///
/// ```
/// use revolve_components::carousel::render_window;
///
/// assert_eq!(render_window(7, 15, 0), 6..9);
/// assert_eq!(render_window(0, 15, 1), 0..3);
/// assert_eq!(render_window(14, 15, 1), 12..15);
/// ```
pub fn render_window(index: usize, len: usize, beyond: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let index = index.min(len - 1);
    let extra = beyond.saturating_add(1);
    let start = index.saturating_sub(extra);
    let end = index.saturating_add(extra).saturating_add(1).min(len);
    start..end
}
