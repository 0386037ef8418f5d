//! Index arithmetic for buttons, pagination dots and keys.

use revolve_ui::NavigationKey;

/// A navigation request from buttons, dots or keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// One item toward the end.
    Forward,
    /// One item toward the start.
    Backward,
    /// The nearest copy of a source item.
    GoTo(usize),
}

impl Navigation {
    /// Maps a key press to a navigation request over `n` items.
    pub fn from_key(key: NavigationKey, n: usize) -> Option<Self> {
        if n == 0 {
            return None;
        }
        Some(match key {
            NavigationKey::ArrowRight => Self::Forward,
            NavigationKey::ArrowLeft => Self::Backward,
            NavigationKey::Home => Self::GoTo(0),
            NavigationKey::End => Self::GoTo(n - 1),
        })
    }
}

/// Which source item `index` shows.
pub fn indicator_index(index: usize, n: usize) -> Option<usize> {
    (n > 0).then(|| index % n)
}

/// The slot showing `source` that is closest to `index`.
///
/// Equal distances resolve toward the end. Returns `None` when `source` is
/// not a valid item.
///
/// ```
/// use revolve_components::carousel::nearest_copy;
///
/// // From slot 12 of a 5-item carousel, source 4 lives at 9 and 14.
/// assert_eq!(nearest_copy(12, 4, 5), Some(14));
/// assert_eq!(nearest_copy(7, 1, 5), Some(6));
/// ```
pub fn nearest_copy(index: usize, source: usize, n: usize) -> Option<usize> {
    if source >= n {
        return None;
    }
    let forward = (source + n - index % n) % n;
    let backward = (n - forward) % n;

    if forward <= backward {
        return Some(index + forward);
    }
    Some(index.checked_sub(backward).unwrap_or(index + forward))
}

/// State of one pagination dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorDot {
    /// The source item this dot jumps to.
    pub source_index: usize,
    /// Whether this dot's item is focused.
    pub active: bool,
    /// Accessible label.
    pub label: String,
}

/// One dot per source item, with the focused one marked active.
pub fn indicators(index: usize, n: usize) -> Vec<IndicatorDot> {
    let active = indicator_index(index, n);
    (0..n)
        .map(|source_index| IndicatorDot {
            source_index,
            active: Some(source_index) == active,
            label: format!("Go to item {} of {n}", source_index + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_is_index_mod_n() {
        assert_eq!(indicator_index(9, 5), Some(4));
        assert_eq!(indicator_index(10, 5), Some(0));
        assert_eq!(indicator_index(5, 5), Some(0));
        assert_eq!(indicator_index(3, 0), None);
    }

    #[test]
    fn nearest_copy_takes_the_short_way() {
        // The far copies are never chosen.
        assert_eq!(nearest_copy(12, 4, 5), Some(14));
        assert_eq!(nearest_copy(12, 0, 5), Some(10));
        assert_eq!(nearest_copy(5, 4, 5), Some(4));
        assert_eq!(nearest_copy(9, 0, 5), Some(10));
        assert_eq!(nearest_copy(7, 2, 5), Some(7));
    }

    #[test]
    fn nearest_copy_ties_go_forward() {
        assert_eq!(nearest_copy(4, 2, 4), Some(6));
        assert_eq!(nearest_copy(5, 1, 2), Some(5));
        assert_eq!(nearest_copy(4, 1, 2), Some(5));
    }

    #[test]
    fn nearest_copy_never_underflows() {
        assert_eq!(nearest_copy(0, 4, 5), Some(4));
        assert_eq!(nearest_copy(1, 4, 5), Some(4));
    }

    #[test]
    fn nearest_copy_rejects_unknown_source() {
        assert_eq!(nearest_copy(5, 5, 5), None);
        assert_eq!(nearest_copy(0, 0, 0), None);
    }

    #[test]
    fn dots_mark_the_focused_item() {
        let dots = indicators(7, 3);
        assert_eq!(dots.len(), 3);
        assert_eq!(
            dots.iter().filter(|dot| dot.active).map(|dot| dot.source_index).collect::<Vec<_>>(),
            vec![1]
        );
        assert_eq!(dots[2].label, "Go to item 3 of 3");
        assert!(indicators(0, 0).is_empty());
    }

    #[test]
    fn keys_map_to_navigation() {
        assert_eq!(Navigation::from_key(NavigationKey::ArrowRight, 5), Some(Navigation::Forward));
        assert_eq!(Navigation::from_key(NavigationKey::ArrowLeft, 5), Some(Navigation::Backward));
        assert_eq!(Navigation::from_key(NavigationKey::Home, 5), Some(Navigation::GoTo(0)));
        assert_eq!(Navigation::from_key(NavigationKey::End, 5), Some(Navigation::GoTo(4)));
        assert_eq!(Navigation::from_key(NavigationKey::End, 0), None);
    }
}
