//! Item-string parsing for the list box.
//!
//! Items are stored as a single `'|'`-separated string, e.g.
//! `"Red|Blue|Green"`. Empty items are allowed (`"a||b"` has three items);
//! an empty string has none.

/// Separator between items
pub const ITEM_SEPARATOR: char = '|';

/// Number of items in `items`: zero for a missing or empty string, otherwise
/// one more than the number of separators.
pub fn item_count(items: Option<&str>) -> i16 {
    match items {
        None | Some("") => 0,
        Some(text) => {
            let count = 1 + text.matches(ITEM_SEPARATOR).count();
            count.min(i16::MAX as usize) as i16
        }
    }
}

/// Borrow item `index` out of `items`.
///
/// Returns `None` for a negative index, an empty string or an index past
/// the last item.
pub fn item(items: &str, index: i16) -> Option<&str> {
    if index < 0 || items.is_empty() {
        return None;
    }
    items.split(ITEM_SEPARATOR).nth(index as usize)
}

/// Copy item `index` into `out` as a NUL-terminated byte string.
///
/// At most `out.len() - 1` bytes of the item are copied (cut back to a
/// character boundary) and a terminator is always written, so the buffer is
/// never overrun. Returns `false` when the item does not exist or `out` has
/// no room for the terminator.
pub fn get_item(items: Option<&str>, index: i16, out: &mut [u8]) -> bool {
    let Some(text) = items.and_then(|items| item(items, index)) else {
        return false;
    };
    let Some(room) = out.len().checked_sub(1) else {
        return false;
    };

    let mut len = text.len().min(room);
    while !text.is_char_boundary(len) {
        len -= 1;
    }
    out[..len].copy_from_slice(&text.as_bytes()[..len]);
    out[len] = 0;
    true
}

/// Text of a NUL-terminated buffer filled by [`get_item`].
pub fn item_str(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    core::str::from_utf8(&buf[..end]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &str = "Red|Blue|Green";

    #[test]
    fn test_item_count() {
        assert_eq!(item_count(Some(COLORS)), 3);
        assert_eq!(item_count(Some("Solo")), 1);
        assert_eq!(item_count(Some("a||b")), 3);
        assert_eq!(item_count(Some("")), 0);
        assert_eq!(item_count(None), 0);
    }

    #[test]
    fn test_get_item_each_index() {
        let mut buf = [0u8; 16];
        assert!(get_item(Some(COLORS), 0, &mut buf));
        assert_eq!(item_str(&buf), "Red");
        assert!(get_item(Some(COLORS), 1, &mut buf));
        assert_eq!(item_str(&buf), "Blue");
        assert!(get_item(Some(COLORS), 2, &mut buf));
        assert_eq!(item_str(&buf), "Green");
    }

    #[test]
    fn test_get_item_not_found() {
        let mut buf = [0u8; 16];
        assert!(!get_item(Some(COLORS), 3, &mut buf));
        assert!(!get_item(Some(COLORS), -1, &mut buf));
        assert!(!get_item(Some(""), 0, &mut buf));
        assert!(!get_item(None, 0, &mut buf));
    }

    #[test]
    fn test_get_item_bounded_copy() {
        let mut buf = [0xAAu8; 8];
        assert!(get_item(Some("Red|Chartreuse"), 1, &mut buf[..5]));
        assert_eq!(&buf[..5], b"Char\0");
        // Bytes past the slice handed in are untouched
        assert_eq!(&buf[5..], &[0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn test_get_item_cuts_at_char_boundary() {
        let mut buf = [0u8; 3];
        assert!(get_item(Some("aé"), 0, &mut buf));
        assert_eq!(item_str(&buf), "a");
    }

    #[test]
    fn test_get_item_zero_length_buffer() {
        let mut buf: [u8; 0] = [];
        assert!(!get_item(Some(COLORS), 0, &mut buf));
    }

    #[test]
    fn test_empty_items_between_separators() {
        assert_eq!(item("a||b", 1), Some(""));
        assert_eq!(item("a|", 1), Some(""));
        assert_eq!(item("a|", 2), None);
    }
}
