//! Spreadsheet-style column labels (A, B, ..., Z, AA, AB, ...)
//!
//! Labels use bijective base-26: there is no zero digit, so the single
//! letter labels run A..Z before the two letter labels start at AA.

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Label for the zero-based column `n`
pub fn column_label(n: usize) -> String {
    let mut digits = Vec::new();
    // Work in i128 so `n / 26 - 1` can go negative for any usize.
    let mut n = n as i128;

    while n >= 0 {
        digits.push(LETTERS[(n % 26) as usize]);
        n = n / 26 - 1;
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Zero-based column index for a label, the inverse of [`column_label`]
///
/// Returns `None` for an empty label, anything outside `A-Z`, or a label
/// whose index does not fit in `usize`.
pub fn column_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }

    let mut value: usize = 0;
    for b in label.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        let digit = (b - b'A') as usize + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }

    Some(value - 1)
}

/// Synthesized labels for columns `0..width`
pub fn synthesized_labels(width: usize) -> Vec<String> {
    (0..width).map(column_label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(1), "B");
        assert_eq!(column_label(25), "Z");
    }

    #[test]
    fn test_multi_letters() {
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(27), "AB");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("Z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("ZZ"), Some(701));
        assert_eq!(column_index("AAA"), Some(702));
    }

    #[test]
    fn test_column_index_rejects_invalid() {
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("a"), None);
        assert_eq!(column_index("A1"), None);
        assert_eq!(column_index("ÄB"), None);
    }

    #[test]
    fn test_label_index_roundtrip() {
        for n in (0..20_000).chain([usize::MAX / 1024, 1 << 40]) {
            let label = column_label(n);
            assert_eq!(column_index(&label), Some(n), "label {}", label);
            assert_eq!(column_label(column_index(&label).unwrap()), label);
        }
    }

    #[test]
    fn test_label_for_max_is_total() {
        let label = column_label(usize::MAX);
        assert!(!label.is_empty());
        assert!(label.bytes().all(|b| b.is_ascii_uppercase()));
    }

    #[test]
    fn test_synthesized_labels() {
        assert_eq!(synthesized_labels(3), vec!["A", "B", "C"]);
        assert!(synthesized_labels(0).is_empty());
    }
}
