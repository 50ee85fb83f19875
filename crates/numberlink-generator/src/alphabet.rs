/// Characters used to label flows, in order.
pub const LABELS: [char; 62] = {
    const BYTES: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    let mut labels = ['\0'; 62];
    let mut i = 0;
    while i < labels.len() {
        labels[i] = BYTES[i] as char;
        i += 1;
    }
    labels
};

/// Returns the label of the flow with the given index.
///
/// # Examples
///
/// ```
/// use numberlink_generator::label;
///
/// assert_eq!(label(0), Some('0'));
/// assert_eq!(label(10), Some('A'));
/// assert_eq!(label(61), Some('z'));
/// assert_eq!(label(62), None);
/// ```
#[must_use]
pub fn label(index: usize) -> Option<char> {
    LABELS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_distinct_and_printable() {
        let mut sorted = LABELS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), LABELS.len());
        assert!(LABELS.iter().all(char::is_ascii_alphanumeric));
        assert!(!LABELS.contains(&numberlink_core::EMPTY_CHAR));
    }
}
