//! Step-through navigation over search matches.

/// Matching instruction indices plus the currently selected one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCursor {
    matches: Vec<usize>,
    position: usize,
}

impl SearchCursor {
    pub fn new(matches: Vec<usize>) -> Self {
        Self {
            matches,
            position: 0,
        }
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Zero-based position among the matches
    pub fn position(&self) -> usize {
        self.position
    }

    /// Instruction index of the selected match
    pub fn current(&self) -> Option<usize> {
        self.matches.get(self.position).copied()
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.matches.len()
    }

    pub fn has_prev(&self) -> bool {
        self.position > 0
    }

    /// Select the next match, staying on the last one at the end
    pub fn next(&mut self) -> Option<usize> {
        if self.has_next() {
            self.position += 1;
        }
        self.current()
    }

    /// Select the previous match, staying on the first one at the start
    pub fn prev(&mut self) -> Option<usize> {
        if self.has_prev() {
            self.position -= 1;
        }
        self.current()
    }

    /// Select the `nth` match, clamped to the available range
    pub fn seek(&mut self, nth: usize) -> Option<usize> {
        self.position = nth.min(self.matches.len().saturating_sub(1));
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut cursor = SearchCursor::new(vec![2, 5, 9]);
        assert_eq!(cursor.current(), Some(2));
        assert!(!cursor.has_prev());
        assert_eq!(cursor.prev(), Some(2));

        assert_eq!(cursor.next(), Some(5));
        assert_eq!(cursor.next(), Some(9));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Some(9));

        assert_eq!(cursor.seek(100), Some(9));
        assert_eq!(cursor.seek(0), Some(2));
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor = SearchCursor::default();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.seek(3), None);
        assert!(!cursor.has_next());
        assert!(!cursor.has_prev());
    }
}
