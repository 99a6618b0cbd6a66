/// Highlighted row over the current result snapshot.
///
/// Keyboard and pointer share the one index. Replacing the list resets it to
/// the first row; it never tries to follow a row across lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    /// Start over on a new list of `len` rows
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    /// Current row, `None` while the list is empty
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move down, wrapping from the last row to the first
    pub fn select_next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = (self.index + 1) % self.len;
        Some(self.index)
    }

    /// Move up, wrapping from the first row to the last
    pub fn select_previous(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.index = (self.index + self.len - 1) % self.len;
        Some(self.index)
    }

    /// Jump to `index`. Returns false (and keeps the current row) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        true
    }
}
