// Tracks which of a set of indexed items (nodes, by their table index)
// have been seen, each one counted once however often it is marked.
pub struct MarkList {
    pub marked: Vec<bool>, // Marker per item, 0 to len-1
    pub list: Vec<usize>,  // Items in the order they were first marked
}

impl MarkList {
    pub fn new(len: usize) -> MarkList {
        MarkList {
            marked: vec![false; len],
            list: Vec::new(),
        }
    }

    /// Returns true if `n` was not marked before.
    pub fn mark(&mut self, n: usize) -> bool {
        if self.marked[n] {
            return false;
        }
        self.marked[n] = true;
        self.list.push(n);
        true
    }

    pub fn is_marked(&self, n: usize) -> bool {
        self.marked[n]
    }

    pub fn num_marked(&self) -> usize {
        self.list.len()
    }
}
