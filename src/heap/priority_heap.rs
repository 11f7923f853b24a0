//! PriorityHeap implementation

use crate::heap::comparator::Comparator;
use crate::heap::error::{HeapError, HeapResult};
use std::cmp::Ordering;
use std::fmt;

/// Logical capacity of a freshly created heap
pub const INITIAL_CAPACITY: usize = 10;

/// Binary max-heap over a growable array
///
/// The element ranked highest by `C` sits at the root. `offer` sifts new
/// elements up from the end of the array; `poll` moves the last element to the
/// root and sifts it down.
pub struct PriorityHeap<T, C> {
    data: Vec<T>,
    capacity: usize,
    comparator: C,
}

impl<T, C: Comparator<T>> PriorityHeap<T, C> {
    pub fn new(comparator: C) -> Self {
        Self {
            data: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            comparator,
        }
    }

    /// Number of elements currently stored
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current logical capacity (10, 20, 40, ...)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Insert an element
    pub fn offer(&mut self, item: T) {
        if self.data.len() + 1 > self.capacity {
            self.grow();
        }
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the highest-ranked element
    pub fn poll(&mut self) -> HeapResult<T> {
        if self.data.is_empty() {
            return Err(HeapError::Empty);
        }

        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let top = self.data.pop().ok_or(HeapError::Empty)?;

        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    /// Highest-ranked element without removing it
    pub fn peek(&self) -> HeapResult<&T> {
        self.data.first().ok_or(HeapError::Empty)
    }

    /// Drain the heap, returning elements in the order `poll` yields them
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Ok(item) = self.poll() {
            sorted.push(item);
        }
        sorted
    }

    fn grow(&mut self) {
        self.capacity *= 2;
        let additional = self.capacity - self.data.len();
        self.data.reserve_exact(additional);
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.comparator.compare(&self.data[a], &self.data[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.less(parent, child) {
                break;
            }
            self.data.swap(parent, child);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let size = self.data.len();
        loop {
            let left = 2 * parent + 1;
            if left >= size {
                break;
            }

            let right = left + 1;
            let larger = if right < size && self.less(left, right) {
                right
            } else {
                left
            };

            if !self.less(parent, larger) {
                break;
            }
            self.data.swap(parent, larger);
            parent = larger;
        }
    }

    #[cfg(test)]
    pub(crate) fn satisfies_heap_property(&self) -> bool {
        (1..self.data.len()).all(|i| !self.less((i - 1) / 2, i))
    }
}

impl<T, C: Comparator<T> + Default> Default for PriorityHeap<T, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T, C> fmt::Debug for PriorityHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityHeap")
            .field("size", &self.data.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
