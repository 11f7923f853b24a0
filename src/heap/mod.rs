//! Array-backed binary max-heap with pluggable ordering
//!
//! # Overview
//!
//! [`PriorityHeap`] stores its elements in a growable array laid out as a
//! complete binary tree: the children of index `i` live at `2i + 1` and
//! `2i + 2`. The element the [`Comparator`] ranks highest is always at index 0
//! and is the next one [`PriorityHeap::poll`] returns.
//!
//! ```text
//!              [0] max
//!            /      \
//!         [1]        [2]
//!        /   \      /   \
//!      [3]   [4]  [5]   [6]
//! ```
//!
//! The logical capacity starts at 10 and doubles whenever an insert would
//! overflow it. It never shrinks.
//!
//! Ties are broken arbitrarily: two elements the comparator considers equal
//! may come out in either order, regardless of insertion order.
//!
//! # Example
//!
//! ```rust
//! use pixel_priority::heap::PriorityHeap;
//!
//! let mut heap: PriorityHeap<u32, _> = PriorityHeap::new(|a: &u32, b: &u32| a.cmp(b));
//! heap.offer(3);
//! heap.offer(7);
//! heap.offer(5);
//!
//! assert_eq!(heap.poll().unwrap(), 7);
//! assert_eq!(heap.peek().unwrap(), &5);
//! ```

mod comparator;
mod error;
mod priority_heap;

pub use comparator::{Comparator, NaturalOrder};
pub use error::{HeapError, HeapResult};
pub use priority_heap::{PriorityHeap, INITIAL_CAPACITY};
