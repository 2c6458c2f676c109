/*!
A max heap over a subset of a fixed collection of indexed values.

Values are stored against an index, and the index may be *active* (on the heap) or *inactive*.
The value of an index persists whether or not the index is active, so an index may be removed from the heap and later restored with the value it had.

[IndexHeap] is used by the [atom database](crate::db::atom) to track the activity of atoms.
Any atom without a value is active, and so the most active atom without a value is (close to) the top of the heap whenever a decision is needed.
As values are only dropped from the heap lazily, an atom popped from the heap may already have a value, and callers are expected to check.

```rust
# use otter_bv::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(600, 10);
heap.add(0, 70);

heap.activate(600);
heap.activate(0);

assert_eq!(heap.count(), 601);
assert_eq!(heap.value_at(5), &i32::default());

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(600));
assert!(heap.pop_max().is_none());
```
*/

use std::cmp::Ordering;

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default> {
    /// Values, indexed by value index.
    values: Vec<V>,

    /// The location on the heap of each value index, if active.
    position: Vec<Option<usize>>,

    /// The heap, of value indicies.
    heap: Vec<usize>,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Stores `value` against `index`, growing the structure if required.
    ///
    /// Returns true if `index` was fresh, false otherwise.
    /// The index is not activated.
    pub fn add(&mut self, index: usize, value: V) -> bool {
        let fresh = index >= self.values.len();
        if fresh {
            self.values.resize_with(index + 1, V::default);
            self.position.resize(index + 1, None);
        }
        self.values[index] = value;
        if !fresh {
            self.heapify_if_active(index);
        }
        fresh
    }

    /// Places `index` on the heap.
    /// Returns true if the index was not already active.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.position.get(index).copied().flatten() {
            Some(_) => false,
            None if index < self.values.len() => {
                self.heap.push(index);
                let heap_index = self.heap.len() - 1;
                self.position[index] = Some(heap_index);
                self.sift_up(heap_index);
                true
            }
            None => false,
        }
    }

    /// Removes `index` from the heap, if active.
    /// Returns true if the index was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(heap_index) = self.position.get(index).copied().flatten() else {
            return false;
        };

        let last = self.heap.len() - 1;
        self.swap(heap_index, last);
        self.heap.pop();
        self.position[index] = None;

        if heap_index < self.heap.len() {
            self.sift_down(heap_index);
            self.sift_up(heap_index);
        }
        true
    }

    /// The index with the greatest value, if some index is active.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Removes and returns the index with the greatest value, if some index is active.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// The value stored against `index`.
    ///
    /// # Panics
    /// If `index` has not been added.
    pub fn value_at(&self, index: usize) -> &V {
        &self.values[index]
    }

    /// Revises the value stored against `index` by applying `f`, and restores the heap.
    pub fn apply_to_index(&mut self, index: usize, f: impl Fn(&V) -> V) {
        if let Some(value) = self.values.get_mut(index) {
            *value = f(value);
            self.heapify_if_active(index);
        }
    }

    /// Revises every value by applying `f`.
    ///
    /// As `f` is applied uniformly the heap is assumed to be preserved, and no reordering takes place.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value);
        }
    }

    /// Restores the heap property for `index`, if active.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(heap_index) = self.position.get(index).copied().flatten() {
            self.sift_up(heap_index);
            self.sift_down(heap_index);
        }
    }

    /// A count of values indexed by the structure, active or otherwise.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of active indicies.
    pub fn active_count(&self) -> usize {
        self.heap.len()
    }

    /// True if no index is active.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    fn greater(&self, a: usize, b: usize) -> bool {
        matches!(
            self.values[self.heap[a]].partial_cmp(&self.values[self.heap[b]]),
            Some(Ordering::Greater)
        )
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.greater(heap_index, parent) {
                self.swap(heap_index, parent);
                heap_index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut heap_index: usize) {
        loop {
            let left = 2 * heap_index + 1;
            let right = left + 1;
            let mut largest = heap_index;

            if left < self.heap.len() && self.greater(left, largest) {
                largest = left;
            }
            if right < self.heap.len() && self.greater(right, largest) {
                largest = right;
            }

            if largest == heap_index {
                break;
            }
            self.swap(heap_index, largest);
            heap_index = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_of(pairs: &[(usize, i32)]) -> IndexHeap<i32> {
        let mut heap = IndexHeap::default();
        for (index, value) in pairs {
            heap.add(*index, *value);
            heap.activate(*index);
        }
        heap
    }

    #[test]
    fn heap_simple() {
        let mut heap = heap_of(&[(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)]);

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_revalue() {
        let mut heap = heap_of(&[(6, 10), (4, 30), (1, 60), (0, 70)]);

        heap.apply_to_index(6, |v| v + 100);
        heap.apply_to_index(0, |_| 0);

        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_sparse() {
        let mut heap = heap_of(&[(600, 10), (0, 70)]);

        assert_eq!(heap.count(), 601);
        assert_eq!(heap.active_count(), 2);
        assert_eq!(heap.value_at(5), &i32::default());
        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(600));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_remove() {
        let mut heap = heap_of(&[(6, 6), (5, 5), (4, 4), (1, 1), (0, 0)]);

        assert!(heap.remove(4));
        assert!(!heap.remove(4));
        assert!(heap.remove(6));
        assert!(!heap.add(4, 10));
        assert!(!heap.add(4, 2));
        assert!(heap.activate(4));
        assert!(!heap.activate(4));

        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn values_persist_while_inactive() {
        let mut heap = heap_of(&[(2, 5), (3, 9)]);

        assert_eq!(heap.pop_max(), Some(3));
        heap.apply_to_all(|v| v * 2);
        assert_eq!(heap.value_at(3), &18);

        heap.activate(3);
        assert_eq!(heap.peek_max(), Some(3));
    }
}
