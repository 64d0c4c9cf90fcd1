//! # Heap sort
//!
//! In-place, unstable, ascending sort through a binary max-heap laid out in
//! the slice itself: the children of index `i` live at `2i + 1` and `2i + 2`.
//!
//! - O(n log n) comparisons in every case
//! - No allocation, O(1) extra space
//! - Not stable: equal elements may be reordered

/// Sorts `values` in ascending order, in place.
///
/// The slice is first arranged into a max-heap, then the maximum is swapped
/// into the last unsorted slot and the heap is restored over the shrinking
/// prefix that remains.
///
/// # Examples
///
/// ```
/// use chainmap::heap_sort;
///
/// let mut values = [12, 11, 13, 5, 6, 7];
/// heap_sort::sort(&mut values);
/// assert_eq!(values, [5, 6, 7, 11, 12, 13]);
/// ```
pub fn sort<T: Ord>(values: &mut [T]) {
    build_max_heap(values);

    for end in (1..values.len()).rev() {
        values.swap(0, end);
        heapify(values, end, 0);
    }
}

/// Rearranges `values` so that every parent is at least as large as its
/// children.
///
/// Sifts down every internal node, from the last one to the root.
pub fn build_max_heap<T: Ord>(values: &mut [T]) {
    let len = values.len();
    for root in (0..len / 2).rev() {
        heapify(values, len, root);
    }
}

/// Sifts the element at `root` down until the subtree rooted there is a
/// max-heap, considering only the first `heap_size` elements.
///
/// Both child subtrees of `root` must already be max-heaps. A `heap_size`
/// beyond the slice length is clamped to it, and a `root` outside the heap
/// leaves the slice untouched.
///
/// # Examples
///
/// ```
/// use chainmap::heap_sort::heapify;
///
/// // Both subtrees of the root are heaps; the root itself is out of place.
/// let mut values = [1, 9, 8, 4, 3];
/// heapify(&mut values, 5, 0);
/// assert_eq!(values, [9, 4, 8, 1, 3]);
/// ```
pub fn heapify<T: Ord>(values: &mut [T], heap_size: usize, root: usize) {
    let heap_size = heap_size.min(values.len());
    if root >= heap_size {
        return;
    }
    let mut current = root;

    loop {
        let left = 2 * current + 1;
        let right = left + 1;
        let mut largest = current;

        if left < heap_size && values[left] > values[largest] {
            largest = left;
        }
        if right < heap_size && values[right] > values[largest] {
            largest = right;
        }
        if largest == current {
            return;
        }

        values.swap(current, largest);
        current = largest;
    }
}
