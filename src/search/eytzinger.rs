//! Eytzinger (breadth-first) array layout and upper-bound search
//!
//! A sorted slice is rearranged so that node `k` (1-based) of an implicit complete binary
//! search tree sits at index `k - 1`, with children at `2k` and `2k + 1`. Searching touches
//! memory in a predictable top-down pattern, which is friendlier to caches and prefetchers
//! than the halving jumps of a classic binary search over the sorted slice.
//!
//! All indices taken and returned by this module are 0-based positions in the layout.

/// Rearranges `sorted` into Eytzinger order
///
/// The input must already be sorted ascending; an in-order walk of the result
/// (see [`uneytzinger`]) gives it back.
pub fn eytzinger<T: Copy>(sorted: &[T]) -> Vec<T> {
    let Some(&first) = sorted.first() else {
        return Vec::new();
    };

    let mut layout = vec![first; sorted.len()];
    let mut consumed = 0;
    fill(sorted, &mut layout, &mut consumed, 1);
    layout
}

// In-order traversal of the implicit tree, assigning sorted values as nodes are visited.
fn fill<T: Copy>(sorted: &[T], layout: &mut [T], consumed: &mut usize, k: usize) {
    if k > layout.len() {
        return;
    }

    fill(sorted, layout, consumed, 2 * k);
    layout[k - 1] = sorted[*consumed];
    *consumed += 1;
    fill(sorted, layout, consumed, 2 * k + 1);
}

/// Restores sorted order from an Eytzinger layout
pub fn uneytzinger<T: Copy>(layout: &[T]) -> Vec<T> {
    let mut sorted = Vec::with_capacity(layout.len());
    let mut index = first(layout.len());
    while let Some(i) = index {
        sorted.push(layout[i]);
        index = next(layout.len(), i);
    }
    sorted
}

/// Index of the first element strictly greater than `value`, or `None` if there is none
///
/// Branch-free descent: every step goes right while the node is `<= value`. The answer is the
/// last node where the descent went left, recovered by shifting off the trailing right turns.
#[inline]
pub fn upper_bound<T: Ord>(layout: &[T], value: &T) -> Option<usize> {
    let n = layout.len();
    let mut k = 1usize;
    while k <= n {
        k = 2 * k + usize::from(layout[k - 1] <= *value);
    }

    k.checked_shr(k.trailing_ones() + 1)
        .unwrap_or(0)
        .checked_sub(1)
}

/// Classic binary search baseline: number of elements `<= value` in a sorted slice
///
/// Equivalent to C++'s `std::upper_bound` offset; `sorted.len()` means no greater element.
#[inline]
pub fn sorted_upper_bound<T: Ord>(sorted: &[T], value: &T) -> usize {
    sorted.partition_point(|element| element <= value)
}

/// Index of the smallest element in a layout of length `n`
pub fn first(n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }

    let mut k = 1;
    while 2 * k <= n {
        k *= 2;
    }
    Some(k - 1)
}

/// Index of the largest element in a layout of length `n`
pub fn last(n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }

    let mut k = 1;
    while 2 * k + 1 <= n {
        k = 2 * k + 1;
    }
    Some(k - 1)
}

/// In-order successor of index `i` in a layout of length `n`
pub fn next(n: usize, i: usize) -> Option<usize> {
    if i >= n {
        return None;
    }

    let mut k = i + 1;
    if 2 * k + 1 <= n {
        // leftmost node of the right subtree
        k = 2 * k + 1;
        while 2 * k <= n {
            k *= 2;
        }
    } else {
        // climb past every right turn, then once more
        k = k.checked_shr(k.trailing_ones() + 1).unwrap_or(0);
    }
    k.checked_sub(1)
}

/// In-order predecessor of index `i` in a layout of length `n`
pub fn prev(n: usize, i: usize) -> Option<usize> {
    if i >= n {
        return None;
    }

    let mut k = i + 1;
    if 2 * k <= n {
        // rightmost node of the left subtree
        k *= 2;
        while 2 * k + 1 <= n {
            k = 2 * k + 1;
        }
    } else {
        k = k.checked_shr(k.trailing_zeros() + 1).unwrap_or(0);
    }
    k.checked_sub(1)
}

/// Owned Eytzinger layout of a sorted sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EytzingerArray<T> {
    layout: Vec<T>,
}

impl<T: Copy + Ord> EytzingerArray<T> {
    /// Builds the layout from an ascending slice
    pub fn from_sorted(sorted: &[T]) -> Self {
        Self {
            layout: eytzinger(sorted),
        }
    }

    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// The raw layout
    pub fn as_slice(&self) -> &[T] {
        &self.layout
    }

    /// First element strictly greater than `value`
    #[inline]
    pub fn upper_bound(&self, value: &T) -> Option<&T> {
        upper_bound(&self.layout, value).map(|i| &self.layout[i])
    }

    /// Elements in ascending order
    pub fn iter_sorted(&self) -> impl Iterator<Item = &T> + '_ {
        let n = self.layout.len();
        std::iter::successors(first(n), move |&i| next(n, i)).map(move |i| &self.layout[i])
    }
}
