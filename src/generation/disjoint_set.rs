//! Weighted union-find over room indices
//!
//! `parent[i]` holds the parent index of a non-root element and the negated
//! set size of a root. Union is by size only; paths are not compressed.

/// Array-backed forest of disjoint sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSet {
    parent: Vec<isize>,
}

impl DisjointSet {
    /// `count` singleton sets
    pub fn new(count: usize) -> Self {
        Self {
            parent: vec![-1; count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of the set containing `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn find(&self, i: usize) -> usize {
        assert!(
            i < self.parent.len(),
            "element {} out of range for {} elements",
            i,
            self.parent.len()
        );
        let mut current = i;
        while self.parent[current] >= 0 {
            current = self.parent[current] as usize;
        }
        current
    }

    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Size of the set containing `i`
    pub fn set_size(&self, i: usize) -> usize {
        (-self.parent[self.find(i)]) as usize
    }

    /// Merge the sets containing `a` and `b`
    ///
    /// The smaller root goes under the larger; on a tie `b`'s root goes under
    /// `a`'s. Returns `false` if they already shared a set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        // Sizes are stored negated: smaller value means larger set
        if self.parent[root_a] <= self.parent[root_b] {
            self.parent[root_a] += self.parent[root_b];
            self.parent[root_b] = root_a as isize;
        } else {
            self.parent[root_b] += self.parent[root_a];
            self.parent[root_a] = root_b as isize;
        }
        true
    }

    /// Root of the smallest set; ties go to the lowest index
    ///
    /// # Panics
    ///
    /// Panics on an empty structure.
    pub fn loneliest(&self) -> usize {
        self.roots()
            .min_by_key(|&root| (-self.parent[root], root))
            .unwrap_or_else(|| panic!("loneliest element of an empty set"))
    }

    /// Least-connected element outside `anchor`'s set that is not in `skip`
    ///
    /// Candidates are ordered by the size of their set, then by index.
    /// `skip` is indexed by element.
    pub fn next_loneliest(&self, anchor: usize, skip: &[bool]) -> Option<usize> {
        let anchor_root = self.find(anchor);
        (0..self.len())
            .filter(|&i| !skip.get(i).copied().unwrap_or(false))
            .filter(|&i| self.find(i) != anchor_root)
            .min_by_key(|&i| (self.set_size(i), i))
    }

    /// Every element sharing a set with `i`, in index order
    pub fn members(&self, i: usize) -> Vec<usize> {
        let root = self.find(i);
        (0..self.len()).filter(|&j| self.find(j) == root).collect()
    }

    pub fn set_count(&self) -> usize {
        self.roots().count()
    }

    pub fn largest_set_size(&self) -> usize {
        self.roots()
            .map(|root| (-self.parent[root]) as usize)
            .max()
            .unwrap_or(0)
    }

    /// Whether one set holds every element
    pub fn is_fully_connected(&self) -> bool {
        self.parent.is_empty() || self.set_size(0) == self.len()
    }

    fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| self.parent[i] < 0)
    }
}
