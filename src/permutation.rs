use std::fmt;

/// A bijection on `0..n`, stored as the image of each index
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Accepts `images` only if every index in `0..images.len()` appears exactly once
    pub fn new(images: impl IntoIterator<Item = usize>) -> Option<Self> {
        let images: Vec<usize> = images.into_iter().collect();
        let mut hit = vec![false; images.len()];

        for &target in &images {
            match hit.get_mut(target) {
                Some(slot) if !*slot => *slot = true,
                _ => return None,
            }
        }

        Some(Self(images))
    }

    pub fn identity(size: usize) -> Self {
        Self((0..size).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Image of vertex `i`
    #[inline]
    pub fn apply(&self, i: usize) -> usize {
        self.0[i]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Rearrange `perm` into its lexicographic successor.
///
/// Returns `false` (leaving `perm` untouched) when it is already the last one.
pub fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at `pivot + 1`
    let mut pivot = perm.len() - 1;
    while pivot > 0 && perm[pivot - 1] >= perm[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }
    let pivot = pivot - 1;

    let mut successor = perm.len() - 1;
    while perm[successor] <= perm[pivot] {
        successor -= 1;
    }

    perm.swap(pivot, successor);
    perm[pivot + 1..].reverse();
    true
}

/// Walks every permutation of `0..n` in ascending lexicographic order, identity first.
///
/// The current permutation is reused in place; callers inspect it through
/// [`LexicographicPermutations::current`] between calls to
/// [`LexicographicPermutations::advance`].
#[derive(Debug, Clone)]
pub struct LexicographicPermutations {
    current: Vec<usize>,
    exhausted: bool,
}

impl LexicographicPermutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            exhausted: false,
        }
    }

    /// The permutation under inspection, or `None` once every one has been visited
    pub fn current(&self) -> Option<&[usize]> {
        if self.exhausted {
            None
        } else {
            Some(&self.current)
        }
    }

    pub fn advance(&mut self) {
        if !self.exhausted && !next_permutation(&mut self.current) {
            self.exhausted = true;
        }
    }

    pub fn to_permutation(&self) -> Option<Permutation> {
        self.current().map(|p| Permutation(p.to_vec()))
    }
}

impl Iterator for LexicographicPermutations {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        let perm = self.to_permutation()?;
        self.advance();
        Some(perm)
    }
}
