use log::{debug, trace};

use crate::permutation::{LexicographicPermutations, Permutation};
use crate::utils::factorial;
use crate::Graph;

/// Result of an exhaustive isomorphism search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// First relabeling (in lexicographic order) mapping `g1` onto `g2`
    pub witness: Option<Permutation>,
    /// Number of candidate permutations compared
    pub examined: u64,
}

impl SearchOutcome {
    pub fn is_isomorphic(&self) -> bool {
        self.witness.is_some()
    }
}

/// Decide whether `g1` and `g2` are the same graph up to relabeling vertices
pub fn are_isomorphic(g1: &Graph, g2: &Graph) -> bool {
    search(g1, g2).is_isomorphic()
}

/// First permutation `p` with `g1[i][j] == g2[p(i)][p(j)]` for every `i`, `j`
pub fn find_isomorphism(g1: &Graph, g2: &Graph) -> Option<Permutation> {
    search(g1, g2).witness
}

/// Try every permutation of the vertices, identity first, stopping at the first match
pub fn search(g1: &Graph, g2: &Graph) -> SearchOutcome {
    if g1.num_vertices() != g2.num_vertices() {
        debug!(
            "vertex counts differ ({} vs {}), not isomorphic",
            g1.num_vertices(),
            g2.num_vertices()
        );
        return SearchOutcome {
            witness: None,
            examined: 0,
        };
    }

    let n = g1.num_vertices();
    debug!(
        "searching up to {} permutations of {} vertices",
        factorial(n),
        n
    );

    let mut perms = LexicographicPermutations::new(n);
    let mut examined = 0u64;

    while let Some(perm) = perms.current() {
        examined += 1;
        trace!("trying permutation {:?}", perm);

        if matches_under(g1, g2, perm) {
            let witness = perms.to_permutation();
            debug!("match after {} permutations: {:?}", examined, witness);
            return SearchOutcome { witness, examined };
        }

        perms.advance();
    }

    debug!("no match among {} permutations", examined);
    SearchOutcome {
        witness: None,
        examined,
    }
}

/// Compare row-major, giving up at the first differing entry
fn matches_under(g1: &Graph, g2: &Graph, perm: &[usize]) -> bool {
    let target = g2.rows();
    g1.rows().iter().enumerate().all(|(i, row)| {
        let mapped = &target[perm[i]];
        row.iter()
            .enumerate()
            .all(|(j, &value)| value == mapped[perm[j]])
    })
}
