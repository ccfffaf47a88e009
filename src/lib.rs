use itertools::Itertools;
use std::fmt;
use std::io::{self, Write};

use crate::error::{ShapeError, Violation};
use crate::permutation::Permutation;

/// Which adjacency matrices are accepted as valid graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixPolicy {
    /// Simple undirected graph: entries are 0 or 1 and the matrix is symmetric
    #[default]
    Strict,
    /// Non-negative edge weights, diagonal holds self-loop weights, no symmetry required
    Weighted,
}

impl fmt::Display for MatrixPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixPolicy::Strict => write!(f, "strict"),
            MatrixPolicy::Weighted => write!(f, "weighted"),
        }
    }
}

impl std::str::FromStr for MatrixPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "binary" => Ok(MatrixPolicy::Strict),
            "weighted" => Ok(MatrixPolicy::Weighted),
            _ => Err(format!("Invalid policy: {}. Use 'strict' or 'weighted'", s)),
        }
    }
}

/// A vertex-labeled graph stored as a dense adjacency matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Number of vertices
    n: usize,
    /// adj[i][j] = presence (or weight) of the edge from vertex i to vertex j
    adj: Vec<Vec<u64>>,
}

impl Graph {
    /// Graph with `n` vertices and no edges
    pub fn new(n: usize) -> Self {
        Graph {
            n,
            adj: vec![vec![0; n]; n],
        }
    }

    /// Build a graph from rows, rejecting anything that is not square
    pub fn from_adjacency_matrix(adj: Vec<Vec<u64>>) -> Result<Self, ShapeError> {
        let n = adj.len();
        if let Some((row, r)) = adj.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(ShapeError {
                row,
                len: r.len(),
                expected: n,
            });
        }
        Ok(Graph { n, adj })
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn get_edge(&self, u: usize, v: usize) -> u64 {
        self.adj[u][v]
    }

    pub fn set_edge(&mut self, u: usize, v: usize, value: u64) {
        self.adj[u][v] = value;
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.adj
    }

    pub fn is_symmetric(&self) -> bool {
        self.first_asymmetry().is_none()
    }

    /// Number of edges: undirected pairs (and loops) when the matrix is symmetric,
    /// otherwise every non-zero entry counts as a directed edge
    pub fn edge_count(&self) -> usize {
        let nonzero = self.adj.iter().flatten().filter(|&&w| w > 0).count();
        if !self.is_symmetric() {
            return nonzero;
        }
        let loops = (0..self.n).filter(|&i| self.adj[i][i] > 0).count();
        (nonzero - loops) / 2 + loops
    }

    /// Check every entry (and symmetry under `Strict`) against `policy`
    pub fn validate(&self, policy: MatrixPolicy) -> Result<(), Violation> {
        if self.n == 0 {
            return Err(Violation::EmptyGraph);
        }

        if policy == MatrixPolicy::Strict {
            for (row, values) in self.adj.iter().enumerate() {
                if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| **v > 1) {
                    return Err(Violation::ValueOutOfRange {
                        row,
                        col,
                        value: i128::from(value),
                        policy,
                    });
                }
            }
            if let Some((row, col)) = self.first_asymmetry() {
                return Err(Violation::Asymmetric {
                    row,
                    col,
                    forward: self.adj[row][col],
                    backward: self.adj[col][row],
                });
            }
        }

        Ok(())
    }

    /// Graph whose vertex `perm(i)` plays the role of vertex `i` here
    ///
    /// # Panics
    ///
    /// Panics if `perm` does not have exactly one entry per vertex.
    pub fn relabel(&self, perm: &Permutation) -> Graph {
        assert_eq!(perm.len(), self.n, "permutation size must match vertex count");
        let mut out = Graph::new(self.n);
        for i in 0..self.n {
            for j in 0..self.n {
                out.adj[perm.apply(i)][perm.apply(j)] = self.adj[i][j];
            }
        }
        out
    }

    /// Write the graph in the loader's text format
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)
    }

    fn first_asymmetry(&self) -> Option<(usize, usize)> {
        (0..self.n)
            .flat_map(|i| (i + 1..self.n).map(move |j| (i, j)))
            .find(|&(i, j)| self.adj[i][j] != self.adj[j][i])
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.n)?;
        for row in &self.adj {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

// Module declarations
pub mod error;
pub mod isomorphism;
pub mod loader;
pub mod parser;
pub mod permutation;
pub mod utils;

pub use error::LoadError;
pub use isomorphism::{are_isomorphic, find_isomorphism};
pub use loader::{load, load_pair};

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        Graph::from_adjacency_matrix(vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]).unwrap()
    }

    #[test]
    fn test_graph_creation() {
        let g = Graph::new(3);
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.get_edge(0, 0), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let err = Graph::from_adjacency_matrix(vec![vec![0, 1], vec![1]]).unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.len, 1);
        assert_eq!(err.expected, 2);
    }

    #[test]
    fn test_strict_validation() {
        assert!(triangle().validate(MatrixPolicy::Strict).is_ok());

        let mut g = triangle();
        g.set_edge(0, 1, 2);
        g.set_edge(1, 0, 2);
        assert!(matches!(
            g.validate(MatrixPolicy::Strict),
            Err(Violation::ValueOutOfRange { row: 0, col: 1, value: 2, .. })
        ));
        assert!(g.validate(MatrixPolicy::Weighted).is_ok());

        let mut g = triangle();
        g.set_edge(2, 0, 0);
        assert!(matches!(
            g.validate(MatrixPolicy::Strict),
            Err(Violation::Asymmetric { row: 0, col: 2, forward: 1, backward: 0 })
        ));
    }

    #[test]
    fn test_empty_graph_is_not_valid() {
        assert_eq!(
            Graph::new(0).validate(MatrixPolicy::Weighted),
            Err(Violation::EmptyGraph)
        );
    }

    #[test]
    fn test_relabel_moves_edges() {
        // Path 0-1-2, swap 0 and 2 is an automorphism; rotate is not
        let path =
            Graph::from_adjacency_matrix(vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]).unwrap();
        let swap = Permutation::new([2, 1, 0]).unwrap();
        assert_eq!(path.relabel(&swap), path);

        let rotate = Permutation::new([1, 2, 0]).unwrap();
        let moved = path.relabel(&rotate);
        assert_eq!(moved.get_edge(1, 2), 1);
        assert_eq!(moved.get_edge(2, 0), 1);
        assert_eq!(moved.get_edge(1, 0), 0);
        assert_eq!(moved.edge_count(), 2);
    }

    #[test]
    fn test_edge_count_directed_and_undirected() {
        // Undirected: 0-1 plus a loop on 2
        let g = Graph::from_adjacency_matrix(vec![vec![0, 1, 0], vec![1, 0, 0], vec![0, 0, 1]])
            .unwrap();
        assert_eq!(g.edge_count(), 2);

        // Directed weights: 0->1, 1->0 with different weight, loop on 0
        let w = Graph::from_adjacency_matrix(vec![vec![4, 1], vec![2, 0]]).unwrap();
        assert_eq!(w.edge_count(), 3);
    }

    #[test]
    fn test_edge_count_survives_weighted_relabel() {
        let w = Graph::from_adjacency_matrix(vec![
            vec![0, 3, 0, 1],
            vec![0, 0, 0, 0],
            vec![5, 0, 2, 0],
            vec![0, 0, 7, 0],
        ])
        .unwrap();
        let relabeled = w.relabel(&Permutation::new([3, 0, 2, 1]).unwrap());
        assert_eq!(w.edge_count(), 5);
        assert_eq!(relabeled.edge_count(), w.edge_count());
    }

    #[test]
    #[should_panic(expected = "permutation size must match vertex count")]
    fn test_relabel_wrong_size_panics() {
        triangle().relabel(&Permutation::identity(2));
    }

    #[test]
    fn test_large_weight_reported_exactly_in_strict_mode() {
        let mut g = Graph::new(1);
        g.set_edge(0, 0, u64::MAX);
        assert!(matches!(
            g.validate(MatrixPolicy::Strict),
            Err(Violation::ValueOutOfRange { value, .. }) if value == i128::from(u64::MAX)
        ));
    }

    #[test]
    fn test_display_format() {
        let g = Graph::from_adjacency_matrix(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(g.to_string(), "2\n0 1\n1 0\n");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Strict".parse::<MatrixPolicy>(), Ok(MatrixPolicy::Strict));
        assert_eq!("weighted".parse::<MatrixPolicy>(), Ok(MatrixPolicy::Weighted));
        assert!("fuzzy".parse::<MatrixPolicy>().is_err());
    }
}
