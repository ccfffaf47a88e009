use log::{debug, info};
use std::io::Read;
use std::path::Path;

use crate::error::{LoadError, ShapeError, Violation};
use crate::parser::{expect_end, parse_graph, FormatIssue, RawMatrix, Scanned};
use crate::utils::format_matrix;
use crate::{Graph, MatrixPolicy};

/// Load a single graph from a file
pub fn load(path: &Path, policy: MatrixPolicy) -> Result<Graph, LoadError> {
    let source_id = path.display().to_string();
    let text = read_file(path, &source_id)?;
    load_str(&text, &source_id, policy)
}

/// Load a single graph from any reader, naming it `source_id` in errors
pub fn load_reader<R: Read>(
    mut reader: R,
    source_id: &str,
    policy: MatrixPolicy,
) -> Result<Graph, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|source| LoadError::Io {
        source_id: source_id.to_string(),
        source,
    })?;
    let text = decode(bytes, source_id)?;
    load_str(&text, source_id, policy)
}

/// Load a single graph from text; anything after the matrix is rejected
pub fn load_str(text: &str, source_id: &str, policy: MatrixPolicy) -> Result<Graph, LoadError> {
    let (rest, scanned) = parse_graph(text).map_err(|issue| format_error(source_id, issue))?;
    let graph = build_graph(scanned, source_id, policy)?;
    expect_end(rest).map_err(|issue| format_error(source_id, issue))?;

    info!(
        "{}: loaded {} vertices, {} edges ({} policy)",
        source_id,
        graph.num_vertices(),
        graph.edge_count(),
        policy
    );
    Ok(graph)
}

/// Load two graphs written back to back in one file
pub fn load_pair(path: &Path, policy: MatrixPolicy) -> Result<(Graph, Graph), LoadError> {
    let source_id = path.display().to_string();
    let text = read_file(path, &source_id)?;
    load_pair_str(&text, &source_id, policy)
}

/// Load two graphs from text; errors name the graph as `<source_id>#first` or `#second`
pub fn load_pair_str(
    text: &str,
    source_id: &str,
    policy: MatrixPolicy,
) -> Result<(Graph, Graph), LoadError> {
    let first_id = format!("{}#first", source_id);
    let second_id = format!("{}#second", source_id);

    let (rest, scanned) = parse_graph(text).map_err(|issue| format_error(&first_id, issue))?;
    let g = build_graph(scanned, &first_id, policy)?;

    let (rest, scanned) = parse_graph(rest).map_err(|issue| format_error(&second_id, issue))?;
    let h = build_graph(scanned, &second_id, policy)?;
    expect_end(rest).map_err(|issue| format_error(&second_id, issue))?;

    info!(
        "{}: loaded graphs with {} and {} vertices ({} policy)",
        source_id,
        g.num_vertices(),
        h.num_vertices(),
        policy
    );
    Ok((g, h))
}

fn read_file(path: &Path, source_id: &str) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        source_id: source_id.to_string(),
        source,
    })?;
    decode(bytes, source_id)
}

fn decode(bytes: Vec<u8>, source_id: &str) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|e| LoadError::Format {
        source_id: source_id.to_string(),
        reason: format!("input is not valid UTF-8: {}", e.utf8_error()),
    })
}

fn format_error(source_id: &str, issue: FormatIssue) -> LoadError {
    LoadError::Format {
        source_id: source_id.to_string(),
        reason: issue.to_string(),
    }
}

fn validation_error(source_id: &str, violation: Violation) -> LoadError {
    LoadError::Validation {
        source_id: source_id.to_string(),
        violation,
    }
}

/// Apply the policy's value range, then its structural checks
fn build_graph(scanned: Scanned, source_id: &str, policy: MatrixPolicy) -> Result<Graph, LoadError> {
    let raw = match scanned {
        Scanned::Matrix(raw) => raw,
        Scanned::NonPositiveCount(_) => {
            return Err(validation_error(source_id, Violation::EmptyGraph))
        }
    };

    check_range(&raw, policy).map_err(|v| validation_error(source_id, v))?;

    let rows: Vec<Vec<u64>> = raw
        .entries
        .chunks(raw.n)
        // check_range has bounded every entry to 0..=u64::MAX
        .map(|row| row.iter().map(|&v| v as u64).collect())
        .collect();
    debug!("{}: parsed matrix\n{}", source_id, format_matrix(&rows, 2));

    let graph = Graph::from_adjacency_matrix(rows).map_err(|e| shape_error(source_id, e))?;
    graph
        .validate(policy)
        .map_err(|v| validation_error(source_id, v))?;
    Ok(graph)
}

fn check_range(raw: &RawMatrix, policy: MatrixPolicy) -> Result<(), Violation> {
    let allowed = |v: i128| match policy {
        MatrixPolicy::Strict => v == 0 || v == 1,
        MatrixPolicy::Weighted => (0..=i128::from(u64::MAX)).contains(&v),
    };

    match raw.entries.iter().position(|&v| !allowed(v)) {
        Some(k) => Err(Violation::ValueOutOfRange {
            row: k / raw.n,
            col: k % raw.n,
            value: raw.entries[k],
            policy,
        }),
        None => Ok(()),
    }
}

fn shape_error(source_id: &str, e: ShapeError) -> LoadError {
    LoadError::Format {
        source_id: source_id.to_string(),
        reason: e.to_string(),
    }
}
