use nom::{
    bytes::complete::{take_till1, take_while},
    sequence::preceded,
    IResult,
};
use thiserror::Error;

/// Vertex count and row-major entries, before any policy is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatrix {
    pub n: usize,
    /// Wide enough for every `u64` weight and its negation
    pub entries: Vec<i128>,
}

/// Outcome of scanning a graph description, before any policy is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scanned {
    Matrix(RawMatrix),
    /// The count token parsed but is zero or negative
    NonPositiveCount(i64),
}

/// Why a text source does not contain a well-formed graph description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatIssue {
    #[error("missing vertex count")]
    MissingVertexCount,

    #[error("vertex count `{0}` is not a valid integer")]
    BadVertexCount(String),

    #[error("vertex count {0} is too large")]
    VertexCountTooLarge(usize),

    #[error("entry [{row}][{col}] `{token}` is not a valid integer")]
    NotAnInteger {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("expected {expected} matrix entries, found {found}")]
    ShortRead { expected: usize, found: usize },

    #[error("unexpected trailing token `{0}` after the matrix")]
    TrailingTokens(String),
}

/// Parse a single whitespace-delimited token
fn token(input: &str) -> IResult<&str, &str> {
    preceded(
        take_while(char::is_whitespace),
        take_till1(char::is_whitespace),
    )(input)
}

/// Parse the vertex count token
fn vertex_count(input: &str) -> Result<(&str, i64), FormatIssue> {
    let (rest, tok) = token(input).map_err(|_| FormatIssue::MissingVertexCount)?;
    let n = tok
        .parse::<i64>()
        .map_err(|_| FormatIssue::BadVertexCount(tok.to_string()))?;
    Ok((rest, n))
}

/// Parse `n * n` integer tokens in row-major order
fn matrix_entries(input: &str, n: usize) -> Result<(&str, Vec<i128>), FormatIssue> {
    let expected = n
        .checked_mul(n)
        .ok_or(FormatIssue::VertexCountTooLarge(n))?;
    // Every entry needs at least one character plus a separator
    if expected > input.len() {
        let found = count_tokens(input);
        return Err(FormatIssue::ShortRead { expected, found });
    }

    let mut entries = Vec::with_capacity(expected);
    let mut remaining = input;

    for k in 0..expected {
        let (rest, tok) = token(remaining).map_err(|_| FormatIssue::ShortRead {
            expected,
            found: k,
        })?;
        let value = tok.parse::<i128>().map_err(|_| FormatIssue::NotAnInteger {
            row: k / n,
            col: k % n,
            token: tok.to_string(),
        })?;
        entries.push(value);
        remaining = rest;
    }

    Ok((remaining, entries))
}

fn count_tokens(input: &str) -> usize {
    input.split_whitespace().count()
}

/// Scan one graph description: vertex count followed by its matrix.
///
/// Returns the unconsumed input so several descriptions can follow each other.
pub fn parse_graph(input: &str) -> Result<(&str, Scanned), FormatIssue> {
    let (input, n) = vertex_count(input)?;
    if n <= 0 {
        return Ok((input, Scanned::NonPositiveCount(n)));
    }
    let n = usize::try_from(n).map_err(|_| FormatIssue::BadVertexCount(n.to_string()))?;

    let (input, entries) = matrix_entries(input, n)?;
    Ok((input, Scanned::Matrix(RawMatrix { n, entries })))
}

/// Fail unless only whitespace is left
pub fn expect_end(input: &str) -> Result<(), FormatIssue> {
    match token(input) {
        Ok((_, tok)) => Err(FormatIssue::TrailingTokens(tok.to_string())),
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(input: &str) -> RawMatrix {
        match parse_graph(input).unwrap().1 {
            Scanned::Matrix(m) => m,
            other => panic!("expected a matrix, got {:?}", other),
        }
    }

    #[test]
    fn parses_layout_free_tokens() {
        let m = matrix("2\n0 1\n1 0");
        assert_eq!(m.n, 2);
        assert_eq!(m.entries, vec![0, 1, 1, 0]);

        let m = matrix("  2 0\t1\r\n1\n\n 0  ");
        assert_eq!(m.entries, vec![0, 1, 1, 0]);
    }

    #[test]
    fn leaves_remaining_input() {
        let (rest, _) = parse_graph("1\n0\n\n1\n0\n").unwrap();
        assert_eq!(rest.trim(), "1\n0");
        assert!(expect_end("  \n ").is_ok());
        assert_eq!(
            expect_end(" 7 8"),
            Err(FormatIssue::TrailingTokens("7".to_string()))
        );
    }

    #[test]
    fn short_read() {
        assert_eq!(
            parse_graph("2\n0 1"),
            Err(FormatIssue::ShortRead {
                expected: 4,
                found: 2
            })
        );
        assert_eq!(
            parse_graph("3\n0 1 0\n1 0"),
            Err(FormatIssue::ShortRead {
                expected: 9,
                found: 5
            })
        );
    }

    #[test]
    fn missing_or_bad_count() {
        assert_eq!(parse_graph(""), Err(FormatIssue::MissingVertexCount));
        assert_eq!(parse_graph(" \n\t"), Err(FormatIssue::MissingVertexCount));
        assert_eq!(
            parse_graph("two\n0 1\n1 0"),
            Err(FormatIssue::BadVertexCount("two".to_string()))
        );
        assert_eq!(
            parse_graph("0").unwrap().1,
            Scanned::NonPositiveCount(0)
        );
        assert_eq!(
            parse_graph("-4").unwrap().1,
            Scanned::NonPositiveCount(-4)
        );
    }

    #[test]
    fn non_integer_entry() {
        assert_eq!(
            parse_graph("2\n0 1\n1 x"),
            Err(FormatIssue::NotAnInteger {
                row: 1,
                col: 1,
                token: "x".to_string()
            })
        );
        assert!(matches!(
            parse_graph("2\n0 1.5\n1 0"),
            Err(FormatIssue::NotAnInteger { row: 0, col: 1, .. })
        ));
    }

    #[test]
    fn any_unicode_whitespace_separates_tokens() {
        let m = matrix("2\x0c0\x0b1\n1\u{a0}0\u{2003}");
        assert_eq!(m.n, 2);
        assert_eq!(m.entries, vec![0, 1, 1, 0]);
        assert!(expect_end("\x0c\x0b\u{a0}").is_ok());
    }

    #[test]
    fn short_read_counts_tokens_after_form_feed() {
        assert_eq!(
            parse_graph("3\x0c0 1\x0b0\n1 0"),
            Err(FormatIssue::ShortRead {
                expected: 9,
                found: 5
            })
        );
    }

    #[test]
    fn entries_beyond_i64_parse() {
        let m = matrix(&format!("1\n{}", u64::MAX));
        assert_eq!(m.entries, vec![u64::MAX as i128]);
    }

    #[test]
    fn negative_entries_are_integers() {
        let m = matrix("1\n-3");
        assert_eq!(m.entries, vec![-3]);
    }

    #[test]
    fn huge_count_does_not_allocate() {
        assert!(matches!(
            parse_graph("100000 0 1"),
            Err(FormatIssue::ShortRead { expected: 10_000_000_000, found: 2 })
        ));
        assert_eq!(
            parse_graph(&format!("{}", u64::MAX / 2)),
            Err(FormatIssue::VertexCountTooLarge((u64::MAX / 2) as usize))
        );
    }
}
