//! Edge-list ingestion: one `src dst` pair per non-empty line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{NodeId, MAX_NODES};

/// Largest id accepted from input; keeps `max_id + 1` addressable.
const MAX_NODE_ID: u64 = MAX_NODES as u64 - 1;

/// Parsed input: edges in file order and the implied node universe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    pub edges: Vec<(NodeId, NodeId)>,
    /// `max(id) + 1`, or 0 when there are no edges.
    pub node_count: usize,
}

impl EdgeList {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Skip lines whose first token starts with `#` (SNAP-style headers).
    pub skip_comments: bool,
}

/// Read and validate the edge list at `path`.
pub fn parse(path: impl AsRef<Path>, options: IngestOptions) -> Result<EdgeList> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GraphError::unavailable(path, e))?;
    parse_reader(BufReader::new(file), path, options)
}

/// Parse an edge list from any buffered reader. `source` names the input in errors.
pub fn parse_reader<R: BufRead>(
    mut reader: R,
    source: impl AsRef<Path>,
    options: IngestOptions,
) -> Result<EdgeList> {
    let source = source.as_ref();
    let start = Instant::now();

    let mut edges = Vec::new();
    let mut max_id: Option<NodeId> = None;
    let mut line = String::new();
    let mut line_no = 0usize;

    loop {
        line.clear();
        let read = reader.read_line(&mut line).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                GraphError::malformed(source, line_no + 1, "", "line is not valid UTF-8")
            }
            _ => GraphError::unavailable(source, e),
        })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let (from, to) = match parse_line(&line, options) {
            Ok(Some(pair)) => pair,
            Ok(None) => continue,
            Err(reason) => return Err(GraphError::malformed(source, line_no, &line, reason)),
        };
        let from = checked_id(from)?;
        let to = checked_id(to)?;
        max_id = max_id.max(Some(from.max(to)));
        edges.push((from, to));
    }

    let node_count = max_id.map_or(0, |id| id as usize + 1);
    debug!(
        source = %source.display(),
        lines = line_no,
        edges = edges.len(),
        node_count,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "parsed edge list"
    );

    Ok(EdgeList { edges, node_count })
}

/// `Ok(None)` for blank (or skipped comment) lines.
fn parse_line(
    line: &str,
    options: IngestOptions,
) -> std::result::Result<Option<(u64, u64)>, String> {
    let mut fields = line.split_whitespace();
    let Some(first) = fields.next() else {
        return Ok(None);
    };
    if options.skip_comments && first.starts_with('#') {
        return Ok(None);
    }
    let Some(second) = fields.next() else {
        return Err("expected two node ids, found one".to_string());
    };
    if fields.next().is_some() {
        return Err("expected two node ids, found more".to_string());
    }
    Ok(Some((parse_id(first)?, parse_id(second)?)))
}

fn parse_id(token: &str) -> std::result::Result<u64, String> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid node id {token:?}"));
    }
    token
        .parse::<u64>()
        .map_err(|_| format!("node id {token:?} does not fit in 64 bits"))
}

fn checked_id(id: u64) -> Result<NodeId> {
    if id > MAX_NODE_ID {
        return Err(GraphError::capacity("node id", id, Some(MAX_NODE_ID)));
    }
    Ok(id as NodeId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(input: &str) -> Result<EdgeList> {
        parse_reader(Cursor::new(input), "test.txt", IngestOptions::default())
    }

    #[test]
    fn test_parse_basic() {
        let list = parse_str("0 1\n1 2\n2 3\n0 3\n3 3\n").unwrap();
        assert_eq!(list.edges, vec![(0, 1), (1, 2), (2, 3), (0, 3), (3, 3)]);
        assert_eq!(list.node_count, 4);
    }

    #[test]
    fn test_parse_empty_input() {
        let list = parse_str("").unwrap();
        assert_eq!(list.edge_count(), 0);
        assert_eq!(list.node_count, 0);
    }

    #[test]
    fn test_parse_blank_lines_and_mixed_whitespace() {
        let list = parse_str("\n  0\t5  \r\n\n   \n7 2").unwrap();
        assert_eq!(list.edges, vec![(0, 5), (7, 2)]);
        assert_eq!(list.node_count, 8);
    }

    #[test]
    fn test_parse_node_count_from_destination() {
        let list = parse_str("0 9\n").unwrap();
        assert_eq!(list.node_count, 10);
    }

    #[test]
    fn test_parse_rejects_words() {
        let err = parse_str("0 1\nabc def\n").unwrap_err();
        match err {
            GraphError::MalformedInput { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "abc def");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_line_numbers_count_blank_lines() {
        let err = parse_str("0 1\n\n\n4\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 4, .. }));
    }

    #[test]
    fn test_parse_rejects_negative_and_signed() {
        assert!(matches!(
            parse_str("-1 2\n"),
            Err(GraphError::MalformedInput { line: 1, .. })
        ));
        assert!(matches!(
            parse_str("+1 2\n"),
            Err(GraphError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        assert!(matches!(
            parse_str("1 2 0.5\n"),
            Err(GraphError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_oversized_id() {
        let err = parse_str("0 4294967295\n").unwrap_err();
        assert!(matches!(err, GraphError::Capacity { what: "node id", .. }));
        let err = parse_str("0 99999999999999999999999\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { .. }));
    }

    #[test]
    fn test_comments_rejected_by_default() {
        assert!(matches!(
            parse_str("# FromNodeId ToNodeId\n0 1\n"),
            Err(GraphError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_comments_skipped_when_enabled() {
        let options = IngestOptions {
            skip_comments: true,
        };
        let input = "# Directed graph\n# Nodes: 3 Edges: 2\n0 1\n  #indented\n1 2\n";
        let list = parse_reader(Cursor::new(input), "snap.txt", options).unwrap();
        assert_eq!(list.edges, vec![(0, 1), (1, 2)]);
        assert_eq!(list.node_count, 3);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse("/definitely/not/here.txt", IngestOptions::default()).unwrap_err();
        assert!(matches!(err, GraphError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let bytes: &[u8] = b"0 1\n\xff\xfe 2\n";
        let err = parse_reader(bytes, "bin.txt", IngestOptions::default()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));
    }
}
