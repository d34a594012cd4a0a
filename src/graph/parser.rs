use super::{Graph, NodeId};
use crate::constants::MAX_NODES;

/// Parses a DIMACS shortest-path (`.gr`) formatted byte array into a Graph.
///
/// ```text
/// c comment
/// p sp <num_nodes> <num_arcs>
/// a <from> <to> <weight>
/// ```
///
/// Node ids are 1-indexed in the file. The returned graph stores each node's
/// 1-indexed label as its value, node `k` being `NodeId(k - 1)`.
pub fn parse_dimacs_graph(data: &[u8]) -> Result<Graph<usize>, String> {
    let mut iter = ByteCursor::new(data);

    // Skip comments and find the start of the problem line (`p sp <num_nodes> <num_arcs>`)
    loop {
        iter.skip_ascii_whitespace();
        match iter.peek() {
            Some(b'c') => iter.skip_line(),
            Some(b'p') => break,
            Some(other) => {
                return Err(format!(
                    "Unexpected '{}' while searching for problem line",
                    other as char
                ));
            }
            None => return Err("Unexpected EOF while searching for problem line".to_string()),
        }
    }
    iter.advance_if(b'p');
    iter.skip_inline_whitespace();

    if !iter.skip_expected(b"sp") {
        return Err("Expected problem format 'sp'".to_string());
    }
    iter.skip_inline_whitespace();

    let num_nodes = iter
        .parse_usize()
        .ok_or_else(|| "Expected number of nodes".to_string())?;
    if num_nodes > MAX_NODES {
        return Err(format!(
            "Problem declares {} nodes, at most {} are supported",
            num_nodes, MAX_NODES
        ));
    }
    iter.skip_inline_whitespace();
    let num_arcs = iter
        .parse_usize()
        .ok_or_else(|| "Expected number of arcs".to_string())?;

    let mut graph = Graph::with_capacity(num_nodes);
    for label in 1..=num_nodes {
        graph.add_node(label);
    }

    let mut parsed_arcs = 0;
    while parsed_arcs < num_arcs {
        iter.skip_ascii_whitespace();
        match iter.peek() {
            Some(b'c') => iter.skip_line(),
            Some(b'a') => {
                iter.advance_if(b'a');
                let from = parse_node(&mut iter, num_nodes)?;
                let to = parse_node(&mut iter, num_nodes)?;

                iter.skip_inline_whitespace();
                if iter.advance_if(b'-') {
                    return Err(format!(
                        "Negative weight on arc {} -> {}. Only non-negative weights are supported.",
                        from.0 + 1,
                        to.0 + 1
                    ));
                }
                let weight = iter.parse_u64().ok_or_else(|| {
                    format!("Expected weight of arc {} -> {}", from.0 + 1, to.0 + 1)
                })?;

                graph.add_edge(from, to, weight);
                parsed_arcs += 1;
            }
            Some(other) => {
                return Err(format!(
                    "Unexpected line starting with '{}', expected an arc",
                    other as char
                ));
            }
            None => {
                return Err(format!(
                    "Unexpected EOF after {} arcs. The problem declares {} arcs.",
                    parsed_arcs, num_arcs
                ));
            }
        }
    }

    Ok(graph)
}

/// Parses a 1-indexed node id and converts it to a NodeId.
fn parse_node(iter: &mut ByteCursor, num_nodes: usize) -> Result<NodeId, String> {
    iter.skip_inline_whitespace();
    let node = iter
        .parse_usize()
        .ok_or_else(|| "Expected node id in arc".to_string())?;

    if node == 0 || node > num_nodes {
        return Err(format!(
            "Unexpected node {}. The problem only declares nodes 1 to {}.",
            node, num_nodes
        ));
    }
    Ok(NodeId(node - 1))
}

/// A cursor over a byte array with utility methods for parsing.
struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Advances the cursor if the current byte matches the specified byte.
    fn advance_if(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips past the next newline.
    fn skip_line(&mut self) {
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\n' {
                break;
            }
        }
    }

    /// Skips bytes until the next non-whitespace byte.
    fn skip_ascii_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips spaces and tabs, but not line breaks.
    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    /// If the next bytes match the expected slice, advances the cursor past them.
    fn skip_expected(&mut self, expected: &[u8]) -> bool {
        if self.data[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    /// Parses an unsigned integer from the current position. `None` on no digits or overflow.
    fn parse_u64(&mut self) -> Option<u64> {
        let start = self.pos;
        let mut num = 0u64;
        while let Some(byte) = self.peek().filter(u8::is_ascii_digit) {
            num = num.checked_mul(10)?.checked_add((byte - b'0') as u64)?;
            self.pos += 1;
        }
        (self.pos > start).then_some(num)
    }

    fn parse_usize(&mut self) -> Option<usize> {
        self.parse_u64().and_then(|num| usize::try_from(num).ok())
    }
}
