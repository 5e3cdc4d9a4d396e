// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use redgraph_model::Graph;
use tracing::debug;

use crate::error::DecodeError;
use crate::sparse::read_sparse_npz;

/// Decodes the adjacency bundle into a directed graph with one edge per
/// stored entry. The matrix must be square.
pub fn decode_graph(path: &Path) -> Result<Graph, DecodeError> {
    let (format, coo) = read_sparse_npz(path)?;
    if coo.nrows != coo.ncols {
        return Err(DecodeError::in_file(
            path,
            format!("adjacency must be square, got {}x{}", coo.nrows, coo.ncols),
        ));
    }
    let num_nodes = coo.nrows;
    let graph = Graph::from_coo(num_nodes, coo.rows, coo.cols)
        .map_err(|e| DecodeError::in_file(path, e))?;
    debug!(
        path = %path.display(),
        format = format.as_str(),
        num_nodes,
        num_edges = graph.num_edges(),
        "decoded adjacency"
    );
    Ok(graph)
}
