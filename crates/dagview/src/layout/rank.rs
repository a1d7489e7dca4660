//! Rank assignment (longest path).

use crate::error::{Error, Result};
use dagview_graphlib::{Graph, alg};

/// Ranks every node by its longest-path distance from a source.
///
/// Nodes are relaxed in topological order, so each rank is strictly greater than the rank of
/// every parent and sources sit on rank 0.
pub(crate) fn longest_path<N>(g: &Graph<N>) -> Result<Vec<usize>> {
    let order = alg::topsort(g).map_err(|err| Error::layout(err.to_string()))?;

    let mut rank = vec![0usize; g.node_count()];
    for v in order {
        let next = rank[v] + 1;
        for w in g.successors_ix(v) {
            if rank[w] < next {
                rank[w] = next;
            }
        }
    }
    Ok(rank)
}
