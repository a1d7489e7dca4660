//! Edge normalization: long edges become chains of unit-length edges through dummy vertices.

/// Dense layered graph used by ordering and positioning.
///
/// Vertices `0..real_count()` are the visible nodes (same indices as the ranking graph); the rest
/// are dummies. `chains[e]` lists the dummies of input edge `e`, top to bottom.
#[derive(Debug, Clone, Default)]
pub(crate) struct LayerGraph {
    pub(crate) rank: Vec<usize>,
    pub(crate) succ: Vec<Vec<usize>>,
    pub(crate) pred: Vec<Vec<usize>>,
    pub(crate) chains: Vec<Vec<usize>>,
    real: usize,
}

impl LayerGraph {
    pub(crate) fn len(&self) -> usize {
        self.rank.len()
    }

    pub(crate) fn real_count(&self) -> usize {
        self.real
    }

    pub(crate) fn max_rank(&self) -> Option<usize> {
        self.rank.iter().copied().max()
    }

    fn push_vertex(&mut self, rank: usize) -> usize {
        self.rank.push(rank);
        self.succ.push(Vec::new());
        self.pred.push(Vec::new());
        self.rank.len() - 1
    }

    fn link(&mut self, v: usize, w: usize) {
        self.succ[v].push(w);
        self.pred[w].push(v);
    }
}

pub(crate) fn split_long_edges(ranks: &[usize], edges: &[(usize, usize)]) -> LayerGraph {
    let mut lg = LayerGraph {
        rank: Vec::with_capacity(ranks.len()),
        succ: Vec::with_capacity(ranks.len()),
        pred: Vec::with_capacity(ranks.len()),
        chains: Vec::with_capacity(edges.len()),
        real: ranks.len(),
    };
    for &r in ranks {
        lg.push_vertex(r);
    }

    for &(v, w) in edges {
        let mut chain: Vec<usize> = Vec::new();
        let mut prev = v;
        for r in ranks[v] + 1..ranks[w] {
            let d = lg.push_vertex(r);
            lg.link(prev, d);
            chain.push(d);
            prev = d;
        }
        lg.link(prev, w);
        lg.chains.push(chain);
    }
    lg
}
