//! Within-rank ordering.
//!
//! Initial order comes from a depth-first walk; it is then improved by alternating down and up
//! barycenter sweeps. The layering with the fewest crossings wins, and the search stops after
//! four sweeps without improvement.

use super::normalize::LayerGraph;

/// Orders every rank. Returns the layering (vertex indices per rank, left to right) and its
/// crossing count.
pub(crate) fn order(lg: &LayerGraph, max_sweeps: usize) -> (Vec<Vec<usize>>, usize) {
    let Some(max_rank) = lg.max_rank() else {
        return (Vec::new(), 0);
    };

    let mut layering = init_order(lg, max_rank);
    let mut best_cc = cross_count(lg, &layering);
    let mut best = layering.clone();

    let mut i: usize = 0;
    let mut last_best: usize = 0;
    while last_best < 4 && i < max_sweeps && best_cc > 0 {
        let down = i % 2 == 0;
        let bias_right = i % 4 >= 2;
        sweep(lg, &mut layering, down, bias_right);

        let cc = cross_count(lg, &layering);
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best = layering.clone();
        }
        i += 1;
        last_best += 1;
    }

    tracing::trace!(sweeps = i, crossings = best_cc, "ordered ranks");
    (best, best_cc)
}

/// Depth-first order: vertices are visited by (rank, index) and each walk places successors
/// before moving on, which keeps connected vertices close together.
fn init_order(lg: &LayerGraph, max_rank: usize) -> Vec<Vec<usize>> {
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    let mut visited = vec![false; lg.len()];

    let mut starts: Vec<usize> = (0..lg.len()).collect();
    starts.sort_by_key(|&v| (lg.rank[v], v));

    let mut stack: Vec<usize> = Vec::new();
    for start in starts {
        stack.push(start);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            layers[lg.rank[v]].push(v);
            for &w in lg.succ[v].iter().rev() {
                if !visited[w] {
                    stack.push(w);
                }
            }
        }
    }
    layers
}

fn sweep(lg: &LayerGraph, layering: &mut [Vec<usize>], down: bool, bias_right: bool) {
    let mut pos = vec![0usize; lg.len()];
    for layer in layering.iter() {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }

    let ranks: Vec<usize> = if down {
        (1..layering.len()).collect()
    } else {
        (0..layering.len().saturating_sub(1)).rev().collect()
    };

    for r in ranks {
        let barycenters: Vec<Option<f64>> = layering[r]
            .iter()
            .map(|&v| {
                let fixed = if down { &lg.pred[v] } else { &lg.succ[v] };
                if fixed.is_empty() {
                    return None;
                }
                let sum: usize = fixed.iter().map(|&u| pos[u]).sum();
                Some(sum as f64 / fixed.len() as f64)
            })
            .collect();

        let sorted = sort_layer(&layering[r], &barycenters, bias_right);
        for (i, &v) in sorted.iter().enumerate() {
            pos[v] = i;
        }
        layering[r] = sorted;
    }
}

/// Sorts vertices by barycenter. Vertices without one keep their current slot; ties keep the
/// current order, or reverse it when `bias_right` is set.
fn sort_layer(layer: &[usize], barycenters: &[Option<f64>], bias_right: bool) -> Vec<usize> {
    let mut sortable: Vec<(f64, usize, usize)> = Vec::new();
    let mut unsortable: Vec<(usize, usize)> = Vec::new();
    for (i, (&v, bc)) in layer.iter().zip(barycenters).enumerate() {
        match bc {
            Some(bc) => sortable.push((*bc, i, v)),
            None => unsortable.push((i, v)),
        }
    }

    sortable.sort_by(|a, b| {
        a.0.total_cmp(&b.0).then_with(|| {
            if bias_right {
                b.1.cmp(&a.1)
            } else {
                a.1.cmp(&b.1)
            }
        })
    });
    // Popped from the back, so smallest slot first.
    unsortable.reverse();

    let mut out: Vec<usize> = Vec::with_capacity(layer.len());
    place_unsortable(&mut out, &mut unsortable);
    for (_, _, v) in sortable {
        out.push(v);
        place_unsortable(&mut out, &mut unsortable);
    }
    while let Some((_, v)) = unsortable.pop() {
        out.push(v);
    }
    out
}

fn place_unsortable(out: &mut Vec<usize>, unsortable: &mut Vec<(usize, usize)>) {
    while let Some(&(i, v)) = unsortable.last() {
        if i > out.len() {
            break;
        }
        out.push(v);
        unsortable.pop();
    }
}

/// Total number of edge crossings between consecutive ranks.
pub(crate) fn cross_count(lg: &LayerGraph, layering: &[Vec<usize>]) -> usize {
    let mut pos = vec![0usize; lg.len()];
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(lg, &pos, &pair[0], &pair[1]))
        .sum()
}

// Accumulator tree over the south layer (Barth, Juenger and Mutzel).
fn two_layer_cross_count(
    lg: &LayerGraph,
    pos: &[usize],
    north: &[usize],
    south: &[usize],
) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = lg.succ[v].iter().map(|&w| pos[w]).collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc: usize = 0;
    for entry in south_entries {
        let mut index = entry + first_index;
        tree[index] += 1;
        let mut weight_sum: usize = 0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }
    cc
}
