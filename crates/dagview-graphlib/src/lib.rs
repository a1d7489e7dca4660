#![forbid(unsafe_code)]

//! Graph container APIs used by `dagview`.
//!
//! The container is a directed simple graph keyed by string ids. Nodes and edges keep their
//! insertion order, which every algorithm in `dagview` relies on for deterministic output.
//! Besides the id-based API there is a dense index API (`node_ix`, `successors_ix`, ...) for
//! traversals that want to track visited state in a `Vec<bool>` instead of a hash set.

mod graph;

pub use graph::alg;
pub use graph::{CycleError, EdgeKey, Graph};
