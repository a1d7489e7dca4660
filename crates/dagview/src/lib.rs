#![forbid(unsafe_code)]

//! Collapsible DAG views.
//!
//! `dagview` turns a flat dataset of nodes and `source -> target` links into render frames for a
//! directed acyclic graph whose nodes can be collapsed, dragged and re-oriented. Rendering itself
//! is left to an adapter that draws [`Frame`]s and feeds [`InteractionEvent`]s back.
//!
//! The pipeline, run on every state change:
//! 1. [`store::build_graph`]: canonical DAG with duplicate ids renamed
//! 2. [`visibility::visible_subgraph`]: what the collapse state leaves on screen
//! 3. [`layout::compute_layout`]: layered top-to-bottom layout
//! 4. [`direction::apply_direction`]: orientation map
//! 5. [`overrides::apply_overrides`]: manually dragged positions

pub use dagview_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod anchor;
pub mod content;
pub mod direction;
pub mod error;
pub mod event;
pub mod frame;
pub mod layout;
pub mod model;
pub mod options;
pub mod overrides;
pub mod state;
pub mod store;
pub mod view;
pub mod visibility;

pub use direction::Direction;
pub use error::{Error, ErrorKind, Result, StructureError};
pub use event::{DirectionChange, EventOutcome, InteractionEvent};
pub use frame::{Frame, FrameEdge, FrameNode};
pub use layout::{Layout, LayoutOptions, compute_layout};
pub use model::{Dataset, Point, RawEdge, RawNode};
pub use options::ViewOptions;
pub use state::CollapseAllScope;
pub use store::{Dag, build_graph};
pub use view::DagView;

/// One-shot render: builds the graph and lays it out with everything expanded.
pub fn render(dataset: Dataset, options: &ViewOptions) -> Result<Frame> {
    let mut view = DagView::new(options.clone())?;
    view.load(dataset).cloned()
}
