use dagview_graphlib::CycleError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {message}")]
    Input { message: String },

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("nothing to display: every node is hidden (expand nodes or check the dataset)")]
    EmptyVisibility,

    #[error("layout failed: {message}")]
    Layout { message: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructureError {
    #[error("graph contains a cycle through [{}]", .nodes.join(", "))]
    Cycle { nodes: Vec<String> },

    #[error("edge {from} -> {to} references missing node {missing}")]
    DanglingEndpoint {
        from: String,
        to: String,
        missing: String,
    },

    #[error("duplicate node id could not be resolved: {id}")]
    UnresolvedDuplicate { id: String },
}

impl From<CycleError> for StructureError {
    fn from(value: CycleError) -> Self {
        Self::Cycle { nodes: value.nodes }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Input,
    Structure,
    EmptyVisibility,
    Layout,
}

impl Error {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Input { .. } => ErrorKind::Input,
            Error::Structure(_) => ErrorKind::Structure,
            Error::EmptyVisibility => ErrorKind::EmptyVisibility,
            Error::Layout { .. } => ErrorKind::Layout,
        }
    }

    /// Input and empty-visibility errors are shown as an empty state rather than a failure.
    /// No error kind replaces what the view displayed before.
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Error::EmptyVisibility | Error::Input { .. })
    }
}
