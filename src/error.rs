//! Error type shared by table loading, constant derivation, and evaluation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error raised while loading static inputs or evaluating a scenario.
///
/// There is no partial-success mode: an evaluation either produces a
/// complete, internally-consistent dataset or one of these errors.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An input file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path of the file that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An input table is malformed (bad header, missing row, unparseable cell).
    #[error("malformed table \"{table}\": {message}")]
    Table {
        /// Table name (file stem).
        table: String,
        /// Row/column context and constraint description.
        message: String,
    },

    /// A selected transit project id does not exist in the project table.
    #[error("unknown transit project \"{0}\"")]
    UnknownProject(String),

    /// A project descriptor violates its service-characteristic constraints.
    #[error("invalid project \"{id}\": {message}")]
    InvalidProject {
        /// Project identifier.
        id: String,
        /// Constraint description.
        message: String,
    },

    /// The baseline dataset cannot support proportional mode shifts.
    #[error("degenerate baseline: {0}")]
    DegenerateBaseline(String),

    /// A lever value is outside its declared domain.
    #[error("invalid lever value: {field}: {message}")]
    InvalidLever {
        /// Dotted field path (e.g. `"bus.ridership_increase"`).
        field: String,
        /// Constraint description.
        message: String,
    },
}
