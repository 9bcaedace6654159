//! Result persistence and progress reporting
//!
//! External collaborators of the traversal engine: deriving a local
//! filesystem path for a retrieved resource, writing resource payloads to
//! disk (batched or incrementally via the observer interface), and rendering
//! a live progress bar from traversal events.

mod path;
mod progress;
mod writer;

pub use path::local_path;
pub use progress::ProgressReporter;
pub use writer::ResourceWriter;
