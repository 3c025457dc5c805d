//! Project fabrication: skeleton layout, progress contract, and the
//! twelve-step generation run

pub mod error;
pub mod fabricator;
pub mod progress;
pub mod skeleton;

pub use error::FabricationError;
pub use fabricator::{
    expected_progress_count, Fabricator, PACKAGE_MARKER_FILENAME, PYTHON_VERSION_FILENAME,
};
pub use progress::{CollectingSink, ProgressSink};
pub use skeleton::SkeletonDirectories;
