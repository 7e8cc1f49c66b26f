//! Source trait - common interface for resource inputs.

use crate::core::errors::GenerateError;
use crate::core::resource::RawResource;

/// A source of raw resource tuples.
///
/// Discovery is cheap and sequential; scanning a job may do I/O and is run
/// concurrently on the scan pool, so implementations must be `Sync`.
pub trait ResourceSource: Sync {
    /// Unit of scan work (typically one file).
    type Job: Send + Sync;

    /// Get the source name for display.
    fn name(&self) -> &str;

    /// List the scan jobs, in a deterministic order.
    fn discover(&self) -> Result<Vec<Self::Job>, GenerateError>;

    /// Produce the resources contributed by one job.
    fn scan(&self, job: &Self::Job) -> Result<Vec<RawResource>, GenerateError>;
}
