//! Parallel scan feeding a single table builder.
//!
//! Scan jobs run on a rayon pool and push their resources into a bounded
//! channel. The calling thread is the only consumer and performs every
//! table insertion, so duplicate detection stays a plain check-then-insert.
//!
//! ```text
//! job, job, job ... --(rayon workers)--> sync_channel(capacity) --> TableBuilder
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};

use rayon::prelude::*;

use crate::builder::TableBuilder;
use crate::core::errors::GenerateError;
use crate::core::resource::RawResource;
use crate::util::cancel::CancellationToken;
use crate::util::config::{ScanConfig, DEFAULT_QUEUE_CAPACITY};

/// Tuning for [`fold_parallel`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Number of scan workers (None = rayon default)
    pub jobs: Option<usize>,
    /// Maximum number of resources buffered between workers and builder
    pub queue_capacity: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            jobs: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl PipelineOptions {
    pub fn from_config(config: &ScanConfig) -> Self {
        PipelineOptions {
            jobs: config.jobs,
            queue_capacity: config.queue_capacity(),
        }
    }
}

type Message = Result<RawResource, GenerateError>;

/// Scan `jobs` in parallel and fold every produced resource into `builder`.
///
/// The first error, from a worker or from the builder, stops the run:
/// workers observe the stop flag or a closed channel and exit early, and
/// the error is returned. Cancellation is checked between jobs and between
/// resources.
pub fn fold_parallel<J, F>(
    jobs: &[J],
    scan: F,
    builder: &mut TableBuilder,
    options: &PipelineOptions,
    cancel: &CancellationToken,
) -> Result<(), GenerateError>
where
    J: Sync,
    F: Fn(&J) -> Result<Vec<RawResource>, GenerateError> + Sync,
{
    cancel.check()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.unwrap_or(0))
        .thread_name(|i| format!("resforge-scan-{}", i))
        .build()
        .map_err(|e| GenerateError::WorkerPool(e.to_string()))?;

    let (tx, rx) = mpsc::sync_channel::<Message>(options.queue_capacity.max(1));
    let stop = AtomicBool::new(false);
    let scan = &scan;
    let stop_ref = &stop;

    std::thread::scope(|scope| {
        scope.spawn(move || {
            pool.install(|| {
                // Err(()) only short-circuits the iteration; the real error
                // travels through the channel.
                let _ = jobs.par_iter().try_for_each_with(tx, |tx, job| {
                    if stop_ref.load(Ordering::Relaxed) || cancel.is_cancelled() {
                        return Err(());
                    }
                    match scan(job) {
                        Ok(resources) => {
                            for resource in resources {
                                tx.send(Ok(resource)).map_err(|_| ())?;
                            }
                            Ok(())
                        }
                        Err(e) => {
                            let _ = tx.send(Err(e));
                            Err(())
                        }
                    }
                });
            });
        });

        let result = drain(rx, builder, cancel);
        if result.is_err() {
            stop.store(true, Ordering::Relaxed);
        }
        result
    })
}

/// Consume the channel until all senders are gone or an error occurs.
///
/// Takes the receiver by value so that returning early closes the channel
/// and unblocks any worker waiting on a full queue.
fn drain(
    rx: Receiver<Message>,
    builder: &mut TableBuilder,
    cancel: &CancellationToken,
) -> Result<(), GenerateError> {
    for message in rx {
        cancel.check()?;
        builder.insert(message?)?;
    }
    cancel.check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildPolicy;
    use crate::core::resource_type::ResourceType;

    fn string_job(i: usize) -> Vec<RawResource> {
        vec![
            RawResource::new("string", format!("str_{}", i), "", "values/strings.xml"),
            RawResource::new("string", format!("str_{}", i), "fr", "values-fr/strings.xml"),
        ]
    }

    #[test]
    fn test_parallel_fold_matches_sequential() {
        let jobs: Vec<usize> = (0..200).collect();
        let options = PipelineOptions {
            jobs: Some(4),
            queue_capacity: 8,
        };

        let mut parallel = TableBuilder::new(BuildPolicy::default());
        fold_parallel(
            &jobs,
            |i| Ok(string_job(*i)),
            &mut parallel,
            &options,
            &CancellationToken::new(),
        )
        .unwrap();

        let mut sequential = TableBuilder::new(BuildPolicy::default());
        for i in &jobs {
            sequential.extend(string_job(*i)).unwrap();
        }

        let a = parallel.finalize().unwrap().table;
        let b = sequential.finalize().unwrap().table;
        assert_eq!(a, b);
        assert_eq!(a.of_type(ResourceType::String).len(), 200);
    }

    #[test]
    fn test_scan_error_stops_run() {
        let jobs: Vec<usize> = (0..50).collect();
        let mut builder = TableBuilder::new(BuildPolicy::default());
        let err = fold_parallel(
            &jobs,
            |i| {
                if *i == 17 {
                    Err(GenerateError::InvalidValuesFile {
                        path: "values/bad.xml".to_string(),
                        reason: "Check the file content.".to_string(),
                    })
                } else {
                    Ok(string_job(*i))
                }
            },
            &mut builder,
            &PipelineOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidValuesFile { .. }));
    }

    #[test]
    fn test_builder_error_closes_queue() {
        // Every job yields the same key, so the second job conflicts while
        // later workers may be blocked on the tiny queue.
        let jobs: Vec<usize> = (0..64).collect();
        let mut builder = TableBuilder::new(BuildPolicy::default());
        let options = PipelineOptions {
            jobs: Some(2),
            queue_capacity: 1,
        };
        let err = fold_parallel(
            &jobs,
            |_| Ok(string_job(0)),
            &mut builder,
            &options,
            &CancellationToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateVariant { .. }));
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut builder = TableBuilder::new(BuildPolicy::default());
        let err = fold_parallel(
            &[1usize, 2, 3],
            |i| Ok(string_job(*i)),
            &mut builder,
            &PipelineOptions::default(),
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::Cancelled));
        assert_eq!(builder.entry_count(), 0);
    }

    #[test]
    fn test_cancel_during_scan() {
        let cancel = CancellationToken::new();
        let jobs: Vec<usize> = (0..100).collect();
        let mut builder = TableBuilder::new(BuildPolicy::default());
        let err = fold_parallel(
            &jobs,
            |i| {
                if *i == 10 {
                    cancel.cancel();
                }
                Ok(string_job(*i))
            },
            &mut builder,
            &PipelineOptions {
                jobs: Some(1),
                queue_capacity: 4,
            },
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::Cancelled));
    }
}
