//! Uploading unsynced matches.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument, warn};

use crate::sync::{MatchUpload, MatchUploader, SyncError};
use crate::{MatchRecord, MatchRepository};

/// Outcome of one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Matches uploaded and marked synced.
    pub uploaded: usize,
    /// Matches that failed and stay unsynced for the next pass.
    pub failed: usize,
}

/// Holds the single-flight flag for one pass and clears it when dropped,
/// including when the pass future is cancelled.
struct PassGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PassGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Pushes every unsynced match to an uploader.
///
/// A match is marked synced only after the uploader accepts it. Network and
/// server failures are counted and left for the next pass; an authorization
/// failure stops the pass.
#[derive(Debug)]
pub struct SyncService<U> {
    repository: MatchRepository,
    uploader: U,
    in_progress: AtomicBool,
}

impl<U: MatchUploader> SyncService<U> {
    /// Creates a sync service.
    #[instrument(skip_all)]
    pub fn new(repository: MatchRepository, uploader: U) -> Self {
        info!("Creating SyncService");
        Self {
            repository,
            uploader,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Uploads every unsynced match, oldest first.
    ///
    /// A call made while another pass is running returns an empty report.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Unauthorized`] if the API rejects the credentials,
    /// or [`SyncError::Storage`] if local storage cannot be read.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> Result<SyncReport, SyncError> {
        let Some(_pass) = PassGuard::acquire(&self.in_progress) else {
            debug!("Sync already running");
            return Ok(SyncReport::default());
        };
        self.run_pass().await
    }

    async fn run_pass(&self) -> Result<SyncReport, SyncError> {
        let pending = self.repository.list_unsynced()?;
        info!(pending = pending.len(), "Starting sync pass");

        let mut report = SyncReport::default();
        for record in &pending {
            match self.sync_match(record).await {
                Ok(()) => report.uploaded += 1,
                Err(SyncError::Unauthorized) => {
                    warn!(id = %record.id(), "Sync stopped, credentials rejected");
                    return Err(SyncError::Unauthorized);
                }
                Err(err) => {
                    warn!(id = %record.id(), error = %err, "Match upload failed, will retry");
                    report.failed += 1;
                }
            }
        }

        info!(uploaded = report.uploaded, failed = report.failed, "Sync pass complete");
        Ok(report)
    }

    /// Uploads one match and marks it synced.
    ///
    /// # Errors
    ///
    /// Returns the uploader's error, leaving the match unsynced.
    #[instrument(skip(self, record), fields(id = %record.id()))]
    pub async fn sync_match(&self, record: &MatchRecord) -> Result<(), SyncError> {
        let events = self.repository.get_events(record.id())?;
        let upload = MatchUpload::from_records(record, &events);
        self.uploader.upload_match(&upload).await?;
        self.repository.mark_synced(record.id())?;
        debug!("Match synced");
        Ok(())
    }
}
