//! Remote synchronization of completed matches.

mod client;
mod credentials;
mod error;
mod payload;
mod service;

pub use client::{ApiClient, MatchUploader};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TokenPair};
pub use error::SyncError;
pub use payload::{EventUpload, MatchUpload};
pub use service::{SyncReport, SyncService};
