//! Error types for the editing/rendering sync.

use resona_core::{DecodeError, ParamError, ParamId, TableError};
use thiserror::Error;

/// Errors raised by [`EditController`](crate::EditController) and
/// [`RenderProcessor`](crate::RenderProcessor).
///
/// All of these surface on the editing side or during activation; the
/// per-frame rendering path never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// `activate` called while a processor is already live.
    #[error("processor already active")]
    AlreadyActive,

    /// State blob written by a newer plugin version.
    #[error("state version {found} is newer than supported version {supported}")]
    FutureVersion {
        /// Version stored in the blob.
        found: u64,
        /// Version of the current table.
        supported: u64,
    },

    /// The editing side tried to write an output parameter.
    #[error("parameter {0} is read-only")]
    ReadOnly(ParamId),

    /// State blob could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Bad id or value count.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Parameter table could not be built.
    #[error(transparent)]
    Table(#[from] TableError),
}
