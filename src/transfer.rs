//! Contract of the four REST calls the client depends on.
//!
//! None of the operations retry. Implementations exist for the browser
//! (`frontend::client::BrowserClient`) and as fakes in tests.

use std::{future::Future, pin::Pin};

use crate::error::{DeleteError, FetchError, UploadError, UploadOutcome};
use crate::{FileId, FileRecord};

/// Object-safe boxed future used by [`FileTransfer`].
pub type TransferFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Receives `bytes_sent / total_bytes` while an upload runs.
pub type ProgressFn = Box<dyn Fn(f64)>;

/// A local, not yet uploaded file.
pub trait LocalFile: Clone {
    fn name(&self) -> String;
    fn size(&self) -> u64;
}

/// Cancellable handle to an in-progress upload.
pub trait TransferHandle {
    /// Aborts the transfer. Its future then resolves to [`UploadOutcome::Cancelled`].
    fn abort(&self);
}

/// A started upload: the handle to abort it and the future of its outcome.
pub struct UploadTask<H> {
    pub handle: H,
    pub outcome: TransferFuture<'static, UploadOutcome>,
}

pub trait FileTransfer {
    type File: LocalFile;
    type Handle: TransferHandle;

    /// Records in the order the service returned them.
    fn list(&self) -> TransferFuture<'_, Result<Vec<FileRecord>, FetchError>>;

    /// Sends `file` as multipart field `file`.
    fn upload(
        &self,
        file: &Self::File,
        on_progress: ProgressFn,
    ) -> Result<UploadTask<Self::Handle>, UploadError>;

    /// Hands the download URL to the browser; the response is never inspected.
    fn download(&self, id: &FileId);

    fn delete(&self, id: &FileId) -> TransferFuture<'_, Result<(), DeleteError>>;
}
