//! Browser side of the four REST calls.
//!
//! List and delete go through `gloo-net`. Upload uses a raw `XMLHttpRequest`
//! because fetch cannot report upload progress or be aborted mid-body.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use gloo_file::{Blob, File};
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{FormData, ProgressEvent, XmlHttpRequest};

use crate::config::ClientConfig;
use crate::error::{DeleteError, FetchError, UploadError, UploadOutcome};
use crate::transfer::{FileTransfer, LocalFile, ProgressFn, TransferFuture, TransferHandle, UploadTask};
use crate::{FileId, FileRecord};

impl LocalFile for File {
    fn name(&self) -> String {
        File::name(self)
    }

    fn size(&self) -> u64 {
        Blob::size(self)
    }
}

pub struct BrowserClient {
    config: ClientConfig,
}

impl BrowserClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

/// Aborts the underlying `XMLHttpRequest`.
pub struct XhrHandle {
    xhr: XmlHttpRequest,
}

impl TransferHandle for XhrHandle {
    fn abort(&self) {
        if let Err(e) = self.xhr.abort() {
            log::warn!("Failed to abort upload: {:?}", e);
        }
    }
}

type OutcomeSlot = Rc<RefCell<Option<oneshot::Sender<UploadOutcome>>>>;

fn settle(slot: &OutcomeSlot, outcome: UploadOutcome) {
    if let Some(sender) = slot.borrow_mut().take() {
        let _ = sender.send(outcome);
    }
}

fn setup_error(e: JsValue) -> UploadError {
    UploadError::Setup(format!("{:?}", e))
}

impl FileTransfer for BrowserClient {
    type File = File;
    type Handle = XhrHandle;

    fn list(&self) -> TransferFuture<'_, Result<Vec<FileRecord>, FetchError>> {
        Box::pin(async move {
            let response = Request::get(&self.config.list_url())
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(FetchError::Status {
                    status: response.status(),
                });
            }
            response
                .json::<Vec<FileRecord>>()
                .await
                .map_err(|e| FetchError::Decode(e.to_string()))
        })
    }

    fn upload(
        &self,
        file: &File,
        on_progress: ProgressFn,
    ) -> Result<UploadTask<XhrHandle>, UploadError> {
        let form_data = FormData::new().map_err(setup_error)?;
        let raw: &web_sys::File = file.as_ref();
        form_data
            .append_with_blob("file", raw)
            .map_err(setup_error)?;

        let xhr = XmlHttpRequest::new().map_err(setup_error)?;
        xhr.open("POST", &self.config.upload_url())
            .map_err(setup_error)?;

        let (sender, receiver) = oneshot::channel();
        let slot: OutcomeSlot = Rc::new(RefCell::new(Some(sender)));

        let on_upload_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            if event.length_computable() && event.total() > 0.0 {
                on_progress(event.loaded() / event.total());
            }
        });
        xhr.upload()
            .map_err(setup_error)?
            .add_event_listener_with_callback("progress", on_upload_progress.as_ref().unchecked_ref())
            .map_err(setup_error)?;

        let on_load = {
            let xhr = xhr.clone();
            let slot = Rc::clone(&slot);
            Closure::<dyn FnMut()>::new(move || {
                let outcome = match xhr.status() {
                    Ok(status) if (200..300).contains(&status) => UploadOutcome::Completed,
                    Ok(status) => {
                        let body = xhr.response_text().ok().flatten().unwrap_or_default();
                        UploadOutcome::Failed(UploadError::rejected(status, &body))
                    }
                    Err(e) => UploadOutcome::Failed(UploadError::Network(format!("{:?}", e))),
                };
                settle(&slot, outcome);
            })
        };
        let on_error = {
            let slot = Rc::clone(&slot);
            Closure::<dyn FnMut()>::new(move || {
                settle(
                    &slot,
                    UploadOutcome::Failed(UploadError::Network("network error".into())),
                );
            })
        };
        let on_abort = {
            let slot = Rc::clone(&slot);
            Closure::<dyn FnMut()>::new(move || settle(&slot, UploadOutcome::Cancelled))
        };
        for (event, callback) in [("load", &on_load), ("error", &on_error), ("abort", &on_abort)] {
            xhr.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                .map_err(setup_error)?;
        }

        xhr.send_with_opt_form_data(Some(&form_data))
            .map_err(setup_error)?;

        let outcome = Box::pin(async move {
            // Listeners must outlive the request.
            let _listeners = (on_upload_progress, on_load, on_error, on_abort);
            receiver.await.unwrap_or(UploadOutcome::Cancelled)
        });

        Ok(UploadTask {
            handle: XhrHandle { xhr },
            outcome,
        })
    }

    fn download(&self, id: &FileId) {
        let url = self.config.file_url(id);
        let Some(window) = web_sys::window() else {
            log::error!("no window to download {} from", url);
            return;
        };
        if let Err(e) = window.location().set_href(&url) {
            log::error!("Error downloading file: {:?}", e);
        }
    }

    fn delete(&self, id: &FileId) -> TransferFuture<'_, Result<(), DeleteError>> {
        let id = id.clone();
        Box::pin(async move {
            let response = Request::delete(&self.config.file_url(&id))
                .send()
                .await
                .map_err(|e| DeleteError::Network {
                    id: id.clone(),
                    reason: e.to_string(),
                })?;
            if response.ok() {
                Ok(())
            } else {
                Err(DeleteError::Status {
                    id,
                    status: response.status(),
                })
            }
        })
    }
}
