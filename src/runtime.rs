//! Effect executor tying the controller to network I/O, timers and the page.
//!
//! Everything runs on one thread: UI handlers call [`Runtime::dispatch`], and
//! network completions and timer callbacks come back through it as intents.
//! No `RefCell` borrow is held while effects run, so effects may dispatch.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::join_all;

use crate::config::ClientConfig;
use crate::controller::{reduce, AppState, Effect, Intent};
use crate::error::{UploadError, UploadOutcome};
use crate::toast::ToastId;
use crate::transfer::{FileTransfer, LocalFile, ProgressFn, TransferHandle};
use crate::upload::{PendingFile, UploadTicket};
use crate::view::View;

/// A task spawned on the single UI thread.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Page-side services the runtime needs.
pub trait Host {
    /// Dropping a timer cancels it.
    type Timer;

    fn spawn(&self, task: LocalTask);

    fn start_timer(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Timer;

    fn push_history(&self, view: View);

    fn reset_file_input(&self);

    /// Called after every state transition.
    fn render(&self, state: &AppState);
}

pub struct Runtime<T: FileTransfer, H: Host> {
    inner: Rc<Inner<T, H>>,
}

impl<T: FileTransfer, H: Host> Clone for Runtime<T, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

struct Inner<T: FileTransfer, H: Host> {
    state: RefCell<AppState>,
    transfer: T,
    host: H,
    config: ClientConfig,
    file: RefCell<Option<T::File>>,
    upload: RefCell<Option<(UploadTicket, T::Handle)>>,
    refresh_timer: RefCell<Option<H::Timer>>,
    toast_timers: RefCell<HashMap<ToastId, H::Timer>>,
}

impl<T, H> Runtime<T, H>
where
    T: FileTransfer + 'static,
    H: Host + 'static,
{
    pub fn new(transfer: T, host: H, config: ClientConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(AppState::default()),
                transfer,
                host,
                config,
                file: RefCell::new(None),
                upload: RefCell::new(None),
                refresh_timer: RefCell::new(None),
                toast_timers: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn dispatch(&self, intent: Intent) {
        let effects = reduce(&mut self.inner.state.borrow_mut(), intent);
        self.inner.host.render(&self.inner.state.borrow());
        for effect in effects {
            self.execute(effect);
        }
    }

    /// Remembers `file` as the pending upload, replacing any previous one.
    pub fn select_file(&self, file: T::File) {
        let meta = PendingFile {
            name: file.name(),
            size: file.size(),
        };
        *self.inner.file.borrow_mut() = Some(file);
        self.dispatch(Intent::SelectFile(meta));
    }

    fn downgrade(&self) -> WeakRuntime<T, H> {
        WeakRuntime(Rc::downgrade(&self.inner))
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        self.inner.host.spawn(Box::pin(task(self.clone())));
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::LoadFiles { seq } => self.spawn(|this| async move {
                let result = this.inner.transfer.list().await;
                this.dispatch(Intent::FilesLoaded { seq, result });
            }),
            Effect::ScheduleRefresh { generation } => {
                let weak = self.downgrade();
                let timer = self.inner.host.start_timer(
                    self.inner.config.auto_refresh_interval,
                    Box::new(move || weak.dispatch(Intent::RefreshTick { generation })),
                );
                let previous = self.inner.refresh_timer.replace(Some(timer));
                drop(previous);
            }
            Effect::CancelRefresh => {
                let previous = self.inner.refresh_timer.take();
                drop(previous);
            }
            Effect::PushHistory(view) => self.inner.host.push_history(view),
            Effect::Download(id) => {
                log::info!("downloading file {}", id);
                self.inner.transfer.download(&id);
            }
            Effect::DeleteFile(id) => self.spawn(|this| async move {
                let result = this.inner.transfer.delete(&id).await;
                this.dispatch(Intent::DeleteFinished { id, result });
            }),
            Effect::DeleteFiles(ids) => self.spawn(|this| async move {
                let count = ids.len();
                let results =
                    join_all(ids.iter().map(|id| this.inner.transfer.delete(id))).await;
                let mut first_failure = None;
                for failure in results.into_iter().filter_map(Result::err) {
                    log::error!("bulk delete: {}", failure);
                    first_failure.get_or_insert(failure);
                }
                let result = match first_failure {
                    Some(failure) => Err(failure),
                    None => Ok(()),
                };
                this.dispatch(Intent::BulkDeleteFinished { count, result });
            }),
            Effect::StartUpload { ticket } => self.start_upload(ticket),
            Effect::AbortUpload { ticket } => {
                let in_flight = {
                    let mut slot = self.inner.upload.borrow_mut();
                    match slot.as_ref() {
                        Some((current, _)) if *current == ticket => slot.take(),
                        _ => None,
                    }
                };
                if let Some((_, handle)) = in_flight {
                    log::info!("aborting upload {}", ticket);
                    handle.abort();
                }
            }
            Effect::ResetFileInput => {
                let previous = self.inner.file.take();
                drop(previous);
                self.inner.host.reset_file_input();
            }
            Effect::ExpireToastLater(id) => {
                self.start_toast_timer(id, self.inner.config.toast_duration, Intent::ToastExpired(id))
            }
            Effect::RemoveToastLater(id) => {
                self.start_toast_timer(id, self.inner.config.toast_fade, Intent::ToastRemoved(id))
            }
        }
    }

    fn start_upload(&self, ticket: UploadTicket) {
        let file = self.inner.file.borrow().clone();
        let Some(file) = file else {
            log::warn!("upload {} requested without a pending file", ticket);
            let outcome = UploadOutcome::Failed(UploadError::Setup("no file selected".into()));
            self.dispatch(Intent::UploadFinished { ticket, outcome });
            return;
        };

        let weak = self.downgrade();
        let on_progress: ProgressFn =
            Box::new(move |fraction| weak.dispatch(Intent::UploadProgress { ticket, fraction }));

        log::info!("uploading {} as transfer {}", file.name(), ticket);
        match self.inner.transfer.upload(&file, on_progress) {
            Ok(task) => {
                let previous = self.inner.upload.replace(Some((ticket, task.handle)));
                drop(previous);
                let outcome = task.outcome;
                self.spawn(move |this| async move {
                    let outcome = outcome.await;
                    this.finish_upload(ticket, outcome);
                });
            }
            Err(e) => {
                let outcome = UploadOutcome::Failed(e);
                self.dispatch(Intent::UploadFinished { ticket, outcome });
            }
        }
    }

    fn finish_upload(&self, ticket: UploadTicket, outcome: UploadOutcome) {
        let finished = {
            let mut slot = self.inner.upload.borrow_mut();
            match slot.as_ref() {
                Some((current, _)) if *current == ticket => slot.take(),
                _ => None,
            }
        };
        drop(finished);
        self.dispatch(Intent::UploadFinished { ticket, outcome });
    }

    fn start_toast_timer(&self, id: ToastId, delay: Duration, intent: Intent) {
        let weak = self.downgrade();
        let last_phase = matches!(intent, Intent::ToastRemoved(_));
        let timer = self.inner.host.start_timer(
            delay,
            Box::new(move || {
                if last_phase {
                    weak.forget_toast_timer(id);
                }
                weak.dispatch(intent);
            }),
        );
        let previous = self.inner.toast_timers.borrow_mut().insert(id, timer);
        drop(previous);
    }
}

/// Dispatch target for timers and progress callbacks that must not keep the runtime alive.
struct WeakRuntime<T: FileTransfer, H: Host>(Weak<Inner<T, H>>);

impl<T, H> WeakRuntime<T, H>
where
    T: FileTransfer + 'static,
    H: Host + 'static,
{
    fn dispatch(&self, intent: Intent) {
        if let Some(inner) = self.0.upgrade() {
            Runtime { inner }.dispatch(intent);
        }
    }

    fn forget_toast_timer(&self, id: ToastId) {
        if let Some(inner) = self.0.upgrade() {
            let finished = inner.toast_timers.borrow_mut().remove(&id);
            drop(finished);
        }
    }
}
