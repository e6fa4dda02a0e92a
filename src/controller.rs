//! Application state, UI intents, side-effect requests, and the transition logic between them.
//!
//! [`reduce`] is the only place [`AppState`] mutates. Network calls and timers
//! are requested as [`Effect`]s and their results come back as [`Intent`]s.

use crate::dialog::{pluralize_files, ConfirmAction, ConfirmDialog};
use crate::error::{DeleteError, FetchError, UploadOutcome};
use crate::listing::Listing;
use crate::selection::Selection;
use crate::toast::{ToastId, ToastKind, ToastQueue};
use crate::upload::{PendingFile, UploadFlow, UploadTicket};
use crate::view::View;
use crate::{FileId, FileRecord};

const LOAD_FAILED: &str = "Failed to load files. Please try again.";
const DELETE_OK: &str = "File deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete file. Please try again.";
const BULK_DELETE_FAILED: &str = "Failed to delete the selected files. Please try again.";
const UPLOAD_OK: &str = "File uploaded successfully!";
const UPLOAD_CANCELLED: &str = "Upload cancelled.";

#[derive(Debug, Clone, Default, PartialEq)]
/// Client-side state of the file manager.
pub struct AppState {
    /// Panel currently shown.
    pub view: View,
    /// Collection from the last successful list load, in server order.
    pub files: Vec<FileRecord>,
    /// List and delete requests still in flight.
    pub pending_requests: u32,
    /// Identifiers checked for bulk delete.
    pub selection: Selection,
    /// Pending local file and in-flight transfer.
    pub upload: UploadFlow,
    /// Open confirmation dialog, if any.
    pub dialog: Option<ConfirmDialog>,
    /// Visible notifications.
    pub toasts: ToastQueue,
    /// Generation of the armed auto-refresh timer; older ticks are stale.
    pub refresh_generation: u64,
    /// Sequence number of the latest list request issued.
    pub load_seq: u64,
    /// Sequence number of the list response currently shown.
    pub applied_load: u64,
}

impl AppState {
    pub fn listing(&self) -> Listing {
        Listing::build(&self.files, &self.selection)
    }

    /// Whether the loading indicator is shown.
    pub fn loading(&self) -> bool {
        self.pending_requests > 0
    }

    fn request_started(&mut self) {
        self.pending_requests += 1;
    }

    fn request_settled(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
    }

    fn load(&mut self, effects: &mut Vec<Effect>) {
        self.load_seq += 1;
        self.request_started();
        effects.push(Effect::LoadFiles { seq: self.load_seq });
    }

    fn find(&self, id: &FileId) -> Option<&FileRecord> {
        self.files.iter().find(|f| &f.id == id)
    }

    fn toast(&mut self, effects: &mut Vec<Effect>, kind: ToastKind, message: impl Into<String>) {
        let id = self.toasts.push(kind, message);
        effects.push(Effect::ExpireToastLater(id));
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Triggers accepted by [`reduce`].
pub enum Intent {
    /// Show a panel and record it in history.
    Navigate(View),
    /// Browser back/forward landed on `fragment`.
    HistoryChanged(String),
    /// The auto-refresh timer fired.
    RefreshTick {
        /// Generation the timer was armed with.
        generation: u64,
    },
    /// A list request finished.
    FilesLoaded {
        /// Sequence number the request was issued with.
        seq: u64,
        /// Request outcome.
        result: Result<Vec<FileRecord>, FetchError>,
    },
    /// A row checkbox changed.
    ToggleSelection {
        /// Row identifier.
        id: FileId,
        /// New checkbox state.
        checked: bool,
    },
    /// The "select all" checkbox changed.
    ToggleSelectAll(bool),
    /// Download button of a row.
    Download(FileId),
    /// Delete button of a row.
    RequestDelete(FileId),
    /// Bulk delete button.
    RequestBulkDelete,
    /// Confirmation dialog "yes".
    ConfirmDialog,
    /// Confirmation dialog "no".
    DismissDialog,
    /// A single delete request finished.
    DeleteFinished {
        /// Deleted identifier.
        id: FileId,
        /// Request outcome.
        result: Result<(), DeleteError>,
    },
    /// Every request of a bulk delete finished.
    BulkDeleteFinished {
        /// Number of identifiers in the batch.
        count: usize,
        /// `Err` with the first failure when any request failed.
        result: Result<(), DeleteError>,
    },
    /// A local file was dropped or picked.
    SelectFile(PendingFile),
    /// Upload button.
    StartUpload,
    /// Cancel button of the upload panel.
    CancelUpload,
    /// Progress of a transfer.
    UploadProgress {
        /// Transfer the progress belongs to.
        ticket: UploadTicket,
        /// `bytes_sent / total_bytes`.
        fraction: f64,
    },
    /// A transfer ended.
    UploadFinished {
        /// Transfer that ended.
        ticket: UploadTicket,
        /// How it ended.
        outcome: UploadOutcome,
    },
    /// A toast's display time elapsed.
    ToastExpired(ToastId),
    /// A toast's fade-out elapsed.
    ToastRemoved(ToastId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side effects requested by [`reduce`] for the runtime to execute.
pub enum Effect {
    /// Issue a list request; answer with [`Intent::FilesLoaded`].
    LoadFiles {
        /// Sequence number to report back.
        seq: u64,
    },
    /// (Re)arm the auto-refresh timer; answer with [`Intent::RefreshTick`].
    ScheduleRefresh {
        /// Generation to report back.
        generation: u64,
    },
    /// Drop the auto-refresh timer.
    CancelRefresh,
    /// Push a history entry for the view.
    PushHistory(View),
    /// Navigate the browser to the download URL.
    Download(FileId),
    /// Issue one delete; answer with [`Intent::DeleteFinished`].
    DeleteFile(FileId),
    /// Issue one delete per id concurrently; answer with [`Intent::BulkDeleteFinished`].
    DeleteFiles(Vec<FileId>),
    /// Upload the pending local file under `ticket`.
    StartUpload {
        /// Ticket of the new transfer.
        ticket: UploadTicket,
    },
    /// Abort the transfer with `ticket`.
    AbortUpload {
        /// Ticket of the transfer to abort.
        ticket: UploadTicket,
    },
    /// Forget the pending local file and clear the file input.
    ResetFileInput,
    /// Answer with [`Intent::ToastExpired`] after the display duration.
    ExpireToastLater(ToastId),
    /// Answer with [`Intent::ToastRemoved`] after the fade duration.
    RemoveToastLater(ToastId),
}

/// Applies `intent` to `state` and returns the side effects to run, in order.
pub fn reduce(state: &mut AppState, intent: Intent) -> Vec<Effect> {
    let mut effects = Vec::new();
    match intent {
        Intent::Navigate(view) => navigate(state, &mut effects, view, true),
        Intent::HistoryChanged(fragment) => {
            navigate(state, &mut effects, View::from_fragment(&fragment), false)
        }
        Intent::RefreshTick { generation } => {
            if generation == state.refresh_generation && state.view == View::Files {
                state.load(&mut effects);
            } else {
                log::debug!("ignoring stale refresh tick {}", generation);
            }
        }
        Intent::FilesLoaded { seq, result } => {
            state.request_settled();
            if seq < state.applied_load {
                log::debug!("discarding list response {} older than {}", seq, state.applied_load);
                return effects;
            }
            state.applied_load = seq;
            match result {
                Ok(files) => {
                    log::debug!("loaded {} files", files.len());
                    state.files = files;
                    state.selection.clear();
                }
                Err(e) => {
                    log::error!("Error fetching files: {}", e);
                    state.toast(&mut effects, ToastKind::Error, LOAD_FAILED);
                }
            }
            if state.view == View::Files {
                state.refresh_generation += 1;
                effects.push(Effect::ScheduleRefresh {
                    generation: state.refresh_generation,
                });
            }
        }
        Intent::ToggleSelection { id, checked } => {
            if state.find(&id).is_some() {
                let total = state.files.len();
                state.selection.toggle(id, checked, total);
            }
        }
        Intent::ToggleSelectAll(checked) => {
            if checked {
                let ids = state.files.iter().map(|f| f.id.clone());
                state.selection.select_all(ids);
            } else {
                state.selection.clear();
            }
        }
        Intent::Download(id) => {
            if state.find(&id).is_some() {
                effects.push(Effect::Download(id));
            }
        }
        Intent::RequestDelete(id) => {
            if let Some(name) = state.find(&id).map(|f| f.file_name.clone()) {
                state.dialog = Some(ConfirmDialog::delete_one(id, &name));
            }
        }
        Intent::RequestBulkDelete => {
            if state.selection.size() > 0 {
                state.dialog = Some(ConfirmDialog::delete_many(state.selection.ids()));
            }
        }
        Intent::DismissDialog => {
            state.dialog = None;
        }
        Intent::ConfirmDialog => {
            if let Some(dialog) = state.dialog.take() {
                state.request_started();
                match dialog.action {
                    ConfirmAction::DeleteOne { id, .. } => effects.push(Effect::DeleteFile(id)),
                    ConfirmAction::DeleteMany { ids } => effects.push(Effect::DeleteFiles(ids)),
                }
            }
        }
        Intent::DeleteFinished { id, result } => {
            state.request_settled();
            match result {
                Ok(()) => {
                    state.selection.remove(&id);
                    state.toast(&mut effects, ToastKind::Success, DELETE_OK);
                    state.load(&mut effects);
                }
                Err(e) => {
                    log::error!("Error deleting file: {}", e);
                    state.toast(&mut effects, ToastKind::Error, DELETE_FAILED);
                }
            }
        }
        Intent::BulkDeleteFinished { count, result } => {
            state.request_settled();
            match result {
                Ok(()) => {
                    state.selection.clear();
                    let message = format!("{} deleted successfully!", pluralize_files(count));
                    state.toast(&mut effects, ToastKind::Success, message);
                    state.load(&mut effects);
                }
                Err(e) => {
                    // Which of the batch succeeded is not reported; the list stays as is.
                    log::error!("Bulk delete of {} files failed: {}", count, e);
                    state.toast(&mut effects, ToastKind::Error, BULK_DELETE_FAILED);
                }
            }
        }
        Intent::SelectFile(file) => {
            log::debug!("selected {} ({} bytes)", file.name, file.size);
            if let Some(ticket) = state.upload.select(file) {
                abort_upload(state, &mut effects, ticket);
            }
        }
        Intent::CancelUpload => {
            if let Some(ticket) = state.upload.cancel() {
                abort_upload(state, &mut effects, ticket);
            }
            effects.push(Effect::ResetFileInput);
        }
        Intent::StartUpload => {
            if let Some(ticket) = state.upload.begin() {
                effects.push(Effect::StartUpload { ticket });
            }
        }
        Intent::UploadProgress { ticket, fraction } => {
            state.upload.record_progress(ticket, fraction);
        }
        Intent::UploadFinished { ticket, outcome } => {
            if !state.upload.is_current(ticket) {
                log::debug!("discarding completion of aborted upload {}", ticket);
                return effects;
            }
            match outcome {
                UploadOutcome::Completed => {
                    state.upload.succeed();
                    state.toast(&mut effects, ToastKind::Success, UPLOAD_OK);
                    effects.push(Effect::ResetFileInput);
                    navigate(state, &mut effects, View::Files, true);
                }
                UploadOutcome::Failed(e) => {
                    log::error!("Upload failed: {}", e);
                    state.upload.fail();
                    state.toast(&mut effects, ToastKind::Error, e.user_message());
                }
                UploadOutcome::Cancelled => {
                    state.upload.cancel();
                    state.toast(&mut effects, ToastKind::Info, UPLOAD_CANCELLED);
                    effects.push(Effect::ResetFileInput);
                }
            }
        }
        Intent::ToastExpired(id) => {
            if state.toasts.begin_removal(id) {
                effects.push(Effect::RemoveToastLater(id));
            }
        }
        Intent::ToastRemoved(id) => {
            state.toasts.remove(id);
        }
    }
    effects
}

fn navigate(state: &mut AppState, effects: &mut Vec<Effect>, view: View, push: bool) {
    effects.push(Effect::CancelRefresh);
    // Any tick armed before this point is stale.
    state.refresh_generation += 1;
    state.view = view;
    if push {
        effects.push(Effect::PushHistory(view));
    }
    if view == View::Files {
        state.load(effects);
    }
}

fn abort_upload(state: &mut AppState, effects: &mut Vec<Effect>, ticket: UploadTicket) {
    effects.push(Effect::AbortUpload { ticket });
    state.toast(effects, ToastKind::Info, UPLOAD_CANCELLED);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::UploadError;
    use crate::upload::UploadPhase;

    fn record(id: u64, name: &str) -> FileRecord {
        FileRecord {
            id: FileId::from(id),
            file_name: name.to_string(),
            file_type: Some("text/plain".to_string()),
            file_size: 0,
            upload_date_time: "2024-01-01T00:00:00Z".to_string(),
            download_url: None,
        }
    }

    fn loaded(count: u64) -> AppState {
        let mut state = AppState::default();
        let files = (1..=count).map(|i| record(i, &format!("f{}.txt", i))).collect();
        loaded_with(&mut state, Ok(files));
        state
    }

    /// Answers the latest list request with `result`.
    fn loaded_with(state: &mut AppState, result: Result<Vec<FileRecord>, FetchError>) -> Vec<Effect> {
        let seq = state.load_seq;
        reduce(state, Intent::FilesLoaded { seq, result })
    }

    fn file_ids(state: &AppState) -> Vec<FileId> {
        state.files.iter().map(|f| f.id.clone()).collect()
    }

    fn toast_messages(state: &AppState) -> Vec<(ToastKind, String)> {
        state
            .toasts
            .iter()
            .map(|t| (t.kind, t.message.clone()))
            .collect()
    }

    fn pending(name: &str) -> PendingFile {
        PendingFile {
            name: name.to_string(),
            size: 10,
        }
    }

    #[test]
    fn navigate_to_files_reloads_and_pushes_history() {
        let mut state = AppState::default();
        let effects = reduce(&mut state, Intent::Navigate(View::Files));
        assert_eq!(
            effects,
            vec![
                Effect::CancelRefresh,
                Effect::PushHistory(View::Files),
                Effect::LoadFiles { seq: 1 }
            ]
        );
        assert!(state.loading());
    }

    #[test]
    fn navigate_to_upload_cancels_refresh_without_loading() {
        let mut state = loaded(1);
        let effects = reduce(&mut state, Intent::Navigate(View::Upload));
        assert_eq!(
            effects,
            vec![Effect::CancelRefresh, Effect::PushHistory(View::Upload)]
        );
        assert_eq!(state.view, View::Upload);
    }

    #[test]
    fn history_change_does_not_push() {
        let mut state = AppState::default();
        let effects = reduce(&mut state, Intent::HistoryChanged("#upload".into()));
        assert_eq!(effects, vec![Effect::CancelRefresh]);
        assert_eq!(state.view, View::Upload);

        let effects = reduce(&mut state, Intent::HistoryChanged("#bogus".into()));
        assert_eq!(effects, vec![Effect::CancelRefresh, Effect::LoadFiles { seq: 1 }]);
        assert_eq!(state.view, View::Files);
    }

    #[test]
    fn load_arms_refresh_and_stale_ticks_are_ignored() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::Navigate(View::Files));
        let effects = loaded_with(&mut state, Ok(vec![record(1, "a")]));
        let generation = state.refresh_generation;
        assert_eq!(effects, vec![Effect::ScheduleRefresh { generation }]);

        let effects = reduce(&mut state, Intent::RefreshTick { generation });
        assert_eq!(effects, vec![Effect::LoadFiles { seq: 2 }]);

        reduce(&mut state, Intent::Navigate(View::Upload));
        let effects = reduce(&mut state, Intent::RefreshTick { generation });
        assert!(effects.is_empty());
    }

    #[test]
    fn load_while_on_upload_view_does_not_arm_refresh() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::Navigate(View::Upload));
        let effects = loaded_with(&mut state, Ok(vec![]));
        assert!(effects.is_empty());
    }

    #[test]
    fn reload_clears_selection() {
        let mut state = loaded(3);
        reduce(&mut state, Intent::ToggleSelectAll(true));
        assert!(state.selection.is_all_checked());

        loaded_with(&mut state, Ok(vec![record(1, "a")]));
        assert_eq!(state.selection.size(), 0);
        assert!(!state.selection.is_all_checked());
    }

    #[test]
    fn failed_load_toasts_and_clears_loading() {
        let mut state = loaded(2);
        reduce(&mut state, Intent::Navigate(View::Files));
        assert!(state.loading());
        loaded_with(&mut state, Err(FetchError::Status { status: 500 }));
        assert!(!state.loading());
        assert_eq!(state.files.len(), 2);
        assert_eq!(
            toast_messages(&state),
            vec![(ToastKind::Error, LOAD_FAILED.to_string())]
        );
    }

    #[test]
    fn older_list_response_is_discarded() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::Navigate(View::Files));
        loaded_with(&mut state, Ok(vec![record(1, "a"), record(2, "b")]));

        let generation = state.refresh_generation;
        let effects = reduce(&mut state, Intent::RefreshTick { generation });
        assert_eq!(effects, vec![Effect::LoadFiles { seq: 2 }]);

        reduce(&mut state, Intent::RequestDelete(FileId::from(2)));
        reduce(&mut state, Intent::ConfirmDialog);
        let effects = reduce(
            &mut state,
            Intent::DeleteFinished {
                id: FileId::from(2),
                result: Ok(()),
            },
        );
        assert!(effects.contains(&Effect::LoadFiles { seq: 3 }));

        reduce(
            &mut state,
            Intent::FilesLoaded {
                seq: 3,
                result: Ok(vec![record(1, "a")]),
            },
        );
        let effects = reduce(
            &mut state,
            Intent::FilesLoaded {
                seq: 2,
                result: Ok(vec![record(1, "a"), record(2, "b")]),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(file_ids(&state), vec![FileId::from(1)]);
        assert!(!state.loading());
    }

    #[test]
    fn loading_lasts_until_every_request_settles() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::Navigate(View::Files));
        loaded_with(&mut state, Ok(vec![record(1, "a")]));
        assert!(!state.loading());

        let generation = state.refresh_generation;
        reduce(&mut state, Intent::RefreshTick { generation });
        reduce(&mut state, Intent::RequestDelete(FileId::from(1)));
        reduce(&mut state, Intent::ConfirmDialog);
        assert_eq!(state.pending_requests, 2);

        loaded_with(&mut state, Ok(vec![record(1, "a")]));
        assert!(state.loading());

        reduce(
            &mut state,
            Intent::DeleteFinished {
                id: FileId::from(1),
                result: Err(DeleteError::Status {
                    id: FileId::from(1),
                    status: 500,
                }),
            },
        );
        assert!(!state.loading());
    }

    #[test]
    fn selection_ignores_unknown_ids() {
        let mut state = loaded(2);
        reduce(
            &mut state,
            Intent::ToggleSelection {
                id: FileId::from(1),
                checked: true,
            },
        );
        reduce(
            &mut state,
            Intent::ToggleSelection {
                id: FileId::from(77),
                checked: true,
            },
        );
        assert_eq!(state.selection.size(), 1);
    }

    #[test]
    fn select_all_then_uncheck_one() {
        let mut state = loaded(3);
        reduce(&mut state, Intent::ToggleSelectAll(true));
        assert_eq!(state.selection.size(), 3);
        reduce(
            &mut state,
            Intent::ToggleSelection {
                id: FileId::from(2),
                checked: false,
            },
        );
        assert_eq!(state.selection.size(), 2);
        assert!(!state.listing().all_checked);

        reduce(&mut state, Intent::ToggleSelectAll(false));
        assert_eq!(state.selection.size(), 0);
    }

    #[test]
    fn single_delete_confirms_then_reloads_once() {
        let mut state = loaded(2);
        reduce(
            &mut state,
            Intent::ToggleSelection {
                id: FileId::from(1),
                checked: true,
            },
        );
        reduce(&mut state, Intent::RequestDelete(FileId::from(1)));
        assert_eq!(
            state.dialog.as_ref().map(|d| d.message.as_str()),
            Some("Are you sure you want to delete \"f1.txt\"?")
        );

        let effects = reduce(&mut state, Intent::ConfirmDialog);
        assert_eq!(effects, vec![Effect::DeleteFile(FileId::from(1))]);
        assert!(state.dialog.is_none());

        let effects = reduce(
            &mut state,
            Intent::DeleteFinished {
                id: FileId::from(1),
                result: Ok(()),
            },
        );
        assert_eq!(
            effects
                .iter()
                .filter(|e| matches!(e, Effect::LoadFiles { .. }))
                .count(),
            1
        );
        assert!(!state.selection.contains(&FileId::from(1)));
        assert_eq!(
            toast_messages(&state),
            vec![(ToastKind::Success, DELETE_OK.to_string())]
        );
    }

    #[test]
    fn failed_single_delete_leaves_list_untouched() {
        let mut state = loaded(2);
        let before = state.files.clone();
        let effects = reduce(
            &mut state,
            Intent::DeleteFinished {
                id: FileId::from(2),
                result: Err(DeleteError::Status {
                    id: FileId::from(2),
                    status: 404,
                }),
            },
        );
        assert!(!effects.iter().any(|e| matches!(e, Effect::LoadFiles { .. })));
        assert_eq!(state.files, before);
        assert!(!state.loading());
    }

    #[test]
    fn dismiss_discards_pending_delete() {
        let mut state = loaded(1);
        reduce(&mut state, Intent::RequestDelete(FileId::from(1)));
        reduce(&mut state, Intent::DismissDialog);
        assert!(reduce(&mut state, Intent::ConfirmDialog).is_empty());
    }

    #[test]
    fn bulk_delete_requires_selection() {
        let mut state = loaded(2);
        reduce(&mut state, Intent::RequestBulkDelete);
        assert!(state.dialog.is_none());
    }

    #[test]
    fn bulk_delete_success_clears_selection_and_reloads() {
        let mut state = loaded(3);
        reduce(&mut state, Intent::ToggleSelectAll(true));
        reduce(&mut state, Intent::RequestBulkDelete);
        assert_eq!(
            state.dialog.as_ref().map(|d| d.message.as_str()),
            Some("Are you sure you want to delete 3 files?")
        );
        let effects = reduce(&mut state, Intent::ConfirmDialog);
        assert_eq!(
            effects,
            vec![Effect::DeleteFiles((1..=3).map(FileId::from).collect())]
        );

        let effects = reduce(
            &mut state,
            Intent::BulkDeleteFinished {
                count: 3,
                result: Ok(()),
            },
        );
        assert!(effects.iter().any(|e| matches!(e, Effect::LoadFiles { .. })));
        assert_eq!(state.selection.size(), 0);
        assert_eq!(
            toast_messages(&state),
            vec![(ToastKind::Success, "3 files deleted successfully!".to_string())]
        );
    }

    #[test]
    fn bulk_delete_failure_keeps_selection_and_list() {
        let mut state = loaded(3);
        reduce(&mut state, Intent::ToggleSelectAll(true));
        let effects = reduce(
            &mut state,
            Intent::BulkDeleteFinished {
                count: 3,
                result: Err(DeleteError::Status {
                    id: FileId::from(2),
                    status: 500,
                }),
            },
        );
        assert!(!effects.iter().any(|e| matches!(e, Effect::LoadFiles { .. })));
        assert_eq!(state.selection.size(), 3);
        assert_eq!(
            toast_messages(&state),
            vec![(ToastKind::Error, BULK_DELETE_FAILED.to_string())]
        );
    }

    #[test]
    fn download_only_for_listed_records() {
        let mut state = loaded(1);
        assert_eq!(
            reduce(&mut state, Intent::Download(FileId::from(1))),
            vec![Effect::Download(FileId::from(1))]
        );
        assert!(reduce(&mut state, Intent::Download(FileId::from(5))).is_empty());
    }

    #[test]
    fn start_upload_without_file_is_noop() {
        let mut state = AppState::default();
        assert!(reduce(&mut state, Intent::StartUpload).is_empty());
    }

    #[test]
    fn reselecting_during_upload_aborts_once() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::SelectFile(pending("a.bin")));
        let effects = reduce(&mut state, Intent::StartUpload);
        assert_eq!(effects, vec![Effect::StartUpload { ticket: 1 }]);

        let effects = reduce(&mut state, Intent::SelectFile(pending("b.bin")));
        assert_eq!(effects[0], Effect::AbortUpload { ticket: 1 });
        assert_eq!(state.upload.phase(), UploadPhase::FileSelected);

        // The aborted transfer reports back later and is discarded.
        let effects = reduce(
            &mut state,
            Intent::UploadFinished {
                ticket: 1,
                outcome: UploadOutcome::Cancelled,
            },
        );
        assert!(effects.is_empty());
        assert_eq!(
            toast_messages(&state),
            vec![(ToastKind::Info, UPLOAD_CANCELLED.to_string())]
        );
    }

    #[test]
    fn upload_success_navigates_to_files() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::Navigate(View::Upload));
        reduce(&mut state, Intent::SelectFile(pending("a.bin")));
        reduce(&mut state, Intent::StartUpload);
        reduce(
            &mut state,
            Intent::UploadProgress {
                ticket: 1,
                fraction: 0.5,
            },
        );
        assert_eq!(state.upload.progress_percent(), 50);

        let effects = reduce(
            &mut state,
            Intent::UploadFinished {
                ticket: 1,
                outcome: UploadOutcome::Completed,
            },
        );
        assert!(effects.contains(&Effect::ResetFileInput));
        assert!(effects.contains(&Effect::PushHistory(View::Files)));
        assert!(effects.iter().any(|e| matches!(e, Effect::LoadFiles { .. })));
        assert_eq!(state.view, View::Files);
        assert_eq!(state.upload.phase(), UploadPhase::Idle);
    }

    #[test]
    fn upload_failure_keeps_file_for_retry() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::SelectFile(pending("a.bin")));
        reduce(&mut state, Intent::StartUpload);
        reduce(
            &mut state,
            Intent::UploadFinished {
                ticket: 1,
                outcome: UploadOutcome::Failed(UploadError::Rejected {
                    status: 413,
                    message: Some("File size exceeds the maximum allowed limit".into()),
                }),
            },
        );
        assert_eq!(state.upload.phase(), UploadPhase::FileSelected);
        assert_eq!(
            toast_messages(&state),
            vec![(
                ToastKind::Error,
                "File size exceeds the maximum allowed limit".to_string()
            )]
        );
        assert_eq!(
            reduce(&mut state, Intent::StartUpload),
            vec![Effect::StartUpload { ticket: 2 }]
        );
    }

    #[test]
    fn cancel_aborts_in_flight_transfer() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::SelectFile(pending("a.bin")));
        reduce(&mut state, Intent::StartUpload);
        let effects = reduce(&mut state, Intent::CancelUpload);
        assert_eq!(effects[0], Effect::AbortUpload { ticket: 1 });
        assert_eq!(effects.last(), Some(&Effect::ResetFileInput));
        assert_eq!(state.upload.phase(), UploadPhase::Idle);
    }

    #[test]
    fn cancel_without_transfer_only_clears_input() {
        let mut state = AppState::default();
        reduce(&mut state, Intent::SelectFile(pending("a.bin")));
        let effects = reduce(&mut state, Intent::CancelUpload);
        assert_eq!(effects, vec![Effect::ResetFileInput]);
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn toast_lifecycle() {
        let mut state = AppState::default();
        let effects = loaded_with(&mut state, Err(FetchError::Network("offline".into())));
        let id = state.toasts.iter().next().unwrap().id;
        assert!(effects.contains(&Effect::ExpireToastLater(id)));

        let effects = reduce(&mut state, Intent::ToastExpired(id));
        assert_eq!(effects, vec![Effect::RemoveToastLater(id)]);
        reduce(&mut state, Intent::ToastRemoved(id));
        assert!(state.toasts.is_empty());
        assert!(reduce(&mut state, Intent::ToastExpired(id)).is_empty());
    }
}
