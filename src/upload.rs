//! Single pending local file and its in-flight transfer.
//!
//! ```text
//! idle -> fileSelected -> uploading -> idle          (success, cancel)
//!                                   -> fileSelected  (failure, retry possible)
//! ```
//!
//! Each transfer gets a fresh [`UploadTicket`]; completions carrying a ticket
//! other than the current one belong to an aborted transfer and are ignored.

use crate::format::format_file_size;

pub type UploadTicket = u64;

/// Metadata of the locally chosen file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub size: u64,
}

impl PendingFile {
    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Uploading(UploadTicket),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFlow {
    pending: Option<PendingFile>,
    in_flight: Option<UploadTicket>,
    progress: u8,
    last_ticket: UploadTicket,
}

impl UploadFlow {
    pub fn phase(&self) -> UploadPhase {
        match (&self.pending, self.in_flight) {
            (_, Some(ticket)) => UploadPhase::Uploading(ticket),
            (Some(_), None) => UploadPhase::FileSelected,
            (None, None) => UploadPhase::Idle,
        }
    }

    pub fn pending(&self) -> Option<&PendingFile> {
        self.pending.as_ref()
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the progress bar is shown.
    pub fn shows_progress(&self) -> bool {
        self.is_uploading() || self.progress > 0
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == UploadPhase::FileSelected
    }

    /// Replaces the pending file and resets progress. Returns the ticket of
    /// the transfer that must be aborted, if one was in flight.
    pub fn select(&mut self, file: PendingFile) -> Option<UploadTicket> {
        let aborted = self.in_flight.take();
        self.pending = Some(file);
        self.progress = 0;
        aborted
    }

    /// Back to idle. Returns the ticket of the transfer that must be aborted.
    pub fn cancel(&mut self) -> Option<UploadTicket> {
        let aborted = self.in_flight.take();
        self.pending = None;
        self.progress = 0;
        aborted
    }

    /// Starts a transfer for the pending file; `None` when nothing can start.
    pub fn begin(&mut self) -> Option<UploadTicket> {
        if !self.can_submit() {
            return None;
        }
        self.last_ticket += 1;
        self.in_flight = Some(self.last_ticket);
        self.progress = 0;
        Some(self.last_ticket)
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        self.in_flight == Some(ticket)
    }

    /// Records `bytes_sent / total_bytes` for the current transfer.
    pub fn record_progress(&mut self, ticket: UploadTicket, fraction: f64) -> bool {
        if !self.is_current(ticket) || !fraction.is_finite() {
            return false;
        }
        self.progress = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
        true
    }

    pub fn succeed(&mut self) {
        self.in_flight = None;
        self.pending = None;
        self.progress = 0;
    }

    /// Keeps the pending file so the user can retry.
    pub fn fail(&mut self) {
        self.in_flight = None;
    }
}
