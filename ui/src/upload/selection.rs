//! The selection state machine.
//!
//! Every `begin` bumps a monotonically increasing version and hands back a
//! ticket capturing it. Preview work runs asynchronously and may interleave
//! with newer selections; a result is applied only when its ticket still
//! matches the latest issued version at completion time, so overlapping
//! selections resolve last-commit-wins without any cancellation machinery.

use super::preview::PreparedPreview;
use super::validate::{self, FileCandidate, ImageMime, ValidatedUpload, ValidationError};

pub type SelectionVersion = u64;

/// The committed selection. Replaced wholesale on the next successful
/// validate+preview cycle, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRecord {
    pub bytes: Vec<u8>,
    pub display_name: String,
    pub size_bytes: u64,
    pub preview_data_url: String,
    pub mime: ImageMime,
}

/// Capture of one in-flight selection attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTicket {
    version: SelectionVersion,
    validated: ValidatedUpload,
}

impl SelectionTicket {
    pub fn validated(&self) -> &ValidatedUpload {
        &self.validated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// A newer selection started while this one was previewing; the result
    /// is discarded without touching the committed record.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    version: SelectionVersion,
    current: Option<SelectionRecord>,
}

impl SelectionController {
    /// Validate a candidate and open a new selection attempt. Validation
    /// failure does not bump the version: nothing started.
    pub fn begin(&mut self, candidate: &FileCandidate) -> Result<SelectionTicket, ValidationError> {
        let validated = validate::validate(candidate)?;
        self.version += 1;
        Ok(SelectionTicket {
            version: self.version,
            validated,
        })
    }

    /// Apply a finished preview if its ticket is still the latest.
    pub fn commit(&mut self, ticket: SelectionTicket, preview: PreparedPreview) -> CommitOutcome {
        if ticket.version != self.version {
            return CommitOutcome::Stale;
        }

        self.current = Some(SelectionRecord {
            bytes: preview.bytes,
            display_name: ticket.validated.display_name,
            size_bytes: ticket.validated.size_bytes,
            preview_data_url: preview.preview_data_url,
            mime: ticket.validated.mime,
        });
        CommitOutcome::Committed
    }

    pub fn current(&self) -> Option<&SelectionRecord> {
        self.current.as_ref()
    }
}
