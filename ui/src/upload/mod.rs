pub mod preview;
pub mod selection;
pub mod validate;

pub use preview::PreparedPreview;
pub use selection::{CommitOutcome, SelectionController, SelectionRecord, SelectionTicket};
pub use validate::{FileCandidate, ImageMime, ValidatedUpload, ValidationError};
