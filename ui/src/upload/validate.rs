//! Upload validation: decide whether a candidate is an acceptable image and
//! normalise its declared type and name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SUPPORTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];
const SUPPORTED_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Could not read the selected image. Please choose another file.")]
    Unreadable,
    #[error("Unsupported file type. Upload a PNG or JPEG image.")]
    UnsupportedType,
    #[error("Selected file could not be previewed as an image.")]
    PreviewFailed,
}

/// Canonical accepted image types; "jpg" is folded into jpeg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    Png,
    Jpeg,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
        }
    }

    /// Synthesised display name for sources without one (clipboard pastes).
    fn clipboard_name(&self) -> &'static str {
        match self {
            ImageMime::Png => "clipboard-image.png",
            ImageMime::Jpeg => "clipboard-image.jpg",
        }
    }
}

/// What the event glue knows about a candidate before any bytes are
/// inspected. Drag and file-input sources usually leave `declared_mime`
/// empty; clipboard sources usually leave `name` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub declared_mime: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub display_name: String,
    pub mime: ImageMime,
    pub size_bytes: u64,
}

/// MIME detection takes priority; extension sniffing covers sources that
/// omit or genericise the declared type.
pub fn validate(candidate: &FileCandidate) -> Result<ValidatedUpload, ValidationError> {
    if candidate.size_bytes == 0 {
        return Err(ValidationError::Unreadable);
    }

    let mime = detect_mime(candidate).ok_or(ValidationError::UnsupportedType)?;

    let trimmed = candidate.name.trim();
    let display_name = if trimmed.is_empty() {
        mime.clipboard_name().to_string()
    } else {
        trimmed.to_string()
    };

    Ok(ValidatedUpload {
        display_name,
        mime,
        size_bytes: candidate.size_bytes,
    })
}

fn detect_mime(candidate: &FileCandidate) -> Option<ImageMime> {
    let declared = candidate.declared_mime.to_lowercase();
    if SUPPORTED_MIME_TYPES.contains(&declared.as_str()) {
        return Some(if declared == "image/png" {
            ImageMime::Png
        } else {
            ImageMime::Jpeg
        });
    }

    let lower_name = candidate.name.to_lowercase();
    if lower_name.ends_with(".png") {
        return Some(ImageMime::Png);
    }
    if SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| lower_name.ends_with(ext))
    {
        return Some(ImageMime::Jpeg);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, mime: &str, size: u64) -> FileCandidate {
        FileCandidate {
            name: name.into(),
            declared_mime: mime.into(),
            size_bytes: size,
        }
    }

    #[test]
    fn accepts_declared_png_and_jpeg() {
        let png = validate(&candidate("photo.png", "image/png", 10)).unwrap();
        assert_eq!(png.mime, ImageMime::Png);

        let jpeg = validate(&candidate("photo.jpeg", "image/jpeg", 10)).unwrap();
        assert_eq!(jpeg.mime, ImageMime::Jpeg);
    }

    #[test]
    fn canonicalises_jpg_to_jpeg() {
        let upload = validate(&candidate("shot.jpg", "image/jpg", 10)).unwrap();
        assert_eq!(upload.mime, ImageMime::Jpeg);
        assert_eq!(upload.mime.as_str(), "image/jpeg");
    }

    #[test]
    fn falls_back_to_extension_when_mime_is_missing_or_generic() {
        let from_drop = validate(&candidate("scan.PNG", "", 10)).unwrap();
        assert_eq!(from_drop.mime, ImageMime::Png);

        let generic = validate(&candidate("scan.jpg", "application/octet-stream", 10)).unwrap();
        assert_eq!(generic.mime, ImageMime::Jpeg);
    }

    #[test]
    fn declared_mime_wins_over_extension() {
        // A jpeg saved with a .png name still uploads as jpeg.
        let upload = validate(&candidate("mislabeled.png", "image/jpeg", 10)).unwrap();
        assert_eq!(upload.mime, ImageMime::Jpeg);
    }

    #[test]
    fn rejects_unsupported_type_and_extension() {
        let err = validate(&candidate("notes.pdf", "application/pdf", 10)).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedType);

        let err = validate(&candidate("archive.webp", "", 10)).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedType);
    }

    #[test]
    fn rejects_empty_payload() {
        let err = validate(&candidate("photo.png", "image/png", 0)).unwrap_err();
        assert_eq!(err, ValidationError::Unreadable);
    }

    #[test]
    fn synthesises_clipboard_names() {
        let png = validate(&candidate("", "image/png", 10)).unwrap();
        assert_eq!(png.display_name, "clipboard-image.png");

        let jpeg = validate(&candidate("   ", "image/jpeg", 10)).unwrap();
        assert_eq!(jpeg.display_name, "clipboard-image.jpg");
    }
}
