//! Media constraints for uploaded files (profile pictures, audio samples,
//! job scripts) and the in-memory representation of an uploaded file.

use uuid::Uuid;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// One mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Allowed profile picture media types.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Allowed audio sample media types.
pub const ALLOWED_AUDIO_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/ogg",
    "audio/m4a",
];

/// Allowed job script media types.
pub const ALLOWED_SCRIPT_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Profile picture ceiling (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * MIB;

/// Audio sample ceiling (20 MiB).
pub const MAX_AUDIO_BYTES: u64 = 20 * MIB;

/// Job script ceiling (10 MiB).
pub const MAX_SCRIPT_BYTES: u64 = 10 * MIB;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Which constraint an upload broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaViolation {
    UnsupportedType,
    TooLarge,
}

/// Type and size constraints for one kind of uploaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaPolicy {
    pub allowed_types: &'static [&'static str],
    pub max_bytes: u64,
}

pub const IMAGE_POLICY: MediaPolicy = MediaPolicy {
    allowed_types: ALLOWED_IMAGE_TYPES,
    max_bytes: MAX_IMAGE_BYTES,
};

pub const AUDIO_POLICY: MediaPolicy = MediaPolicy {
    allowed_types: ALLOWED_AUDIO_TYPES,
    max_bytes: MAX_AUDIO_BYTES,
};

pub const SCRIPT_POLICY: MediaPolicy = MediaPolicy {
    allowed_types: ALLOWED_SCRIPT_TYPES,
    max_bytes: MAX_SCRIPT_BYTES,
};

impl MediaPolicy {
    /// Whether the declared media type is in the allowed set.
    ///
    /// Parameters (`; charset=...`) and case are ignored.
    pub fn accepts_type(&self, content_type: &str) -> bool {
        let essence = essence(content_type);
        self.allowed_types.iter().any(|t| *t == essence)
    }

    /// Whether `size_bytes` is within the ceiling (inclusive).
    pub fn accepts_size(&self, size_bytes: u64) -> bool {
        size_bytes <= self.max_bytes
    }

    /// Allowed types joined for error messages.
    pub fn allowed_list(&self) -> String {
        self.allowed_types.join(", ")
    }

    /// Check the type first, then the size.
    pub fn check(&self, file: &UploadFile) -> Result<(), MediaViolation> {
        if !self.accepts_type(&file.content_type) {
            return Err(MediaViolation::UnsupportedType);
        }
        if !self.accepts_size(file.size()) {
            return Err(MediaViolation::TooLarge);
        }
        Ok(())
    }

    /// Ceiling in whole megabytes, as shown to users.
    pub fn max_megabytes(&self) -> u64 {
        self.max_bytes / MIB
    }
}

fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Uploaded file
// ---------------------------------------------------------------------------

/// A file received from a client, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Client-supplied file name (may be empty).
    pub file_name: String,
    /// Declared media type.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Collision-resistant object name: `{uuid}-{file name}`.
    ///
    /// Directory components are stripped from the client name; an empty name
    /// becomes `upload`.
    pub fn storage_name(&self) -> String {
        let base = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or("")
            .trim();
        let base = if base.is_empty() { "upload" } else { base };
        format!("{}-{}", Uuid::new_v4(), base)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
