//! Previewable form of a stored image reference.

use sekolah_common::InlineImage;

/// What the admin console shows for an image field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    /// URL or server path to load.
    Remote(String),
    /// Image bytes decoded from an inline data URI.
    Inline { content_type: String, data: Vec<u8> },
}

impl ImagePreview {
    /// Decode a stored reference. Blank values and broken data URIs yield `None`.
    #[must_use]
    pub fn from_reference(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        if !InlineImage::is_inline(reference) {
            return Some(Self::Remote(reference.to_string()));
        }

        match InlineImage::parse(reference) {
            Ok(image) => Some(Self::Inline {
                content_type: image.content_type,
                data: image.data,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring undecodable image");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_and_inline() {
        assert_eq!(
            ImagePreview::from_reference("/files/jurusan/a.png"),
            Some(ImagePreview::Remote("/files/jurusan/a.png".to_string()))
        );
        assert!(matches!(
            ImagePreview::from_reference("data:image/gif;base64,R0lGOA=="),
            Some(ImagePreview::Inline { ref content_type, .. }) if content_type == "image/gif"
        ));
        assert_eq!(ImagePreview::from_reference("data:image/gif;base64,%%"), None);
        assert_eq!(ImagePreview::from_reference(" "), None);
    }
}
