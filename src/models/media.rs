use axum::body::Bytes;

/// An image file received in a multipart submission.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "webp"];

impl ImageFile {
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Both the file extension and the declared content type must name a
    /// supported image format.
    pub fn is_allowed_image(&self) -> bool {
        let extension_ok = self
            .extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));

        let content_type_ok = self
            .content_type
            .strip_prefix("image/")
            .is_some_and(|subtype| ALLOWED_EXTENSIONS.contains(&subtype));

        extension_ok && content_type_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str) -> ImageFile {
        ImageFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[test]
    fn accepts_supported_images() {
        assert!(file("mug.PNG", "image/png").is_allowed_image());
        assert!(file("mug.jpg", "image/jpeg").is_allowed_image());
        assert!(file("mug.webp", "image/webp").is_allowed_image());
    }

    #[test]
    fn rejects_other_files() {
        assert!(!file("mug.gif", "image/gif").is_allowed_image());
        assert!(!file("mug.png", "text/plain").is_allowed_image());
        assert!(!file("mug", "image/png").is_allowed_image());
        assert!(!file("notes.txt", "image/png").is_allowed_image());
    }
}
