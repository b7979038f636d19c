//! Image MIME types by file extension

use std::path::Path;

/// MIME type for an image path, `None` when the extension is not an image
#[must_use]
pub fn mime_for_path(path: impl AsRef<Path>) -> Option<&'static str> {
    let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_ignore_case() {
        assert_eq!(mime_for_path("scan.JPG"), Some("image/jpeg"));
        assert_eq!(mime_for_path("/tmp/form.png"), Some("image/png"));
        assert_eq!(mime_for_path("notes.txt"), None);
        assert_eq!(mime_for_path("no-extension"), None);
    }
}
