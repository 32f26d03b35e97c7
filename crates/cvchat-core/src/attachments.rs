//! Building request attachments from user-supplied URLs.

use anyhow::{Context, Result, bail};
use cvchat_types::Attachment;
use url::Url;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Builds an attachment for `raw_url`.
///
/// The name defaults to the last path segment and the content type is
/// inferred from the file extension.
///
/// # Errors
/// Returns an error if the URL does not parse or is not http(s).
pub fn attachment_from_url(raw_url: &str, name: Option<&str>) -> Result<Attachment> {
    let trimmed = raw_url.trim();
    let url = Url::parse(trimmed).with_context(|| format!("Invalid attachment URL: {trimmed}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Attachment URL must be http or https: {trimmed}");
    }

    let file_name = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .unwrap_or_default()
        .to_string();
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(
            || {
                if file_name.is_empty() {
                    url.host_str().unwrap_or("attachment").to_string()
                } else {
                    file_name.clone()
                }
            },
            str::to_string,
        );
    let content_type = mime_type_for_extension(&file_name).unwrap_or(FALLBACK_CONTENT_TYPE);

    Ok(Attachment::new(trimmed, name, content_type))
}

/// MIME type inferred from a file name's extension.
#[must_use]
pub fn mime_type_for_extension(file_name: &str) -> Option<&'static str> {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())?;

    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        "rtf" => Some("application/rtf"),
        "odt" => Some("application/vnd.oasis.opendocument.text"),
        "html" | "htm" => Some("text/html"),
        "json" => Some("application/json"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_name_and_type_from_url() {
        let attachment =
            attachment_from_url("https://files.example/u/42/My_CV.PDF?sig=x", None).unwrap();
        assert_eq!(attachment.name, "My_CV.PDF");
        assert_eq!(attachment.content_type, "application/pdf");
        assert_eq!(attachment.url, "https://files.example/u/42/My_CV.PDF?sig=x");
    }

    #[test]
    fn explicit_name_wins() {
        let attachment =
            attachment_from_url("https://files.example/cv.docx", Some("Resume 2024")).unwrap();
        assert_eq!(attachment.name, "Resume 2024");
        assert!(attachment.content_type.contains("wordprocessingml"));
    }

    #[test]
    fn unknown_extension_falls_back() {
        let attachment = attachment_from_url("https://files.example/blob", None).unwrap();
        assert_eq!(attachment.name, "blob");
        assert_eq!(attachment.content_type, FALLBACK_CONTENT_TYPE);

        let bare = attachment_from_url("https://files.example/", None).unwrap();
        assert_eq!(bare.name, "files.example");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(attachment_from_url("not a url", None).is_err());
        assert!(attachment_from_url("file:///etc/passwd", None).is_err());
    }
}
