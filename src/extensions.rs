//! Media types of common filename extensions.
//!
//! The table is static and intentionally small; unknown extensions map to
//! [`DEFAULT_TYPE`].

use crate::cache::type_from_string;
use crate::error::Result;
use crate::media_type::MediaType;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Type of data with no better description; browsers treat it as a download.
pub const DEFAULT_TYPE: &str = "application/octet-stream";

/// IRI of the set of media types registered with IANA.
pub const IANA_REGISTERED_TYPES: &str = "https://www.iana.org/assignments/media-types/media-types.xml";

/// Built-in extension mappings (all lowercase, no leading dot).
static BUILTIN_TYPES: &[(&str, &str)] = &[
    ("data", DEFAULT_TYPE),
    ("fail", "application/failure+xml"),
    ("text", "text/plain"),
    ("txt", "text/plain"),
    ("rtf", "application/rtf"),
    ("cache", "text/cache-manifest"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("pdf", "application/pdf"),
    ("postscript", "application/postscript"),
    ("javascript", "text/plain;pl=javascript"),
    ("py", "text/plain;pl=python"),
    ("json", "application/json"),
    ("js", "application/javascript"),
    ("xml", "text/xml"),
    ("sgml", "text/sgml"),
    ("rdf", "application/rdf+xml"),
    ("rss", "application/rss+xml"),
    ("atom", "application/atom+xml"),
    ("xslt", "application/xslt+xml"),
    ("xsl", "application/xslt+xml"),
    ("zip", "application/zip"),
    ("gzip", "application/gzip"),
    ("gz", "application/gzip"),
    ("bzip2", "application/x-bzip2"),
    ("tar", "application/x-tar"),
    ("xz", "application/x-xz"),
    ("rar", "application/x-rar-compressed"),
    ("sit", "application/x-stuffit"),
    ("z", "application/x-compress"),
    ("tgz", "application/x-tar+gzip"),
    ("txz", "application/x-tar+x-xz"),
    ("torrent", "application/x-bittorrent"),
    // images
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    // video
    ("mpg", "video/mpeg"),
    ("mpeg", "video/mpeg"),
    ("mp2", "video/mpeg"),
    ("mov", "video/quicktime"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("avi", "video/avi"),
    // audio
    ("mp3", "audio/mpeg"),
    ("mid", "audio/midi"),
    ("wav", "audio/x-wav"),
    ("aif", "audio/x-aiff"),
    ("aiff", "audio/x-aiff"),
    ("ogg", "audio/ogg"),
    ("opus", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("ogx", "application/ogg"),
    ("spx", "audio/ogg"),
    // office documents
    ("xls", "application/vnd.ms-excel"),
    ("doc", "application/msword"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("ppsx", "application/vnd.openxmlformats-officedocument.presentationml.slideshow"),
    ("potx", "application/vnd.openxmlformats-officedocument.presentationml.template"),
];

static TYPES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BUILTIN_TYPES.iter().copied().collect());

/// Returns the MIME string for a filename extension, or [`DEFAULT_TYPE`].
///
/// A leading dot is optional and matching ignores ASCII case.
///
/// # Examples
///
/// ```
/// use mime_range::extensions::lookup_extension;
///
/// assert_eq!(lookup_extension("rss"), "application/rss+xml");
/// assert_eq!(lookup_extension(".PNG"), "image/png");
/// assert_eq!(lookup_extension("unknown"), "application/octet-stream");
/// ```
pub fn lookup_extension(ext: &str) -> &'static str {
    let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
    TYPES.get(ext.as_str()).copied().unwrap_or(DEFAULT_TYPE)
}

/// Identifies the media type of a file from its name's last extension.
///
/// Names without an extension get [`DEFAULT_TYPE`].
pub fn file_type(filename: &str) -> Result<Arc<MediaType>> {
    let mime = match filename.rsplit_once('.') {
        Some((_, ext)) => lookup_extension(ext),
        None => DEFAULT_TYPE,
    };
    type_from_string(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_extension() {
        assert_eq!(lookup_extension("html"), "text/html");
        assert_eq!(lookup_extension(".HTML"), "text/html");
        assert_eq!(lookup_extension("tgz"), "application/x-tar+gzip");
        assert_eq!(lookup_extension(""), DEFAULT_TYPE);
        assert_eq!(lookup_extension("exe"), DEFAULT_TYPE);
    }

    #[test]
    fn test_builtin_types_parse() {
        for (ext, mime) in BUILTIN_TYPES {
            assert!(MediaType::from_string(mime).is_ok(), "{ext}: {mime}");
        }
    }

    #[test]
    fn test_file_type() {
        let py = file_type("setup.py").unwrap();
        assert_eq!(*py, MediaType::new("text", "plain", [("pl", "python")]));

        let archive = file_type("release.tar.gz").unwrap();
        assert_eq!(archive.subtype(), "gzip");

        assert_eq!(file_type("README").unwrap().subtype(), "octet-stream");
        assert_eq!(file_type("archive.unknown").unwrap().to_string(), DEFAULT_TYPE);
    }

    #[test]
    fn test_file_type_pops_to_base() {
        let tgz = file_type("backup.tgz").unwrap();
        assert_eq!(tgz.pop(), MediaType::from_string("application/x-tar").unwrap());
    }
}
