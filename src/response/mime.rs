//! Content-type to file extension lookup for downloads without a suggested name.

/// Signature of a content-type to extension lookup.
///
/// Returns `None` when the content type is not mapped.
pub type ExtensionLookup = fn(&str) -> Option<&'static str>;

/// Looks up the file extension (without the dot) for a content type.
///
/// Parameters after `;` are ignored and the media type is compared
/// case-insensitively, so `image/PNG; q=1` maps like `image/png`.
#[must_use]
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    let ext = match essence.as_str() {
        // Images
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/vnd.microsoft.icon" | "image/x-icon" => "ico",

        // Audio
        "audio/mpeg" => "mp3",
        "audio/wav" => "wav",
        "audio/webm" => "webm",
        "audio/ogg" => "ogg",
        "audio/flac" => "flac",
        "audio/aac" => "aac",
        "audio/mp4" => "m4a",

        // Video
        "video/mp4" => "mp4",
        "video/avi" => "avi",
        "video/mov" => "mov",
        "video/wmv" => "wmv",
        "video/ogg" => "ogv",
        "video/webm" => "webm",

        // Documents and archives
        "application/pdf" => "pdf",
        "application/zip" => "zip",
        "application/x-tar" => "tar",
        "application/x-gzip" | "application/gzip" => "gz",
        "application/x-bzip2" | "application/x-bzip" => "bz2",
        "application/x-7z-compressed" => "7z",
        "application/x-rar-compressed" => "rar",
        "application/x-shockwave-flash" => "swf",
        "application/x-compressed-tar" | "application/x-tar-gz" => "tar.gz",
        "application/x-lzip" => "lz",
        "application/x-lzma" => "lzma",
        "application/x-xz" => "xz",
        "application/x-compress" => "Z",
        "application/x-ace-compressed" => "ace",
        "application/x-arj" => "arj",
        "application/x-cpio" => "cpio",
        "application/x-dms" => "dms",
        "application/x-iso9660-image" => "iso",
        "application/x-rpm" => "rpm",

        // Office files
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        "application/vnd.ms-word.document.macroenabled.12" => "docm",
        "application/vnd.ms-word.template.macroenabled.12" => "dotm",
        "application/vnd.ms-excel" => "xls",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => "xlsx",
        "application/vnd.ms-excel.sheet.macroenabled.12" => "xlsm",
        "application/vnd.ms-excel.template.macroenabled.12" => "xltm",
        "application/vnd.ms-excel.addin.macroenabled.12" => "xlam",
        "application/vnd.ms-excel.sheet.binary.macroenabled.12" => "xlsb",
        "application/vnd.ms-powerpoint" => "ppt",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation" => "pptx",
        "application/vnd.ms-powerpoint.presentation.macroenabled.12" => "pptm",
        "application/vnd.ms-powerpoint.template.macroenabled.12" => "potm",
        "application/vnd.ms-powerpoint.slideshow.macroenabled.12" => "ppsm",
        "application/vnd.ms-powerpoint.addin.macroenabled.12" => "ppam",

        // Text and code
        "text/plain" => "txt",
        "text/html" => "html",
        "text/css" => "css",
        "text/javascript" | "application/javascript" => "js",
        "application/json" => "json",
        "application/xml" | "text/xml" => "xml",

        // Executables and scripts
        "application/octet-stream" => "bin",
        "application/x-executable"
        | "application/x-dos-executable"
        | "application/x-msdownload" => "exe",
        "application/x-sh" => "sh",
        "application/x-perl" => "pl",
        "application/x-python" => "py",
        "application/x-ruby" => "rb",
        "application/x-php" => "php",
        "application/x-java" => "java",
        "application/x-csharp" => "cs",
        "application/x-typescript" => "ts",
        "application/x-latex" | "application/x-tex" => "tex",
        "application/x-sql" | "application/x-mysql-dump" | "application/x-mysql" => "sql",

        // Fonts
        "font/woff" => "woff",
        "font/woff2" => "woff2",
        "font/ttf" => "ttf",
        "font/otf" => "otf",

        // Web formats
        "application/x-web-app-manifest+json" => "webapp",
        "application/manifest+json" => "webmanifest",
        "application/x-chrome-extension" => "crx",
        "application/x-opera-extension" => "oex",
        "application/x-firefox-extension" | "application/x-mozilla-addon" => "xpi",

        // Databases
        "application/x-sqlite3" => "sqlite",

        // Configuration
        "application/x-yaml" => "yaml",
        "application/x-yml" => "yml",
        "application/x-toml" => "toml",
        "application/x-ini" => "ini",
        "application/x-properties" => "properties",
        "application/x-dotenv" => "env",

        // E-books
        "application/epub+zip" => "epub",
        "application/x-mobipocket-ebook" => "mobi",
        "application/vnd.amazon.ebook" => "azw",
        "application/x-cbr" => "cbr",
        "application/x-cbz" => "cbz",

        _ => return None,
    };
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_common_types() {
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("application/pdf"), Some("pdf"));
        assert_eq!(extension_for("video/ogg"), Some("ogv"));
        assert_eq!(
            extension_for("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            Some("xlsx")
        );
        assert_eq!(extension_for("application/x-compressed-tar"), Some("tar.gz"));
    }

    #[test]
    fn test_extension_for_ignores_parameters_and_case() {
        assert_eq!(extension_for("image/PNG; q=1"), Some("png"));
        assert_eq!(extension_for(" text/html ;charset=utf-8"), Some("html"));
        assert_eq!(
            extension_for("application/vnd.ms-excel.sheet.macroEnabled.12"),
            Some("xlsm")
        );
    }

    #[test]
    fn test_extension_for_unmapped_returns_none() {
        assert_eq!(extension_for("application/x-unknown"), None);
        assert_eq!(extension_for("image/avif"), None);
        assert_eq!(extension_for(""), None);
    }
}
