/// Filename used for the exported resource bundle.
pub const EXPORT_FILENAME: &str = "ResourceBundle.json";

/// MIME type the exported text is saved with.
///
/// The bundle is JSON, but it has always been saved as plain text.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// MIME type carried in the download URL hint.
pub const DOWNLOAD_HINT_MIME_TYPE: &str = "text/json";
