use std::path::Path;

use coeus_core::{PdfFile, PDF_MEDIA_TYPE};

/// Media type a browser file picker would report for this path.
///
/// Derived from the extension only; unknown extensions report an empty type.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => PDF_MEDIA_TYPE,
        "txt" => "text/plain",
        "md" => "text/markdown",
        "htm" | "html" => "text/html",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "",
    }
}

pub fn pdf_file_from_path(path: &Path) -> PdfFile {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    PdfFile {
        name,
        media_type: media_type_for(path).to_string(),
        path: path.to_path_buf(),
    }
}
