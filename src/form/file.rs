/// Metadata for an attached document. The binary itself never enters the
/// model; submission serializes the filename only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime: String,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
        }
    }
}

/// Content predicate consulted before a file value is ever assigned.
/// A rejected candidate leaves the field exactly as it was.
pub trait FileGate {
    fn accepts(&self, mime: &str, name: &str) -> bool;
}

/// Accepts PDF documents: declared MIME type `application/pdf`, or a
/// filename ending in `.pdf` regardless of case.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfGate;

impl FileGate for PdfGate {
    fn accepts(&self, mime: &str, name: &str) -> bool {
        mime == "application/pdf" || name.to_ascii_lowercase().ends_with(".pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_gate_accepts_by_mime_or_extension() {
        let gate = PdfGate;
        assert!(gate.accepts("application/pdf", "scan.dat"));
        assert!(gate.accepts("application/octet-stream", "Befund.PDF"));
        assert!(!gate.accepts("image/png", "xray.png"));
    }
}
