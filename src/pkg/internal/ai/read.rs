use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use crate::prelude::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Image,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Docx => write!(f, "docx"),
            DocumentKind::Image => write!(f, "image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Known(DocumentKind),
    Unsupported(String),
}

pub fn classify(filename: &str) -> Classification {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "pdf" => Classification::Known(DocumentKind::Pdf),
        "docx" => Classification::Known(DocumentKind::Docx),
        "png" | "jpg" | "jpeg" => Classification::Known(DocumentKind::Image),
        _ => Classification::Unsupported(ext),
    }
}

pub fn extract_document(data: &[u8], kind: DocumentKind) -> Result<String> {
    match kind {
        DocumentKind::Pdf => extract_text_from_pdf(data),
        DocumentKind::Docx => extract_text_from_docx(data),
        DocumentKind::Image => extract_text_from_image(data),
    }
}

fn extract_text_from_pdf(data: &[u8]) -> Result<String> {
    use lopdf::Document;
    let cursor = Cursor::new(data);
    let doc = Document::load_from(cursor).map_err(|e| Error::Extraction {
        kind: DocumentKind::Pdf,
        detail: e.to_string(),
    })?;

    let mut pages_text = Vec::new();
    for page_num in doc.get_pages().keys() {
        // a page with no extractable text contributes an empty line
        let mut text = doc.extract_text(&[*page_num]).unwrap_or_default();
        if text.ends_with('\n') {
            text.pop();
        }
        pages_text.push(text);
    }
    Ok(pages_text.join("\n"))
}

fn extract_text_from_docx(data: &[u8]) -> Result<String> {
    use docx_rs::read_docx;
    let docx = read_docx(data).map_err(|e| Error::Extraction {
        kind: DocumentKind::Docx,
        detail: e.to_string(),
    })?;
    let mut paragraphs = Vec::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }
    Ok(paragraphs.join("\n"))
}

pub fn has_tesseract() -> bool {
    Command::new("tesseract")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn extract_text_from_image(data: &[u8]) -> Result<String> {
    if !has_tesseract() {
        return Err(Error::Extraction {
            kind: DocumentKind::Image,
            detail: "tesseract not available, install tesseract-ocr".into(),
        });
    }
    let temp_dir = tempfile::tempdir().map_err(|e| Error::Extraction {
        kind: DocumentKind::Image,
        detail: e.to_string(),
    })?;
    let image_path = temp_dir.path().join("input.png");
    std::fs::write(&image_path, data).map_err(|e| Error::Extraction {
        kind: DocumentKind::Image,
        detail: e.to_string(),
    })?;
    let output = Command::new("tesseract")
        .arg(&image_path)
        .args(["stdout", "-l", "eng"])
        .output()
        .map_err(|e| Error::Extraction {
            kind: DocumentKind::Image,
            detail: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(Error::Extraction {
            kind: DocumentKind::Image,
            detail: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
