//! Uploaded-file text extraction, keyed by file extension.
//!
//! `.txt` / `.md` / `.markdown` must be valid UTF-8. `.docx` is unzipped and
//! its `word/document.xml` paragraphs are joined with newlines. `.pdf` goes
//! through `pdf-extract`. Anything else is rejected before it reaches the
//! learning engine.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use axum::extract::Multipart;

use crate::errors::AppError;

const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// A multipart upload: one `file` part plus any plain text fields.
#[derive(Debug)]
pub struct Upload {
    pub filename: String,
    pub text: String,
    pub fields: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Markdown,
    Docx,
    Pdf,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(FileKind::PlainText),
            "md" | "markdown" => Ok(FileKind::Markdown),
            "docx" => Ok(FileKind::Docx),
            "pdf" => Ok(FileKind::Pdf),
            "" => Err(AppError::UnsupportedFile("(no extension)".to_string())),
            other => Err(AppError::UnsupportedFile(other.to_string())),
        }
    }
}

/// Returns the text content of an uploaded file.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    match FileKind::from_filename(filename)? {
        FileKind::PlainText | FileKind::Markdown => String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Extraction(format!("'{filename}' is not valid UTF-8 text"))),
        FileKind::Docx => extract_docx(bytes)
            .map_err(|e| AppError::Extraction(format!("Could not read DOCX '{filename}': {e}"))),
        FileKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("Could not read PDF '{filename}': {e}"))),
    }
}

fn extract_docx(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|e| e.to_string())?;
    let mut xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut xml)
        .map_err(|e| e.to_string())?;
    if xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err("word/document.xml exceeds size limit".to_string());
    }
    docx_paragraphs(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// Text of every `<w:p>` in document order, runs concatenated.
fn docx_paragraphs(xml: &[u8]) -> Result<Vec<String>, String> {
    use quick_xml::events::Event;

    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"p" {
                    paragraphs.push(String::new());
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = false;
                }
            }
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                if let Some(current) = paragraphs.last_mut() {
                    current.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Reads a multipart body, extracting text from its `file` part.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field
                .file_name()
                .map(str::to_string)
                .filter(|f| !f.trim().is_empty())
                .ok_or_else(|| AppError::Validation("file part has no filename".to_string()))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            file = Some((filename, data));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            fields.insert(name, value);
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Validation("multipart body has no 'file' part".to_string()))?;
    let text = extract_text(&filename, &data)?;
    Ok(Upload {
        filename,
        text,
        fields,
    })
}
