//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive whose body lives in `word/document.xml`.
//! Paragraph text is the concatenation of its `w:t` runs; run-level `w:tab`
//! and `w:br`/`w:cr` become `\t` and `\n`.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let file = File::open(path)?;
    let xml = read_document_part(file)?;
    let paragraphs = parse_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

fn read_document_part<R: Read + Seek>(reader: R) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| ExtractionError::Docx(format!("Failed to open DOCX archive: {e}")))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("Missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Returns the text of every paragraph that has non-empty text, in document order.
pub(crate) fn parse_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    // Whitespace inside w:t is significant.
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    // Text boxes nest whole paragraphs inside a run; only top-level
    // paragraph runs contribute text.
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let top_level = paragraph_depth == 1 && run_depth == 1;
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"r" => run_depth += 1,
                b"t" => in_text = top_level,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    if paragraph_depth == 1 && !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if top_level => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractionError::Docx(format!("Bad text node: {err}")))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        )
    }

    fn build_docx(xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = ZipWriter::new(&mut buf);
            writer
                .start_file(DOCUMENT_PART, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_paragraph_runs_are_concatenated() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["Senior Engineer"]);
    }

    #[test]
    fn test_empty_paragraphs_are_skipped() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p/><w:p><w:pPr/></w:p><w:p><w:r><w:t>Python, SQL</w:t></w:r></w:p>"#,
        );
        assert_eq!(
            parse_paragraphs(&xml).unwrap(),
            vec!["Jane Doe", "Python, SQL"]
        );
    }

    #[test]
    fn test_tabs_and_breaks_inside_runs() {
        let xml = document_xml(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>2019</w:t><w:tab/><w:t>Acme</w:t><w:br/><w:t>Lead</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["2019\tAcme\nLead"]);
    }

    #[test]
    fn test_text_box_paragraph_does_not_drop_outer_text() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>Head </w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></w:pict><w:t>tail</w:t></w:r></w:p><w:p><w:r><w:t>Next</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["Head tail", "Next"]);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = document_xml(r#"<w:p><w:r><w:t>R&amp;D &lt;team&gt;</w:t></w:r></w:p>"#);
        assert_eq!(parse_paragraphs(&xml).unwrap(), vec!["R&D <team>"]);
    }

    #[test]
    fn test_extract_docx_from_disk() {
        let xml = document_xml(
            r#"<w:p><w:r><w:t>Summary</w:t></w:r></w:p><w:p><w:r><w:t>Built Kubernetes tooling</w:t></w:r></w:p>"#,
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, build_docx(&xml)).unwrap();

        assert_eq!(
            extract_docx(&path).unwrap(),
            "Summary\nBuilt Kubernetes tooling"
        );
    }

    #[test]
    fn test_archive_without_document_part_is_an_error() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = ZipWriter::new(&mut buf);
            writer
                .start_file("word/styles.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<styles/>").unwrap();
            writer.finish().unwrap();
        }
        let result = read_document_part(Cursor::new(buf.into_inner()));
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }
}
