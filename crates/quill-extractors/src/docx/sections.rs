//! Section header and footer text, read straight from the DOCX package.
//!
//! Each `w:sectPr` in `word/document.xml` names its default header and
//! footer through relationship ids. A section without its own reference
//! inherits the previous section's part.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{ExtractError, ExtractResult};

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

/// Header and footer text of one section.
///
/// Paragraph texts are joined by single spaces; blank paragraphs are
/// skipped and a part with no visible text yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionText {
    pub header: Option<String>,
    pub footer: Option<String>,
}

#[derive(Debug, Default)]
struct SectionRefs {
    header: Option<String>,
    footer: Option<String>,
}

/// Read header and footer text for every section, in document order.
pub(crate) fn read_sections(content: &[u8]) -> ExtractResult<Vec<SectionText>> {
    let mut archive = ZipArchive::new(Cursor::new(content))
        .map_err(|e| ExtractError::Docx(format!("Failed to open DOCX package: {}", e)))?;

    let rels = parse_relationships(&read_part(&mut archive, DOCUMENT_RELS_PART)?)?;
    let refs = parse_section_refs(&read_part(&mut archive, DOCUMENT_PART)?)?;

    let mut part_text: HashMap<String, Option<String>> = HashMap::new();
    let mut sections = Vec::with_capacity(refs.len());
    let mut prev_header: Option<String> = None;
    let mut prev_footer: Option<String> = None;

    for section in refs {
        let header_rid = section.header.or(prev_header.take());
        let footer_rid = section.footer.or(prev_footer.take());

        let header = match header_rid.as_deref() {
            Some(rid) => resolve_text(&mut archive, &rels, &mut part_text, rid)?,
            None => None,
        };
        let footer = match footer_rid.as_deref() {
            Some(rid) => resolve_text(&mut archive, &rels, &mut part_text, rid)?,
            None => None,
        };

        sections.push(SectionText { header, footer });
        prev_header = header_rid;
        prev_footer = footer_rid;
    }

    Ok(sections)
}

fn resolve_text(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    rels: &HashMap<String, String>,
    cache: &mut HashMap<String, Option<String>>,
    rid: &str,
) -> ExtractResult<Option<String>> {
    let part = rels
        .get(rid)
        .ok_or_else(|| ExtractError::Docx(format!("Unknown relationship id '{}'", rid)))?;

    if let Some(text) = cache.get(part) {
        return Ok(text.clone());
    }

    let paragraphs = parse_paragraphs(&read_part(archive, part)?)?;
    let joined = paragraphs
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let text = if joined.is_empty() { None } else { Some(joined) };

    cache.insert(part.clone(), text.clone());
    Ok(text)
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> ExtractResult<Vec<u8>> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| ExtractError::Docx(format!("Missing part '{}': {}", name, e)))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn xml_error(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::Docx(format!("Malformed XML: {}", e))
}

/// Relationship targets are relative to `word/` unless absolute.
fn part_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{}", target),
    }
}

fn attribute(e: &BytesStart, local: &[u8]) -> ExtractResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.local_name().as_ref() == local {
            return Ok(Some(attr.unescape_value().map_err(xml_error)?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_relationships(xml: &[u8]) -> ExtractResult<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attribute(&e, b"Id")?, attribute(&e, b"Target")?)
                {
                    rels.insert(id, part_path(&target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

fn parse_section_refs(xml: &[u8]) -> ExtractResult<Vec<SectionRefs>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut sections = Vec::new();
    let mut current: Option<SectionRefs> = None;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"sectPr" {
                    current = Some(SectionRefs::default());
                } else {
                    record_reference(&e, current.as_mut())?;
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"sectPr" {
                    sections.push(SectionRefs::default());
                } else {
                    record_reference(&e, current.as_mut())?;
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"sectPr" {
                    if let Some(section) = current.take() {
                        sections.push(section);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sections)
}

fn record_reference(e: &BytesStart, section: Option<&mut SectionRefs>) -> ExtractResult<()> {
    let Some(section) = section else {
        return Ok(());
    };
    let is_header = match e.local_name().as_ref() {
        b"headerReference" => true,
        b"footerReference" => false,
        _ => return Ok(()),
    };

    // Only the default part; first-page and even-page variants are ignored.
    let kind = attribute(e, b"type")?;
    if kind.as_deref().unwrap_or("default") != "default" {
        return Ok(());
    }
    let rid = attribute(e, b"id")?;
    if is_header {
        section.header = rid;
    } else {
        section.footer = rid;
    }
    Ok(())
}

/// Top-level paragraph texts of a header or footer part.
fn parse_paragraphs(xml: &[u8]) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" if table_depth == 0 => current = Some(String::new()),
                b"r" => in_run = true,
                b"t" if in_run => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if table_depth == 0 => paragraphs.push(String::new()),
                b"tab" if in_run => {
                    if let Some(p) = current.as_mut() {
                        p.push('\t');
                    }
                }
                b"br" | b"cr" if in_run => {
                    if let Some(p) = current.as_mut() {
                        p.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(p) = current.as_mut() {
                    p.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" if table_depth == 0 => {
                    if let Some(p) = current.take() {
                        paragraphs.push(p);
                    }
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const W_NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

    fn package(parts: &[(&str, String)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    const HEADER_REL: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";

    fn rels(entries: &[(&str, &str)]) -> String {
        let body: String = entries
            .iter()
            .map(|(id, target)| {
                format!(
                    r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                    id, HEADER_REL, target
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{}">{}</Relationships>"#,
            REL_NS, body
        )
    }

    fn part(root: &str, paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|text| {
                format!(
                    r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                    text
                )
            })
            .collect();
        format!(
            r#"<w:{root} {ns}>{body}</w:{root}>"#,
            root = root,
            ns = W_NS,
            body = body
        )
    }

    fn document(sect_prs: &[&str]) -> String {
        let body: String = sect_prs
            .iter()
            .enumerate()
            .map(|(i, refs)| {
                if i + 1 < sect_prs.len() {
                    format!(r#"<w:p><w:pPr><w:sectPr>{}</w:sectPr></w:pPr></w:p>"#, refs)
                } else {
                    format!(
                        r#"<w:sectPr>{}<w:pgSz w:w="12240" w:h="15840"/></w:sectPr>"#,
                        refs
                    )
                }
            })
            .collect();
        format!(
            r#"<w:document {}><w:body><w:p><w:r><w:t>Body</w:t></w:r></w:p>{}</w:body></w:document>"#,
            W_NS, body
        )
    }

    #[test]
    fn test_single_section_header_and_footer() {
        let bytes = package(&[
            (
                DOCUMENT_PART,
                document(&[r#"<w:headerReference w:type="default" r:id="rId7"/><w:footerReference w:type="default" r:id="rId8"/>"#]),
            ),
            (DOCUMENT_RELS_PART, rels(&[("rId7", "header1.xml"), ("rId8", "footer1.xml")])),
            ("word/header1.xml", part("hdr", &["ACME Corp", "  ", "Confidential"])),
            ("word/footer1.xml", part("ftr", &["Page footer"])),
        ]);

        let sections = read_sections(&bytes).unwrap();
        assert_eq!(
            sections,
            vec![SectionText {
                header: Some("ACME Corp Confidential".to_string()),
                footer: Some("Page footer".to_string()),
            }]
        );
    }

    #[test]
    fn test_section_inherits_previous_parts() {
        let bytes = package(&[
            (
                DOCUMENT_PART,
                document(&[
                    r#"<w:headerReference w:type="default" r:id="rId1"/>"#,
                    r#"<w:headerReference w:type="first" r:id="rId2"/>"#,
                ]),
            ),
            (DOCUMENT_RELS_PART, rels(&[("rId1", "header1.xml"), ("rId2", "/word/header2.xml")])),
            ("word/header1.xml", part("hdr", &["Running head"])),
            ("word/header2.xml", part("hdr", &["Title page head"])),
        ]);

        let sections = read_sections(&bytes).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].header.as_deref(), Some("Running head"));
        assert_eq!(sections[1].header.as_deref(), Some("Running head"));
        assert_eq!(sections[1].footer, None);
    }

    #[test]
    fn test_blank_header_yields_none() {
        let bytes = package(&[
            (
                DOCUMENT_PART,
                document(&[r#"<w:headerReference w:type="default" r:id="rId1"/>"#]),
            ),
            (DOCUMENT_RELS_PART, rels(&[("rId1", "header1.xml")])),
            ("word/header1.xml", part("hdr", &["", " "])),
        ]);

        assert_eq!(read_sections(&bytes).unwrap(), vec![SectionText::default()]);
    }

    #[test]
    fn test_missing_header_part_is_an_error() {
        let bytes = package(&[
            (
                DOCUMENT_PART,
                document(&[r#"<w:headerReference w:type="default" r:id="rId1"/>"#]),
            ),
            (DOCUMENT_RELS_PART, rels(&[("rId1", "header1.xml")])),
        ]);

        assert!(read_sections(&bytes).is_err());
    }

    #[test]
    fn test_not_a_package() {
        assert!(read_sections(b"plain text").is_err());
    }

    #[test]
    fn test_paragraph_text_with_tabs_breaks_and_tables() {
        let xml = format!(
            r#"<w:hdr {}><w:p><w:pPr><w:tabs><w:tab w:val="center" w:pos="4680"/></w:tabs></w:pPr><w:r><w:t>Left</w:t></w:r><w:r><w:tab/><w:t>Right &amp; more</w:t><w:br/></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>In table</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:hdr>"#,
            W_NS
        );

        let paragraphs = parse_paragraphs(xml.as_bytes()).unwrap();
        assert_eq!(paragraphs, vec!["Left\tRight & more\n".to_string(), String::new()]);
    }
}
