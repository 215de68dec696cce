//! DOCX generation with docx-rs.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};

use crate::error::{RenderError, RenderResult};

/// Title placed above the corrected text.
pub const CORRECTED_HEADING: &str = "AI Corrected Document";

/// Style id of the level-1 heading.
pub const HEADING_STYLE_ID: &str = "Heading1";

/// Build a DOCX holding the heading and `text` as a single paragraph.
///
/// Line feeds in `text` become in-paragraph line breaks and tabs become
/// tab elements.
pub fn build_docx(text: &str) -> RenderResult<Vec<u8>> {
    let heading_style = Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
        .name("Heading 1")
        .bold()
        .size(32);

    let heading = Paragraph::new()
        .add_run(Run::new().add_text(CORRECTED_HEADING))
        .style(HEADING_STYLE_ID);

    let mut body = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            body = body.add_break(BreakType::TextWrapping);
        }
        for (j, segment) in line.trim_end_matches('\r').split('\t').enumerate() {
            if j > 0 {
                body = body.add_tab();
            }
            if !segment.is_empty() {
                body = body.add_text(segment);
            }
        }
    }

    let docx = Docx::new()
        .add_style(heading_style)
        .add_paragraph(heading)
        .add_paragraph(Paragraph::new().add_run(body));

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}
