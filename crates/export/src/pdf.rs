//! Minimal PDF 1.4 writer for the contacts report. Emits a handful of
//! objects (catalog, page tree, two Helvetica fonts, one content stream per
//! page) with a classic xref table; enough for the fixed report layout
//! without pulling in a PDF dependency.

use models::Contact;

use crate::table::{pdf_row, wrap_text, COLUMN_WIDTHS_MM, PDF_HEADERS};

const MM: f64 = 72.0 / 25.4;
const PAGE_WIDTH: f64 = 210.0 * MM; // A4 portrait
const PAGE_HEIGHT: f64 = 297.0 * MM;

const MARGIN_LEFT: f64 = 10.0 * MM;
const MARGIN_BOTTOM: f64 = 10.0 * MM;
const TABLE_TOP_FIRST: f64 = 40.0 * MM;
const TABLE_TOP_NEXT: f64 = 15.0 * MM;
const CELL_PADDING: f64 = 2.0 * MM;

const TITLE_SIZE: f64 = 20.0;
const SUBTITLE_SIZE: f64 = 11.0;
const CELL_SIZE: f64 = 8.0;
const LINE_HEIGHT: f64 = CELL_SIZE * 1.2;

const HEADER_FILL: (f64, f64, f64) = (0.0, 0.0, 0.0);
const HEADER_TEXT: (f64, f64, f64) = (1.0, 1.0, 1.0);
const STRIPE_FILL: (f64, f64, f64) = (0.96, 0.96, 0.96);

/// Render the contacts report. Layout: title and generation date, then the
/// six-column table with a repeated header band, zebra striping, wrapped
/// cell text, and page breaks whenever the next row would cross the bottom
/// margin.
pub fn to_pdf(contacts: &[Contact], generated_on: &str) -> Vec<u8> {
    let mut pages: Vec<String> = Vec::new();
    let mut content = String::new();

    // Title block, first page only.
    text_op(&mut content, Font::Bold, TITLE_SIZE, MARGIN_LEFT + 4.0 * MM, 22.0 * MM, "Contacts Report");
    text_op(
        &mut content,
        Font::Regular,
        SUBTITLE_SIZE,
        MARGIN_LEFT + 4.0 * MM,
        32.0 * MM,
        &format!("Generated on: {generated_on}"),
    );

    let mut y = TABLE_TOP_FIRST;
    y = draw_header_band(&mut content, y);

    for (index, contact) in contacts.iter().enumerate() {
        let cells = pdf_row(contact);
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(COLUMN_WIDTHS_MM)
            .map(|(cell, width)| wrap_text(cell, width * MM - 2.0 * CELL_PADDING, CELL_SIZE))
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let row_height = line_count as f64 * LINE_HEIGHT + 2.0 * CELL_PADDING;

        if y + row_height > PAGE_HEIGHT - MARGIN_BOTTOM {
            pages.push(std::mem::take(&mut content));
            y = draw_header_band(&mut content, TABLE_TOP_NEXT);
        }

        if index % 2 == 1 {
            rect_op(&mut content, MARGIN_LEFT, y, table_width(), row_height, STRIPE_FILL);
        }

        let mut x = MARGIN_LEFT;
        for (lines, width) in wrapped.iter().zip(COLUMN_WIDTHS_MM) {
            for (line_no, line) in lines.iter().enumerate() {
                text_op(
                    &mut content,
                    Font::Regular,
                    CELL_SIZE,
                    x + CELL_PADDING,
                    y + CELL_PADDING + (line_no as f64 + 1.0) * LINE_HEIGHT - 0.25 * CELL_SIZE,
                    line,
                );
            }
            x += width * MM;
        }
        y += row_height;
    }
    pages.push(content);

    assemble(pages)
}

fn table_width() -> f64 {
    COLUMN_WIDTHS_MM.iter().sum::<f64>() * MM
}

/// Black band with bold white column titles; returns the y below the band.
fn draw_header_band(content: &mut String, y: f64) -> f64 {
    let height = LINE_HEIGHT + 2.0 * CELL_PADDING;
    rect_op(content, MARGIN_LEFT, y, table_width(), height, HEADER_FILL);
    color_op(content, HEADER_TEXT);
    let mut x = MARGIN_LEFT;
    for (header, width) in PDF_HEADERS.iter().zip(COLUMN_WIDTHS_MM) {
        text_op(
            content,
            Font::Bold,
            CELL_SIZE,
            x + CELL_PADDING,
            y + CELL_PADDING + LINE_HEIGHT - 0.25 * CELL_SIZE,
            header,
        );
        x += width * MM;
    }
    color_op(content, (0.0, 0.0, 0.0));
    y + height
}

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn name(self) -> &'static str {
        match self {
            Font::Regular => "/F1",
            Font::Bold => "/F2",
        }
    }
}

/// `y` is measured from the top of the page; PDF user space grows upward.
fn text_op(content: &mut String, font: Font, size: f64, x: f64, y: f64, text: &str) {
    content.push_str(&format!(
        "BT {} {size:.2} Tf {x:.2} {:.2} Td ({}) Tj ET\n",
        font.name(),
        PAGE_HEIGHT - y,
        escape_text(text),
    ));
}

fn rect_op(content: &mut String, x: f64, y_top: f64, w: f64, h: f64, fill: (f64, f64, f64)) {
    color_op(content, fill);
    content.push_str(&format!(
        "{x:.2} {:.2} {w:.2} {h:.2} re f\n",
        PAGE_HEIGHT - y_top - h,
    ));
}

fn color_op(content: &mut String, (r, g, b): (f64, f64, f64)) {
    content.push_str(&format!("{r:.2} {g:.2} {b:.2} rg\n"));
}

/// Escape for a PDF literal string; non-Latin-1 characters degrade to '?'.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push(' '),
            c if (c as u32) < 128 => out.push(c),
            c if (c as u32) < 256 => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

/// Lay the content streams out as a complete document: catalog, page tree,
/// fonts, then page + stream object pairs, followed by the xref table.
fn assemble(pages: Vec<String>) -> Vec<u8> {
    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets: Vec<usize> = Vec::new();
    let page_count = pages.len();

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect();

    push_obj(&mut out, &mut offsets, 1, "<< /Type /Catalog /Pages 2 0 R >>".to_string());
    push_obj(
        &mut out,
        &mut offsets,
        2,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
            kids.join(" ")
        ),
    );
    push_obj(
        &mut out,
        &mut offsets,
        3,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    );
    push_obj(
        &mut out,
        &mut offsets,
        4,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
    );

    for (i, content) in pages.iter().enumerate() {
        let page_id = 5 + 2 * i;
        let stream_id = page_id + 1;
        push_obj(
            &mut out,
            &mut offsets,
            page_id,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH:.2} {PAGE_HEIGHT:.2}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {stream_id} 0 R >>"
            ),
        );
        offsets.push(out.len());
        out.extend_from_slice(
            format!(
                "{stream_id} 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
                content.len()
            )
            .as_bytes(),
        );
    }

    let xref_offset = out.len();
    let total = offsets.len() + 1;
    out.extend_from_slice(format!("xref\n0 {total}\n0000000000 65535 f \n").as_bytes());
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {total} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        )
        .as_bytes(),
    );
    out
}

fn push_obj(out: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize, body: String) {
    offsets.push(out.len());
    out.extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn contact(n: u32, message: &str) -> Contact {
        Contact {
            contact_id: format!("c{n}"),
            name: format!("Person {n}"),
            email: format!("p{n}@example.com"),
            phone: Some("9876543210".into()),
            company_name: None,
            service_interested: "Structural Analysis".into(),
            message: message.into(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn document_structure_is_well_formed() {
        let bytes = to_pdf(&[contact(1, "Short note")], "01/06/2025");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("Contacts Report"));
        assert!(text.contains("Generated on: 01/06/2025"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn empty_collection_still_yields_one_page() {
        let bytes = to_pdf(&[], "01/06/2025");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn long_collections_break_across_pages() {
        let long_message =
            "We are planning a greenfield process plant and need full piping and \
             instrumentation design, stress analysis and vendor coordination support";
        let contacts: Vec<Contact> = (0..40).map(|n| contact(n, long_message)).collect();
        let bytes = to_pdf(&contacts, "01/06/2025");
        let text = String::from_utf8_lossy(&bytes);
        assert!(!text.contains("/Count 1"), "expected more than one page");
        // Header band is repeated on every page.
        assert!(text.matches("(Service) Tj").count() >= 2);
    }

    #[test]
    fn parentheses_in_messages_are_escaped() {
        let bytes = to_pdf(&[contact(1, "Call me (after 5pm)")], "01/06/2025");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Call me \\(after 5pm\\)"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = to_pdf(&[contact(1, "hello")], "01/06/2025");
        let text = String::from_utf8_lossy(&bytes).to_string();
        let xref = text.find("xref\n").unwrap();
        // Skip "xref", the subsection header and the free entry.
        for (i, line) in text[xref..].lines().skip(3).take(4).enumerate() {
            let offset: usize = line[..10].parse().unwrap();
            assert!(
                text[offset..].starts_with(&format!("{} 0 obj", i + 1)),
                "object {} offset wrong",
                i + 1
            );
        }
    }
}
