//! Column layout and line-wrapping rules for the PDF contact table.
//!
//! Widths mirror the dashboard's report layout: six columns on A4 portrait
//! with 10 mm side margins. Text metrics are an approximation of Helvetica
//! advance widths, good enough to keep wrapped lines inside their cells.

use models::Contact;

use crate::rows::format_date;

pub const PDF_HEADERS: [&str; 6] = ["Name", "Email", "Phone", "Service", "Message", "Date"];

/// Column widths in millimetres; they sum to the printable width (190 mm).
pub const COLUMN_WIDTHS_MM: [f64; 6] = [30.0, 45.0, 25.0, 35.0, 35.0, 20.0];

/// Approximate advance width of a character in ems. Helvetica is not
/// monospaced; three buckets keep the estimate close enough for layout.
fn char_em(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | 't' | 'f' | 'r' | 'I' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        ' ' => 0.28,
        _ if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.66,
        _ => 0.52,
    }
}

pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(char_em).sum::<f64>() * font_size
}

/// Greedy word wrap into lines no wider than `max_width` (points). Words
/// wider than a whole line are broken by character so no line ever
/// overflows its cell.
pub fn wrap_text(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    let mut push_word = |word: &str, lines: &mut Vec<String>, current: &mut String| {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font_size) <= max_width {
            *current = candidate;
            return;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(current));
        }
        if text_width(word, font_size) <= max_width {
            *current = word.to_string();
            return;
        }
        // Word alone overflows the cell: hard-break it.
        let mut piece = String::new();
        for c in word.chars() {
            if !piece.is_empty() {
                let mut candidate = piece.clone();
                candidate.push(c);
                if text_width(&candidate, font_size) > max_width {
                    lines.push(std::mem::take(&mut piece));
                }
            }
            piece.push(c);
        }
        *current = piece;
    };

    for word in text.split_whitespace() {
        push_word(word, &mut lines, &mut current);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// The six PDF columns for one contact. A missing phone renders as "-".
pub fn pdf_row(contact: &Contact) -> [String; 6] {
    [
        contact.name.clone(),
        contact.email.clone(),
        contact.phone.clone().unwrap_or_else(|| "-".into()),
        contact.service_interested.clone(),
        contact.message.clone(),
        format_date(&contact.created_at),
    ]
}
