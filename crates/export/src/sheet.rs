use csv::{QuoteStyle, WriterBuilder};
use models::Contact;
use rust_xlsxwriter::{Format, Workbook};

use crate::rows::{contact_row, CONTACT_HEADERS};
use crate::ExportError;

/// CSV bytes: one header line plus one line per contact, every field
/// double-quoted.
pub fn to_csv(contacts: &[Contact]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(CONTACT_HEADERS)?;
    for contact in contacts {
        writer.write_record(contact_row(contact))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))
}

/// Workbook with a single "Contacts" sheet: bold header row, one row per
/// contact.
pub fn to_xlsx(contacts: &[Contact]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Contacts")?;

    let bold = Format::new().set_bold();
    for (col, header) in CONTACT_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (row, contact) in contacts.iter().enumerate() {
        for (col, cell) in contact_row(contact).iter().enumerate() {
            sheet.write_string((row + 1) as u32, col as u16, cell)?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}
