use chrono::{DateTime, Utc};
use models::Contact;

/// Column order shared by the CSV and spreadsheet exports.
pub const CONTACT_HEADERS: [&str; 7] = [
    "Name", "Email", "Phone", "Company", "Service", "Message", "Date",
];

pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Flatten one contact into the export columns; absent optionals become
/// empty cells.
pub fn contact_row(contact: &Contact) -> [String; 7] {
    [
        contact.name.clone(),
        contact.email.clone(),
        contact.phone.clone().unwrap_or_default(),
        contact.company_name.clone().unwrap_or_default(),
        contact.service_interested.clone(),
        contact.message.clone(),
        format_date(&contact.created_at),
    ]
}
