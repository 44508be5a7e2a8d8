use models::Contact;

/// The Contacts page filter: case-insensitive search across name, email and
/// company, plus an optional exact service match. Exports operate on the
/// filtered collection, not the full one.
pub fn filter_contacts<'a>(
    contacts: &'a [Contact],
    search: &str,
    service: Option<&str>,
) -> Vec<&'a Contact> {
    let needle = search.trim().to_lowercase();
    contacts
        .iter()
        .filter(|contact| {
            if let Some(service) = service {
                if contact.service_interested != service {
                    return false;
                }
            }
            if needle.is_empty() {
                return true;
            }
            contact.name.to_lowercase().contains(&needle)
                || contact.email.to_lowercase().contains(&needle)
                || contact
                    .company_name
                    .as_deref()
                    .is_some_and(|company| company.to_lowercase().contains(&needle))
        })
        .collect()
}
