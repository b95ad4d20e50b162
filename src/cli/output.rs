//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use certlist::listing::{PageNavigation, SortHeader};
use certlist::{ErrorLog, GiftCertificate, ListingError, SortDirection};

/// Writes one line per certificate.
pub fn write_certificates<W: Write>(
    writer: &mut W,
    items: &[GiftCertificate],
) -> Result<(), ListingError> {
    if items.is_empty() {
        return writeln!(writer, "  (no certificates match)").map_err(|e| io_error(&e));
    }

    for item in items {
        let created = item.create.map_or_else(
            || "unknown date".to_owned(),
            |created| created.format("%Y-%m-%d %H:%M").to_string(),
        );
        let tags = item.tag_list();
        writeln!(
            writer,
            "  #{id} {name} | {price:.2} | {created} | {tags}",
            id = item.id,
            name = item.name,
            price = item.price,
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes the sortable column headings, marking the active sort.
pub fn write_sort_headers<W: Write>(
    writer: &mut W,
    headers: &[SortHeader],
) -> Result<(), ListingError> {
    let columns: Vec<String> = headers
        .iter()
        .map(|header| {
            let marker = match header.active {
                Some(SortDirection::Ascending) => " (asc)",
                Some(SortDirection::Descending) => " (desc)",
                None => "",
            };
            format!("{}{marker}", header.field.label())
        })
        .collect();
    writeln!(writer, "Columns: {}", columns.join(" | ")).map_err(|e| io_error(&e))
}

/// Writes the page strip, e.g. `<< < 1 [2] 3 > >>`.
///
/// Disabled navigation buttons are shown as `--`.
pub fn write_page_navigation<W: Write>(
    writer: &mut W,
    navigation: &PageNavigation,
) -> Result<(), ListingError> {
    let button = |enabled: bool, label: &'static str| if enabled { label } else { "--" };
    let pages: Vec<String> = navigation
        .pages
        .iter()
        .map(|page| {
            if page.current {
                format!("[{}]", page.number)
            } else {
                page.number.to_string()
            }
        })
        .collect();

    writeln!(
        writer,
        "Pages: {} {} {} {} {}",
        button(navigation.first_enabled, "<<"),
        button(navigation.previous_enabled, "<"),
        pages.join(" "),
        button(navigation.next_enabled, ">"),
        button(navigation.last_enabled, ">>"),
    )
    .map_err(|e| io_error(&e))
}

/// Writes the error log; nothing is written when it is empty.
pub fn write_error_log<W: Write>(writer: &mut W, log: &ErrorLog) -> Result<(), ListingError> {
    if log.is_empty() {
        return Ok(());
    }

    writeln!(writer, "Errors:").map_err(|e| io_error(&e))?;
    for entry in log.entries() {
        writeln!(
            writer,
            "  [{}] status {}: {}",
            entry.id, entry.report.status_code, entry.report.message
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Maps a write failure onto a listing error.
pub fn io_error(error: &io::Error) -> ListingError {
    ListingError::Io {
        message: error.to_string(),
    }
}
