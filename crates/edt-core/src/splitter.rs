//! Splitting of compound cells and detection of wrapped continuation cells

use crate::rules::{one_line, Rules};
use crate::table::{EntryKey, Table};
use log::debug;

/// Store the text of a content cell, split into one entry per course section
///
/// A cell listing several groups each with a room becomes one entry per
/// group, each keeping the cell's first line as a shared preamble. A cell
/// listing several numbered sessions each with a room becomes one entry per
/// session (only when `split_sessions` is on). Anything else is stored as a
/// single entry with variant 0.
///
/// Returns the number of entries written.
pub fn split_entry(
    table: &mut Table,
    rules: &Rules,
    split_sessions: bool,
    column: usize,
    row: usize,
    text: &str,
) -> usize {
    // A label ending in a colon with the course on the next line, e.g. "PARTIEL:"
    let text = text.replace(":\n", " ");

    let groups: Vec<&str> = rules
        .group_location
        .find_iter(&text)
        .map(|m| m.as_str())
        .collect();

    if !groups.is_empty() {
        let first_line = text.lines().next().unwrap_or("").trim();
        let preamble = rules.group.replace_all(first_line, "");

        for (i, group) in groups.iter().enumerate() {
            let sub = format!("{}\n{}", preamble, group);
            debug!("({}:{}:{}) Splitting group: '{}'", column, row, i, one_line(&sub));
            table.set_entry(EntryKey::new(column, row, i), sub);
        }

        return groups.len();
    }

    if split_sessions {
        let sessions: Vec<&str> = rules
            .session_location
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect();

        if !sessions.is_empty() {
            for (i, session) in sessions.iter().enumerate() {
                debug!("({}:{}:{}) Splitting session: '{}'", column, row, i, one_line(session));
                table.set_entry(EntryKey::new(column, row, i), *session);
            }

            return sessions.len();
        }
    }

    table.set_entry(EntryKey::new(column, row, 0), text);
    1
}

/// Whether a cell only carries group, time or room details and is therefore
/// the wrapped tail of the entry above it
pub fn is_continuation(rules: &Rules, text: &str) -> bool {
    let text = rules.strip_boilerplate(text);
    let first_line = text.lines().next().unwrap_or("");
    let residue = rules.strip_structure(first_line);

    rules.cut_alternatives(&residue).trim().is_empty()
}
