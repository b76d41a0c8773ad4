//! PLS playlist generation

use std::borrow::Cow;

use crate::playlist::PlaylistEntry;

/// PLS format version written in the footer
pub const PLS_VERSION: u32 = 2;

/// Generate PLS playlist file content
///
/// Keys are written with their exact case (`File1`, not `file1`) and with no
/// whitespace around `=`. `NumberOfEntries` is counted from `entries`.
pub fn generate_pls(entries: &[PlaylistEntry]) -> String {
    let mut content = String::from("[playlist]\n");
    for entry in entries {
        let i = entry.index;
        content.push_str(&format!("File{}={}\n", i, single_line(&entry.url)));
        content.push_str(&format!("Title{}={}\n", i, single_line(&entry.title)));
        content.push_str(&format!("Length{}={}\n", i, entry.length));
    }
    content.push_str(&format!("NumberOfEntries={}\n", entries.len()));
    content.push_str(&format!("Version={}\n", PLS_VERSION));
    content
}

/// Collapse each whitespace run containing a line break into one space
///
/// A value spanning lines would leave a continuation line with no `=`.
fn single_line(value: &str) -> Cow<'_, str> {
    if !value.contains(['\r', '\n']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut run = String::new();
    for c in value.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_whitespace(&mut out, &mut run);
        out.push(c);
    }
    flush_whitespace(&mut out, &mut run);
    Cow::Owned(out)
}

fn flush_whitespace(out: &mut String, run: &mut String) {
    if run.contains(['\r', '\n']) {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}
