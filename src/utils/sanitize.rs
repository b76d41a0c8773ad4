//! Output filename sanitization

/// Make a playlist file stem safe to join onto the output directory
///
/// Path separators and characters reserved on common filesystems are swapped
/// for visually similar Unicode characters, so a stem can never escape the
/// output directory. Stems that would resolve to a directory (`""`, `.`, `..`)
/// become `_`.
pub fn sanitize_file_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            '/' => '⧸',
            '\\' => '⧹',
            ':' => '꞉',
            '*' => '⁎',
            '?' => '？',
            '"' => '″',
            '<' => '‹',
            '>' => '›',
            '|' => '｜',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect();

    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "_".to_string()
    } else {
        cleaned.to_string()
    }
}
