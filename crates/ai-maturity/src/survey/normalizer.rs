/// Canonical form used to compare column headers: invisible characters
/// removed, whitespace collapsed, ASCII lowercase.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value
        .replace(['\u{feff}', '\u{200b}'], "")
        .replace('\u{00a0}', " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_collapses_whitespace() {
        assert_eq!(normalize_header("\u{feff}Submission  ID"), "submission id");
        assert_eq!(normalize_header("  Skor\u{00a0}Dimensi 1 "), "skor dimensi 1");
        assert_eq!(normalize_header("Nama Responden:"), "nama responden:");
    }

    #[test]
    fn zero_width_space_inside_a_header_is_dropped() {
        assert_eq!(normalize_header("Jaba\u{200b}tan"), "jabatan");
    }
}
