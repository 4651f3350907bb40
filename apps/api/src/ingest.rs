//! Single-column CSV input: one free-text record per line, usually quoted.

use std::path::Path;

use crate::session::SessionError;

/// Rows shorter than this many bytes after cleanup carry no usable text.
pub const MIN_ROW_LEN: usize = 20;

/// Strips the quoting and line-ending noise around one row.
pub fn clean_row(raw: &str) -> &str {
    raw.trim_start_matches(['"', ' '])
        .trim_end_matches(['"', '\r', '\n', ' '])
}

/// Splits CSV text into cleaned rows in file order.
///
/// The first line is a header and is skipped. Rows under `MIN_ROW_LEN`
/// bytes are dropped, so multi-byte text passes with fewer characters.
/// `limit` caps the number of rows returned.
pub fn parse_single_column(text: &str, limit: Option<usize>) -> Vec<String> {
    text.lines()
        .skip(1)
        .map(clean_row)
        .filter(|row| row.len() >= MIN_ROW_LEN)
        .take(limit.unwrap_or(usize::MAX))
        .map(str::to_string)
        .collect()
}

/// Reads and parses a CSV file. Any read failure means zero rows.
pub async fn read_rows(path: &Path, limit: Option<usize>) -> Result<Vec<String>, SessionError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SessionError::SourceUnavailable(format!("{}: {e}", path.display())))?;
    let rows = parse_single_column(&text, limit);
    tracing::debug!(path = %path.display(), rows = rows.len(), "CSV source parsed");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "description\n\
        \"Data Analyst needed with SQL and Excel skills\"\n\
        \n\
        \"short\"\n\
        Backend Engineer required, Java and Spring Boot\r\n\
        \"  ML Engineer needed for PyTorch and NLP work  \"\n";

    #[test]
    fn test_clean_row_strips_quotes_and_line_endings() {
        assert_eq!(clean_row("\" hello world\"\r\n"), "hello world");
        assert_eq!(clean_row("plain"), "plain");
        assert_eq!(clean_row("\"\""), "");
    }

    #[test]
    fn test_parse_skips_header_blank_and_short_rows() {
        let rows = parse_single_column(SAMPLE, None);
        assert_eq!(
            rows,
            vec![
                "Data Analyst needed with SQL and Excel skills".to_string(),
                "Backend Engineer required, Java and Spring Boot".to_string(),
                "ML Engineer needed for PyTorch and NLP work".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_respects_limit() {
        let rows = parse_single_column(SAMPLE, Some(2));
        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("Backend Engineer"));
    }

    #[test]
    fn test_min_row_len_counts_bytes() {
        // Ten two-byte characters reach 20 bytes; "ééééé ok" is 13 bytes.
        let text = "summary\n\"éééééééééé\"\n\"ééééé ok\"\n";
        assert_eq!(parse_single_column(text, None), vec!["éééééééééé".to_string()]);
    }

    #[test]
    fn test_header_only_yields_nothing() {
        assert!(parse_single_column("description\n", None).is_empty());
        assert!(parse_single_column("", None).is_empty());
    }

    #[tokio::test]
    async fn test_read_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let rows = read_rows(file.path(), Some(1)).await.unwrap();
        assert_eq!(rows, vec!["Data Analyst needed with SQL and Excel skills".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows(&dir.path().join("missing.csv"), None).await.unwrap_err();
        assert!(matches!(err, SessionError::SourceUnavailable(_)));
    }
}
