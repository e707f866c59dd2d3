//! Delimited-text reader with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{Cell, DataTable, SourceMetadata};
use crate::error::{Result, SmsPrepError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Force a delimiter given as text (`","`, `"tab"`, `"\t"`, ...).
    pub fn with_delimiter_str(mut self, delimiter: &str) -> Result<Self> {
        let byte = match delimiter {
            "tab" | "\\t" | "\t" => b'\t',
            d if d.len() == 1 && d.is_ascii() => d.as_bytes()[0],
            other => return Err(SmsPrepError::InvalidDelimiter(other.to_string())),
        };
        self.delimiter = Some(byte);
        Ok(self)
    }
}

/// Parses contact list files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| SmsPrepError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| SmsPrepError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let hash = hash_contents(&contents);

        let (data_table, delimiter) = self.parse_with_delimiter(&contents)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            file = %path.display(),
            rows = data_table.row_count(),
            columns = data_table.column_count(),
            %format,
            "parsed source file"
        );

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse in-memory contents, detecting the delimiter unless configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        self.parse_with_delimiter(bytes).map(|(table, _)| table)
    }

    fn parse_with_delimiter(&self, bytes: &[u8]) -> Result<(DataTable, u8)> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = String::from_utf8_lossy(bytes);

        if text.trim().is_empty() {
            return Err(SmsPrepError::EmptyData("File is empty".to_string()));
        }

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text.as_bytes())?,
        };

        let table = self.parse_text(&text, delimiter)?;
        Ok((table, delimiter))
    }

    fn parse_text(&self, text: &str, delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let raw_headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(SmsPrepError::EmptyData("No columns found".to_string()));
        }
        let headers = dedupe_headers(raw_headers);
        let expected_cols = headers.len();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<Cell> = record.iter().map(Cell::from_field).collect();

            // Pad short rows, drop surplus fields
            row.resize(expected_cols, Cell::Empty);

            rows.push(row);
        }

        if rows.is_empty() {
            return Err(SmsPrepError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-256 of the raw file contents, prefixed with the algorithm name.
fn hash_contents(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    format!("sha256:{:x}", hasher.finalize())
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let mut candidate = header.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", header, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SmsPrepError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus since
        // they rarely appear inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"phone,name\n639123456789,Ana\n09123456789,Ben";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"phone\tname\tdate\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let data = b"phone;name\n639123456789;\"Doe, Jane\"\n09123456789;Ben";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_keeps_leading_zeros_as_text() {
        let parser = Parser::new();
        let table = parser
            .parse_bytes(b"Phone,Name\n09123456789,Ana\n,Ben\n")
            .unwrap();

        assert_eq!(table.headers, vec!["Phone", "Name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Cell::Text("09123456789".into())));
        assert_eq!(table.get(1, 0), Some(&Cell::Empty));
    }

    #[test]
    fn test_parse_strips_bom_and_pads_rows() {
        let parser = Parser::new();
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(b"Phone,Name,Date\n639123456789,Ana\n");
        let table = parser.parse_bytes(&data).unwrap();

        assert_eq!(table.headers[0], "Phone");
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.get(0, 2), Some(&Cell::Empty));
    }

    #[test]
    fn test_parse_dedupes_headers() {
        let parser = Parser::new();
        let table = parser
            .parse_bytes(b"Phone,Name,Name,Name\n639123456789,a,b,c\n")
            .unwrap();
        assert_eq!(table.headers, vec!["Phone", "Name", "Name.1", "Name.2"]);
    }

    #[test]
    fn test_parse_empty_input_is_structural_error() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_bytes(b"   \n"),
            Err(SmsPrepError::EmptyData(_))
        ));
        assert!(matches!(
            parser.parse_bytes(b"Phone,Name\n"),
            Err(SmsPrepError::EmptyData(_))
        ));
    }

    #[test]
    fn test_delimiter_from_str() {
        let config = ParserConfig::default().with_delimiter_str("tab").unwrap();
        assert_eq!(config.delimiter, Some(b'\t'));
        assert!(ParserConfig::default().with_delimiter_str(";;").is_err());
    }
}
