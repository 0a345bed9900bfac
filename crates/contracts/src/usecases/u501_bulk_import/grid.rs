use serde::{Deserialize, Serialize};

/// One spreadsheet cell after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Text cell, or `Empty` for an empty string.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Numeric reading of the cell. Text is read with `parseFloat` rules
    /// (longest numeric prefix). Returns `None` when no finite number can be read.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_float_prefix(s),
            CellValue::Empty => None,
        }?;
        n.is_finite().then_some(n)
    }

    /// String reading of the cell; numbers render without a trailing ".0".
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Empty => String::new(),
        }
    }
}

/// Renders a number the way a spreadsheet shows it: `200`, `5.99`, `-3`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Longest-prefix float parse: leading whitespace is skipped and anything
/// after the numeric prefix is ignored (`"5.99 USD"` → 5.99, `"$5"` → None).
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if end < len && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        let mut k = end + 1;
        while k < len && bytes[k].is_ascii_digit() {
            k += 1;
        }
        frac_digits = k - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = k;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut k = end + 1;
        if k < len && (bytes[k] == b'+' || bytes[k] == b'-') {
            k += 1;
        }
        let exp_start = k;
        while k < len && bytes[k].is_ascii_digit() {
            k += 1;
        }
        if k > exp_start {
            end = k;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Spreadsheet column letter for a zero-based index (0 -> A, 25 -> Z, 26 -> AA).
pub fn column_letter(idx: usize) -> String {
    let mut result = String::new();
    let mut n = idx + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

/// Header row plus rectangular data rows decoded from one uploaded file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    /// Builds a grid whose rows all have `headers.len()` cells: short rows
    /// are padded with `Empty` and cells past the last header are dropped.
    /// Blank rows are kept.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Position of the first column carrying `header`.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn has_header(&self, header: &str) -> bool {
        self.column_index(header).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("5.99"), Some(5.99));
        assert_eq!(parse_float_prefix("  200 "), Some(200.0));
        assert_eq!(parse_float_prefix("5.99 USD"), Some(5.99));
        assert_eq!(parse_float_prefix("-3.5e2kg"), Some(-350.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("1,234.50"), Some(1.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("$5"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_cell_number_reading_never_yields_nan() {
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
        assert_eq!(CellValue::Number(f64::INFINITY).as_number(), None);
        assert_eq!(CellValue::text("Infinity").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
        assert_eq!(CellValue::Number(4.0).as_number(), Some(4.0));
    }

    #[test]
    fn test_cell_text_reading() {
        assert_eq!(CellValue::Number(200.0).as_text(), "200");
        assert_eq!(CellValue::Number(5.99).as_text(), "5.99");
        assert_eq!(CellValue::Number(-0.0).as_text(), "0");
        assert_eq!(CellValue::Empty.as_text(), "");
        assert_eq!(CellValue::text("G-100").as_text(), "G-100");
        assert_eq!(CellValue::text(""), CellValue::Empty);
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_grid_rows_are_rectangular() {
        let grid = RawGrid::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                vec![CellValue::text("x")],
                vec![CellValue::Empty, CellValue::text("  ")],
                vec![
                    CellValue::text("1"),
                    CellValue::text("2"),
                    CellValue::text("3"),
                    CellValue::text("overflow"),
                ],
            ],
        );
        assert_eq!(grid.row_count(), 3);
        assert!(grid.rows.iter().all(|r| r.len() == 3));
        assert_eq!(grid.rows[0][2], CellValue::Empty);
        assert!(grid.rows[1].iter().all(CellValue::is_empty));
        assert_eq!(grid.rows[2][2], CellValue::text("3"));
    }

    #[test]
    fn test_column_index_takes_first_duplicate() {
        let grid = RawGrid::new(vec!["SKU".into(), "Name".into(), "SKU".into()], vec![]);
        assert_eq!(grid.column_index("SKU"), Some(0));
        assert_eq!(grid.column_index("sku"), None);
    }
}
