use super::error::ImportError;
use super::grid::{column_letter, CellValue, RawGrid};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::io::Cursor;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];
const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Decodes an uploaded file into a header row plus data rows.
///
/// Workbooks (xlsx, xlsm, xlsb, xls, ods) are read with calamine and only
/// the first sheet is used. Anything else is treated as delimited text.
pub fn parse_spreadsheet(bytes: &[u8]) -> Result<RawGrid, ImportError> {
    if bytes.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    let table = if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
        read_workbook(bytes)?
    } else {
        read_delimited(bytes)?
    };

    let mut rows = table.into_iter();
    let header_row = rows.next().ok_or(ImportError::EmptyFile)?;
    let headers = header_names(&header_row);
    let grid = RawGrid::new(headers, rows.collect());

    log::debug!(
        "Spreadsheet decoded: {} columns, {} data rows",
        grid.column_count(),
        grid.row_count()
    );
    Ok(grid)
}

fn read_workbook(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::unreadable(format!("Failed to open workbook: {}", e)))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| ImportError::unreadable(format!("Failed to read first sheet: {}", e)))?,
        None => return Err(ImportError::EmptyFile),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn read_delimited(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>, ImportError> {
    let decoded = decode_text(bytes);
    let text: &str = &decoded;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(text))
        .from_reader(text.as_bytes());

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::unreadable(format!("Malformed delimited text: {}", e)))?;
        table.push(record.iter().map(CellValue::text).collect());
    }
    Ok(table)
}

/// Decodes delimited text: a BOM selects UTF-8 or UTF-16, BOM-less input is
/// read as UTF-8 and falls back to Windows-1252 when it is not valid UTF-8.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        log::debug!("Delimited text decoded as {}", encoding.name());
        return text;
    }
    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => {
            log::debug!("Delimited text is not UTF-8, decoding as {}", WINDOWS_1252.name());
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

/// Picks the most frequent of `,` `;` `\t` on the first line; `,` on a tie or none.
fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or_default();
    let mut best = b',';
    let mut best_count = 0;
    for delimiter in DELIMITERS {
        let count = first_line.bytes().filter(|b| *b == delimiter).count();
        if count > best_count {
            best = delimiter;
            best_count = count;
        }
    }
    best
}

fn header_names(row: &[CellValue]) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell.as_text().trim().to_string();
            if name.is_empty() {
                format!("Column {}", column_letter(idx))
            } else {
                name
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_with_header_and_rows() {
        let csv = b"Item,SKU,Cost,Qty\nGauze,G-100,5.99,200\nTape,T-7,3.50,40\n";
        let grid = parse_spreadsheet(csv).unwrap();
        assert_eq!(grid.headers, vec!["Item", "SKU", "Cost", "Qty"]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.rows[0][2], CellValue::text("5.99"));
    }

    #[test]
    fn test_semicolon_and_tab_delimiters_are_sniffed() {
        let grid = parse_spreadsheet(b"Name;Price\nMask;1,25\n").unwrap();
        assert_eq!(grid.headers, vec!["Name", "Price"]);
        assert_eq!(grid.rows[0][1], CellValue::text("1,25"));

        let grid = parse_spreadsheet(b"Name\tStock\nGown\t12\n").unwrap();
        assert_eq!(grid.rows[0], vec![CellValue::text("Gown"), CellValue::text("12")]);
    }

    #[test]
    fn test_bom_is_stripped_and_blank_headers_named() {
        let grid = parse_spreadsheet(b"\xEF\xBB\xBFSKU,,Brand\nA1,x,Acme\n").unwrap();
        assert_eq!(grid.headers, vec!["SKU", "Column B", "Brand"]);
    }

    #[test]
    fn test_ragged_rows_and_blank_lines() {
        let grid = parse_spreadsheet(b"A,B,C\n1\n,,\n1,2,3,4\n").unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows[0], vec![CellValue::text("1"), CellValue::Empty, CellValue::Empty]);
        assert_eq!(grid.rows[1], vec![CellValue::Empty; 3]);
        assert_eq!(grid.rows[2].len(), 3);
    }

    #[test]
    fn test_blank_rows_count_towards_import() {
        let grid = parse_spreadsheet(b"Name,Price\nA,1\n,\nB,2\n").unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows[1], vec![CellValue::Empty, CellValue::Empty]);
        assert_eq!(grid.rows[2][0], CellValue::text("B"));
    }

    #[test]
    fn test_windows_1252_text_is_decoded() {
        let grid = parse_spreadsheet(b"Name,Price\nCaf\xE9 Gauze,5\n").unwrap();
        assert_eq!(grid.headers, vec!["Name", "Price"]);
        assert_eq!(grid.rows[0][0], CellValue::text("Caf\u{e9} Gauze"));
    }

    #[test]
    fn test_utf16_tab_separated_text_is_decoded() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("Name\tPrice\nGauze\t5\n".encode_utf16().flat_map(u16::to_le_bytes));
        let grid = parse_spreadsheet(&bytes).unwrap();
        assert_eq!(grid.headers, vec!["Name", "Price"]);
        assert_eq!(grid.rows[0], vec![CellValue::text("Gauze"), CellValue::text("5")]);
    }

    #[test]
    fn test_xlsx_first_sheet_is_read() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Product Name").unwrap();
        sheet.write_string(0, 1, "Price").unwrap();
        sheet.write_string(0, 2, "SKU").unwrap();
        sheet.write_string(1, 0, "Gauze").unwrap();
        sheet.write_number(1, 1, 5.99).unwrap();
        sheet.write_number(1, 2, 1001.0).unwrap();
        let other = workbook.add_worksheet();
        other.write_string(0, 0, "Notes").unwrap();
        other.write_string(1, 0, "ignored").unwrap();
        other.write_string(2, 0, "also ignored").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = parse_spreadsheet(&bytes).unwrap();
        assert_eq!(grid.headers, vec!["Product Name", "Price", "SKU"]);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(
            grid.rows[0],
            vec![CellValue::text("Gauze"), CellValue::Number(5.99), CellValue::Number(1001.0)]
        );
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let grid = parse_spreadsheet(b"Name,Price\n").unwrap();
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.row_count(), 0);
    }

    #[test]
    fn test_empty_and_unreadable_inputs() {
        assert_eq!(parse_spreadsheet(b""), Err(ImportError::EmptyFile));
        assert!(matches!(
            parse_spreadsheet(b"PK\x03\x04not really a zip"),
            Err(ImportError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_workbook_cells_convert() {
        assert_eq!(cell_from_data(&Data::Int(200)), CellValue::Number(200.0));
        assert_eq!(cell_from_data(&Data::Bool(true)), CellValue::text("true"));
        assert_eq!(cell_from_data(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Empty);
    }
}
