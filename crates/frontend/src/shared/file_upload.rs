use wasm_bindgen_futures::JsFuture;

/// File types offered by the upload picker.
pub const ACCEPTED_EXTENSIONS: &str = ".csv,.tsv,.txt,.xlsx,.xls,.ods";

/// Reads the whole file into memory.
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;

    Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
}

/// Human readable size, e.g. `"12.50 KB"`.
pub fn format_file_size(bytes: f64) -> String {
    if bytes < 1024.0 * 1024.0 {
        format!("{:.2} KB", bytes / 1024.0)
    } else {
        format!("{:.2} MB", bytes / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(12800.0), "12.50 KB");
        assert_eq!(format_file_size(3.0 * 1024.0 * 1024.0), "3.00 MB");
    }
}
