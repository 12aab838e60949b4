use std::io::Cursor;

use encoding_rs::Encoding;
use log::{debug, info, warn};
use polars::prelude::*;

use crate::config::LoaderConfig;
use crate::error::ExplorerError;
use crate::schema::raw;

/// Read the raw wide-form dataset with every column as String.
///
/// The file is decoded from the configured encoding before parsing, column
/// names are trimmed, and the `Area`, `Item` and `Element` columns must be
/// present. All other columns and the row order are kept as-is.
pub fn load_raw(config: &LoaderConfig) -> Result<DataFrame, ExplorerError> {
    let path = config.path.display().to_string();
    let load_error = |reason: String| ExplorerError::DataLoad {
        path: path.clone(),
        reason,
    };

    let encoding = resolve_encoding(&config.encoding)
        .ok_or_else(|| load_error(format!("unknown encoding '{}'", config.encoding)))?;

    let bytes = std::fs::read(&config.path).map_err(|e| load_error(e.to_string()))?;
    debug!(
        "read {} bytes from {} ({})",
        bytes.len(),
        path,
        encoding.name()
    );

    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        warn!(
            "{} contains byte sequences invalid in {}; they were replaced",
            path,
            encoding.name()
        );
    }

    let df = parse_csv(text.into_owned().into_bytes(), config.separator)
        .map_err(|e| load_error(e.to_string()))?;

    require_columns(&df, &raw::REQUIRED)?;

    info!(
        "loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path
    );
    Ok(df)
}

/// Look up an encoding by label. WHATWG labels are tried as given, then
/// lowercased with `-`, `_` and spaces removed, so `latin-1` and `UTF_8`
/// resolve like `latin1` and `utf8`.
pub fn resolve_encoding(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    Encoding::for_label(label.as_bytes()).or_else(|| {
        let compact: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Encoding::for_label(compact.as_bytes())
    })
}

/// Parse UTF-8 delimited text into a String-typed frame with trimmed headers.
fn parse_csv(utf8: Vec<u8>, separator: u8) -> PolarsResult<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(utf8))
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    Ok(df)
}

pub(crate) fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), ExplorerError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(ExplorerError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}
