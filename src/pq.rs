// File I/O
use std::path::Path;

use polars::{io::parquet::write::StatisticsOptions, prelude::*};

pub fn read(path: &Path) -> PolarsResult<DataFrame> {
    ParquetReader::new(std::fs::File::open(path)?)
        .use_statistics(true)
        .finish()
}

pub fn write(df: &DataFrame, path: &Path) -> PolarsResult<()> {
    let file = std::fs::File::create(path)?;

    ParquetWriter::new(file)
        .with_statistics(StatisticsOptions::full())
        .with_compression(ParquetCompression::Snappy)
        .finish(&mut df.clone())?;

    Ok(())
}

pub fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
}

/// Write `df` as CSV. With `index` set, a leading unnamed column holds the
/// row number, the layout pandas produces.
pub fn write_csv(df: &DataFrame, path: &Path, index: bool) -> PolarsResult<()> {
    let mut table = if index {
        let rows = (0..df.height() as i64).collect::<Vec<i64>>();
        let mut cols = vec![Column::new(PlSmallStr::EMPTY, rows)];
        cols.extend(df.get_columns().iter().cloned());
        DataFrame::new(cols)?
    } else {
        df.clone()
    };

    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut table)
}

/// Parquet for a `.parquet` extension, CSV for anything else.
pub fn write_table(df: &DataFrame, path: &Path, index: bool) -> PolarsResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => write(df, path),
        _ => write_csv(df, path, index),
    }
}
