//! Delimited flat-file writer and loader.
//!
//! Files are comma-delimited UTF-8 with a header row. Fields containing the
//! delimiter, quotes or line breaks are quoted by the `csv` crate, so values
//! survive a round trip byte for byte.
//!
//! The writer stages output in a sibling `.tmp` file and renames it over the
//! target once every row is written, so a failed run never leaves a partial
//! corpus behind.

use crate::error::{NewsError, Result};
use crate::models::{Column, NewsRecord};
use crate::utils::ensure_parent_dir;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Write `records` to `path` with the given column layout, replacing any existing file.
///
/// Parent directories are created as needed.
///
/// # Arguments
///
/// * `path` - Destination file
/// * `records` - Rows to write, in order
/// * `columns` - Column layout; see [`Column::BASE`], [`Column::DERIVED`] and [`Column::TAGGED`]
///
/// # Returns
///
/// `Ok(())` once the file is in place. On error neither the target nor the
/// staged `.tmp` file is left behind, and an existing target is untouched.
#[instrument(level = "info", skip(records, columns), fields(path = %path.display(), count = records.len()))]
pub fn write_records(path: &Path, records: &[NewsRecord], columns: &[Column]) -> Result<()> {
    ensure_parent_dir(path)?;
    let staging = staging_path(path);

    if let Err(e) = write_to(&staging, records, columns) {
        error!(staging = %staging.display(), error = %e, "Failed writing corpus; discarding partial file");
        discard_staging(&staging);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&staging, path) {
        error!(staging = %staging.display(), error = %e, "Failed moving corpus into place; discarding staged file");
        discard_staging(&staging);
        return Err(e.into());
    }

    info!(columns = columns.len(), "Wrote corpus file");
    Ok(())
}

fn discard_staging(staging: &Path) {
    match std::fs::remove_file(staging) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(staging = %staging.display(), error = %e, "Could not remove staged corpus file"),
    }
}

fn write_to(path: &Path, records: &[NewsRecord], columns: &[Column]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns.iter().map(Column::header))?;
    for record in records {
        writer.write_record(columns.iter().map(|column| column.value(record)))?;
    }
    writer.flush()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load a corpus file written by [`write_records`] (or any file with the same headers).
///
/// # Arguments
///
/// * `path` - The CSV file to read
///
/// # Returns
///
/// All rows in file order, or [`NewsError::MissingColumn`] when a base column
/// is absent from the header.
///
/// The three base columns are required. Derived columns are optional, and
/// `clean_text` is accepted in place of `normalized_text`.
#[instrument(level = "info", fields(path = %path.display()))]
pub fn load_records(path: &Path) -> Result<Vec<NewsRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in Column::BASE {
        if !headers.iter().any(|h| h == column.header()) {
            return Err(NewsError::MissingColumn {
                path: path.display().to_string(),
                column: column.header(),
            });
        }
    }

    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<NewsRecord>, csv::Error>>()?;
    info!(count = records.len(), "Loaded corpus file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample(n: usize) -> Vec<NewsRecord> {
        (0..n)
            .map(|i| {
                let mut record = NewsRecord::new(
                    format!("Headline {}", i),
                    format!("Body {}, with a comma and \"quotes\"", i),
                    if i % 2 == 0 { "sports" } else { "world" },
                );
                record.full_text = Some(format!("Headline {}. Body {}", i, i));
                record.normalized_text = Some(format!("headline {} body {}", i, i));
                record
            })
            .collect()
    }

    #[test]
    fn test_write_then_load_five_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.csv");
        let records = sample(5);

        write_records(&path, &records, &Column::DERIVED).unwrap();
        let loaded = load_records(&path).unwrap();

        assert_eq!(loaded.len(), 5);
        for (a, b) in records.iter().zip(&loaded) {
            assert_eq!(a.news_headline, b.news_headline);
            assert_eq!(a.news_article, b.news_article);
            assert_eq!(a.news_category, b.news_category);
            assert_eq!(a.full_text, b.full_text);
            assert_eq!(a.normalized_text, b.normalized_text);
        }
        assert!(!dir.path().join("news.csv.tmp").exists());
    }

    #[test]
    fn test_round_trip_with_line_breaks_and_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.csv");
        let mut record = NewsRecord::new("₹500 crore deal", "Line one\nLine two", "business");
        record.tagged_text = Some("deal/NN ,/, crore/CD".to_string());

        write_records(&path, &[record.clone()], &Column::TAGGED).unwrap();
        assert_eq!(load_records(&path).unwrap(), vec![record]);
    }

    #[test]
    fn test_header_row_matches_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.csv");
        write_records(&path, &sample(1), &Column::BASE).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("news_headline,news_article,news_category\n"));
    }

    #[test]
    fn test_base_only_file_loads_without_derived_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.csv");
        write_records(&path, &sample(2), &Column::BASE).unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|r| r.full_text.is_none() && r.normalized_text.is_none()));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.csv");
        write_records(&path, &sample(5), &Column::DERIVED).unwrap();
        write_records(&path, &sample(2), &Column::DERIVED).unwrap();
        assert_eq!(load_records(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_failed_rename_leaves_no_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        let err = write_records(&path, &sample(2), &Column::BASE).unwrap_err();
        assert!(matches!(err, NewsError::Io(_)));
        assert!(!dir.path().join("news.csv.tmp").exists());
        assert!(path.join("occupied").exists());
    }

    #[test]
    fn test_discard_staging_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        discard_staging(&dir.path().join("never-written.csv.tmp"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/corpus/news.csv");
        write_records(&path, &sample(1), &Column::BASE).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_clean_text_header_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        fs::write(
            &path,
            "news_headline,news_article,news_category,clean_text\nH,B,world,h b\n",
        )
        .unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded[0].normalized_text.as_deref(), Some("h b"));
    }

    #[test]
    fn test_missing_base_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "news_headline,news_article\nH,B\n").unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(matches!(
            err,
            NewsError::MissingColumn {
                column: "news_category",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_records(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, NewsError::Csv(_)));
    }
}
