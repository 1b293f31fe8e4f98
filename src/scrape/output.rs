//! CSV sink and console rendering for scraped rows

use crate::common::PathUtils;
use crate::error::Result;
use crate::scrape::parser::{CSV_HEADER, ScrapedImage};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Append-mode CSV file; the header goes in only when the file starts empty
pub struct RowWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    write_rows: bool,
    rows_written: usize,
}

impl RowWriter {
    pub fn open(path: &Path, write_rows: bool) -> Result<Self> {
        PathUtils::ensure_parent_exists(path)?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let starts_empty = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if starts_empty {
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            write_rows,
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `image` when row writing is enabled; returns whether a row was written
    pub fn write(&mut self, image: &ScrapedImage) -> Result<bool> {
        if !self.write_rows {
            return Ok(false);
        }
        self.writer.write_record(image.csv_record())?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(true)
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

/// Print a row the way the scraper reports each image
pub fn print_image(image: &ScrapedImage) {
    for line in image.display_lines() {
        println!("{}", line);
    }
    println!("{}", "-".repeat(40));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScrapedImage {
        ScrapedImage {
            name: "redis".into(),
            description: "In-memory store, \"fast\"".into(),
            pulls: "1B+".into(),
            stars: "12K".into(),
            tags: vec!["Linux".into(), "arm64".into()],
            publisher: "Docker Official Image".into(),
            last_updated: "Updated a day ago".into(),
            official: true,
        }
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        RowWriter::open(&path, false).unwrap().finish().unwrap();
        RowWriter::open(&path, false).unwrap().finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Image Name,Description,Pulls,Stars Count,Tags,By,Last Updated,Official Status\n"
        );
    }

    #[test]
    fn test_rows_skipped_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let mut writer = RowWriter::open(&path, false).unwrap();
        assert_eq!(writer.path(), path.as_path());
        assert!(!writer.write(&sample()).unwrap());
        assert_eq!(writer.finish().unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_rows_appended_and_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let mut writer = RowWriter::open(&path, true).unwrap();
        assert!(writer.write(&sample()).unwrap());
        assert_eq!(writer.finish().unwrap(), 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#"redis,"In-memory store, ""fast""",1B+,12K,"Linux, arm64",Docker Official Image,Updated a day ago,Official"#
        );
    }
}
