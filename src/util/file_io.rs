
use log::trace;
use std::io::{BufRead, BufReader, Read};
use std::fs::File;
use std::path::Path;

/// Opens a file for reading, transparently decompressing if the extension is ".gz"
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open properly
pub fn open_reader(filename: &Path) -> Result<Box<dyn Read>, Box<dyn std::error::Error>> {
    let fp: Box<dyn Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(
            flate2::read::MultiGzDecoder::new(
                File::open(filename)?
            )
        )
    } else {
        Box::new(File::open(filename)?)
    };
    Ok(fp)
}

/// Helper function that loads a file into some type, helpful generic
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let fp = open_reader(filename)?;
    let result: T = serde_json::from_reader(fp)?;
    Ok(result)
}

/// Helper function that will read a file line-by-line, trimming whitespace and skipping blank lines.
/// Lines that are not valid UTF-8 are skipped.
/// # Arguments
/// * `filename` - The file to load
/// # Errors
/// * if the file cannot be opened or read
pub fn load_file_lines(filename: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(open_reader(filename)?);
    let mut lines = vec![];
    for (line_index, raw_line) in reader.split(b'\n').enumerate() {
        let raw_line = raw_line?;
        let line = match std::str::from_utf8(&raw_line) {
            Ok(l) => l,
            Err(e) => {
                trace!("Skipping line {} of {filename:?}: {e}", line_index + 1);
                continue;
            }
        };
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

/// Builds a headerless, flexible CSV reader; quotes are handled by the parser.
/// # Arguments
/// * `filename` - the delimited file to open, may be gzipped
/// * `delimiter` - the field delimiter, e.g. b',' or b'\t'
/// # Errors
/// * if the file cannot be opened
fn open_delimited(filename: &Path, delimiter: u8) -> Result<csv::Reader<Box<dyn Read>>, Box<dyn std::error::Error>> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(open_reader(filename)?);
    Ok(reader)
}

/// Loads every row of a delimited file; rows that are not valid UTF-8 are skipped.
/// # Arguments
/// * `filename` - the delimited file to open, may be gzipped
/// * `delimiter` - the field delimiter, e.g. b',' or b'\t'
/// # Errors
/// * if the file cannot be opened or read
pub fn load_delimited_rows(filename: &Path, delimiter: u8) -> Result<Vec<csv::StringRecord>, Box<dyn std::error::Error>> {
    let mut csv_reader = open_delimited(filename, delimiter)?;
    let mut rows = vec![];
    for row in csv_reader.byte_records() {
        let row = row?;
        let position = row.position().map(|p| p.line()).unwrap_or_default();
        match csv::StringRecord::from_byte_record(row) {
            Ok(r) => rows.push(r),
            Err(e) => trace!("Skipping line {position} of {filename:?}: {e}")
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_load_file_lines_gz() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let plain_fn = tmp_dir.path().join("genes.txt");
        std::fs::write(&plain_fn, "TP53\n\n  BRCA1 \nPTEN\n").unwrap();
        assert_eq!(load_file_lines(&plain_fn).unwrap(), vec!["TP53", "BRCA1", "PTEN"]);

        let gz_fn = tmp_dir.path().join("genes.txt.gz");
        let mut encoder = flate2::write::GzEncoder::new(File::create(&gz_fn).unwrap(), flate2::Compression::default());
        encoder.write_all(b"TP53\nPTEN\n").unwrap();
        encoder.finish().unwrap();
        assert_eq!(load_file_lines(&gz_fn).unwrap(), vec!["TP53", "PTEN"]);
    }

    #[test]
    fn test_invalid_utf8_skipped() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let lines_fn = tmp_dir.path().join("genes.txt");
        std::fs::write(&lines_fn, b"TP53\n\xff\xfe\nPTEN\n").unwrap();
        assert_eq!(load_file_lines(&lines_fn).unwrap(), vec!["TP53", "PTEN"]);

        let csv_fn = tmp_dir.path().join("pairs.csv");
        std::fs::write(&csv_fn, b"EML4,ALK\n\xff\xfe,BAD\nKIF5B,RET\n").unwrap();
        let rows = load_delimited_rows(&csv_fn, b',').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "ALK");
        assert_eq!(&rows[1][0], "KIF5B");
    }

    #[test]
    fn test_missing_file() {
        assert!(load_file_lines(Path::new("test_data/does_not_exist.txt")).is_err());
    }
}
