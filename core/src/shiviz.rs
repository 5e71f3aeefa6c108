use crate::assign::LogRecord;
use crate::error::{ConvertError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Parsing hint expected on the first line of a ShiViz log, followed by the
/// blank separator line.
pub const SHIVIZ_HEADER: &str = "(?<host>\\S*) (?<clock>{.*})\\n(?<event>.*)\n\n";

/// Streams records in the two-line ShiViz layout:
/// `<node> <clock>` then `<label>`.
pub struct ShivizWriter<W: Write> {
    inner: W,
    records: usize,
}

impl<W: Write> ShivizWriter<W> {
    /// Wrap `inner` and emit the header.
    pub fn new(mut inner: W) -> Result<Self> {
        inner.write_all(SHIVIZ_HEADER.as_bytes())?;
        Ok(Self { inner, records: 0 })
    }

    /// Write one record. The label is written verbatim, so a label that
    /// contains a newline spills onto extra lines and readers will mis-pair
    /// every record after it.
    pub fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        writeln!(self.inner, "{} {}", record.node, record.clock)?;
        writeln!(self.inner, "{}", record.label)?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Create (or truncate) `path` and write `records` to it.
///
/// A failure part-way through leaves whatever was already written on disk.
pub fn write_log<P: AsRef<Path>>(path: P, records: &[LogRecord]) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ConvertError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = ShivizWriter::new(BufWriter::new(file))?;
    for record in records {
        writer.write_record(record)?;
    }
    let written = writer.records();
    writer.finish()?;

    tracing::debug!("Wrote {} records to {:?}", written, path);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_clock::VectorClock;

    fn record(node: &str, clock: &[(&str, u64)], label: &str) -> LogRecord {
        LogRecord {
            node: node.to_string(),
            clock: clock.iter().map(|(n, t)| (n.to_string(), *t)).collect::<VectorClock>(),
            label: label.to_string(),
        }
    }

    #[test]
    fn header_is_written_even_without_records() {
        let writer = ShivizWriter::new(Vec::new()).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "(?<host>\\S*) (?<clock>{.*})\\n(?<event>.*)\n\n"
        );
    }

    #[test]
    fn records_use_two_lines_without_separator() {
        let mut writer = ShivizWriter::new(Vec::new()).unwrap();
        writer
            .write_record(&record("A0", &[("A0", 1)], "start"))
            .unwrap();
        writer
            .write_record(&record("B0", &[("A0", 1), ("B0", 1)], "recv"))
            .unwrap();
        assert_eq!(writer.records(), 2);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let body = output.strip_prefix(SHIVIZ_HEADER).unwrap();
        assert_eq!(body, "A0 {\"A0\":1}\nstart\nB0 {\"A0\":1,\"B0\":1}\nrecv\n");
    }

    #[test]
    fn labels_are_written_verbatim() {
        let mut writer = ShivizWriter::new(Vec::new()).unwrap();
        writer
            .write_record(&record("A0", &[("A0", 1)], "first\nsecond"))
            .unwrap();

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let body = output.strip_prefix(SHIVIZ_HEADER).unwrap();
        assert_eq!(body, "A0 {\"A0\":1}\nfirst\nsecond\n");
        assert_eq!(body.lines().count(), 3);
    }

    #[test]
    fn unwritable_destination_is_a_create_error() {
        let path = std::env::temp_dir()
            .join("causelog-missing-dir")
            .join("nested")
            .join("out.log");
        assert!(matches!(
            write_log(&path, &[]),
            Err(ConvertError::Create { .. })
        ));
    }
}
