//! Streaming CSV source reader
//!
//! The reader runs on a blocking thread and feeds two bounded channels: one
//! with parsed records, one with skipped rows. Both are closed when the
//! reader returns.
//!
//! Quoting is strict: a `"` inside an unquoted field, or anything but a
//! delimiter after a closing quote, rejects the row instead of being kept as
//! literal text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::{ImportError, ReadError};
use super::parser::parse_record;
use crate::models::FeiraLivre;

/// Row counts observed by the reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    pub records: u64,
    pub rejected: u64,
}

/// Keeps the raw bytes of the record being parsed
///
/// `csv` unescapes quotes leniently, so the raw text is checked separately.
/// Bytes are held from the last discard point up to whatever the parser has
/// buffered ahead.
struct RawCapture<R> {
    inner: R,
    window: Vec<u8>,
    offset: u64,
}

impl<R> RawCapture<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            window: Vec::new(),
            offset: 0,
        }
    }

    /// Bytes between two absolute stream offsets
    fn raw(&self, start: u64, end: u64) -> &[u8] {
        let from = start.saturating_sub(self.offset) as usize;
        let to = end.saturating_sub(self.offset) as usize;
        self.window.get(from..to).unwrap_or(&[])
    }

    /// Forgets everything before the absolute offset `end`
    fn discard_until(&mut self, end: u64) {
        let n = (end.saturating_sub(self.offset) as usize).min(self.window.len());
        self.window.drain(..n);
        self.offset += n as u64;
    }
}

impl<R: Read> Read for RawCapture<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.window.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

/// Returns the 1-based field holding a misplaced quote, if any
fn quote_error(raw: &[u8], delimiter: u8) -> Option<usize> {
    let is_line_end = |b: &u8| *b == b'\r' || *b == b'\n';
    let start = raw.iter().position(|b| !is_line_end(b))?;
    let end = raw.iter().rposition(|b| !is_line_end(b)).map_or(start, |i| i + 1);
    let raw = &raw[start..end];

    let mut field = 1;
    let mut i = 0;
    loop {
        if raw.get(i) == Some(&b'"') {
            i += 1;
            loop {
                match raw.get(i) {
                    None => return Some(field),
                    Some(b'"') if raw.get(i + 1) == Some(&b'"') => i += 2,
                    Some(b'"') => {
                        i += 1;
                        break;
                    },
                    Some(_) => i += 1,
                }
            }
            match raw.get(i) {
                None => return None,
                Some(&b) if b == delimiter => {},
                Some(_) => return Some(field),
            }
        } else {
            loop {
                match raw.get(i) {
                    None => return None,
                    Some(&b) if b == delimiter => break,
                    Some(b'"') => return Some(field),
                    Some(_) => i += 1,
                }
            }
        }
        i += 1;
        field += 1;
    }
}

/// A CSV source positioned after its header row
pub struct SourceReader<R> {
    reader: csv::Reader<RawCapture<R>>,
    header_len: usize,
    delimiter: u8,
}

impl SourceReader<File> {
    /// Opens `path` and consumes its header row
    pub fn open(path: &Path, delimiter: u8) -> Result<Self, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, delimiter)
    }
}

impl<R: Read> SourceReader<R> {
    /// Wraps any byte source and consumes its header row
    pub fn from_reader(source: R, delimiter: u8) -> Result<Self, ImportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .delimiter(delimiter)
            .from_reader(RawCapture::new(source));

        let mut header = StringRecord::new();
        match reader.read_record(&mut header) {
            Ok(true) => {},
            Ok(false) => return Err(ImportError::MissingHeader),
            Err(e) => return Err(ImportError::Header(e)),
        }

        debug!(columns = header.len(), "Header row consumed");
        let consumed = reader.position().byte();
        reader.get_mut().discard_until(consumed);

        Ok(Self {
            reader,
            header_len: header.len(),
            delimiter,
        })
    }

    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// Reads every remaining row, blocking on channel backpressure
    ///
    /// Stops at end of input, on an I/O failure of the underlying source, or
    /// when every record receiver is gone.
    pub fn run(
        mut self,
        records: mpsc::Sender<FeiraLivre>,
        errors: mpsc::Sender<ReadError>,
    ) -> ReaderStats {
        let mut stats = ReaderStats::default();
        let mut row = StringRecord::new();

        loop {
            let rejected = match self.reader.read_record(&mut row) {
                Ok(false) => break,
                Ok(true) => {
                    let (start, line) = row.position().map_or((0, 0), |p| (p.byte(), p.line()));
                    let end = self.reader.position().byte();
                    let capture = self.reader.get_mut();
                    let misquoted = quote_error(capture.raw(start, end), self.delimiter);
                    capture.discard_until(end);

                    if let Some(field) = misquoted {
                        ReadError::Quote { line, field }
                    } else {
                        let fields: Vec<&str> = row.iter().collect();
                        match parse_record(&fields) {
                            Ok(feira) => {
                                stats.records += 1;
                                if records.blocking_send(feira).is_err() {
                                    warn!("Record channel closed, stopping reader");
                                    break;
                                }
                                continue;
                            },
                            Err(source) => ReadError::Parse { line, source },
                        }
                    }
                },
                Err(source) => {
                    let end = self.reader.position().byte();
                    self.reader.get_mut().discard_until(end);
                    ReadError::Row {
                        line: source.position().map(|p| p.line()),
                        source,
                    }
                },
            };

            stats.rejected += 1;
            let fatal = rejected.is_fatal();
            debug!(error = %rejected, "Skipping row");
            if errors.blocking_send(rejected).is_err() {
                warn!("Error channel closed, read errors are no longer counted");
            }
            if fatal {
                warn!("Source failed, stopping reader");
                break;
            }
        }

        stats
    }
}
