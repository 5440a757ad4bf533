//! Per-column file access.
//!
//! Every column lives in its own file, either as a flat little-endian array
//! (`binary`) or as delimited text tokens (`ascii`). The store keeps one handle
//! per column and decodes values to `f64` on demand.
//!
//! Ascii reads rescan the file from the beginning on every call, so scattered
//! single-value reads against a text column cost O(file size) each.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use tracing::debug;

use super::column::{ColumnDescriptor, ColumnFormat, ColumnType, Decoder};
use crate::error::{Error, Result};

const DELIMITERS: &[u8] = b" ,\t\n\r";

/// Longest token accepted in an ascii column. Numbers never come close; a
/// longer run of non-delimiter bytes is reported as a parse error rather than
/// buffered.
const MAX_TOKEN_LEN: usize = 128;

enum Handle {
    Binary(File),
    Ascii(BufReader<File>),
}

/// An open column: its handle plus the decoder chosen for its type.
struct OpenColumn {
    handle: Handle,
    column_type: ColumnType,
    decode: Decoder,
}

/// File-backed storage for a set of columns.
pub struct ColumnStore {
    columns: Vec<ColumnDescriptor>,
    handles: Vec<Option<OpenColumn>>,
    row_count: usize,
}

impl ColumnStore {
    /// Create a store over the given columns. No file is opened yet.
    pub fn new(columns: Vec<ColumnDescriptor>, row_count: usize) -> Self {
        let handles = columns.iter().map(|_| None).collect();
        Self {
            columns,
            handles,
            row_count,
        }
    }

    /// Open every column file that is not already open.
    ///
    /// Stops at the first file that cannot be opened. Handles opened before the
    /// failure stay open; call `open` again or `close` to settle the state.
    pub fn open(&mut self) -> Result<()> {
        for (index, column) in self.columns.iter().enumerate() {
            if self.handles[index].is_some() {
                continue;
            }

            let file = File::open(&column.path)?;
            let handle = match column.format {
                ColumnFormat::Binary => Handle::Binary(file),
                ColumnFormat::Ascii => Handle::Ascii(BufReader::new(file)),
            };

            self.handles[index] = Some(OpenColumn {
                handle,
                column_type: column.column_type,
                decode: column.column_type.decoder(),
            });

            debug!(
                column = index,
                path = %column.path.display(),
                column_type = %column.column_type,
                format = %column.format,
                "Opened column file"
            );
        }
        Ok(())
    }

    /// Release all file handles. Calling this more than once is harmless.
    pub fn close(&mut self) {
        for handle in self.handles.iter_mut() {
            *handle = None;
        }
    }

    /// Check whether every column has an open handle.
    pub fn is_open(&self) -> bool {
        self.handles.iter().all(Option::is_some)
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows every column is expected to hold.
    pub fn num_rows(&self) -> usize {
        self.row_count
    }

    /// Column descriptors in table order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Sum of the element sizes of all columns.
    pub fn bytes_per_row(&self) -> usize {
        self.columns.iter().map(|c| c.column_type.size()).sum()
    }

    /// Read the value at `row` of `column`.
    pub fn read_one(&mut self, column: usize, row: usize) -> Result<f64> {
        self.check_row(row, 1)?;
        let rows = self.row_count;
        let open = self.open_column(column)?;

        match &mut open.handle {
            Handle::Binary(file) => {
                let width = open.column_type.size();
                let mut buf = [0u8; 8];
                file.seek(SeekFrom::Start((row * width) as u64))?;
                file.read_exact(&mut buf[..width]).map_err(|e| eof_to_bounds(e, row, rows))?;
                Ok((open.decode)(&buf[..width]))
            }
            Handle::Ascii(reader) => {
                let mut value = None;
                scan_tokens(reader, column, row, 1, open.column_type, |v| {
                    value = Some(v);
                })?;
                value.ok_or(Error::RowOutOfBounds { row, rows })
            }
        }
    }

    /// Read `count` contiguous values of `column` starting at `row`.
    pub fn read_run(&mut self, column: usize, row: usize, count: usize) -> Result<Vec<f64>> {
        self.check_row(row, count)?;
        let rows = self.row_count;
        let open = self.open_column(column)?;

        match &mut open.handle {
            Handle::Binary(file) => {
                let width = open.column_type.size();
                let mut buf = vec![0u8; width * count];
                file.seek(SeekFrom::Start((row * width) as u64))?;
                file.read_exact(&mut buf)
                    .map_err(|e| eof_to_bounds(e, row + count - 1, rows))?;
                Ok(buf.chunks_exact(width).map(open.decode).collect())
            }
            Handle::Ascii(reader) => {
                let mut values = Vec::with_capacity(count);
                scan_tokens(reader, column, row, count, open.column_type, |v| {
                    values.push(v);
                })?;
                if values.len() < count {
                    return Err(Error::RowOutOfBounds {
                        row: row + values.len(),
                        rows,
                    });
                }
                Ok(values)
            }
        }
    }

    /// Decode every row of `column`.
    pub fn read_column(&mut self, column: usize) -> Result<Vec<f64>> {
        if self.row_count == 0 {
            self.open_column(column)?;
            return Ok(Vec::new());
        }
        self.read_run(column, 0, self.row_count)
    }

    fn check_row(&self, row: usize, count: usize) -> Result<()> {
        match row.checked_add(count) {
            Some(end) if count > 0 && end <= self.row_count => Ok(()),
            _ => Err(Error::RowOutOfBounds {
                row: row.saturating_add(count.saturating_sub(1)),
                rows: self.row_count,
            }),
        }
    }

    fn open_column(&mut self, column: usize) -> Result<&mut OpenColumn> {
        let columns = self.handles.len();
        self.handles
            .get_mut(column)
            .ok_or(Error::ColumnOutOfBounds { column, columns })?
            .as_mut()
            .ok_or(Error::ColumnClosed(column))
    }
}

fn eof_to_bounds(err: io::Error, row: usize, rows: usize) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::RowOutOfBounds { row, rows }
    } else {
        Error::Io(err)
    }
}

/// Rescan an ascii column from the start and hand tokens `[offset, offset + count)`
/// to `emit`. Stops early once `count` tokens have been emitted.
///
/// The file is consumed one buffer at a time; only the token being assembled
/// is held across buffer boundaries, so memory stays bounded whatever the line
/// length.
fn scan_tokens(
    reader: &mut BufReader<File>,
    column: usize,
    offset: usize,
    count: usize,
    column_type: ColumnType,
    mut emit: impl FnMut(f64),
) -> Result<()> {
    reader.seek(SeekFrom::Start(0))?;

    let end = offset + count;
    let mut index = 0usize;
    let mut token: Vec<u8> = Vec::with_capacity(MAX_TOKEN_LEN);

    // Returns true once the last wanted token has been emitted.
    let mut accept = |token: &[u8]| -> Result<bool> {
        if index >= offset {
            emit(column_type.narrow(parse_token(column, token)?));
        }
        index += 1;
        Ok(index >= end)
    };

    loop {
        let (used, done) = {
            let chunk = reader.fill_buf()?;
            if chunk.is_empty() {
                break;
            }

            let mut used = chunk.len();
            let mut done = false;
            for (position, &byte) in chunk.iter().enumerate() {
                if !DELIMITERS.contains(&byte) {
                    if token.len() == MAX_TOKEN_LEN {
                        return Err(parse_error(column, &token));
                    }
                    token.push(byte);
                    continue;
                }
                if token.is_empty() {
                    continue;
                }
                done = accept(&token)?;
                token.clear();
                if done {
                    used = position + 1;
                    break;
                }
            }
            (used, done)
        };

        reader.consume(used);
        if done {
            return Ok(());
        }
    }

    // Last token of a file without a trailing delimiter.
    if !token.is_empty() {
        accept(&token)?;
    }
    Ok(())
}

fn parse_token(column: usize, token: &[u8]) -> Result<f64> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| parse_error(column, token))
}

fn parse_error(column: usize, token: &[u8]) -> Error {
    Error::Parse {
        column,
        token: String::from_utf8_lossy(token).into_owned(),
    }
}
