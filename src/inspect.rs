use crate::{DatasetError, DatasetResult};
use csv_async::{AsyncReaderBuilder, ByteRecord};
use std::io::Cursor;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Shape of a dataset read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectSummary {
    pub row_count: u64,
    pub min_fields: usize,
    pub max_fields: usize,
    /// Comment line text, prefix and surrounding spaces removed.
    pub header: Option<String>,
    pub min_value: Option<u32>,
    pub max_value: Option<u32>,
    /// Every row's first field equals its 0-based position.
    pub indices_sequential: bool,
}

impl InspectSummary {
    /// All rows have the same number of fields (vacuously true when empty).
    pub fn is_rectangular(&self) -> bool {
        self.min_fields == self.max_fields
    }
}

fn single_byte(what: &'static str, value: &str) -> DatasetResult<u8> {
    match value.as_bytes() {
        [b] => Ok(*b),
        _ => Err(DatasetError::NotSingleByte {
            what,
            value: value.to_string(),
        }),
    }
}

fn parse_field(line: u64, raw: &[u8]) -> DatasetResult<u64> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| DatasetError::UnexpectedField {
            line,
            value: String::from_utf8_lossy(raw).into_owned(),
        })
}

/// Parse a generated dataset and summarize it.
///
/// Only single-byte delimiters and comment characters can be read back.
pub async fn inspect_dataset<R>(
    reader: R,
    delimiter: &str,
    comment_char: &str,
) -> DatasetResult<InspectSummary>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let delim = single_byte("delimiter", delimiter)?;
    let comment = single_byte("comment char", comment_char)?;

    // csv_async skips comment lines without exposing them, so take the first
    // line ourselves and put it back in front of the rest.
    let mut buffered = BufReader::new(reader);
    let mut first = Vec::new();
    buffered.read_until(b'\n', &mut first).await?;
    let header = match first.split_first() {
        Some((c, rest)) if *c == comment => Some(String::from_utf8_lossy(rest).trim().to_string()),
        _ => None,
    };

    let mut rdr = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delim)
        .comment(Some(comment))
        .create_reader(Cursor::new(first).chain(buffered));

    let mut summary = InspectSummary {
        row_count: 0,
        min_fields: 0,
        max_fields: 0,
        header,
        min_value: None,
        max_value: None,
        indices_sequential: true,
    };
    let mut record = ByteRecord::new();

    while rdr.read_byte_record(&mut record).await? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let width = record.len();
        if summary.row_count == 0 {
            summary.min_fields = width;
            summary.max_fields = width;
        } else {
            summary.min_fields = summary.min_fields.min(width);
            summary.max_fields = summary.max_fields.max(width);
        }

        let mut fields = record.iter();
        if let Some(index) = fields.next() {
            if parse_field(line, index)? != summary.row_count {
                summary.indices_sequential = false;
            }
        }
        for raw in fields {
            let value = u32::try_from(parse_field(line, raw)?).map_err(|_| {
                DatasetError::UnexpectedField {
                    line,
                    value: String::from_utf8_lossy(raw).into_owned(),
                }
            })?;
            summary.min_value = Some(summary.min_value.map_or(value, |m| m.min(value)));
            summary.max_value = Some(summary.max_value.map_or(value, |m| m.max(value)));
        }
        summary.row_count += 1;
    }

    Ok(summary)
}
