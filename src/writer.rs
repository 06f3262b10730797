use crate::io::writer_to_path;
use crate::{DatasetResult, DatasetSpec, MAX_VALUE};
use crc32fast::Hasher as Crc32;
use rand::Rng;
use std::fmt::Write as _;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Counts and checksum for one generated dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub row_count: u64,
    pub column_count: u64,
    pub wrote_header: bool,
    /// Uncompressed bytes handed to the sink.
    pub bytes_written: u64,
    /// CRC32 over those same bytes.
    pub crc32: u32,
}

/// Generate the dataset described by `spec` into `spec.filename`.
///
/// Uses the thread-local RNG, so values differ between runs. The file is
/// created or truncated and holds plain text unless `spec.compression` says
/// otherwise; on error it is left partially written.
pub async fn create_dataset(spec: &DatasetSpec) -> DatasetResult<DatasetSummary> {
    let (mut sink, meta) = writer_to_path(&spec.filename, spec.compression).await?;
    log::debug!(
        "writing {} ({:?}) rows={} cols={}",
        meta.name_hint,
        meta.compression,
        spec.nrows,
        spec.ncols
    );

    let mut rng = rand::thread_rng();
    let summary = write_dataset(&mut sink, spec, &mut rng).await?;
    sink.shutdown().await?;

    log::info!(
        "wrote {} rows x {} columns to {} ({} bytes, crc=0x{:08x})",
        summary.row_count,
        summary.column_count,
        spec.filename.display(),
        summary.bytes_written,
        summary.crc32
    );
    Ok(summary)
}

/// Write the header line and rows to any async sink.
///
/// `spec.filename` is ignored here. The sink is flushed but not shut down.
pub async fn write_dataset<W, R>(
    out: &mut W,
    spec: &DatasetSpec,
    rng: &mut R,
) -> DatasetResult<DatasetSummary>
where
    W: AsyncWrite + Unpin + ?Sized,
    R: Rng,
{
    let mut crc = Crc32::new();
    let mut bytes_written = 0u64;
    // one reusable line buffer
    let mut line = String::new();

    let header = spec.header_line();
    if let Some(text) = header {
        writeln!(line, "{} {} ", spec.comment_char, text)?;
        emit(out, &line, &mut crc, &mut bytes_written).await?;
    }

    for row in 0..spec.nrows {
        line.clear();
        write!(line, "{row}")?;
        for _ in 0..spec.ncols {
            let value: u32 = rng.gen_range(0..=MAX_VALUE);
            write!(line, "{}{}", spec.delimiter, value)?;
        }
        line.push('\n');
        emit(out, &line, &mut crc, &mut bytes_written).await?;
    }

    out.flush().await?;
    Ok(DatasetSummary {
        row_count: spec.nrows,
        column_count: spec.ncols,
        wrote_header: header.is_some(),
        bytes_written,
        crc32: crc.finalize(),
    })
}

async fn emit<W>(out: &mut W, line: &str, crc: &mut Crc32, bytes: &mut u64) -> DatasetResult<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    out.write_all(line.as_bytes()).await?;
    crc.update(line.as_bytes());
    *bytes += line.len() as u64;
    Ok(())
}
