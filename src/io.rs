use crate::DatasetResult;
use async_compression::tokio::bufread::{GzipDecoder, ZstdDecoder};
use async_compression::tokio::write::{GzipEncoder, ZstdEncoder};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};

/// Byte-level wrapping applied to the dataset text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zstd,
}

impl Compression {
    /// Pick from a file extension: `gz`, `zst`, anything else is plain text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
        {
            "gz" => Compression::Gzip,
            "zst" => Compression::Zstd,
            _ => Compression::None,
        }
    }

    /// Parse a `--compress` value: `none`, `gzip` or `zstd`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Compression::None),
            "gzip" => Some(Compression::Gzip),
            "zstd" => Some(Compression::Zstd),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputMeta {
    pub compression: Compression,
    /// just the filename, for log lines
    pub name_hint: String,
}

impl OutputMeta {
    fn new(path: &Path, compression: Compression) -> Self {
        Self {
            compression,
            name_hint: path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Create (or truncate) `path` and return a buffered sink.
///
/// The filename never selects the format: output is plain text unless
/// `compression` asks otherwise. Callers must `shutdown()` the sink so
/// encoders write their trailer.
pub async fn writer_to_path(
    path: &Path,
    compression: Compression,
) -> DatasetResult<(Box<dyn AsyncWrite + Unpin + Send>, OutputMeta)> {
    let file = File::create(path).await?;
    let meta = OutputMeta::new(path, compression);

    // 1 MiB buffer under the encoder keeps syscalls down
    let buf = BufWriter::with_capacity(1 << 20, file);
    let sink: Box<dyn AsyncWrite + Unpin + Send> = match meta.compression {
        Compression::Gzip => Box::new(GzipEncoder::new(buf)),
        Compression::Zstd => Box::new(ZstdEncoder::new(buf)),
        Compression::None => Box::new(buf),
    };
    Ok((sink, meta))
}

/// Open `path` for reading, decompressed when the extension is `gz` or `zst`.
pub async fn reader_from_path(
    path: &Path,
) -> DatasetResult<(Box<dyn AsyncRead + Unpin + Send>, OutputMeta)> {
    reader_with_compression(path, Compression::from_path(path)).await
}

/// Open `path` for reading with an explicit decoder, whatever its name.
pub async fn reader_with_compression(
    path: &Path,
    compression: Compression,
) -> DatasetResult<(Box<dyn AsyncRead + Unpin + Send>, OutputMeta)> {
    let file = File::open(path).await?;
    let meta = OutputMeta::new(path, compression);

    let buf = BufReader::with_capacity(1 << 20, file);
    let source: Box<dyn AsyncRead + Unpin + Send> = match meta.compression {
        Compression::Gzip => Box::new(GzipDecoder::new(buf)),
        Compression::Zstd => Box::new(ZstdDecoder::new(buf)),
        Compression::None => Box::new(buf),
    };
    Ok((source, meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn compression_from_extension() {
        assert_eq!(Compression::from_path(Path::new("a.txt")), Compression::None);
        assert_eq!(Compression::from_path(Path::new("a.txt.gz")), Compression::Gzip);
        assert_eq!(Compression::from_path(Path::new("a.zst")), Compression::Zstd);
        assert_eq!(Compression::from_path(Path::new("noext")), Compression::None);
    }

    #[tokio::test]
    async fn gzip_sink_reads_back() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("x.txt.gz");

        let (mut sink, meta) = writer_to_path(&path, Compression::Gzip).await?;
        assert_eq!(meta.compression, Compression::Gzip);
        assert_eq!(meta.name_hint, "x.txt.gz");
        sink.write_all(b"0,1,2\n").await?;
        sink.shutdown().await?;
        drop(sink);

        let (mut source, _meta) = reader_from_path(&path).await?;
        let mut text = String::new();
        source.read_to_string(&mut text).await?;
        assert_eq!(text, "0,1,2\n");
        Ok(())
    }

    #[tokio::test]
    async fn gz_extension_alone_writes_plain_text() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.gz");

        let (mut sink, meta) = writer_to_path(&path, Compression::None).await?;
        assert_eq!(meta.compression, Compression::None);
        sink.write_all(b"# h \n0,1\n").await?;
        sink.shutdown().await?;
        drop(sink);

        assert_eq!(std::fs::read(&path)?, b"# h \n0,1\n");

        let (mut source, _meta) = reader_with_compression(&path, Compression::None).await?;
        let mut text = String::new();
        source.read_to_string(&mut text).await?;
        assert_eq!(text, "# h \n0,1\n");
        Ok(())
    }

    #[test]
    fn compression_from_name() {
        assert_eq!(Compression::from_name("gzip"), Some(Compression::Gzip));
        assert_eq!(Compression::from_name("zstd"), Some(Compression::Zstd));
        assert_eq!(Compression::from_name("none"), Some(Compression::None));
        assert_eq!(Compression::from_name("gz"), None);
    }

    #[tokio::test]
    async fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("x.txt");
        let err = writer_to_path(&path, Compression::None).await.err().unwrap();
        assert!(matches!(err, crate::DatasetError::Io(_)));
    }
}
