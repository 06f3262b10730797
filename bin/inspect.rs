use basics_dataset::{inspect_dataset, reader_from_path, reader_with_compression, Compression, MAX_VALUE};
use clap::{Arg, Command};
use std::path::PathBuf;
use std::time::Instant;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("inspect")
        .arg(
            Arg::new("path")
                .long("path")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(Arg::new("delimiter").long("delimiter").default_value(","))
        .arg(Arg::new("comment-char").long("comment-char").default_value("#"))
        .arg(
            Arg::new("compress")
                .long("compress")
                .help("Decoder to use; guessed from the extension when absent")
                .value_parser(["none", "gzip", "zstd"]),
        )
        .arg(
            Arg::new("ncolumns")
                .long("ncolumns")
                .help("Fail unless every row has this many value columns")
                .value_parser(clap::value_parser!(u64)),
        )
        .get_matches();

    let path = matches
        .get_one::<PathBuf>("path")
        .ok_or_else(|| anyhow::anyhow!("Provide --path <file>"))?;
    let delimiter = matches
        .get_one::<String>("delimiter")
        .map(String::as_str)
        .unwrap_or(",");
    let comment_char = matches
        .get_one::<String>("comment-char")
        .map(String::as_str)
        .unwrap_or("#");

    let start = Instant::now();
    let compression = matches
        .get_one::<String>("compress")
        .and_then(|name| Compression::from_name(name.as_str()));
    let (reader, meta) = match compression {
        Some(c) => reader_with_compression(path, c).await?,
        None => reader_from_path(path).await?,
    };
    log::debug!("reading {} ({:?})", meta.name_hint, meta.compression);
    let summary = inspect_dataset(reader, delimiter, comment_char).await?;
    let elapsed = start.elapsed().as_secs_f64();

    println!(
        "source={} rows={} fields={}..={} header={:?} values={:?}..={:?}\nelapsed={:.3}s",
        path.display(),
        summary.row_count,
        summary.min_fields,
        summary.max_fields,
        summary.header,
        summary.min_value,
        summary.max_value,
        elapsed
    );

    if !summary.is_rectangular() {
        anyhow::bail!(
            "ragged rows: between {} and {} fields",
            summary.min_fields,
            summary.max_fields
        );
    }
    if !summary.indices_sequential {
        anyhow::bail!("row indices are not 0..{}", summary.row_count);
    }
    if summary.max_value.is_some_and(|v| v > MAX_VALUE) {
        anyhow::bail!("value above {MAX_VALUE} found");
    }
    if let Some(&ncols) = matches.get_one::<u64>("ncolumns") {
        if summary.row_count > 0 && summary.max_fields as u64 != ncols + 1 {
            anyhow::bail!(
                "expected {} value columns, got {}",
                ncols,
                summary.max_fields.saturating_sub(1)
            );
        }
    }
    Ok(())
}
