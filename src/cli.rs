//! Command line for the `create_dataset` binary.
use crate::{Compression, DatasetSpec, DEFAULT_COMMENT_CHAR, DEFAULT_DELIMITER, DEFAULT_FILENAME, DEFAULT_HEADER};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Two-letter single-dash flags and the long flags they stand for.
const SHORT_ALIASES: [(&str, &str); 2] = [("-nr", "--nrows"), ("-nc", "--ncolumns")];

/// Options whose next token is their value, never a flag.
const TAKES_VALUE: [&str; 9] = [
    "--nrows",
    "--ncolumns",
    "--filename",
    "--delimiter",
    "--header",
    "--comment-char",
    "--compress",
    "-nr",
    "-nc",
];

pub fn command() -> Command {
    Command::new("create_dataset")
        .about("Write a synthetic dataset: a comment line, then an index and random integers per row")
        .arg(
            Arg::new("nrows")
                .long("nrows")
                .help("number of rows in dataset (also -nr)")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            Arg::new("ncolumns")
                .long("ncolumns")
                .help("number of columns in dataset (also -nc)")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            Arg::new("filename")
                .long("filename")
                .help("dataset filename")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_FILENAME),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .help("dataset delimiter")
                .allow_hyphen_values(true)
                .default_value(DEFAULT_DELIMITER),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .help("dataset header info")
                .default_value(DEFAULT_HEADER),
        )
        .arg(
            Arg::new("no-header")
                .long("no-header")
                .help("do not write the comment line")
                .action(ArgAction::SetTrue)
                .conflicts_with("header"),
        )
        .arg(
            Arg::new("compress")
                .long("compress")
                .help("compress the output; the filename is not consulted")
                .value_parser(["none", "gzip", "zstd"])
                .default_value("none"),
        )
        .arg(
            Arg::new("comment-char")
                .long("comment-char")
                .help("comment character used in dataset")
                .allow_hyphen_values(true)
                .default_value(DEFAULT_COMMENT_CHAR),
        )
}

/// Rewrite `-nr`/`-nc` (and `-nr=5`, `-nr5`) to their long forms.
///
/// clap short flags are a single character, so these never reach it as-is.
/// A token that is the value of the option before it is left alone, and so
/// is everything after a bare `--`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    let mut is_value = false;
    for arg in args.into_iter().map(Into::into) {
        if passthrough || is_value {
            is_value = false;
            out.push(arg);
            continue;
        }
        is_value = arg.to_str().is_some_and(|s| TAKES_VALUE.contains(&s));
        let rewritten = arg.to_str().and_then(|s| {
            if s == "--" {
                passthrough = true;
                return None;
            }
            SHORT_ALIASES.iter().find_map(|(short, long)| {
                let rest = s.strip_prefix(short)?;
                Some(match rest.strip_prefix('=') {
                    _ if rest.is_empty() => long.to_string(),
                    Some(value) => format!("{long}={value}"),
                    None => format!("{long}={rest}"),
                })
            })
        });
        out.push(rewritten.map(OsString::from).unwrap_or(arg));
    }
    out
}

pub fn spec_from_matches(matches: &ArgMatches) -> DatasetSpec {
    let defaults = DatasetSpec::default();
    let text = |id: &str, fallback: String| {
        matches
            .get_one::<String>(id)
            .cloned()
            .unwrap_or(fallback)
    };
    let header = if matches.get_flag("no-header") {
        None
    } else {
        matches.get_one::<String>("header").cloned()
    };

    DatasetSpec {
        nrows: matches.get_one::<u64>("nrows").copied().unwrap_or(defaults.nrows),
        ncols: matches
            .get_one::<u64>("ncolumns")
            .copied()
            .unwrap_or(defaults.ncols),
        filename: matches
            .get_one::<PathBuf>("filename")
            .cloned()
            .unwrap_or(defaults.filename),
        delimiter: text("delimiter", defaults.delimiter),
        header,
        comment_char: text("comment-char", defaults.comment_char),
        compression: matches
            .get_one::<String>("compress")
            .and_then(|name| Compression::from_name(name.as_str()))
            .unwrap_or(defaults.compression),
    }
}

/// Parse a full argv (program name first) into a spec.
pub fn parse_spec_from<I, T>(args: I) -> Result<DatasetSpec, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let matches = command().try_get_matches_from(normalize_args(args))?;
    Ok(spec_from_matches(&matches))
}
