//! Glue shared by the `assembler` and `vmtranslator` binaries.
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub fn level_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

pub fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_filter(verbosity))
        .chain(std::io::stdout())
        .apply()
        .ok();
}

/// The explicit output path if one was given, otherwise the input path
/// with its extension replaced by `extension`.
pub fn output_path(input: &Path, explicit: Option<&str>, extension: &str) -> PathBuf {
    match explicit {
        Some(path) => PathBuf::from(path),
        None => input.with_extension(extension),
    }
}

/// File stem used to scope statics and labels, e.g. `Main` for `dir/Main.vm`.
pub fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Main".to_owned())
}

/// Writes the finished output in one go. If writing fails part way the
/// file is removed, so a failed run never leaves output behind.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let display = path.display().to_string();
    let file = File::create(path).map_err(|e| Error::Create(display.clone(), e))?;

    let mut writer = BufWriter::new(file);
    let written = writer
        .write_all(contents.as_bytes())
        .and_then(|_| writer.flush());

    if let Err(e) = written {
        drop(writer);
        if let Err(remove) = fs::remove_file(path) {
            warn!("could not remove incomplete output `{}`: {}", display, remove);
        }
        return Err(Error::Write(display, e));
    }

    info!("wrote {} byte(s) to `{}`", contents.len(), display);
    Ok(())
}
