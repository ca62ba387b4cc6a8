//! Log setup.
//!
//! The terminal belongs to the UI, so records go to `hanabira.log` in the
//! platform cache directory instead of stderr.

use std::fs::{self, File};
use std::path::PathBuf;

use directories::ProjectDirs;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Level used when `RUST_LOG` is not set.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. Returns the log file path, or `None` if no log file
/// could be created, in which case logging stays disabled.
pub fn init(verbose: u8, quiet: bool) -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "hanabira")?;
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir).ok()?;
    let path = dir.join("hanabira.log");
    let file = File::create(&path).ok()?;

    let level = level_for(verbose, quiet).to_string().to_lowercase();
    Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(5, false), LevelFilter::Trace);
        assert_eq!(level_for(0, true), LevelFilter::Error);
    }
}
