//! Process-wide display names for log levels
//!
//! Every composed line carries the display name of its level. The names are
//! shared by all loggers in the process and may be renamed at runtime; the
//! ordering of [`LogLevel`] is unaffected by renaming.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use parking_lot::RwLock;
use std::borrow::Cow;

const DEFAULT_NAMES: [Cow<'static, str>; 6] = [
    Cow::Borrowed("TRACE"),
    Cow::Borrowed("DEBUG"),
    Cow::Borrowed("INFO"),
    Cow::Borrowed("WARNING"),
    Cow::Borrowed("ERROR"),
    Cow::Borrowed("FATAL"),
];

static LEVEL_NAMES: RwLock<[Cow<'static, str>; 6]> = parking_lot::const_rwlock(DEFAULT_NAMES);

/// Current display name of `level`
pub fn level_name(level: LogLevel) -> String {
    LEVEL_NAMES.read()[usize::from(level.as_u8())].to_string()
}

/// Run `f` with the display name of `level` without cloning it
pub(crate) fn with_level_name<R>(level: LogLevel, f: impl FnOnce(&str) -> R) -> R {
    let names = LEVEL_NAMES.read();
    f(&names[usize::from(level.as_u8())])
}

/// Rename `level` for every logger in the process
pub fn set_level_name(level: LogLevel, name: impl Into<String>) {
    LEVEL_NAMES.write()[usize::from(level.as_u8())] = Cow::Owned(name.into());
}

/// Rename the level with numeric value `index`
///
/// Out-of-range values leave the table untouched and report
/// [`LoggerError::LevelOutOfRange`].
pub fn set_level_name_at(index: u8, name: impl Into<String>) -> Result<()> {
    let level = LogLevel::from_u8(index).ok_or(LoggerError::LevelOutOfRange { value: index })?;
    set_level_name(level, name);
    Ok(())
}

/// Restore the default upper-case names
pub fn reset_level_names() {
    *LEVEL_NAMES.write() = DEFAULT_NAMES;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Renaming is covered in tests/level_name_tests.rs, which runs in its own
    // process so the shared table does not leak into other tests.

    #[test]
    fn test_default_names_match_canonical() {
        for level in LogLevel::ALL {
            assert_eq!(level_name(level), level.to_str());
        }
    }

    #[test]
    fn test_out_of_range_rename_is_rejected() {
        let err = set_level_name_at(6, "BOGUS").unwrap_err();
        assert!(matches!(err, LoggerError::LevelOutOfRange { value: 6 }));

        for level in LogLevel::ALL {
            assert_ne!(level_name(level), "BOGUS");
        }
    }

    #[test]
    fn test_with_level_name_borrows() {
        let len = with_level_name(LogLevel::Warning, str::len);
        assert_eq!(len, "WARNING".len());
    }
}
