//! Level renaming
//!
//! Display names are shared by the whole process, so every rename scenario
//! runs inside one test function in its own binary.

use leveled_logger::{
    level_name, reset_level_names, set_level_name_at, LogLevel, Logger, LoggerConfig, LoggerError,
    MemorySink,
};
use std::sync::Arc;
use std::thread;

fn level_field(line: &str) -> &str {
    line.splitn(5, " | ").nth(2).expect("well-formed line")
}

#[test]
fn test_level_renaming() {
    let sink = MemorySink::new();
    let logger = Logger::synchronous(sink.clone());

    // Rename through an instance; visible everywhere.
    logger.set_level_name(LogLevel::Warning, "WARN");
    assert_eq!(level_name(LogLevel::Warning), "WARN");
    logger.warning("disk at 91%");
    assert_eq!(level_field(&sink.lines()[0]), "WARN");

    // print carries the Trace display name.
    leveled_logger::set_level_name(LogLevel::Trace, "PRINT");
    sink.clear();
    logger.print("banner");
    assert_eq!(level_field(&sink.lines()[0]), "PRINT");

    // Ordering is by value, not by name.
    sink.clear();
    logger.set_threshold(LogLevel::Warning);
    logger.info("filtered");
    logger.warning("kept");
    assert_eq!(sink.lines().len(), 1);

    // Numeric renames are range-checked.
    let err = set_level_name_at(6, "BOGUS").unwrap_err();
    assert!(matches!(err, LoggerError::LevelOutOfRange { value: 6 }));
    set_level_name_at(4, "ERR").unwrap();
    assert_eq!(level_name(LogLevel::Error), "ERR");

    // Configuration-provided names.
    let config =
        LoggerConfig::from_json(r#"{ "level_names": { "FATAL": "CRIT", "INFO": "NOTE" } }"#)
            .unwrap();
    config.apply_level_names();
    assert_eq!(level_name(LogLevel::Fatal), "CRIT");
    assert_eq!(level_name(LogLevel::Info), "NOTE");

    // Renaming while another thread logs never tears a line.
    sink.clear();
    let shared = Arc::new(Logger::synchronous(sink.clone()));
    let writer = {
        let logger = Arc::clone(&shared);
        thread::spawn(move || {
            for i in 0..500 {
                logger.error(format_args!("racing {}", i));
            }
        })
    };
    for i in 0..500 {
        let name = if i % 2 == 0 { "ERR" } else { "ERROR" };
        leveled_logger::set_level_name(LogLevel::Error, name);
    }
    writer.join().unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 500);
    for line in &lines {
        let name = level_field(line);
        assert!(name == "ERR" || name == "ERROR", "unexpected name {:?}", name);
    }

    reset_level_names();
    for level in LogLevel::ALL {
        assert_eq!(level_name(level), level.to_str());
    }
}
