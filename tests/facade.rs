mod common;

use common::SharedBuffer;
use lvlog::{Format, logger_config};

// installs the global logger: keep it the only test of this binary
#[test]
fn test_log_facade() {
    let buffer = SharedBuffer::default();
    let logger = logger_config()
        .with_writer(buffer.clone())
        .with_format(Format::Text)
        .with_name("facade")
        .with_level("info")
        .with_caller(true)
        .init_global()
        .unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::trace!("filtered");
    log::debug!("filtered");
    log::info!("hello {}", "facade");
    log::error!("broken {}", 42);
    logger.warn("direct");
    log::logger().flush();

    let lines = buffer.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("[INFO] facade tests/facade.rs:"));
    assert!(lines[0].ends_with(" hello facade"));
    assert!(lines[1].contains("[ERROR] facade"));
    assert!(lines[1].ends_with(" broken 42"));
    assert!(lines[2].ends_with(" direct"));

    let late = SharedBuffer::default();
    assert!(logger_config().with_writer(late.clone()).init_global().is_err());
    log::warn!("still the first logger");
    assert_eq!(late.len(), 0);
    assert!(buffer.lines()[3].ends_with(" still the first logger"));
}
