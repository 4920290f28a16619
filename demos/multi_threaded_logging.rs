use std::sync::Arc;

use lvlog::{Format, logger_config};

fn main() {
    // main thread logs text to stdout
    let logger = Arc::new(
        logger_config()
            .with_env()
            .with_stdout()
            .with_name("main thread")
            .with_format(Format::Text)
            .with_stacktrace(true)
            .build(),
    );
    logger.info("Hello, world!");
    // worker threads share one JSON file logger
    let file_logger = Arc::new(
        logger_config()
            .with_name("worker")
            .with_log_file("/tmp/lvlog_workers.log")
            .unwrap()
            .build(),
    );
    let handles: Vec<_> = (0..5)
        .map(|i| {
            let file_logger = Arc::clone(&file_logger);
            std::thread::spawn(move || {
                file_logger.warnf("MESSAGE RECEIVED: {} from thread {}", &[&"Hello, world!", &i]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let contents = std::fs::read_to_string("/tmp/lvlog_workers.log").unwrap();
    logger.infof(
        "last line of /tmp/lvlog_workers.log is:\n\t{}",
        &[&contents.trim_end().lines().last().unwrap_or_default()],
    );
    logger.errorf("{} errors so far", &[&0]);
}
