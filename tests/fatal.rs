use std::process::Command;

use lvlog::{Logger, LoggerOption};

const CHILD_ENV: &str = "LVLOG_FATAL_CHILD";

#[test]
fn test_fatal_exits_process_with_status_one() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let logger = Logger::new([
            LoggerOption::writer(std::io::stderr()),
            LoggerOption::name("child"),
        ]);
        logger.fatalf("going down with {}", &[&"status 1"]);
        panic!("fatal returned");
    }
    let output = Command::new(std::env::current_exe().unwrap())
        .args(["--exact", "test_fatal_exits_process_with_status_one", "--nocapture"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#""name":"child","level":"FATAL","msg":"going down with {}","fields":["status 1"]"#));
    assert!(!stderr.contains("fatal returned"));
}
