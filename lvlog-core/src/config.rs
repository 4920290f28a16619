use std::sync::LazyLock;

use derive_from_env::FromEnv;

/// Logger settings read from `LVLOG_*` environment variables.
///
/// Every field is kept as text and interpreted on its own, so one malformed
/// value only falls back to that field's default.
#[derive(FromEnv)]
#[from_env(prefix = "LVLOG")]
#[allow(non_snake_case)]
pub struct LvLogConfig {
    #[from_env(default = "debug")]
    pub LEVEL: String,
    #[from_env(default = "json")]
    pub FORMAT: String,
    #[from_env(default = "auto")]
    pub COLOR: String,
    #[from_env(default = "false")]
    pub STACKTRACE: String,
    #[from_env(default = "false")]
    pub CALLER: String,
}

impl LvLogConfig {
    pub fn stacktrace(&self) -> bool {
        parse_flag(&self.STACKTRACE)
    }

    pub fn caller(&self) -> bool {
        parse_flag(&self.CALLER)
    }
}

/// `1`, `true`, `yes`, `on` and `y` (any case) are set, anything else is unset.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "y"
    )
}

/// `None` only when a variable is not valid unicode.
pub static LVLOG_CONFIG: LazyLock<Option<LvLogConfig>> =
    LazyLock::new(|| LvLogConfig::from_env().ok());
