//! Source name constants shared by the CLI, the config file and the registry.
//! Registry order is also output order: records from earlier sources come first.

pub const MEBELSHARA_API: &str = "mebelshara";
pub const TUI_API: &str = "tui";

pub const MEBELSHARA_URL: &str = "https://www.mebelshara.ru/contacts";
pub const TUI_OFFICES_URL: &str = "https://apigate.tui.ru/api/office/list";

/// Query string the office list endpoint expects: Moscow, no subway or
/// hour filters, every service, regardless of holiday opening.
pub const TUI_OFFICES_QUERY: &[(&str, &str)] = &[
    ("cityId", "1"),
    ("subwayId", ""),
    ("hoursFrom", ""),
    ("hoursTo", ""),
    ("serviceIds", "all"),
    ("toBeOpenOnHolidays", "false"),
];

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.121 Safari/537.36";
pub const DEFAULT_ACCEPT: &str = "*/*";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_OUTPUT_PATH: &str = "results.json";

/// Get all supported source names, in registry order
pub fn get_supported_apis() -> Vec<&'static str> {
    vec![MEBELSHARA_API, TUI_API]
}
