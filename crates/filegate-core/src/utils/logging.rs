/// Logging setup and log-safe rendering of client input
use crate::constants::MAX_LOGGED_FILENAME_CHARS;
use crate::models::LogFormat;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Renders a client-supplied filename for logs
///
/// Control characters are escaped so a crafted name cannot forge log lines,
/// and long names are truncated.
///
/// # Examples
/// ```
/// use filegate_core::utils::logging::filename_for_log;
///
/// assert_eq!(filename_for_log("a\nb.txt"), "a\\nb.txt");
/// ```
pub fn filename_for_log(filename: &str) -> String {
    let total = filename.chars().count();
    let mut rendered: String = filename
        .chars()
        .take(MAX_LOGGED_FILENAME_CHARS)
        .flat_map(char::escape_default)
        .collect();

    if total > MAX_LOGGED_FILENAME_CHARS {
        rendered.push_str(&format!("...[{} chars]", total));
    }

    rendered
}
