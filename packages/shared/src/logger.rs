//! Logging setup for the Tandem binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the Tandem library crates and the calling binary. It can be
/// overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "tandem-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use tandem_shared::logger::setup_logger;
///
/// setup_logger("tandem-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, level: &str) -> String {
    let crates = ["tandem_shared", "tandem_server", "tandem_client", "tower_http"];
    let mut directives: Vec<String> = crates
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect();
    directives.push(format!("{}={}", binary_name.replace('-', "_"), level));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates_and_binary() {
        // テスト項目: デフォルトのフィルタにワークスペースの crate とバイナリが含まれる
        // given (前提条件):
        let binary_name = "tandem-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert!(filter.contains("tandem_server=info"));
        assert!(filter.contains("tandem_client=info"));
        assert!(filter.ends_with("tandem_server=info"));
        assert!(!filter.contains('-'));
    }
}
