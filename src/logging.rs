//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a console subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` (usually the config's
/// `debug.log_level`) is used. kiss3d's GL chatter is kept at `warn` unless asked for.
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let filter_str = if default_filter.is_empty() {
        String::from("info,kiss3d=warn")
    } else if default_filter.contains("kiss3d") {
        default_filter.to_owned()
    } else {
        format!("{},kiss3d=warn", default_filter)
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        // Whichever call comes first wins; neither panics
        let first = init_logging("debug");
        let second = init_logging("");
        assert!(!(first && second));
    }
}
