//! Logging Infrastructure
//!
//! Log output goes to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `RUST_LOG` wins when set; otherwise `level` applies to the admin crates
/// and everything else is held at `warn`.
pub fn init_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    // A second init (tests, embedding) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

fn default_filter(level: &str) -> EnvFilter {
    let directives = format!("warn,visitor_admin={level},visitor_client={level}");
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn,visitor_admin=info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = default_filter("debug").to_string();
        assert!(filter.contains("visitor_admin=debug"));
        assert!(filter.contains("visitor_client=debug"));

        let filter = default_filter("not a level!").to_string();
        assert!(filter.contains("visitor_admin=info"));
    }

    #[test]
    fn test_init_twice() {
        init_logger("info");
        init_logger("debug");
    }
}
