//! Logging setup for the shell.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level selected by `-v` / `-q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Stamp Zoo lifecycle events at info, everything else at warn.
    #[default]
    Normal,
    /// Debug for Stamp Zoo crates.
    Verbose,
    /// Trace for Stamp Zoo crates.
    Trace,
}

impl Verbosity {
    /// Level applied to the `stampzoo*` targets.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directives used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_filter(&self) -> String {
        match self {
            Self::Quiet => "error".to_string(),
            _ => {
                let level = self.level().as_str().to_ascii_lowercase();
                format!(
                    "warn,stampzoo_cli={level},stampzoo_db={level},stampzoo_core={level},sqlx=warn"
                )
            }
        }
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling twice is harmless.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        assert_eq!(Verbosity::Quiet.level(), Level::ERROR);
        assert_eq!(Verbosity::Normal.level(), Level::INFO);
        assert_eq!(Verbosity::Verbose.level(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.level(), Level::TRACE);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(Verbosity::Quiet.default_filter(), "error");

        let normal = Verbosity::Normal.default_filter();
        assert!(normal.starts_with("warn,"));
        assert!(normal.contains("stampzoo_db=info"));
        assert!(normal.contains("sqlx=warn"));

        assert!(Verbosity::Verbose
            .default_filter()
            .contains("stampzoo_cli=debug"));
    }

    #[test]
    fn test_filters_parse() {
        for v in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Trace,
        ] {
            assert!(EnvFilter::try_new(v.default_filter()).is_ok());
        }
    }
}
