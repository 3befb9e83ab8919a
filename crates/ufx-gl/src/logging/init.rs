use std::sync::Once;

use log::LevelFilter;

/// `log` target of everything this crate emits.
const LIBRARY_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Logger configuration.
///
/// Filter precedence: `env_filter`, then `RUST_LOG`, then the level fields.
/// `library_level` overrides `default_level` for this crate's own records,
/// which is where program reflection and texture fallbacks are reported.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    pub library_level: Option<LevelFilter>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            library_level: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Shows uniform tables and build/link detail at `debug`.
    pub fn verbose() -> Self {
        Self {
            library_level: Some(LevelFilter::Debug),
            ..Self::default()
        }
    }

    /// Filter directives in `env_logger` syntax.
    pub fn directives(&self) -> String {
        if let Some(filter) = &self.env_filter {
            return filter.clone();
        }
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.level_directives())
    }

    fn level_directives(&self) -> String {
        let mut out = self.default_level.to_string().to_ascii_lowercase();
        if let Some(level) = self.library_level {
            out.push_str(&format!(",{}={}", LIBRARY_TARGET, level.to_string().to_ascii_lowercase()));
        }
        out
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
///
/// A logger installed by someone else (a test harness, an embedding app) wins;
/// that case is not an error.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let directives = config.directives();
        let installed = env_logger::Builder::new()
            .parse_filters(&directives)
            .write_style(config.write_style)
            .try_init()
            .is_ok();
        if installed {
            log::debug!("logging initialized with {:?}", directives);
        }
    });
}
