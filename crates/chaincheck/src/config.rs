//! Runner configuration from command-line flags and the environment.
//!
//! Supported flags:
//!
//! - `--color=auto|always|never` (default from `CHAINCHECK_COLOR`, else `auto`)
//! - `--full-type-names` shows type names with their module paths
//!
//! Unknown flags are logged and ignored.

use chaincheck_chain::TypeNameStyle;

use crate::report::ColorMode;

/// Environment variable providing the default color mode.
pub const COLOR_ENV: &str = "CHAINCHECK_COLOR";

/// Configuration for the test runner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    pub color: ColorMode,
    pub type_names: TypeNameStyle,
}

impl RunnerConfig {
    /// Read the configuration of this process.
    pub fn from_env() -> Self {
        let color = std::env::var(COLOR_ENV).ok();
        RunnerConfig::parse(color.as_deref(), std::env::args().skip(1))
    }

    /// Build a configuration from an optional `CHAINCHECK_COLOR` value and
    /// the arguments after the program name. Flags win over the environment.
    pub fn parse<I, S>(env_color: Option<&str>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = RunnerConfig::default();

        if let Some(value) = env_color {
            match parse_color(value) {
                Some(mode) => config.color = mode,
                None => tracing::warn!(value, "ignoring invalid {COLOR_ENV}"),
            }
        }

        for arg in args {
            let arg = arg.as_ref();
            if let Some(value) = arg.strip_prefix("--color=") {
                match parse_color(value) {
                    Some(mode) => config.color = mode,
                    None => tracing::warn!(value, "ignoring invalid --color value"),
                }
            } else if arg == "--full-type-names" {
                config.type_names = TypeNameStyle::Full;
            } else {
                tracing::warn!(arg, "ignoring unknown argument");
            }
        }

        config
    }
}

fn parse_color(value: &str) -> Option<ColorMode> {
    match value {
        "auto" => Some(ColorMode::Auto),
        "always" => Some(ColorMode::Always),
        "never" => Some(ColorMode::Never),
        _ => None,
    }
}
