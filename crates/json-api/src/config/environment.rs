//! Environment Config

use clap::Args;

/// Deployment environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum AppEnvironment {
    /// Local development; error responses carry internal detail.
    Development,

    /// Production; error responses only carry their public message.
    Production,
}

/// Environment settings.
#[derive(Debug, Args)]
pub struct EnvironmentConfig {
    /// Deployment environment (development, production)
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = AppEnvironment::Development)]
    pub app_env: AppEnvironment,
}

impl EnvironmentConfig {
    /// Whether error responses may include internal detail.
    #[must_use]
    pub fn exposes_error_detail(&self) -> bool {
        self.app_env != AppEnvironment::Production
    }
}
