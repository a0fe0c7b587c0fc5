//! Observability bootstrap.

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, settings};

/// Install the tracing subscriber and apply the request logging settings.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    settings::apply_runtime_config(config);

    logging::init_subscriber(config)
}
