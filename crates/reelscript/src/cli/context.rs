//! Configuration and driver setup shared by the commands.

use crate::cli::Cli;
use reelscript::{
    FieldOptions, GeminiClient, ModelConfig, ReelscriptConfig, ReelscriptDriver, ReelscriptResult,
};
use std::sync::Arc;
use tracing::debug;

/// Loaded configuration plus the command-line overrides.
#[derive(Debug, Clone)]
pub struct Context {
    config: ReelscriptConfig,
    model: ModelConfig,
}

impl Context {
    /// Load configuration, preferring `--config` over the layered search.
    pub fn load(cli: &Cli) -> ReelscriptResult<Self> {
        let config = match &cli.config {
            Some(path) => ReelscriptConfig::from_file(path)?,
            None => ReelscriptConfig::load()?,
        };

        let model = match &cli.model {
            Some(name) => config.model().clone().with_name(name.as_str()),
            None => config.model().clone(),
        };
        debug!(model = %model.name(), "Configuration loaded");

        Ok(Self { config, model })
    }

    /// Allowed field values.
    pub fn options(&self) -> &FieldOptions {
        self.config.options()
    }

    /// Configured bind address for `serve`.
    pub fn bind(&self) -> &str {
        self.config.server().bind()
    }

    /// Create the Gemini driver.
    ///
    /// # Errors
    ///
    /// Fails when no API key is set in the environment.
    pub fn driver(&self) -> ReelscriptResult<Arc<dyn ReelscriptDriver>> {
        Ok(Arc::new(GeminiClient::from_config(&self.model)?))
    }

    /// Locale tag from `locale`, or else `$LANG`.
    pub fn locale(&self, locale: Option<&str>) -> Option<String> {
        locale
            .map(str::to_string)
            .or_else(|| std::env::var("LANG").ok())
    }

    /// Language to preselect for the locale.
    pub fn default_language(&self, locale: Option<&str>) -> String {
        self.options()
            .detect_language(self.locale(locale).as_deref())
    }
}
