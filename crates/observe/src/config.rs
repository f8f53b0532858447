#[derive(Debug, Clone)]
pub struct Config {
    /// Filters spans and events based on a set of filter directives
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    pub(crate) env_filter: String,
    /// Output log events as JSON
    pub(crate) use_json_format: bool,
}

impl Config {
    pub fn with_json_format(mut self) -> Self {
        self.use_json_format = true;
        self
    }

    pub fn with_env_filter(mut self, env_filter: &str) -> Self {
        self.env_filter = env_filter.to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_filter: "info".to_string(),
            use_json_format: false,
        }
    }
}
