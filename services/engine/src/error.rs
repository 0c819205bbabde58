#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] arb_config::ConfigError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
