use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A strategy parameter is missing where required, has the wrong type, or
    /// falls outside its documented domain.
    #[error("Invalid strategy parameter: {0}")]
    Parameter(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    /// The market-data collaborator found no candles for the request.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),
}
