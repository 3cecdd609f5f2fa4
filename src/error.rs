use thiserror::Error;

#[derive(Error, Debug)]
pub enum FichaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("editor is {state}, cannot {action}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("aggregate for company {found} returned while loading company {expected}")]
    CompanyMismatch { expected: u64, found: u64 },

    #[error("no company loaded")]
    NoCompanyLoaded,

    #[error("branch '{0}' not found in the cached aggregate")]
    BranchNotFound(u64),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FichaError>;
