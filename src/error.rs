use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyCliError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not a supported photo file: {0}")]
    NotAPhoto(String),

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("{0} item(s) need attention before this action")]
    Rejected(usize),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] sign_survey_common::Error),
}

pub type Result<T> = std::result::Result<T, SurveyCliError>;
