#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("Project data not found for year {0}")]
    UnknownYear(String),
    #[error("Project {0} has no pages")]
    EmptyProject(String),
    #[error("invalid viewer config: {0}")]
    Config(#[from] serde_json::Error),
}
