use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Failed to launch signature extractor '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Signature extractor '{program}' exited with status {status}")]
    Failed { program: String, status: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
