use std::io;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider returned no text")]
    Empty,

    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited unsuccessfully: {stderr}")]
    Process {
        program: &'static str,
        stderr: String,
    },

    #[error("{program} produced no output within {timeout_ms} ms")]
    TimedOut {
        program: &'static str,
        timeout_ms: u64,
    },

    #[error("text generation is disabled (offline provider)")]
    Offline,
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit {
        program: &'static str,
        status: String,
    },

    #[error("failed to write link: {0}")]
    Write(#[from] io::Error),

    #[error("link writer is unavailable")]
    Poisoned,
}
