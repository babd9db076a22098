use thiserror::Error;

/// Everything that can abort a `bindo` invocation.
///
/// "Not found" outcomes (no qualifying release, no matching asset) are not
/// errors and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid asset pattern: {0}")]
    Config(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot run a blocking command from inside an async runtime")]
    Runtime,
}

/// Bad command line: unknown subcommand, unknown flag or malformed value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),

    #[error("bad flag syntax: {0}")]
    BadFlagSyntax(String),

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("invalid boolean value {value:?} for -{flag}")]
    InvalidBool { flag: String, value: String },

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("help requested")]
    HelpRequested,
}

/// Failure while listing releases. Never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed release payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
