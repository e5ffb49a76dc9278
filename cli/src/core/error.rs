use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CheckError {
    Io(io::Error),
    SuiteParse(serde_json::Error),
    InvalidSuite(String),
    Config(String),
    SuiteFileNotFound(String),
    NoCasesSelected(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Io(err) => write!(f, "IO error: {err}"),
            CheckError::SuiteParse(err) => write!(f, "Invalid suite file: {err}"),
            CheckError::InvalidSuite(msg) => write!(f, "Invalid suite: {msg}"),
            CheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CheckError::SuiteFileNotFound(path) => write!(f, "Suite file not found: {path}"),
            CheckError::NoCasesSelected(filter) => {
                write!(f, "No test case matches filter: {filter}")
            }
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Io(err) => Some(err),
            CheckError::SuiteParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CheckError {
    fn from(err: io::Error) -> Self {
        CheckError::Io(err)
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(err: serde_json::Error) -> Self {
        CheckError::SuiteParse(err)
    }
}
