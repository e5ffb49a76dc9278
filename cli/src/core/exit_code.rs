use crate::core::error::CheckError;

/// Exit codes for the petcheck CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every case passed
    Success = 0,
    /// At least one assertion or transport failure
    Failure = 1,
    /// Suite file could not be parsed or validated
    SuiteError = 2,
    /// Configuration error (base URL, parallelism, timeout)
    ConfigError = 3,
    /// File not found or IO error
    FileError = 4,
    /// The name filter selected no case
    NotFoundError = 5,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<&CheckError> for ExitCode {
    fn from(error: &CheckError) -> Self {
        match error {
            CheckError::Io(_) => ExitCode::FileError,
            CheckError::SuiteFileNotFound(_) => ExitCode::FileError,
            CheckError::SuiteParse(_) => ExitCode::SuiteError,
            CheckError::InvalidSuite(_) => ExitCode::SuiteError,
            CheckError::Config(_) => ExitCode::ConfigError,
            CheckError::NoCasesSelected(_) => ExitCode::NotFoundError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let cases = [
            (CheckError::InvalidSuite("dup".into()), 2),
            (CheckError::Config("bad url".into()), 3),
            (CheckError::SuiteFileNotFound("x.json".into()), 4),
            (CheckError::NoCasesSelected("nope".into()), 5),
            (CheckError::Io(std::io::Error::other("denied")), 4),
        ];
        for (error, code) in cases {
            assert_eq!(ExitCode::from(&error).code(), code, "{error}");
        }
    }
}
