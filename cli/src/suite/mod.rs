pub mod assertion;
pub mod http_method;
pub mod petstore;
pub mod template;
pub mod test_case;

pub use assertion::{Assertion, AssertionResult, ResponseBody};
pub use http_method::HttpMethod;
pub use test_case::TestCase;

use crate::core::error::CheckError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A static, ordered set of cases loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub cases: Vec<TestCase>,
}

impl Suite {
    pub fn builtin() -> Self {
        Suite {
            base_url: None,
            cases: petstore::cases(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CheckError> {
        if !path.is_file() {
            return Err(CheckError::SuiteFileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut suite: Suite = serde_json::from_str(&content)?;
        for case in &mut suite.cases {
            if case.group.is_none() {
                case.group = case.name.split_once('/').map(|(group, _)| group.to_string());
            }
        }
        suite.validate()?;
        crate::debug_log!(
            "Loaded {} case(s) from {}",
            suite.cases.len(),
            path.display()
        );
        Ok(suite)
    }

    /// Loads `path` when given, otherwise the built-in pet-store suite.
    pub fn load(path: Option<&str>) -> Result<Self, CheckError> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::builtin()),
        }
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        if self.cases.is_empty() {
            return Err(CheckError::InvalidSuite("suite has no cases".to_string()));
        }
        let mut names = HashSet::new();
        for case in &self.cases {
            case.validate().map_err(CheckError::InvalidSuite)?;
            if !names.insert(case.name.as_str()) {
                return Err(CheckError::InvalidSuite(format!(
                    "duplicate case name '{}'",
                    case.name
                )));
            }
        }
        Ok(())
    }

    /// Keeps the cases whose name contains `filter`, preserving order.
    pub fn select(self, filter: Option<&str>) -> Result<Self, CheckError> {
        let Some(filter) = filter else {
            return Ok(self);
        };
        let cases: Vec<TestCase> = self
            .cases
            .into_iter()
            .filter(|case| case.name.contains(filter))
            .collect();
        if cases.is_empty() {
            return Err(CheckError::NoCasesSelected(filter.to_string()));
        }
        Ok(Suite {
            base_url: self.base_url,
            cases,
        })
    }
}
