//! Source category sent with every record

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// `{prefix}/{environment}/{location}/{hostname}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub prefix: String,
    pub environment: String,
    pub location: String,
    pub hostname: String,
}

impl Category {
    pub fn new(
        prefix: impl Into<String>,
        environment: impl Into<String>,
        location: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            environment: environment.into(),
            location: location.into(),
            hostname: hostname.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.prefix, self.environment, self.location, self.hostname
        )
    }
}

/// Name of the local host, `unknown` when it cannot be read
pub fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().to_string(),
        Err(e) => {
            warn!("Could not read hostname: {}", e);
            "unknown".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_string() {
        let category = Category::new("voip", "prod", "ams1", "tap01");
        assert_eq!(category.to_string(), "voip/prod/ams1/tap01");
    }

    #[test]
    fn test_empty_components_keep_separators() {
        let category = Category::new("", "prod", "", "tap01");
        assert_eq!(category.to_string(), "/prod//tap01");
    }

    #[test]
    fn test_local_hostname_not_empty() {
        assert!(!local_hostname().is_empty());
    }
}
