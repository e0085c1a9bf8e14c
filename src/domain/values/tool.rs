use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which opportunity finder the session is pointed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Products,
    Domains,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Products => write!(f, "products"),
            Tool::Domains => write!(f, "domains"),
        }
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "products" | "product" | "p" => Ok(Tool::Products),
            "domains" | "domain" | "d" => Ok(Tool::Domains),
            _ => Err(format!("Unknown tool: {s}. Use 'products' or 'domains'")),
        }
    }
}
