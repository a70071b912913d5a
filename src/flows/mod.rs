mod commercial;
mod federal;

pub use commercial::commercial_flow;
pub use federal::federal_flow;

use crate::core::registry::FlowBlueprint;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Commercial,
    Federal,
}

impl FlowKind {
    pub fn blueprint(self) -> FlowBlueprint {
        match self {
            Self::Commercial => commercial_flow(),
            Self::Federal => federal_flow(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commercial => "commercial",
            Self::Federal => "federal",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commercial" => Ok(Self::Commercial),
            "federal" => Ok(Self::Federal),
            other => Err(format!("unknown flow `{}`", other)),
        }
    }
}
