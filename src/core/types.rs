use serde::{Deserialize, Serialize};

/// Strand of a subject sequence on its parent scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    /// Parse a strand from its symbol (`+`/`-`), also accepting `1`/`-1`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "+" | "1" => Some(Self::Forward),
            "-" | "-1" => Some(Self::Reverse),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Forward => "+",
            Self::Reverse => "-",
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
