use crate::core::schedule;
use crate::utils::error::EcoFeeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canadian province and territory codes known to the fee registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JurisdictionCode {
    AB,
    BC,
    SK,
    MB,
    ON,
    QC,
    NS,
    NB,
    NL,
    PE,
    NT,
    NU,
    YT,
}

impl JurisdictionCode {
    pub const ALL: [JurisdictionCode; 13] = [
        JurisdictionCode::AB,
        JurisdictionCode::BC,
        JurisdictionCode::SK,
        JurisdictionCode::MB,
        JurisdictionCode::ON,
        JurisdictionCode::QC,
        JurisdictionCode::NS,
        JurisdictionCode::NB,
        JurisdictionCode::NL,
        JurisdictionCode::PE,
        JurisdictionCode::NT,
        JurisdictionCode::NU,
        JurisdictionCode::YT,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JurisdictionCode::AB => "AB",
            JurisdictionCode::BC => "BC",
            JurisdictionCode::SK => "SK",
            JurisdictionCode::MB => "MB",
            JurisdictionCode::ON => "ON",
            JurisdictionCode::QC => "QC",
            JurisdictionCode::NS => "NS",
            JurisdictionCode::NB => "NB",
            JurisdictionCode::NL => "NL",
            JurisdictionCode::PE => "PE",
            JurisdictionCode::NT => "NT",
            JurisdictionCode::NU => "NU",
            JurisdictionCode::YT => "YT",
        }
    }

    /// Resolves an opaque configuration value. Only strings are considered;
    /// they are trimmed and upper-cased before matching.
    pub fn resolve(raw: &serde_json::Value) -> Option<Self> {
        raw.as_str().and_then(Self::resolve_str)
    }

    pub fn resolve_str(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == normalized)
    }

    /// Codes whose fee schedule is switched on.
    pub fn enabled() -> impl Iterator<Item = JurisdictionCode> {
        Self::ALL
            .into_iter()
            .filter(|code| schedule::lookup(*code).enabled)
    }

    pub fn is_enabled(&self) -> bool {
        schedule::lookup(*self).enabled
    }
}

impl fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: exact code, no case folding.
impl FromStr for JurisdictionCode {
    type Err = EcoFeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| EcoFeeError::InvalidJurisdiction {
                value: s.to_string(),
            })
    }
}
