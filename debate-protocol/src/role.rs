//! Agent roles. Role-specific prompt packs are data (a lookup table
//! keyed by `Role`) rather than per-role types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role a configured agent plays in the debate.
///
/// Deserializing an unrecognized role string does not fail — it falls
/// back to [`Role::Architect`], matching the "unknown role → architect
/// defaults" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// System structure, module boundaries, API design.
    Architect,
    /// Latency, throughput, resource usage.
    Performance,
    /// Attack surface, auth, input validation.
    Security,
    /// Test coverage, edge cases, regressions.
    Testing,
    /// Simplicity, avoiding over-engineering.
    Kiss,
    /// No fixed specialty; broad judgment.
    Generalist,
    /// Schema design, normalization, query shape.
    Datamodeling,
}

impl Role {
    /// All roles, in the canonical order used for tie-breaking
    /// (`(critiquer, target)` lexicographic ordering of agent ids is
    /// primary; this ordering only matters for iterating the built-in
    /// prompt table deterministically).
    pub const ALL: [Role; 7] = [
        Role::Architect,
        Role::Performance,
        Role::Security,
        Role::Testing,
        Role::Kiss,
        Role::Generalist,
        Role::Datamodeling,
    ];

    /// Parse a role string, defaulting to [`Role::Architect`] for
    /// anything unrecognized.
    pub fn parse_or_default(s: &str) -> Role {
        match s.to_ascii_lowercase().as_str() {
            "architect" => Role::Architect,
            "performance" => Role::Performance,
            "security" => Role::Security,
            "testing" => Role::Testing,
            "kiss" => Role::Kiss,
            "generalist" => Role::Generalist,
            "datamodeling" | "data_modeling" | "data-modeling" => Role::Datamodeling,
            _ => Role::Architect,
        }
    }

    /// The lowercase canonical string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Architect => "architect",
            Role::Performance => "performance",
            Role::Security => "security",
            Role::Testing => "testing",
            Role::Kiss => "kiss",
            Role::Generalist => "generalist",
            Role::Datamodeling => "datamodeling",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Architect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_defaults_to_architect() {
        assert_eq!(Role::parse_or_default("wizard"), Role::Architect);
        assert_eq!(Role::parse_or_default(""), Role::Architect);
    }

    #[test]
    fn known_roles_roundtrip_through_as_str() {
        for role in Role::ALL {
            assert_eq!(Role::parse_or_default(role.as_str()), role);
        }
    }

    #[test]
    fn datamodeling_accepts_variants() {
        assert_eq!(Role::parse_or_default("data_modeling"), Role::Datamodeling);
        assert_eq!(Role::parse_or_default("DataModeling"), Role::Datamodeling);
    }
}
