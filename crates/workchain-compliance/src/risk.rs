//! # Risk Lattice
//!
//! Defines [`RiskLevel`], the three-point severity scale shared by documents
//! and entities, and [`ComplianceStatus`], the display status an entity's
//! combined severity folds to.
//!
//! ```text
//! Ordering (best → worst): Green < Amber < Red
//!
//! join(a, b) = max(a, b)
//! ```
//!
//! `Red` is absorbing under `join`: one expired document anywhere in a
//! subtree makes the whole subtree critical. `Green` is the identity, so the
//! fold over an empty document set is `Green`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── RiskLevel ───────────────────────────────────────────────────────

/// Severity of a single document or of an aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Nothing requires attention.
    #[default]
    Green,
    /// Something expires soon.
    Amber,
    /// Something has already expired.
    Red,
}

impl RiskLevel {
    /// Lattice ordering value. Higher is more severe.
    fn severity(self) -> u8 {
        match self {
            Self::Green => 0,
            Self::Amber => 1,
            Self::Red => 2,
        }
    }

    /// Lattice join: the more severe of the two levels.
    pub fn join(self, other: Self) -> Self {
        if self.severity() >= other.severity() {
            self
        } else {
            other
        }
    }

    /// Fold any number of levels with [`join`](Self::join), starting from
    /// `Green`.
    pub fn worst<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = RiskLevel>,
    {
        levels.into_iter().fold(Self::Green, Self::join)
    }

    /// Whether this level counts as an open compliance issue.
    pub fn is_issue(self) -> bool {
        !matches!(self, Self::Green)
    }

    /// The display status this severity folds to.
    pub fn status(self) -> ComplianceStatus {
        match self {
            Self::Green => ComplianceStatus::Compliant,
            Self::Amber => ComplianceStatus::Warning,
            Self::Red => ComplianceStatus::Critical,
        }
    }

    /// The snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }
}

impl PartialOrd for RiskLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RiskLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── ComplianceStatus ────────────────────────────────────────────────

/// Combined compliance status of an entity and everything beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Subtree severity is green.
    Compliant,
    /// Subtree severity is amber.
    Warning,
    /// Subtree severity is red.
    Critical,
}

impl ComplianceStatus {
    /// The severity this status was folded from.
    pub fn risk(self) -> RiskLevel {
        match self {
            Self::Compliant => RiskLevel::Green,
            Self::Warning => RiskLevel::Amber,
            Self::Critical => RiskLevel::Red,
        }
    }

    /// The snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RiskLevel> for ComplianceStatus {
    fn from(level: RiskLevel) -> Self {
        level.status()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
