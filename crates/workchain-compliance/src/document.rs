//! # Compliance Documents
//!
//! A [`Document`] stores only what was uploaded: a type label and an expiry
//! date. Its [`DocumentStatus`] and [`RiskLevel`] are never stored. They are
//! recomputed from the expiry date, the evaluation date and the
//! [`ExpiryPolicy`] every time they are read, so a status can never drift
//! from the date it was derived from.
//!
//! ## Derivation
//!
//! ```text
//! expiry <  now                      → Expired  → Red
//! now <= expiry < now + window       → Expiring → Amber
//! otherwise                          → Valid    → Green
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use workchain_core::{CalendarDate, DocumentId};

use crate::risk::RiskLevel;

/// Default width of the "expiring soon" band, in days.
pub const DEFAULT_EXPIRING_WINDOW_DAYS: u32 = 30;

// ─── Expiry Policy ───────────────────────────────────────────────────

/// How far ahead of its expiry date a document starts counting as expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpiryPolicy {
    /// Width of the expiring band in days. Zero disables the band.
    #[serde(default = "default_window")]
    pub expiring_window_days: u32,
}

fn default_window() -> u32 {
    DEFAULT_EXPIRING_WINDOW_DAYS
}

impl ExpiryPolicy {
    /// A policy with the given expiring window.
    pub fn new(expiring_window_days: u32) -> Self {
        Self {
            expiring_window_days,
        }
    }

    /// Classify an expiry date relative to the evaluation date.
    pub fn classify(&self, expiry: CalendarDate, now: CalendarDate) -> DocumentStatus {
        if expiry < now {
            return DocumentStatus::Expired;
        }
        match now.checked_add_days(i64::from(self.expiring_window_days)) {
            Some(horizon) if expiry >= horizon => DocumentStatus::Valid,
            // A horizon past the last representable date lies beyond every expiry.
            _ => DocumentStatus::Expiring,
        }
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRING_WINDOW_DAYS)
    }
}

// ─── Document Status ─────────────────────────────────────────────────

/// Derived validity of a document on a given evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Not expiring within the policy window.
    Valid,
    /// Expires within the policy window.
    Expiring,
    /// Expiry date is in the past.
    Expired,
}

impl DocumentStatus {
    /// Risk carried by a document in this status.
    pub fn risk(self) -> RiskLevel {
        match self {
            Self::Valid => RiskLevel::Green,
            Self::Expiring => RiskLevel::Amber,
            Self::Expired => RiskLevel::Red,
        }
    }

    /// The snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Document ────────────────────────────────────────────────────────

/// A compliance artifact attached to exactly one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Document type label (e.g. "Public Liability Insurance").
    pub name: String,
    /// Last day on which the document is still valid.
    pub expiry_date: CalendarDate,
}

impl Document {
    /// Create a document with a fresh identifier.
    pub fn new(name: impl Into<String>, expiry_date: CalendarDate) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            expiry_date,
        }
    }

    /// Derived status on `now`.
    pub fn status(&self, now: CalendarDate, policy: &ExpiryPolicy) -> DocumentStatus {
        policy.classify(self.expiry_date, now)
    }

    /// Derived risk on `now`.
    pub fn risk(&self, now: CalendarDate, policy: &ExpiryPolicy) -> RiskLevel {
        self.status(now, policy).risk()
    }

    /// Snapshot of this document with its derived fields filled in.
    pub fn view(&self, now: CalendarDate, policy: &ExpiryPolicy) -> DocumentView {
        let status = self.status(now, policy);
        DocumentView {
            id: self.id,
            name: self.name.clone(),
            expiry_date: self.expiry_date,
            status,
            risk: status.risk(),
            days_until_expiry: now.days_until(&self.expiry_date),
        }
    }
}

/// Read-only document projection for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentView {
    /// Document identifier.
    pub id: DocumentId,
    /// Document type label.
    pub name: String,
    /// Expiry date.
    pub expiry_date: CalendarDate,
    /// Status on the evaluation date.
    pub status: DocumentStatus,
    /// Risk on the evaluation date.
    pub risk: RiskLevel,
    /// Days from the evaluation date to expiry. Negative once expired.
    pub days_until_expiry: i64,
}

// ─── Tests ───────────────────────────────────────────────────────────
