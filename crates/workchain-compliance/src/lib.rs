//! # workchain-compliance — Supply-Chain Compliance Aggregation
//!
//! Models a supply chain as a tree of entities (client → contractor →
//! subcontractor), each owning compliance documents with expiry dates, and
//! derives the compliance status shown for every entity.
//!
//! - **Risk** (`risk.rs`): the `Green < Amber < Red` severity lattice and
//!   the `Compliant / Warning / Critical` status it folds to.
//!
//! - **Document** (`document.rs`): expiry-driven status derivation under an
//!   `ExpiryPolicy` (30-day expiring window by default).
//!
//! - **Entity** (`entity.rs`): tiers and the one-way approval workflow.
//!
//! - **Engine** (`engine.rs`): the entity store and its mutations
//!   (add entity, add/remove document, approve/reject), enforcing the tier
//!   rules of the hierarchy.
//!
//! - **Hierarchy** (`hierarchy.rs`): post-order status bubbling, per-entity
//!   status and rendered trees.
//!
//! - **Summary** (`summary.rs`): dashboard counters.
//!
//! - **Snapshot** (`snapshot.rs`): serde description of a whole supply
//!   chain for seeding an engine from a file.
//!
//! ## Invariants
//!
//! - Document status, document risk, entity risk and combined status are
//!   never stored. They are recomputed from expiry dates and an explicit
//!   evaluation date on every query.
//! - The engine never reads a clock.
//! - Approval state and compliance status are independent. Approving or
//!   rejecting an entity never changes any combined status.
//!
//! ## Example
//!
//! ```
//! use workchain_compliance::{ComplianceEngine, ComplianceStatus, Tier};
//! use workchain_core::CalendarDate;
//!
//! let now = CalendarDate::parse("2024-02-07").unwrap();
//! let (mut engine, client) = ComplianceEngine::with_client("MegaCorp Industries");
//! let buildco = engine.add_entity("BuildCo Ltd", Tier::Contractor, Some(client)).unwrap();
//! let quick = engine
//!     .add_entity("QuickBuild Services", Tier::Subcontractor, Some(buildco))
//!     .unwrap();
//! engine
//!     .add_document(
//!         quick,
//!         "Employer Liability Insurance",
//!         CalendarDate::parse("2024-01-05").unwrap(),
//!     )
//!     .unwrap();
//!
//! let status = engine.entity_status(client, now).unwrap();
//! assert_eq!(status.combined_status, ComplianceStatus::Critical);
//! assert_eq!(status.driver, Some(quick));
//! ```

pub mod document;
pub mod engine;
pub mod entity;
pub mod error;
pub mod hierarchy;
pub mod risk;
pub mod snapshot;
pub mod summary;

pub use document::{
    Document, DocumentStatus, DocumentView, ExpiryPolicy, DEFAULT_EXPIRING_WINDOW_DAYS,
};
pub use engine::ComplianceEngine;
pub use entity::{ApprovalDecision, ApprovalStatus, Entity, Tier};
pub use error::{EngineError, ResourceKind};
pub use hierarchy::{EntityStatus, HierarchyNode};
pub use risk::{ComplianceStatus, RiskLevel};
pub use snapshot::{
    LoadedSnapshot, SnapshotDocument, SnapshotEntity, SnapshotError, SupplyChainSnapshot,
};
pub use summary::ComplianceSummary;
