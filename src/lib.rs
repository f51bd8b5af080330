//! Deterministic accessibility identifiers for UI elements.
//!
//! Identifiers are derived from object identity, a configurable namespace,
//! a breadcrumb stack of named views and per-element naming modifiers.
//! The [`session::identifier_session::IdentifierSession`] ties a
//! configuration to a generator and resolves whole view trees.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod modifier;
pub mod report;
pub mod session;
pub mod trace;

pub use config::config_model::{AccessibilityIdentifierConfig, GenerationMode};
pub use error::{IdentifierError, Result};
pub use identity::generator::IdentifierGenerator;
pub use identity::identity_model::{Identifiable, Identity};
pub use modifier::modifier_model::ViewElement;
pub use modifier::resolver::{IdentifierSource, ResolvedElement};
pub use session::identifier_session::IdentifierSession;
