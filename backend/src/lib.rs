//! Profile update backend library.
//!
//! HTTP endpoints for updating staff and member profile records — name,
//! phone, profile photo, and email — with a human-readable audit trail of
//! every detected change.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use doc::ApiDoc;
