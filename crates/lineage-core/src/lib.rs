//! Lineage Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Lineage layout
//! engine and its document reader. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Integer boxes and points ([`geometry`] module)
//! - **Style**: Fixed sizing constants for the diagram ([`style::Style`])
//! - **Document**: The read-only document snapshot consumed by layout ([`document`] module)

pub mod document;
pub mod geometry;
pub mod identifier;
pub mod style;
