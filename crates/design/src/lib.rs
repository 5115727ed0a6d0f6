//! # Traitdex Design Documentation
//!
//! This crate contains design documentation and architectural decision
//! records for the traitdex project.
//!
//! ## Documentation Location
//!
//! All design documents are located in the `DESIGN.md` file at the root
//! of the workspace.
//!
//! Key topics:
//! - The two-phase fragment delivery protocol (buffer, install, drain)
//! - Record identity and duplicate suppression
//! - Legacy rustdoc wire-format recovery

// This is a documentation-only crate
#![no_std]
