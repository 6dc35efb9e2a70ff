//! Backends module - External tool integrations
//!
//! Provides:
//! - opener: Running the editor command that opens a target
//! - doctor: Opener checking

pub mod doctor;
pub mod opener;
