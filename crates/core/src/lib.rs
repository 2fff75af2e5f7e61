//! Domain logic for the dossier document library.
//!
//! Everything in this crate is pure: no file or network I/O. The store and
//! HTTP layers build on these types.

pub mod access;
pub mod credentials;
pub mod error;
pub mod project;
pub mod roles;
pub mod token;
pub mod types;
pub mod upload;
