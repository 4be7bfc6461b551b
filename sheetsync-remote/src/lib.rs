//! # sheetsync-remote
//!
//! The remote tabular store seam. [`RemoteTable`] is the object-safe
//! interface the reconcile engine drives: read every cell, clear, write a
//! block, optionally reapply header formatting. [`RestTable`] speaks a
//! Sheets-style values REST API over `ureq`; [`MemoryTable`] is an
//! in-process implementation for tests and offline use.

pub mod credentials;
pub mod error;
pub mod memory;
pub mod rest;
pub mod table;

pub use credentials::Credentials;
pub use error::RemoteError;
pub use memory::MemoryTable;
pub use rest::RestTable;
pub use table::RemoteTable;
