//! Infrastructure layer: everything that touches the file system or the
//! process environment.
//!
//! **Dependency rule**: this layer may depend on `gitconf_core`, but the
//! core crate never depends on it.

pub mod storage;
