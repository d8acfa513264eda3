//! # Meanfield
//!
//! Self-consistent solutions of coupled mean-field equations.
//!
//! A mean-field state is a handful of scalar order parameters (pairing
//! amplitude, chemical potential, and friends) that must jointly satisfy their
//! defining equations for a fixed set of model parameters. This crate finds
//! them by re-deriving one unknown at a time with a bracketing root finder
//! until every equation holds at once.
//!
//! ## Crate layout
//!
//! - [`models`]: State variants for the pairing problem.
//! - [`support`]: The numerical machinery the states are built on.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful on
//! their own, but their APIs are not stable. Breaking changes may occur as
//! needed.
//!
//! ## Logging
//!
//! Progress is reported through [`tracing`] events. The crate never installs a
//! subscriber; binaries and tests choose their own.

pub mod models;
pub mod support;
