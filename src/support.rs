//! Supporting utilities used by the models.
//!
//! - [`root`]: Bracket search and Brent refinement for scalar equations.
//! - [`consistency`]: Fixed-point driver over coupled scalar unknowns.
//! - [`config`]: TOML-backed run configuration and parameter sweeps.
//! - [`constraint`]: Construction-time numeric invariants.

pub mod config;
pub mod consistency;
pub mod constraint;
pub mod root;
