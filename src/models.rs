//! Self-consistent states.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules. Each state borrows
//! an environment for its whole lifetime, owns its unknowns, and delegates the
//! physics to a spectrum supplied by the caller.
//!
//! Every state implements [`SelfConsistent`](crate::support::consistency::SelfConsistent)
//! and is solved by the shared [`Driver`](crate::support::consistency::Driver).

pub mod pairing;
