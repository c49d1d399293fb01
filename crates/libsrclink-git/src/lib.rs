//! Repository access for srclink
//!
//! Everything srclink needs to know about the surrounding repository:
//! where the working tree is, what HEAD points at, where the remotes live,
//! and how to start a branch.

pub mod error;
pub mod repo;

pub use error::GitError;
pub use repo::GitRepo;
