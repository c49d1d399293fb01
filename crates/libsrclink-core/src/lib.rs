pub mod types;
pub mod locate;
pub mod link;
pub mod branch;
pub mod config;
pub mod error;

pub use error::SrclinkError;
pub use types::{Forge, LineRange, MatchSpan, RemoteUrl};
pub use locate::{locate, Document, LocateError, Locator, Selection};
pub use link::{Permalink, RefKind};
pub use branch::{branch_name, IssueRef};
pub use config::{load_repo_config, save_repo_config, BranchConfig, LinkRef, RepoConfig};
