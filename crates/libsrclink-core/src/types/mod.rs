pub mod forge;
pub mod span;

pub use forge::{Forge, RemoteUrl};
pub use span::{LineRange, MatchSpan};
