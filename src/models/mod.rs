pub mod game;
pub mod recommendation;
pub mod tags;

pub use game::{AppId, Game, TagStats};
pub use recommendation::{Cluster, Profile, ScoredCandidate};
pub use tags::{manhattan_distance, TagVector};
