use std::collections::HashSet;
use std::sync::OnceLock;

/// Tags that describe distribution model, play mode, or tooling rather than
/// taste. They are filtered out before any weighting so they never enter a
/// profile or a candidate's tag vector.
const BLACKLISTED_TAGS: &[&str] = &[
    "e-sports",
    "Software",
    "Animation & Modeling",
    "Split Screen",
    "3D Vision",
    "Short",
    "Kickstarter",
    "Multiplayer",
    "Singleplayer",
    "Co-op",
    "Online Co-Op",
    "Free to Play",
    "Local Co-Op",
    "4 Player Local",
    "Early Access",
    "Local Multiplayer",
    "Design & Illustration",
    "Utilities",
    "Game Development",
];

/// The tag blacklist as a set
pub fn tag_blacklist() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| BLACKLISTED_TAGS.iter().copied().collect())
}
