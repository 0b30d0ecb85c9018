use serde::{Deserialize, Serialize};

/// A user's reaction to one article.
///
/// Storing a single state per (user, article) keeps a user from ever being
/// counted in both the likes and the dislikes of the same article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    #[default]
    None,
    Liked,
    Disliked,
}

impl Reaction {
    /// State after the user presses "like".
    pub fn toggle_like(self) -> Self {
        match self {
            Reaction::Liked => Reaction::None,
            Reaction::None | Reaction::Disliked => Reaction::Liked,
        }
    }

    /// State after the user presses "dislike".
    pub fn toggle_dislike(self) -> Self {
        match self {
            Reaction::Disliked => Reaction::None,
            Reaction::None | Reaction::Liked => Reaction::Disliked,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Reaction::None => "none",
            Reaction::Liked => "liked",
            Reaction::Disliked => "disliked",
        }
    }

    /// Parse the stored representation; unknown values read as `None`.
    pub fn from_stored(value: &str) -> Self {
        match value {
            "liked" => Reaction::Liked,
            "disliked" => Reaction::Disliked,
            _ => Reaction::None,
        }
    }
}
