use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn pair_count(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 8,
            Difficulty::Hard => 10,
        }
    }

    pub fn deck_size(self) -> usize {
        self.pair_count() * 2
    }

    /// Board layout as (cols, rows).
    pub fn grid(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (3, 2),
            Difficulty::Medium => (4, 4),
            Difficulty::Hard => (4, 5),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Unknown names fall back to medium.
    pub fn from_name(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn parse_strict(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Animal {
    Fish,
    Cat,
    Dog,
    Squirrel,
    Turtle,
    Bird,
    Rabbit,
    Snail,
    Rat,
    Bug,
}

impl Animal {
    pub const ALL: [Animal; 10] = [
        Animal::Fish,
        Animal::Cat,
        Animal::Dog,
        Animal::Squirrel,
        Animal::Turtle,
        Animal::Bird,
        Animal::Rabbit,
        Animal::Snail,
        Animal::Rat,
        Animal::Bug,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Animal::Fish => "Fish",
            Animal::Cat => "Cat",
            Animal::Dog => "Dog",
            Animal::Squirrel => "Squirrel",
            Animal::Turtle => "Turtle",
            Animal::Bird => "Bird",
            Animal::Rabbit => "Rabbit",
            Animal::Snail => "Snail",
            Animal::Rat => "Rat",
            Animal::Bug => "Bug",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Animal::Fish => "🐟",
            Animal::Cat => "🐱",
            Animal::Dog => "🐶",
            Animal::Squirrel => "🐿",
            Animal::Turtle => "🐢",
            Animal::Bird => "🐦",
            Animal::Rabbit => "🐰",
            Animal::Snail => "🐌",
            Animal::Rat => "🐀",
            Animal::Bug => "🐞",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: usize,
    pub animal: Animal,
    pub matched: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Start,
    Playing,
    Complete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_counts() {
        assert_eq!(Difficulty::Easy.pair_count(), 3);
        assert_eq!(Difficulty::Medium.pair_count(), 8);
        assert_eq!(Difficulty::Hard.pair_count(), 10);
    }

    #[test]
    fn test_grid_holds_whole_deck() {
        for difficulty in Difficulty::ALL {
            let (cols, rows) = difficulty.grid();
            assert_eq!(cols * rows, difficulty.deck_size());
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_medium() {
        assert_eq!(Difficulty::from_name("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::from_name(" easy "), Difficulty::Easy);
        assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Medium);
        assert_eq!(Difficulty::parse_strict("nightmare"), None);
    }

    #[test]
    fn test_enough_animals_for_hardest_level() {
        assert!(Animal::ALL.len() >= Difficulty::Hard.pair_count());
    }
}
