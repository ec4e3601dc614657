use serde::{Deserialize, Serialize};

/// The two sides of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Red => write!(f, "Red"),
            Player::Blue => write!(f, "Blue"),
        }
    }
}

/// The six hex directions in axial (r, q) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDir {
    Up,
    UpRight,
    UpLeft,
    Down,
    DownLeft,
    DownRight,
}

impl HexDir {
    /// Deterministic enumeration order used by the move generator.
    #[inline]
    pub fn all() -> [HexDir; 6] {
        [
            HexDir::Up,
            HexDir::UpRight,
            HexDir::UpLeft,
            HexDir::Down,
            HexDir::DownLeft,
            HexDir::DownRight,
        ]
    }

    /// Axial (dr, dq) unit vector for this direction.
    #[inline]
    pub fn vector(self) -> (i8, i8) {
        match self {
            HexDir::Up => (1, 0),
            HexDir::UpRight => (0, 1),
            HexDir::UpLeft => (1, -1),
            HexDir::Down => (-1, 0),
            HexDir::DownLeft => (0, -1),
            HexDir::DownRight => (-1, 1),
        }
    }

    #[inline]
    pub fn opposite(self) -> HexDir {
        match self {
            HexDir::Up => HexDir::Down,
            HexDir::UpRight => HexDir::DownLeft,
            HexDir::UpLeft => HexDir::DownRight,
            HexDir::Down => HexDir::Up,
            HexDir::DownLeft => HexDir::UpRight,
            HexDir::DownRight => HexDir::UpLeft,
        }
    }
}

impl std::fmt::Display for HexDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HexDir::Up => "Up",
            HexDir::UpRight => "UpRight",
            HexDir::UpLeft => "UpLeft",
            HexDir::Down => "Down",
            HexDir::DownLeft => "DownLeft",
            HexDir::DownRight => "DownRight",
        };
        write!(f, "{name}")
    }
}
