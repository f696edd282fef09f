//! The 40-space board.

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 40;
pub const GO: usize = 0;
pub const JAIL: usize = 10;
pub const GO_TO_JAIL: usize = 30;

/// Rent charged on an owned space that lists none.
pub const FALLBACK_RENT: i64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    Cyan,
    Magenta,
    Orange,
    Red,
    Yellow,
    Green,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceKind {
    Go,
    Property { group: ColorGroup, price: i64, rent: i64 },
    Transport { price: i64, rent: i64 },
    Utility { price: i64, rent: i64 },
    Tax { fee: i64 },
    Chance,
    Chest,
    Jail,
    Parking,
    GoToJail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Space {
    pub name: &'static str,
    pub kind: SpaceKind,
}

impl Space {
    const fn new(name: &'static str, kind: SpaceKind) -> Self {
        Self { name, kind }
    }

    /// Purchase price, for spaces that can be owned.
    #[must_use]
    pub fn price(&self) -> Option<i64> {
        match self.kind {
            SpaceKind::Property { price, .. } | SpaceKind::Transport { price, .. } | SpaceKind::Utility { price, .. } => {
                Some(price)
            }
            _ => None,
        }
    }

    /// Rent owed by a visitor when the space is owned.
    #[must_use]
    pub fn rent(&self) -> i64 {
        match self.kind {
            SpaceKind::Property { rent, .. } | SpaceKind::Transport { rent, .. } | SpaceKind::Utility { rent, .. } => rent,
            _ => FALLBACK_RENT,
        }
    }

    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.price().is_some()
    }
}

const fn property(name: &'static str, group: ColorGroup, price: i64, rent: i64) -> Space {
    Space::new(name, SpaceKind::Property { group, price, rent })
}

const fn transport(name: &'static str) -> Space {
    Space::new(name, SpaceKind::Transport { price: 200, rent: 25 })
}

const fn utility(name: &'static str) -> Space {
    Space::new(name, SpaceKind::Utility { price: 150, rent: 20 })
}

use ColorGroup::*;

pub static BOARD: [Space; BOARD_SIZE] = [
    Space::new("GO", SpaceKind::Go),
    property("Degen St", Brown, 60, 4),
    Space::new("Pack News", SpaceKind::Chest),
    property("Alpha Al", Brown, 60, 4),
    Space::new("Network Rake", SpaceKind::Tax { fee: 200 }),
    transport("Eura Trans S"),
    property("Solana Ln", Cyan, 100, 6),
    Space::new("Degen Tip", SpaceKind::Chance),
    property("Phantom Av", Cyan, 100, 6),
    property("Ledger Bl", Cyan, 120, 8),
    Space::new("SEC Probe", SpaceKind::Jail),
    property("Neon Plz", Magenta, 140, 10),
    utility("Web3 Serv"),
    property("Glitch Wy", Magenta, 140, 10),
    property("Cyber Ct", Magenta, 160, 12),
    transport("Eura Trans W"),
    property("Meme Rd", Orange, 180, 14),
    Space::new("Pack News", SpaceKind::Chest),
    property("Shilling St", Orange, 180, 14),
    property("Hype Sq", Orange, 200, 16),
    Space::new("Whale Club", SpaceKind::Parking),
    property("Bull Run", Red, 220, 18),
    Space::new("Degen Tip", SpaceKind::Chance),
    property("Candle Cr", Red, 220, 18),
    property("Pivot Pt", Red, 240, 20),
    transport("Eura Trans N"),
    property("FOMO Fl", Yellow, 260, 22),
    utility("Gas Fee"),
    property("Whale Wh", Yellow, 260, 22),
    property("Pump Plz", Yellow, 280, 24),
    Space::new("Get Probed", SpaceKind::GoToJail),
    property("Sol Valley", Green, 300, 26),
    property("Venture Bl", Green, 300, 26),
    Space::new("Pack News", SpaceKind::Chest),
    property("Oracle Dr", Green, 320, 28),
    transport("Eura Trans E"),
    Space::new("Degen Tip", SpaceKind::Chance),
    property("Diamond Pk", Blue, 350, 35),
    Space::new("Whale Tax", SpaceKind::Tax { fee: 100 }),
    property("Eura Hgts", Blue, 400, 50),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_spaces() {
        assert_eq!(BOARD[GO].kind, SpaceKind::Go);
        assert_eq!(BOARD[JAIL].kind, SpaceKind::Jail);
        assert_eq!(BOARD[GO_TO_JAIL].kind, SpaceKind::GoToJail);
        assert_eq!(BOARD[20].kind, SpaceKind::Parking);
        assert_eq!(BOARD[4].kind, SpaceKind::Tax { fee: 200 });
        assert_eq!(BOARD[38].kind, SpaceKind::Tax { fee: 100 });
    }

    #[test]
    fn test_purchasable_spaces() {
        let purchasable = BOARD.iter().filter(|s| s.is_purchasable()).count();
        // 22 properties, 4 transports, 2 utilities.
        assert_eq!(purchasable, 28);
        assert!(!BOARD[4].is_purchasable());
        assert_eq!(BOARD[39].price(), Some(400));
        assert_eq!(BOARD[39].rent(), 50);
        assert_eq!(BOARD[5].rent(), 25);
        assert_eq!(BOARD[12].price(), Some(150));
    }

    #[test]
    fn test_fallback_rent() {
        assert_eq!(BOARD[7].rent(), FALLBACK_RENT);
    }
}
