//! Die faces and their weighting.

use serde::{Deserialize, Serialize};

use crate::core::{RandomSource, WeightedSet};

/// One face of a winter die.
///
/// A die has seven equally likely slots: three blanks and one of each
/// symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DieFace {
    Blank,
    /// Give one die to another player.
    Present,
    /// Lose one die from the game.
    Snowflake,
    /// Challenge the next player.
    CandyCane,
    /// Lose one die from the game.
    Star,
}

impl DieFace {
    /// Every face, in slot order.
    pub const ALL: [DieFace; 5] = [
        DieFace::Blank,
        DieFace::Present,
        DieFace::Snowflake,
        DieFace::CandyCane,
        DieFace::Star,
    ];

    /// Slot weight of this face.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            DieFace::Blank => 3,
            _ => 1,
        }
    }

    /// The standard die: slots 0-2 blank, 3 present, 4 snowflake,
    /// 5 candy cane, 6 star.
    #[must_use]
    pub fn standard_die() -> WeightedSet<DieFace> {
        WeightedSet::new(Self::ALL.map(|face| (face, face.weight())))
    }

    /// True for faces that take a die out of the game.
    #[must_use]
    pub fn eliminates(self) -> bool {
        matches!(self, DieFace::Snowflake | DieFace::Star)
    }
}

/// Roll `count` independent dice.
pub fn roll(die: &WeightedSet<DieFace>, count: u32, rng: &mut dyn RandomSource) -> Vec<DieFace> {
    (0..count).map(|_| *die.draw(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRandom;

    #[test]
    fn test_standard_die_slots() {
        let die = DieFace::standard_die();
        assert_eq!(die.slots(), 7);

        let faces: Vec<_> = (0..7).map(|slot| *die.at_slot(slot).unwrap()).collect();
        assert_eq!(
            faces,
            vec![
                DieFace::Blank,
                DieFace::Blank,
                DieFace::Blank,
                DieFace::Present,
                DieFace::Snowflake,
                DieFace::CandyCane,
                DieFace::Star,
            ]
        );
    }

    #[test]
    fn test_roll_consumes_one_draw_per_die() {
        let die = DieFace::standard_die();
        let mut rng = ScriptedRandom::new([4, 6, 0]);

        let faces = roll(&die, 3, &mut rng);

        assert_eq!(faces, vec![DieFace::Snowflake, DieFace::Star, DieFace::Blank]);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_roll_zero_dice() {
        let die = DieFace::standard_die();
        let mut rng = ScriptedRandom::new([1]);
        assert!(roll(&die, 0, &mut rng).is_empty());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_eliminates() {
        assert!(DieFace::Snowflake.eliminates());
        assert!(DieFace::Star.eliminates());
        assert!(!DieFace::Present.eliminates());
        assert!(!DieFace::CandyCane.eliminates());
    }
}
