use crate::Error;
use rand::distributions::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct DiceRoller {
    rng: StdRng,
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DiceRoller {
    pub fn new(opt_seed: Option<u64>) -> Self {
        Self {
            rng: match opt_seed {
                None => StdRng::from_entropy(),
                Some(seed) => SeedableRng::seed_from_u64(seed),
            },
        }
    }

    /// Roll a single die, replicating a perfect six-sided die.
    pub fn roll_die(&mut self) -> u8 {
        Uniform::new_inclusive(1, 6).sample(&mut self.rng)
    }

    /// Roll the dices which generates two independent random numbers between 1 and 6.
    pub fn roll(&mut self) -> Dice {
        let first = self.roll_die();
        let second = self.roll_die();
        Dice {
            values: (first, second),
        }
    }
}

/// Represents the two dice
///
/// Backgammon is always played with two dice.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Deserialize)]
pub struct Dice {
    /// The two dice values
    pub values: (u8, u8),
}

impl Dice {
    /// Build dice from values rolled elsewhere, checking they are real die faces
    pub fn new(first: u8, second: u8) -> Result<Self, Error> {
        let face = 1..=6;
        if !face.contains(&first) || !face.contains(&second) {
            return Err(Error::DiceInvalid);
        }
        Ok(Dice {
            values: (first, second),
        })
    }

    pub fn is_double(&self) -> bool {
        self.values.0 == self.values.1
    }

    /// Die values playable this turn: four copies on a double, otherwise both
    /// values in rolling order.
    pub fn moves(&self) -> Vec<u8> {
        if self.is_double() {
            vec![self.values.0; 4]
        } else {
            vec![self.values.0, self.values.1]
        }
    }

    pub fn to_bits_string(self) -> String {
        format!("{:0>3b}{:0>3b}", self.values.0, self.values.1)
    }

    pub fn to_display_string(self) -> String {
        format!("{} & {}", self.values.0, self.values.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll() {
        let mut roller = DiceRoller::default();
        for _ in 0..100 {
            let dice = roller.roll();
            assert!(dice.values.0 >= 1 && dice.values.0 <= 6);
            assert!(dice.values.1 >= 1 && dice.values.1 <= 6);
        }
    }

    #[test]
    fn test_seed() {
        let mut first = DiceRoller::new(Some(123));
        let mut second = DiceRoller::new(Some(123));
        for _ in 0..20 {
            assert_eq!(first.roll(), second.roll());
        }
    }

    #[test]
    fn every_face_shows_up() {
        let mut roller = DiceRoller::new(Some(7));
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[roller.roll_die() as usize - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn new_checks_faces() {
        assert!(Dice::new(1, 6).is_ok());
        assert_eq!(Dice::new(0, 3), Err(Error::DiceInvalid));
        assert_eq!(Dice::new(3, 7), Err(Error::DiceInvalid));
    }

    #[test]
    fn moves_for_double() {
        let dice = Dice { values: (4, 4) };
        assert!(dice.is_double());
        assert_eq!(dice.moves(), vec![4, 4, 4, 4]);
    }

    #[test]
    fn moves_for_non_double() {
        let dice = Dice { values: (5, 2) };
        assert!(!dice.is_double());
        assert_eq!(dice.moves(), vec![5, 2]);
    }

    #[test]
    fn test_to_bits_string() {
        let dice = Dice { values: (4, 2) };
        assert!(dice.to_bits_string() == "100010");
    }
}
