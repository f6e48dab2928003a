//! Card layout and randomized generation.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::CardError;
use crate::{CENTER, FREE_SPACE, GRID_SIZE, ITEMS_PER_CARD};

/// An immutable 5x5 bingo card.
///
/// The center cell always holds [`FREE_SPACE`]; the other 24 cells hold
/// pool items in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    cells: [[String; GRID_SIZE]; GRID_SIZE],
}

impl Card {
    /// Builds a card from exactly 24 items, placed row-major around the
    /// center cell.
    ///
    /// This is also how a joining player assembles the flat list received
    /// from the host.
    pub fn from_items(items: Vec<String>) -> Result<Self, CardError> {
        if items.len() != ITEMS_PER_CARD {
            return Err(CardError::WrongItemCount {
                expected: ITEMS_PER_CARD,
                actual: items.len(),
            });
        }

        let mut items = items.into_iter();
        let cells = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                if row == CENTER && col == CENTER {
                    FREE_SPACE.to_string()
                } else {
                    // Length checked above: exactly one item per non-center cell.
                    items.next().unwrap_or_default()
                }
            })
        });

        Ok(Self { cells })
    }

    /// Returns the text at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Returns `true` for the center cell.
    pub fn is_free(row: usize, col: usize) -> bool {
        row == CENTER && col == CENTER
    }

    /// Iterates the rows of the card, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[String; GRID_SIZE]> {
        self.cells.iter()
    }

    /// The 24 non-center items in row-major order.
    ///
    /// This is the flat form carried in a card response.
    pub fn items(&self) -> Vec<String> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cols)| {
                cols.iter()
                    .enumerate()
                    .filter(move |(col, _)| !Self::is_free(row, *col))
                    .map(|(_, item)| item.clone())
            })
            .collect()
    }
}

/// Generates a card from `pool` using the thread-local RNG.
pub fn generate(pool: &[String]) -> Result<Card, CardError> {
    generate_with(pool, &mut rand::thread_rng())
}

/// Generates a card from `pool` using the given random source.
///
/// Pools larger than 24 are sampled without replacement; a pool of exactly
/// 24 uses every item. The selection is then shuffled before placement.
pub fn generate_with<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> Result<Card, CardError> {
    if pool.len() < ITEMS_PER_CARD {
        return Err(CardError::InsufficientItems {
            required: ITEMS_PER_CARD,
            available: pool.len(),
        });
    }

    let mut selected: Vec<String> = if pool.len() > ITEMS_PER_CARD {
        pool.choose_multiple(rng, ITEMS_PER_CARD).cloned().collect()
    } else {
        pool.to_vec()
    };
    selected.shuffle(rng);

    Card::from_items(selected)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item-{i}")).collect()
    }

    fn assert_well_formed(card: &Card, pool: &[String]) {
        let mut seen = HashSet::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let cell = card.get(row, col).unwrap();
                if Card::is_free(row, col) {
                    assert_eq!(cell, FREE_SPACE);
                } else {
                    assert_ne!(cell, FREE_SPACE);
                    assert!(pool.iter().any(|p| p == cell), "{cell} not in pool");
                    assert!(seen.insert(cell.to_string()), "duplicate {cell}");
                }
            }
        }
        assert_eq!(seen.len(), ITEMS_PER_CARD);
    }

    #[test]
    fn exact_pool_uses_every_item() {
        let pool = pool(24);
        let card = generate(&pool).unwrap();
        assert_well_formed(&card, &pool);

        let mut items = card.items();
        items.sort();
        let mut expected = pool.clone();
        expected.sort();
        assert_eq!(items, expected);
    }

    #[test]
    fn oversized_pool_is_sampled_without_duplicates() {
        let pool = pool(30);
        for _ in 0..100 {
            let card = generate(&pool).unwrap();
            assert_well_formed(&card, &pool);
        }
    }

    #[test]
    fn small_pool_is_rejected() {
        for n in [0, 1, 23] {
            let err = generate(&pool(n)).unwrap_err();
            assert_eq!(
                err,
                CardError::InsufficientItems {
                    required: 24,
                    available: n
                }
            );
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let pool = pool(40);
        let a = generate_with(&pool, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate_with(&pool, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn successive_draws_differ() {
        let pool = pool(24);
        let mut rng = StdRng::seed_from_u64(42);
        let a = generate_with(&pool, &mut rng).unwrap();
        let b = generate_with(&pool, &mut rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn from_items_places_free_at_center() {
        let card = Card::from_items(pool(24)).unwrap();
        assert_eq!(card.get(0, 0), Some("item-0"));
        assert_eq!(card.get(2, 1), Some("item-11"));
        assert_eq!(card.get(CENTER, CENTER), Some(FREE_SPACE));
        assert_eq!(card.get(2, 3), Some("item-12"));
        assert_eq!(card.get(4, 4), Some("item-23"));
        assert_eq!(card.get(5, 0), None);
        assert_eq!(card.items(), pool(24));
    }

    #[test]
    fn from_items_rejects_wrong_count() {
        let err = Card::from_items(pool(25)).unwrap_err();
        assert_eq!(
            err,
            CardError::WrongItemCount {
                expected: 24,
                actual: 25
            }
        );
    }
}
