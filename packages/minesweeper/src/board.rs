use crate::{Coord, EncryptionCapability, GameError, CELL_COUNT, MINE_COUNT, SAFE_CELL_COUNT};
use serde::{Deserialize, Serialize};

/// 8x8 grid of encrypted mine indicators, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBoard<C> {
    cells: Vec<C>,
}

impl<C: Clone> EncryptedBoard<C> {
    /// Places `MINE_COUNT` mines uniformly at random. The placement only ever exists
    /// encrypted: positions are drawn with [`EncryptionCapability::random_below`] and every
    /// cell is rewritten through encrypted comparisons and selects.
    ///
    /// This is a forward Fisher-Yates shuffle of a board whose last `MINE_COUNT` cells hold
    /// the mines. Steps before the first mine only swap safe cells with safe cells, so only
    /// the last `MINE_COUNT` steps are run. Step `i` swaps cell `i` with the cell at an
    /// encrypted index `j <= i`, touching every cell up to `i`.
    ///
    /// Either the whole board is built or an error is returned.
    pub fn generate<F>(fhe: &mut F) -> Result<Self, GameError>
    where
        F: EncryptionCapability<Ciphertext = C> + ?Sized,
    {
        let safe = fhe.encrypt(false)?;
        let mine = fhe.encrypt(true)?;
        let mut cells: Vec<C> = (0..CELL_COUNT)
            .map(|i| if i < SAFE_CELL_COUNT { safe.clone() } else { mine.clone() })
            .collect();
        let indices = (0..CELL_COUNT)
            .map(|i| fhe.encrypt_u8(i))
            .collect::<Result<Vec<_>, _>>()?;

        for i in SAFE_CELL_COUNT as usize..CELL_COUNT as usize {
            let j = fhe.random_below(i as u8 + 1)?;
            let mut incoming = cells[i].clone();
            for k in 0..i {
                let hit = fhe.encrypted_eq(&j, &indices[k])?;
                let previous = cells[k].clone();
                cells[k] = fhe.select(&hit, &cells[i], &previous)?;
                incoming = fhe.select(&hit, &previous, &incoming)?;
            }
            cells[i] = incoming;
        }

        log::debug!("board generated with {MINE_COUNT} encrypted mines");
        Ok(Self { cells })
    }

    pub fn cell(&self, coord: Coord) -> Option<&C> {
        self.cells.get(coord.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &C)> + '_ {
        Coord::all().zip(self.cells.iter())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFhe;
    use crate::CapabilityError;
    use std::collections::HashSet;

    #[test]
    fn test_board_has_exactly_ten_mines() {
        for seed in 0..100 {
            let mut fhe = MockFhe::seeded(seed);
            let board = EncryptedBoard::generate(&mut fhe).unwrap();
            assert_eq!(board.len(), 64);

            let layout = fhe.layout(&board);
            assert_eq!(layout.mines().count(), 10);
            assert_eq!(layout.safe_cells().count(), 54);
        }
    }

    #[test]
    fn test_placement_depends_on_encrypted_draws() {
        let layouts: HashSet<u64> = (0..20)
            .map(|seed| {
                let mut fhe = MockFhe::seeded(seed);
                let board = EncryptedBoard::generate(&mut fhe).unwrap();
                fhe.layout(&board).mines
            })
            .collect();
        assert!(layouts.len() > 1);
    }

    #[test]
    fn test_every_cell_can_hold_a_mine() {
        let mut seen = 0u64;
        for seed in 0..300 {
            let mut fhe = MockFhe::seeded(seed);
            let board = EncryptedBoard::generate(&mut fhe).unwrap();
            seen |= fhe.layout(&board).mines;
        }
        assert_eq!(seen, u64::MAX);
    }

    #[test]
    fn test_draws_one_encrypted_index_per_mine() {
        let mut fhe = MockFhe::new();
        EncryptedBoard::generate(&mut fhe).unwrap();
        assert_eq!(fhe.draws, (55..=64).collect::<Vec<u8>>());
        assert!(fhe.requests.is_empty());
    }

    #[test]
    fn test_cells_are_distinct_ciphertexts() {
        let mut fhe = MockFhe::new();
        let board = EncryptedBoard::generate(&mut fhe).unwrap();

        let handles: HashSet<u64> = board.iter().map(|(_, &cell)| cell).collect();
        assert_eq!(handles.len(), 64);
        for (coord, cell) in board.iter() {
            assert_eq!(board.cell(coord), Some(cell));
        }
    }

    #[test]
    fn test_generate_is_atomic_on_capability_failure() {
        let mut fhe = MockFhe::failing_after(200);
        let err = EncryptedBoard::<u64>::generate(&mut fhe).unwrap_err();
        assert_eq!(
            err,
            GameError::Capability(CapabilityError::new("coprocessor unavailable"))
        );
    }
}
