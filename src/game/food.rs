use rand::Rng;

use super::state::Cell;

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Place food on a random free cell of a `grid_size` × `grid_size` grid
    ///
    /// Rejection-samples uniformly over the whole grid until `is_occupied`
    /// returns false. The caller must leave at least one cell free, otherwise
    /// this never returns.
    pub fn spawn<R, F>(grid_size: i32, is_occupied: F, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        F: Fn(Cell) -> bool,
    {
        loop {
            let cell = Cell::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
            if !is_occupied(cell) {
                return Self::new(cell);
            }
        }
    }

    /// Move the food to a new random free cell
    pub fn respawn<R, F>(&mut self, grid_size: i32, is_occupied: F, rng: &mut R)
    where
        R: Rng + ?Sized,
        F: Fn(Cell) -> bool,
    {
        *self = Self::spawn(grid_size, is_occupied, rng);
    }

    pub fn position(&self) -> Cell {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_spawn_stays_on_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let food = Food::spawn(10, |_| false, &mut rng);
            assert!(food.position().is_within(10));
        }
    }

    #[test]
    fn test_spawn_avoids_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let occupied: HashSet<Cell> = (0..5)
            .flat_map(|x| (0..5).map(move |y| Cell::new(x, y)))
            .filter(|cell| *cell != Cell::new(3, 2))
            .collect();

        for _ in 0..50 {
            let food = Food::spawn(5, |cell| occupied.contains(&cell), &mut rng);
            assert_eq!(food.position(), Cell::new(3, 2));
        }
    }

    #[test]
    fn test_respawn_moves_food() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut food = Food::new(Cell::new(0, 0));
        food.respawn(4, |cell| cell == Cell::new(0, 0), &mut rng);
        assert_ne!(food.position(), Cell::new(0, 0));
    }
}
