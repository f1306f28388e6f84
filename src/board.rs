/// Relative positions of the 8 Moore neighbours.
#[rustfmt::skip]
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Game of Life transition for a single cell.
pub fn next_state(alive: bool, live_neighbours: u8) -> bool {
    matches!((alive, live_neighbours), (true, 2) | (true, 3) | (false, 3))
}

/// Toroidal Game of Life board. Every edge wraps to the opposite edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<bool>, // row-major, columns * rows
    generation: u64,
}

impl Board {
    /// Creates an all-dead board.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(columns: usize, rows: usize) -> Self {
        assert!(columns > 0 && rows > 0, "board dimensions must be non-zero");
        Self {
            columns,
            rows,
            cells: vec![false; columns * rows],
            generation: 0,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn reset_generation(&mut self) {
        self.generation = 0;
    }

    fn index(&self, x: i64, y: i64) -> usize {
        let col = x.rem_euclid(self.columns as i64) as usize;
        let row = y.rem_euclid(self.rows as i64) as usize;
        row * self.columns + col
    }

    pub fn get(&self, x: i64, y: i64) -> bool {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = alive;
    }

    /// Kills every cell. The generation counter is left alone.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn live_neighbours(&self, x: i64, y: i64) -> u8 {
        NEIGHBOURS
            .iter()
            .filter(|&&(dx, dy)| self.get(x + dx, y + dy))
            .count() as u8
    }

    /// Advances one generation.
    ///
    /// The next generation is computed into a fresh buffer from the current one
    /// and swapped in at the end, so no cell ever sees an updated neighbour.
    pub fn step(&mut self) {
        let mut next = vec![false; self.cells.len()];
        for y in 0..self.rows {
            for x in 0..self.columns {
                let (xi, yi) = (x as i64, y as i64);
                let alive = self.cells[y * self.columns + x];
                next[y * self.columns + x] = next_state(alive, self.live_neighbours(xi, yi));
            }
        }
        std::mem::swap(&mut self.cells, &mut next);
        self.generation += 1;
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Live cell coordinates in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| (idx % columns, idx / columns))
    }

    /// Rounded mean row of the live cells, `None` on an empty board.
    pub fn live_center_row(&self) -> Option<usize> {
        let (sum, count) = self
            .live_cells()
            .fold((0usize, 0usize), |(sum, count), (_, y)| (sum + y, count + 1));
        if count == 0 {
            return None;
        }
        Some((sum as f64 / count as f64).round() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(columns: usize, rows: usize, live: &[(i64, i64)]) -> Board {
        let mut board = Board::new(columns, rows);
        for &(x, y) in live {
            board.set(x, y, true);
        }
        board
    }

    #[test]
    fn test_transition_rule_all_combinations() {
        for count in 0..=8u8 {
            assert_eq!(next_state(true, count), count == 2 || count == 3, "alive with {}", count);
            assert_eq!(next_state(false, count), count == 3, "dead with {}", count);
        }
    }

    #[test]
    fn test_step_applies_rule_for_every_neighbour_count() {
        // Centre cell at (3, 3) on a 7x7 board, neighbours filled in order.
        for alive in [false, true] {
            for count in 0..=8usize {
                let mut board = Board::new(7, 7);
                board.set(3, 3, alive);
                for &(dx, dy) in NEIGHBOURS.iter().take(count) {
                    board.set(3 + dx, 3 + dy, true);
                }
                assert_eq!(board.live_neighbours(3, 3) as usize, count);
                board.step();
                assert_eq!(
                    board.get(3, 3),
                    next_state(alive, count as u8),
                    "alive={} count={}",
                    alive,
                    count
                );
            }
        }
    }

    #[test]
    fn test_get_wraps_in_both_directions() {
        let board = board_with(7, 5, &[(0, 0), (6, 4), (3, 2)]);
        for y in -12..12i64 {
            for x in -15..15i64 {
                assert_eq!(board.get(x, y), board.get(x + 7, y + 5));
                assert_eq!(board.get(x, y), board.get(x - 14, y - 10));
            }
        }
        assert!(board.get(-1, -1));
        assert!(board.get(7, 5));
    }

    #[test]
    fn test_get_wraps_far_from_origin() {
        let board = board_with(7, 5, &[(0, 0), (6, 4), (3, 2)]);
        let far = [i64::MIN / 2, i64::MAX / 2, -1_000_000_007, 987_654_321_123, i64::MIN + 7, i64::MAX - 7];
        for &x in &far {
            for &y in &far {
                let expected = board.get(x.rem_euclid(7), y.rem_euclid(5));
                assert_eq!(board.get(x, y), expected, "({}, {})", x, y);
                if x < i64::MAX - 7 && y < i64::MAX - 5 {
                    assert_eq!(board.get(x + 7, y + 5), expected, "({}, {}) shifted", x, y);
                }
            }
        }
        assert!(board.get(7_000_000_000_003, 5_000_000_000_002));
        assert!(board.get(-7_000_000_000_001, -5_000_000_000_001));
    }

    #[test]
    fn test_set_wraps() {
        let mut board = Board::new(5, 5);
        board.set(-1, 7, true);
        assert!(board.get(4, 2));
        assert_eq!(board.population(), 1);
    }

    #[test]
    fn test_neighbours_wrap_across_corner() {
        let board = board_with(6, 6, &[(5, 5), (0, 5), (5, 0)]);
        assert_eq!(board.live_neighbours(0, 0), 3);
    }

    #[test]
    fn test_step_reads_previous_generation_only() {
        // Blinker: an in-place update would corrupt the second half of the row.
        let mut board = board_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        board.step();
        let live: Vec<_> = board.live_cells().collect();
        assert_eq!(live, vec![(2, 1), (2, 2), (2, 3)]);
        board.step();
        let live: Vec<_> = board.live_cells().collect();
        assert_eq!(live, vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(board.generation(), 2);
    }

    #[test]
    fn test_block_is_stable_across_edges() {
        let mut board = board_with(5, 5, &[(4, 4), (0, 4), (4, 0), (0, 0)]);
        let before = board.clone();
        board.step();
        assert_eq!(board.live_cells().collect::<Vec<_>>(), before.live_cells().collect::<Vec<_>>());
    }

    #[test]
    fn test_live_center_row() {
        assert_eq!(Board::new(5, 5).live_center_row(), None);
        let board = board_with(8, 8, &[(1, 1), (2, 2), (3, 4)]);
        assert_eq!(board.live_center_row(), Some(2));
    }

    #[test]
    fn test_clear_keeps_dimensions() {
        let mut board = board_with(6, 5, &[(1, 1), (2, 3)]);
        board.clear();
        assert_eq!(board.population(), 0);
        assert_eq!((board.columns(), board.rows()), (6, 5));
    }
}
