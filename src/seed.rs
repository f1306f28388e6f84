use crate::board::Board;

/// Glider heading down-right, period 4:
///
/// ```text
/// . # .
/// . . #
/// # # #
/// ```
pub const GLIDER: [(i64, i64); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

/// Anchor row of the glider's top-left corner.
pub const GLIDER_TOP: i64 = 2;

pub fn glider_anchor(board: &Board) -> (i64, i64) {
    (board.columns() as i64 / 2 - 1, GLIDER_TOP)
}

/// Clears `board` and places a glider near the top centre, resetting the generation.
pub fn seed_glider_top_center(board: &mut Board) {
    board.clear();
    let (cx, cy) = glider_anchor(board);
    for &(dx, dy) in GLIDER.iter() {
        board.set(cx + dx, cy + dy, true);
    }
    board.reset_generation();
}
