use crate::board::Board;
use crate::canvas::Canvas;
use crate::config::Config;

/// Device pixels per cell.
pub fn cell_step(config: &Config, device_pixel_ratio: u32) -> u32 {
    config.cell_size * device_pixel_ratio
}

/// Clears the canvas and strokes every column and row boundary.
pub fn draw_grid(canvas: &mut Canvas, board: &Board, config: &Config, device_pixel_ratio: u32) {
    canvas.clear(config.background);

    let step = cell_step(config, device_pixel_ratio) as f32;
    let dpr = device_pixel_ratio as f32;
    // offset by half a device pixel to land on pixel centres
    let xs: Vec<f32> = (0..=board.columns()).map(|x| x as f32 * step + 0.5 * dpr).collect();
    let ys: Vec<f32> = (0..=board.rows()).map(|y| y as f32 * step + 0.5 * dpr).collect();

    canvas.stroke_grid_lines(&xs, &ys, config.grid_line_width * dpr, config.grid_color);
}

/// Fills every live cell, inset by one device pixel on each side.
pub fn draw_cells(canvas: &mut Canvas, board: &Board, config: &Config, device_pixel_ratio: u32) {
    let step = cell_step(config, device_pixel_ratio) as i64;
    let inset = device_pixel_ratio as i64;

    for (x, y) in board.live_cells() {
        let px = x as i64 * step;
        let py = y as i64 * step;
        canvas.fill_rect(px + inset, py + inset, step - 2 * inset, step - 2 * inset, config.live_color);
    }
}

/// Full repaint: grid pass then cell pass.
pub fn draw(canvas: &mut Canvas, board: &Board, config: &Config, device_pixel_ratio: u32) {
    draw_grid(canvas, board, config, device_pixel_ratio);
    draw_cells(canvas, board, config, device_pixel_ratio);
}
