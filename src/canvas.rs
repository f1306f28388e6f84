use crate::config::Rgba;

/// Immediate-mode drawing over an RGBA8 frame buffer, in device pixels.
///
/// Everything is clipped to the buffer. Colors are composited source-over.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// # Panics
    /// If `frame` is not exactly `width * height * 4` bytes.
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        assert_eq!(
            frame.len(),
            width as usize * height as usize * 4,
            "frame size does not match {}x{}",
            width,
            height
        );
        Self { frame, width, height }
    }

    /// Overwrites every pixel with `color`, alpha included.
    pub fn clear(&mut self, color: Rgba) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color.0);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgba) {
        let x0 = x.clamp(0, self.width as i64) as u32;
        let y0 = y.clamp(0, self.height as i64) as u32;
        let x1 = (x + w).clamp(0, self.width as i64) as u32;
        let y1 = (y + h).clamp(0, self.height as i64) as u32;

        for py in y0..y1 {
            let row = (py * self.width) as usize * 4;
            for px in x0..x1 {
                let index = row + px as usize * 4;
                color.blend_over(&mut self.frame[index..index + 4]);
            }
        }
    }

    /// Strokes full-length vertical lines centred on `xs` and horizontal lines
    /// centred on `ys` as a single path: a pixel covered by several lines is
    /// composited once.
    pub fn stroke_grid_lines(&mut self, xs: &[f32], ys: &[f32], line_width: f32, color: Rgba) {
        let columns = coverage(xs, line_width, self.width);
        let rows = coverage(ys, line_width, self.height);

        for (py, &row_covered) in rows.iter().enumerate() {
            let row = py * self.width as usize * 4;
            for (px, &column_covered) in columns.iter().enumerate() {
                if row_covered || column_covered {
                    let index = row + px * 4;
                    color.blend_over(&mut self.frame[index..index + 4]);
                }
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let index = ((y * self.width + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[index..index + 4]);
        out
    }
}

/// Device pixels covered along one axis by lines of `line_width` centred at `centers`.
fn coverage(centers: &[f32], line_width: f32, extent: u32) -> Vec<bool> {
    let mut covered = vec![false; extent as usize];
    let half = line_width / 2.0;
    for &center in centers {
        let start = (center - half).floor().max(0.0) as usize;
        let end = ((center + half).ceil().max(0.0) as usize).min(extent as usize);
        for slot in covered.iter_mut().take(end).skip(start) {
            *slot = true;
        }
    }
    covered
}

/// Nearest-neighbour stretch of an RGBA `src` onto the whole of `dst`.
///
/// # Panics
/// If either slice does not match its dimensions.
pub fn stretch_nearest(src: &[u8], src_width: u32, src_height: u32, dst: &mut [u8], dst_width: u32, dst_height: u32) {
    assert_eq!(src.len(), src_width as usize * src_height as usize * 4);
    assert_eq!(dst.len(), dst_width as usize * dst_height as usize * 4);

    if (src_width, src_height) == (dst_width, dst_height) {
        dst.copy_from_slice(src);
        return;
    }

    let src_width = src_width as usize;
    let src_height = src_height as usize;
    let dst_width = dst_width as usize;
    let dst_height = dst_height as usize;
    let columns: Vec<usize> = (0..dst_width).map(|x| x * src_width / dst_width).collect();

    for (y, row) in dst.chunks_exact_mut(dst_width * 4).enumerate() {
        let src_row = y * src_height / dst_height * src_width * 4;
        for (pixel, &sx) in row.chunks_exact_mut(4).zip(columns.iter()) {
            let index = src_row + sx * 4;
            pixel.copy_from_slice(&src[index..index + 4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    #[test]
    fn test_clear_overwrites_alpha() {
        let mut frame = vec![9u8; 3 * 2 * 4];
        let mut canvas = Canvas::new(&mut frame, 3, 2);
        canvas.clear(Rgba::new(1, 2, 3, 0));
        assert!(frame.chunks_exact(4).all(|px| px == [1, 2, 3, 0]));
    }

    #[test]
    fn test_fill_rect_clips_to_frame() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        let mut canvas = Canvas::new(&mut frame, 4, 4);
        canvas.clear(WHITE);
        canvas.fill_rect(2, -1, 10, 2, RED);

        for y in 0..4 {
            for x in 0..4 {
                let expected = if x >= 2 && y == 0 { RED.0 } else { WHITE.0 };
                assert_eq!(canvas.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_empty_rect_draws_nothing() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        let mut canvas = Canvas::new(&mut frame, 4, 4);
        canvas.clear(WHITE);
        canvas.fill_rect(1, 1, 0, 3, RED);
        canvas.fill_rect(1, 1, -2, 3, RED);
        assert!(frame.chunks_exact(4).all(|px| px == WHITE.0));
    }

    #[test]
    fn test_stretch_covers_fractional_scale_window() {
        // 1920x1080 at scale 1.25 with a floored ratio of 1
        let (src_width, src_height) = (1536, 864);
        let src: Vec<u8> = RED.0.iter().copied().cycle().take(src_width * src_height * 4).collect();
        let mut dst = vec![0u8; 1920 * 1080 * 4];
        stretch_nearest(&src, src_width as u32, src_height as u32, &mut dst, 1920, 1080);
        assert!(dst.chunks_exact(4).all(|px| px == RED.0));
    }

    #[test]
    fn test_stretch_maps_nearest_source_pixel() {
        // 2x1 source: left white, right red
        let src = [WHITE.0, RED.0].concat();
        let mut dst = vec![0u8; 5 * 2 * 4];
        stretch_nearest(&src, 2, 1, &mut dst, 5, 2);
        let row: Vec<_> = dst.chunks_exact(4).take(5).map(|px| px[0..4].to_vec()).collect();
        assert_eq!(row[0], WHITE.0);
        assert_eq!(row[2], WHITE.0);
        assert_eq!(row[3], RED.0);
        assert_eq!(row[4], RED.0);
        assert_eq!(&dst[20..40], &dst[0..20]);
    }

    #[test]
    fn test_stretch_same_size_copies() {
        let src = [RED.0, WHITE.0, WHITE.0, RED.0].concat();
        let mut dst = vec![0u8; 16];
        stretch_nearest(&src, 2, 2, &mut dst, 2, 2);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_half_pixel_line_is_crisp() {
        // Width 1 centred at 2.5 covers exactly pixel 2
        assert_eq!(coverage(&[2.5], 1.0, 5), vec![false, false, true, false, false]);
        // Width 2 centred at 3.0 covers pixels 2 and 3
        assert_eq!(coverage(&[3.0], 2.0, 5), vec![false, false, true, true, false]);
        // Off-surface lines are clipped
        assert_eq!(coverage(&[5.5, -3.0], 1.0, 5), vec![false; 5]);
    }

    #[test]
    fn test_grid_crossings_blend_once() {
        let mut frame = vec![0u8; 5 * 5 * 4];
        let mut canvas = Canvas::new(&mut frame, 5, 5);
        canvas.clear(WHITE);
        let translucent = Rgba::new(0, 0, 0, 51);
        canvas.stroke_grid_lines(&[1.5], &[3.5], 1.0, translucent);

        assert_eq!(canvas.pixel(1, 3), [204, 204, 204, 255]);
        assert_eq!(canvas.pixel(1, 0), [204, 204, 204, 255]);
        assert_eq!(canvas.pixel(4, 3), [204, 204, 204, 255]);
        assert_eq!(canvas.pixel(0, 0), WHITE.0);
    }
}
