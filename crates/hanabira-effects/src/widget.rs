//! Terminal presentation of effect canvases.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::color::Rgba;
use crate::surface::Canvas;

/// Pixels fainter than this are treated as empty.
const INK_THRESHOLD: f32 = 0.02;

/// Composites canvases over whatever is already in the buffer.
///
/// Each terminal cell shows two raster rows using half blocks. Cells whose
/// pixels are all empty are left alone, so the page below stays visible.
#[derive(Debug, Clone)]
pub struct Overlay<'a> {
    layers: Vec<&'a Canvas>,
    backdrop: Rgba,
}

impl<'a> Overlay<'a> {
    /// Stack `layers` bottom to top. `backdrop` is the color translucent
    /// pixels are flattened against.
    pub fn new(layers: impl IntoIterator<Item = &'a Canvas>, backdrop: Rgba) -> Self {
        Self {
            layers: layers.into_iter().collect(),
            backdrop,
        }
    }

    fn composite(&self, col: usize, row: usize) -> Rgba {
        self.layers
            .iter()
            .fold(Rgba::TRANSPARENT, |acc, canvas| canvas.pixel(col, row).over(acc))
    }
}

impl Widget for Overlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.layers.is_empty() {
            return;
        }
        for y in 0..area.height {
            for x in 0..area.width {
                let col = x as usize;
                let top = self.composite(col, y as usize * 2);
                let bottom = self.composite(col, y as usize * 2 + 1);
                let top_ink = top.a > INK_THRESHOLD;
                let bottom_ink = bottom.a > INK_THRESHOLD;
                if !top_ink && !bottom_ink {
                    continue;
                }

                let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) else {
                    continue;
                };
                match (top_ink, bottom_ink) {
                    (true, true) => {
                        cell.set_symbol("▀")
                            .set_fg(top.flatten(self.backdrop))
                            .set_bg(bottom.flatten(self.backdrop));
                    }
                    (true, false) => {
                        cell.set_symbol("▀").set_fg(top.flatten(self.backdrop));
                    }
                    _ => {
                        cell.set_symbol("▄").set_fg(bottom.flatten(self.backdrop));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;
    use crate::color::WHITE;
    use crate::surface::DrawingSurface;

    fn canvas_with_dot(col: f32, row: f32) -> Canvas {
        let mut canvas = Canvas::new(1.0);
        canvas.resize(4.0, 4.0);
        canvas.set_fill_color(WHITE);
        canvas.fill_disc(col + 0.5, row + 0.5, 0.5);
        canvas.present();
        canvas
    }

    #[test]
    fn test_only_inked_cells_change() {
        let canvas = canvas_with_dot(1.0, 0.0);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::filled(area, ratatui::buffer::Cell::new("x"));
        Overlay::new([&canvas], Rgba::rgb(0, 0, 0)).render(area, &mut buf);

        assert_eq!(buf[(1, 0)].symbol(), "▀");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(255, 255, 255));
        assert_eq!(buf[(0, 0)].symbol(), "x");
        assert_eq!(buf[(3, 1)].symbol(), "x");
    }

    #[test]
    fn test_bottom_half_uses_lower_block() {
        let canvas = canvas_with_dot(2.0, 3.0);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        Overlay::new([&canvas], Rgba::rgb(0, 0, 0)).render(area, &mut buf);
        assert_eq!(buf[(2, 1)].symbol(), "▄");
    }

    #[test]
    fn test_layers_stack() {
        let a = canvas_with_dot(0.0, 0.0);
        let b = canvas_with_dot(0.0, 1.0);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        Overlay::new([&a, &b], Rgba::rgb(0, 0, 0)).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "▀");
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_no_layers_no_change() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::filled(area, ratatui::buffer::Cell::new("x"));
        Overlay::new(Vec::<&Canvas>::new(), Rgba::rgb(0, 0, 0)).render(area, &mut buf);
        assert_eq!(buf, Buffer::filled(area, ratatui::buffer::Cell::new("x")));
    }
}
