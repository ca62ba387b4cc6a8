//! Drawing surfaces.
//!
//! [`DrawingSurface`] is the small 2D-context contract particles draw
//! against. [`Canvas`] implements it as a software RGBA raster whose pixels
//! cover `scale x scale` logical pixels each, which is how a viewport
//! measured in logical pixels maps onto half-block terminal cells.

use hanabira_core::{Effect, Viewport};

use crate::color::Rgba;
use crate::error::EngineError;
use crate::host::SurfaceProvider;

/// A raster target supporting the primitives the particles need.
pub trait DrawingSurface {
    /// Resize the backing raster to `width x height` logical pixels.
    ///
    /// Resizing to the current dimensions must leave the contents untouched.
    fn resize(&mut self, width: f32, height: f32);

    /// Current logical size.
    fn size(&self) -> Viewport;

    /// Clear a rectangle to full transparency.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Clear the whole surface.
    fn clear(&mut self) {
        let size = self.size();
        self.clear_rect(0.0, 0.0, size.width, size.height);
    }

    /// Push the current transform, alpha and fill color.
    fn save(&mut self);

    /// Pop the state pushed by the matching [`DrawingSurface::save`].
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);

    /// Rotate the current transform by `radians`, clockwise on screen.
    fn rotate(&mut self, radians: f32);

    fn set_global_alpha(&mut self, alpha: f32);

    fn set_fill_color(&mut self, color: Rgba);

    /// Fill a disc centered at `(x, y)` in the current coordinate space.
    fn fill_disc(&mut self, x: f32, y: f32, radius: f32);

    /// Publish the frame drawn since the last clear.
    fn present(&mut self) {}

    /// Whether the surface has gone away and can no longer be drawn to.
    fn is_lost(&self) -> bool {
        false
    }
}

/// 2D affine transform `(a, b, c, d, e, f)` as used by canvas contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Map a point from local to device space.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.e += self.a * x + self.c * y;
        self.f += self.b * x + self.d * y;
    }

    fn rotate(&mut self, radians: f32) {
        let (sin, cos) = radians.sin_cos();
        let Transform { a, b, c, d, .. } = *self;
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    /// Uniform scale factor of the transform.
    fn scale(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Transform,
    alpha: f32,
    fill: Rgba,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            alpha: 1.0,
            fill: Rgba::TRANSPARENT,
        }
    }
}

/// Software RGBA raster with a double buffer.
///
/// Drawing goes to the back buffer; [`DrawingSurface::present`] swaps it to
/// the front, which is what [`Canvas::pixel`] and the overlay widget read.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Logical pixels covered by one raster pixel along each axis.
    scale: f32,
    width: f32,
    height: f32,
    cols: usize,
    rows: usize,
    back: Vec<Rgba>,
    front: Vec<Rgba>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl Canvas {
    /// Create an empty canvas where one raster pixel covers `scale` logical pixels.
    pub fn new(scale: f32) -> Self {
        Self {
            scale: scale.max(f32::EPSILON),
            width: 0.0,
            height: 0.0,
            cols: 0,
            rows: 0,
            back: Vec::new(),
            front: Vec::new(),
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// Raster dimensions as `(columns, rows)`.
    pub fn raster_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Logical pixels per raster pixel.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Presented pixel at raster position `(col, row)`.
    pub fn pixel(&self, col: usize, row: usize) -> Rgba {
        if col >= self.cols || row >= self.rows {
            return Rgba::TRANSPARENT;
        }
        self.front[row * self.cols + col]
    }

    /// Pixel of the frame currently being drawn.
    pub fn back_pixel(&self, col: usize, row: usize) -> Rgba {
        if col >= self.cols || row >= self.rows {
            return Rgba::TRANSPARENT;
        }
        self.back[row * self.cols + col]
    }

    /// Current transform.
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Current global alpha.
    pub fn global_alpha(&self) -> f32 {
        self.state.alpha
    }

    /// Depth of the save/restore stack.
    pub fn saved_states(&self) -> usize {
        self.stack.len()
    }

    fn blend(&mut self, col: usize, row: usize, color: Rgba) {
        let idx = row * self.cols + col;
        self.back[idx] = color.over(self.back[idx]);
    }
}

impl DrawingSurface for Canvas {
    fn resize(&mut self, width: f32, height: f32) {
        let width = width.max(0.0);
        let height = height.max(0.0);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cols = (width / self.scale).ceil() as usize;
        self.rows = (height / self.scale).ceil() as usize;
        // Resizing resets the raster and the drawing state, like a canvas element.
        self.back = vec![Rgba::TRANSPARENT; self.cols * self.rows];
        self.front = self.back.clone();
        self.state = DrawState::default();
        self.stack.clear();
    }

    fn size(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let span = |lo: f32, len: f32, max: usize| {
            let start = (lo / self.scale).floor().max(0.0) as usize;
            let end = ((lo + len) / self.scale).ceil().max(0.0) as usize;
            (start.min(max), end.min(max))
        };
        let (c0, c1) = span(x, width, self.cols);
        let (r0, r1) = span(y, height, self.rows);
        if c0 >= c1 || r0 >= r1 {
            return;
        }
        for row in r0..r1 {
            let start = row * self.cols;
            self.back[start + c0..start + c1].fill(Rgba::TRANSPARENT);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.transform.translate(x, y);
    }

    fn rotate(&mut self, radians: f32) {
        self.state.transform.rotate(radians);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    fn fill_disc(&mut self, x: f32, y: f32, radius: f32) {
        if radius <= 0.0 || self.cols == 0 || self.rows == 0 {
            return;
        }
        let (dx, dy) = self.state.transform.apply(x, y);
        let cx = dx / self.scale;
        let cy = dy / self.scale;
        let r = radius * self.state.transform.scale() / self.scale;
        let color = self.state.fill.with_alpha(self.state.alpha);
        if color.a <= 0.0 {
            return;
        }

        let reach = r + 0.5;
        let col_min = (cx - reach).floor().max(0.0) as usize;
        let row_min = (cy - reach).floor().max(0.0) as usize;
        let col_max = ((cx + reach).ceil().max(0.0) as usize).min(self.cols);
        let row_max = ((cy + reach).ceil().max(0.0) as usize).min(self.rows);

        for row in row_min..row_max {
            for col in col_min..col_max {
                let px = col as f32 + 0.5 - cx;
                let py = row as f32 + 0.5 - cy;
                // Approximate pixel coverage from the distance to the disc edge.
                let coverage = (r + 0.5 - (px * px + py * py).sqrt()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(col, row, color.with_alpha(coverage));
                }
            }
        }
    }

    fn present(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.back.copy_from_slice(&self.front);
    }
}

/// Hands out a fresh [`Canvas`] for every effect.
#[derive(Debug, Clone, Copy)]
pub struct CanvasProvider {
    scale: f32,
}

impl CanvasProvider {
    /// Canvases where one raster pixel covers `scale` logical pixels.
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl SurfaceProvider for CanvasProvider {
    type Surface = Canvas;

    fn acquire(&mut self, effect: Effect) -> Result<Canvas, EngineError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(EngineError::SurfaceUnavailable {
                effect,
                reason: format!("invalid raster scale {}", self.scale),
            });
        }
        Ok(Canvas::new(self.scale))
    }
}
