use std::sync::Arc;

use resvg::{tiny_skia, usvg};
use thiserror::Error;
use tracing::debug;

use crate::badge::VisualBadge;

/// Logical resolution of a badge: CSS pixels, 96 per inch.
pub const LOGICAL_PX_PER_MM: f32 = 96.0 / 25.4;
/// Supersampling factor applied for print.
pub const PRINT_SCALE: f32 = 2.0;

/// Why a single badge could not be turned into pixels.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RasterError(pub String);

/// Opaque 8-bit RGB bitmap, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Raster {
    /// Drop the alpha channel of an RGBA buffer. The buffer is expected to be
    /// fully opaque, so premultiplication does not matter.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        let rgb = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Self { width, height, rgb }
    }
}

/// Pixel dimensions for a badge at `scale` times the logical resolution.
pub fn pixel_size(badge: &VisualBadge, scale: f32) -> (u32, u32) {
    let px = |mm: f32| (mm * LOGICAL_PX_PER_MM * scale).round().max(1.0) as u32;
    (px(badge.width_mm), px(badge.height_mm))
}

/// Turns a badge into a bitmap. The exporter calls this once per candidate,
/// strictly in candidate order.
pub trait Rasterizer {
    fn rasterize(&mut self, badge: &VisualBadge) -> Result<Raster, RasterError>;
}

/// Production rasterizer: SVG through `resvg` onto a white `tiny-skia`
/// pixmap.
pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    scale: f32,
}

impl ResvgRasterizer {
    /// Load system fonts once; every badge reuses the database.
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!(faces = fontdb.len(), "font database loaded");
        Self {
            fontdb: Arc::new(fontdb),
            scale: PRINT_SCALE,
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&mut self, badge: &VisualBadge) -> Result<Raster, RasterError> {
        let svg = badge.to_svg();
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|err| RasterError(format!("SVG parse error: {err}")))?;

        let (width, height) = pixel_size(badge, self.scale);
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| RasterError(format!("pixmap alloc failed ({width}x{height})")))?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(Raster::from_rgba(width, height, pixmap.data()))
    }
}
