//! Skia Surface - captions rasterized with tiny-skia
//!
//! Text is drawn the way a browser canvas draws it: every glyph outline is
//! pulled from the font with skrifa, traced into one kurbo path for the
//! whole string, handed to tiny-skia, and then stroked or filled with the
//! current style. No shaping happens; glyphs sit side by side at their
//! nominal advances, which is exactly what the width probe measured.

use std::sync::Arc;

use kurbo::{BezPath, PathEl};
use skrifa::{
    instance::{LocationRef, Size},
    outline::DrawSettings,
    GlyphId, MetadataProvider,
};
use tiny_skia::{
    FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    Transform,
};

use memecap_core::{
    error::{FontLoadError, MemecapError, RenderError, Result},
    traits::{Surface, WidthProbe},
    types::{BitmapData, BitmapFormat},
    Color, FontFamily, LineJoin, TextAlign, TextBaseline, TextStyle,
};
use memecap_fontdb::{Font, FontDatabase};

/// A raster canvas with a text style, backed by a tiny-skia pixmap
pub struct SkiaSurface {
    pixmap: Pixmap,
    fonts: Arc<FontDatabase>,
    style: TextStyle,
}

impl SkiaSurface {
    /// A transparent `width` x `height` canvas drawing text from `fonts`
    pub fn new(width: u32, height: u32, fonts: Arc<FontDatabase>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed)?;
        log::debug!("Skia: created {}x{} surface", width, height);

        Ok(Self {
            pixmap,
            fonts,
            style: TextStyle::default(),
        })
    }

    pub fn fonts(&self) -> &Arc<FontDatabase> {
        &self.fonts
    }

    /// Copy the pixels out as straight-alpha RGBA
    pub fn snapshot(&self) -> BitmapData {
        let data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        BitmapData::rgba(self.pixmap.width(), self.pixmap.height(), data)
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint
    }

    fn current_font(&self) -> Result<Arc<Font>> {
        self.fonts.resolve(&self.style.font.family)
    }

    /// Outline of `text` positioned for the current alignment and baseline
    ///
    /// `None` when the text has no visible contours (empty or all spaces).
    fn text_path(&self, text: &str, x: f32, y: f32) -> Result<Option<tiny_skia::Path>> {
        if text.is_empty() {
            return Ok(None);
        }
        let font = self.current_font()?;
        let font_ref = skrifa::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| FontLoadError::InvalidData)?;

        let size_px = self.style.font.size_px;
        let size = Size::new(size_px);
        let charmap = font_ref.charmap();
        let metrics = font_ref.glyph_metrics(size, LocationRef::default());

        let mut glyphs = Vec::with_capacity(text.len());
        let mut advance = 0.0_f32;
        for ch in text.chars() {
            let glyph_id = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
            glyphs.push((glyph_id, advance));
            advance += metrics.advance_width(glyph_id).unwrap_or(0.0);
        }

        let origin_x = match self.style.text_align {
            TextAlign::Left => x,
            TextAlign::Center => x - advance / 2.0,
            TextAlign::Right => x - advance,
        };
        let ascent = font.ascent_ratio() * size_px;
        let descent = font.descent_ratio() * size_px;
        let baseline = match self.style.text_baseline {
            TextBaseline::Top => y + ascent,
            TextBaseline::Middle => y + (ascent + descent) / 2.0,
            TextBaseline::Alphabetic => y,
            TextBaseline::Bottom => y + descent,
        };

        let outlines = font_ref.outline_glyphs();
        let mut path = BezPath::new();
        for (glyph_id, offset) in glyphs {
            let Some(glyph) = outlines.get(glyph_id) else {
                continue;
            };
            let mut pen = PathPen {
                path: &mut path,
                dx: (origin_x + offset) as f64,
                dy: baseline as f64,
            };
            let settings = DrawSettings::unhinted(size, LocationRef::default());
            if glyph.draw(settings, &mut pen).is_err() {
                log::warn!("Skia: skipped glyph {} in {:?}", glyph_id.to_u32(), text);
            }
        }

        if path.elements().is_empty() {
            return Ok(None);
        }
        bez_to_skia(&path).map(Some)
    }
}

impl Surface for SkiaSurface {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn draw_image(
        &mut self,
        image: &BitmapData,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        if image.width == 0 || image.height == 0 || width <= 0.0 || height <= 0.0 {
            return Ok(());
        }
        let source = premultiplied_pixmap(image)?;
        let transform = Transform::from_row(
            width / image.width as f32,
            0.0,
            0.0,
            height / image.height as f32,
            x,
            y,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
        Ok(())
    }

    fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    fn style(&self) -> &TextStyle {
        &self.style
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        if self.style.stroke_width <= 0.0 {
            return Ok(());
        }
        let Some(path) = self.text_path(text, x, y)? else {
            return Ok(());
        };

        let stroke = Stroke {
            width: self.style.stroke_width,
            line_join: match self.style.line_join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Stroke::default()
        };
        let paint = Self::paint(self.style.stroke_color);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        let Some(path) = self.text_path(text, x, y)? else {
            return Ok(());
        };
        let paint = Self::paint(self.style.fill_color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        Ok(())
    }

    fn measure_text(&self, text: &str) -> Result<f32> {
        let font = self.current_font()?;
        let font_ref = skrifa::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| FontLoadError::InvalidData)?;
        let charmap = font_ref.charmap();
        let metrics = font_ref.glyph_metrics(Size::new(self.style.font.size_px), LocationRef::default());

        Ok(text
            .chars()
            .map(|ch| {
                let glyph_id = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
                metrics.advance_width(glyph_id).unwrap_or(0.0)
            })
            .sum())
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(MemecapError::InvalidArgument(format!(
                "circle radius must be a non-negative number, got {}",
                radius
            )));
        }
        let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
            return Ok(());
        };
        let paint = Self::paint(self.style.fill_color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        // Negative sizes extend left or up from the corner
        let left = x.min(x + width);
        let top = y.min(y + height);
        let Some(rect) = Rect::from_xywh(left, top, width.abs(), height.abs()) else {
            return Ok(());
        };
        let paint = Self::paint(self.style.fill_color);
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
        Ok(())
    }
}

/// Character widths read straight from font files
pub struct FontProbe {
    fonts: Arc<FontDatabase>,
}

impl FontProbe {
    pub fn new(fonts: Arc<FontDatabase>) -> Self {
        Self { fonts }
    }
}

impl WidthProbe for FontProbe {
    fn name(&self) -> &'static str {
        "font"
    }

    fn probe(&self, ch: char, family: &FontFamily) -> Result<f32> {
        self.fonts
            .resolve(family)?
            .width_ratio(ch)
            .ok_or_else(|| MemecapError::MissingMetric {
                ch,
                family: family.to_string(),
            })
    }
}

/// Bridge between skrifa's outline commands and a kurbo path
///
/// Font units are y-up; the pen flips them onto the y-down canvas and moves
/// the glyph origin to (`dx`, `dy`).
struct PathPen<'a> {
    path: &'a mut BezPath,
    dx: f64,
    dy: f64,
}

impl PathPen<'_> {
    fn point(&self, x: f32, y: f32) -> (f64, f64) {
        (self.dx + x as f64, self.dy - y as f64)
    }
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let c = self.point(cx0, cy0);
        let p = self.point(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let c0 = self.point(cx0, cy0);
        let c1 = self.point(cx1, cy1);
        let p = self.point(x, y);
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Translate kurbo's path format into tiny-skia's
fn bez_to_skia(path: &BezPath) -> Result<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    Ok(builder.finish().ok_or(RenderError::PathBuildingFailed)?)
}

/// tiny-skia wants premultiplied RGBA; expand other layouts first
fn premultiplied_pixmap(image: &BitmapData) -> Result<Pixmap> {
    if image.data.len() < image.expected_len() {
        return Err(RenderError::BufferSizeMismatch {
            expected: image.expected_len(),
            actual: image.data.len(),
        }
        .into());
    }

    let step = image.format.bytes_per_pixel();
    let mut data = Vec::with_capacity(image.width as usize * image.height as usize * 4);
    for px in image.data[..image.expected_len()].chunks_exact(step) {
        let (r, g, b, a) = match image.format {
            BitmapFormat::Rgba8 => (px[0], px[1], px[2], px[3]),
            BitmapFormat::Rgb8 => (px[0], px[1], px[2], 255),
            BitmapFormat::Gray8 => (px[0], px[0], px[0], 255),
        };
        let c = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let size = IntSize::from_wh(image.width, image.height).ok_or(RenderError::InvalidDimensions {
        width: image.width,
        height: image.height,
    })?;
    Ok(Pixmap::from_vec(data, size).ok_or(RenderError::PixmapCreationFailed)?)
}
