//! Caption placement: wrapped lines anchored to an edge of the surface
//!
//! A caption takes its font size from the surface height and its line
//! budget from the surface width, so the same options look the same on any
//! image size. Lines are single-spaced; the block hugs the top edge, the
//! bottom edge, or sits centered, always `margin` pixels clear of the edge.

use serde::{Deserialize, Serialize};

use crate::{
    error::{MemecapError, Result},
    linebreak::{Line, LineBreaker},
    measure::TextMeasurer,
    traits::Surface,
    Anchor, Color, FontFamily, FontSpec, LineJoin, TextAlign, TextStyle,
};

/// Everything that controls how one caption looks
///
/// Missing fields in a deserialized table take their defaults, so
/// `font_size_percent = 12` alone is a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionOptions {
    pub font_family: FontFamily,
    /// Font size as a percentage of the surface height
    pub font_size_percent: f32,
    pub margin: f32,
    pub stroke_width: f32,
    pub line_join: LineJoin,
    pub text_align: TextAlign,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub anchor: Anchor,
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            font_family: FontFamily::impact(),
            font_size_percent: 10.0,
            margin: 30.0,
            stroke_width: 5.0,
            line_join: LineJoin::Bevel,
            text_align: TextAlign::Center,
            fill_color: Color::white(),
            stroke_color: Color::black(),
            anchor: Anchor::Bottom,
        }
    }
}

impl CaptionOptions {
    /// Defaults for the caption along the top edge
    pub fn top() -> Self {
        Self {
            anchor: Anchor::Top,
            ..Self::default()
        }
    }

    /// Defaults for the caption along the bottom edge
    pub fn bottom() -> Self {
        Self::default()
    }

    /// Apply `overrides` field by field
    pub fn with_overrides(mut self, overrides: &CaptionOverrides) -> Self {
        overrides.apply(&mut self);
        self
    }

    /// Reject sizes the layout math cannot use
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("font_size_percent", self.font_size_percent),
            ("margin", self.margin),
            ("stroke_width", self.stroke_width),
        ];
        for (name, value) in checks {
            if !value.is_finite() {
                return Err(MemecapError::InvalidArgument(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        if self.font_size_percent < 0.0 {
            return Err(MemecapError::InvalidArgument(format!(
                "font_size_percent must not be negative, got {}",
                self.font_size_percent
            )));
        }
        if self.stroke_width < 0.0 {
            return Err(MemecapError::InvalidArgument(format!(
                "stroke_width must not be negative, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    pub fn font_size_px(&self, surface_height: u32) -> f32 {
        self.font_size_percent / 100.0 * surface_height as f32
    }

    pub fn width_budget(&self, surface_width: u32) -> f32 {
        surface_width as f32 - 2.0 * self.margin
    }

    /// Where the draw x coordinate lands for this alignment
    pub fn horizontal_position(&self, surface_width: u32) -> f32 {
        match self.text_align {
            TextAlign::Left => self.margin,
            TextAlign::Center => surface_width as f32 / 2.0,
            TextAlign::Right => surface_width as f32 - self.margin,
        }
    }

    /// The drawing-context style for text at `size_px`
    pub fn style(&self, size_px: f32) -> TextStyle {
        TextStyle {
            font: FontSpec::new(self.font_family.clone(), size_px),
            stroke_width: self.stroke_width,
            stroke_color: self.stroke_color,
            line_join: self.line_join,
            fill_color: self.fill_color,
            text_align: self.text_align,
            text_baseline: self.anchor.into(),
        }
    }
}

/// A partial [`CaptionOptions`]: only the fields that are set replace the base
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionOverrides {
    pub font_family: Option<FontFamily>,
    pub font_size_percent: Option<f32>,
    pub margin: Option<f32>,
    pub stroke_width: Option<f32>,
    pub line_join: Option<LineJoin>,
    pub text_align: Option<TextAlign>,
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub anchor: Option<Anchor>,
}

impl CaptionOverrides {
    pub fn apply(&self, options: &mut CaptionOptions) {
        if let Some(family) = &self.font_family {
            options.font_family = family.clone();
        }
        if let Some(percent) = self.font_size_percent {
            options.font_size_percent = percent;
        }
        if let Some(margin) = self.margin {
            options.margin = margin;
        }
        if let Some(width) = self.stroke_width {
            options.stroke_width = width;
        }
        if let Some(join) = self.line_join {
            options.line_join = join;
        }
        if let Some(align) = self.text_align {
            options.text_align = align;
        }
        if let Some(color) = self.fill_color {
            options.fill_color = color;
        }
        if let Some(color) = self.stroke_color {
            options.stroke_color = color;
        }
        if let Some(anchor) = self.anchor {
            options.anchor = anchor;
        }
    }

    /// Layer `other` on top, later values winning
    pub fn merge(mut self, other: &CaptionOverrides) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field.clone();
                })*
            };
        }
        take!(
            font_family,
            font_size_percent,
            margin,
            stroke_width,
            line_join,
            text_align,
            fill_color,
            stroke_color,
            anchor
        );
        self
    }
}

/// A line with the y coordinate it is drawn at
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: Line,
    pub y: f32,
}

/// A fully laid-out caption, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBlock {
    pub text: String,
    pub font: FontSpec,
    pub width_budget: f32,
    pub anchor: Anchor,
    pub margin: f32,
    /// Shared x coordinate of every line
    pub x: f32,
    pub style: TextStyle,
    pub lines: Vec<PlacedLine>,
}

impl CaptionBlock {
    /// Set the style, then outline and fill each line in order
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        surface.set_style(self.style.clone());
        for placed in &self.lines {
            let text = placed.line.text();
            surface.stroke_text(&text, self.x, placed.y)?;
            surface.fill_text(&text, self.x, placed.y)?;
        }
        Ok(())
    }

    pub fn line_height(&self) -> f32 {
        self.font.size_px
    }
}

/// Baseline y of line `index` out of `count` for the given anchor
///
/// The baseline matches the anchor, so a top-anchored line hangs from its y
/// and a bottom-anchored line sits on it.
pub fn vertical_position(
    anchor: Anchor,
    index: usize,
    count: usize,
    line_height: f32,
    margin: f32,
    surface_height: f32,
) -> f32 {
    let i = index as f32;
    let n = count as f32;
    match anchor {
        Anchor::Top => margin + i * line_height,
        Anchor::Bottom => surface_height - margin - (n - i - 1.0) * line_height,
        Anchor::Middle => (surface_height - n * line_height) / 2.0 + i * line_height + line_height / 2.0,
    }
}

/// Caption text with its options
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub options: CaptionOptions,
}

impl Caption {
    pub fn new(text: impl Into<String>, options: CaptionOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    /// Break and place the lines for a `width` x `height` surface
    pub fn block_for(
        &self,
        width: u32,
        height: u32,
        measurer: &TextMeasurer<'_>,
    ) -> Result<CaptionBlock> {
        self.options.validate()?;

        let size_px = self.options.font_size_px(height);
        let width_budget = self.options.width_budget(width);
        let breaker = LineBreaker::new(*measurer);
        let lines = breaker.break_into_lines(
            &self.text,
            width_budget,
            &self.options.font_family,
            size_px,
        )?;

        let count = lines.len();
        let placed = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| PlacedLine {
                y: vertical_position(
                    self.options.anchor,
                    index,
                    count,
                    size_px,
                    self.options.margin,
                    height as f32,
                ),
                line,
            })
            .collect();

        Ok(CaptionBlock {
            text: self.text.clone(),
            font: FontSpec::new(self.options.font_family.clone(), size_px),
            width_budget,
            anchor: self.options.anchor,
            margin: self.options.margin,
            x: self.options.horizontal_position(width),
            style: self.options.style(size_px),
            lines: placed,
        })
    }

    /// Lay out against the surface's size and draw
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        measurer: &TextMeasurer<'_>,
    ) -> Result<CaptionBlock> {
        let block = self.block_for(surface.width(), surface.height(), measurer)?;
        block.render(surface)?;
        log::debug!(
            "Drew {:?} caption in {} lines on {} ({}x{})",
            block.anchor,
            block.lines.len(),
            surface.name(),
            surface.width(),
            surface.height()
        );
        Ok(block)
    }
}
