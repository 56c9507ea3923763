//! JSON Surface - when you need to see what the layout really did
//!
//! Pixels hide the decisions behind them. This surface draws nothing and
//! writes down every command instead, so a caption's line breaks, positions,
//! and styles can be diffed, asserted on, or replayed by another renderer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use memecap_core::{
    error::{MemecapError, RenderError, Result},
    traits::{Surface, WidthProbe},
    types::BitmapData,
    TextStyle,
};

/// Schema version for JSON output format
pub const JSON_SCHEMA_VERSION: &str = "1.0";

/// One call made against the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    DrawImage {
        /// Natural size of the source image
        source_width: u32,
        source_height: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    SetStyle {
        style: TextStyle,
    },
    StrokeText {
        text: String,
        x: f32,
        y: f32,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Complete recording in a diff-friendly format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Schema version for forward compatibility
    pub schema_version: String,
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

/// A surface that keeps a log instead of pixels
pub struct RecordingSurface {
    width: u32,
    height: u32,
    style: TextStyle,
    probe: Option<Arc<dyn WidthProbe>>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            style: TextStyle::default(),
            probe: None,
            commands: Vec::new(),
        }
    }

    /// Answer `measure_text` with per-character widths from `probe`
    pub fn with_probe(mut self, probe: Arc<dyn WidthProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand over the recording, leaving the surface empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn output(&self) -> JsonOutput {
        JsonOutput {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            width: self.width,
            height: self.height,
            commands: self.commands.clone(),
        }
    }

    /// The recording as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.output())
            .map_err(|e| RenderError::BackendError(e.to_string()))?;
        log::debug!("JSON: serialized {} commands", self.commands.len());
        Ok(json)
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn name(&self) -> &'static str {
        "json"
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.record(DrawCommand::Clear);
    }

    fn draw_image(
        &mut self,
        image: &BitmapData,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<()> {
        self.record(DrawCommand::DrawImage {
            source_width: image.width,
            source_height: image.height,
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn set_style(&mut self, style: TextStyle) {
        self.record(DrawCommand::SetStyle {
            style: style.clone(),
        });
        self.style = style;
    }

    fn style(&self) -> &TextStyle {
        &self.style
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        self.record(DrawCommand::StrokeText {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        self.record(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str) -> Result<f32> {
        let probe = self.probe.as_ref().ok_or_else(|| {
            MemecapError::Other("recording surface has no width probe attached".to_string())
        })?;
        let family = &self.style.font.family;
        text.chars().try_fold(0.0, |total, ch| {
            Ok(total + probe.probe(ch, family)? * self.style.font.size_px)
        })
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        self.record(DrawCommand::FillCircle { cx, cy, radius });
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        self.record(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }
}
