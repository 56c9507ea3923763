//! A toy painter for smoke-testing surfaces
//!
//! Fills circles and rectangles in white. Useful to check a backend's
//! geometry without involving fonts.

use crate::{error::Result, traits::Surface, Color, TextStyle};

/// A filled circle; defaults to radius 1 at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            cx: 0.0,
            cy: 0.0,
            radius: 1.0,
        }
    }
}

/// A filled axis-aligned rectangle; defaults to 2 x 1 at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 1.0,
        }
    }
}

/// A filled square; defaults to side 1 at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Default for Square {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
        }
    }
}

impl From<Square> for Rectangle {
    fn from(square: Square) -> Self {
        Self {
            x: square.x,
            y: square.y,
            width: square.width,
            height: square.width,
        }
    }
}

/// Paints white shapes on a borrowed surface
///
/// ```ignore
/// Artist::new(&mut surface)
///     .circle(100.0, 100.0, 60.0)?
///     .square(400.0, 200.0, 180.0)?;
/// ```
pub struct Artist<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: Surface + ?Sized> Artist<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        let style = TextStyle {
            fill_color: Color::white(),
            ..surface.style().clone()
        };
        surface.set_style(style);
        Self { surface }
    }

    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32) -> Result<&mut Self> {
        self.draw_circle(Circle { cx, cy, radius })
    }

    pub fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<&mut Self> {
        self.draw_rectangle(Rectangle {
            x,
            y,
            width,
            height,
        })
    }

    pub fn square(&mut self, x: f32, y: f32, width: f32) -> Result<&mut Self> {
        self.draw_rectangle(Square { x, y, width }.into())
    }

    pub fn draw_circle(&mut self, circle: Circle) -> Result<&mut Self> {
        self.surface
            .fill_circle(circle.cx, circle.cy, circle.radius)?;
        Ok(self)
    }

    pub fn draw_rectangle(&mut self, rect: Rectangle) -> Result<&mut Self> {
        self.surface
            .fill_rect(rect.x, rect.y, rect.width, rect.height)?;
        Ok(self)
    }

    /// Give the surface back
    pub fn into_inner(self) -> &'s mut S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_defaults() {
        assert_eq!(Circle::default().radius, 1.0);
        assert_eq!(Rectangle::default().width, 2.0);
        assert_eq!(Rectangle::default().height, 1.0);
        assert_eq!(Rectangle::from(Square::default()).height, 1.0);
    }

    #[test]
    fn test_square_is_equal_sided_rectangle() {
        let rect = Rectangle::from(Square {
            x: 400.0,
            y: 200.0,
            width: 180.0,
        });
        assert_eq!(rect.width, rect.height);
        assert_eq!(rect.x, 400.0);
    }
}
