//! Typeface JSON fonts.
//!
//! The format stores one outline string per glyph, in font units, made of
//! `m x y`, `l x y`, `q x y cpx cpy` and `b x y cp1x cp1y cp2x cp2y` commands
//! (curves list their end point first).

use std::collections::HashMap;

use anyhow::{Context, bail};
use cgmath::Vector2;
use serde::Deserialize;

use crate::geometry::{
    path::{PathBuilder, SubPath},
    shape::{Shape, to_shapes},
};

/// Glyph used when a character is missing from the font.
const FALLBACK_GLYPH: char = '?';

#[derive(Clone, Debug, Deserialize)]
pub struct Glyph {
    pub ha: f32,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    glyphs: HashMap<String, Glyph>,
    resolution: f32,
    #[serde(default)]
    bounding_box: FontBounds,
    #[serde(default)]
    underline_thickness: f32,
    #[serde(default)]
    family_name: String,
}

impl Font {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let font: Font = serde_json::from_str(json).context("malformed typeface json")?;
        if !(font.resolution > 0.0) {
            bail!("typeface resolution must be positive, got {}", font.resolution);
        }
        Ok(font)
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(c.encode_utf8(&mut [0; 4]) as &str)
    }

    /// Distance between two baselines at the given size.
    pub fn line_height(&self, size: f32) -> f32 {
        (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * size
            / self.resolution
    }

    /// Outline sub-paths of `text`, laid out left to right from the origin.
    pub fn generate_paths(&self, text: &str, size: f32) -> anyhow::Result<Vec<Vec<SubPath>>> {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut offset = Vector2::new(0.0, 0.0);
        let mut paths = Vec::new();
        for c in text.chars() {
            if c == '\n' {
                offset.x = 0.0;
                offset.y -= line_height;
                continue;
            }
            let glyph = match self.glyph(c) {
                Some(glyph) => glyph,
                None => {
                    log::warn!(
                        "character {:?} is missing from font {:?}, using {:?}",
                        c,
                        self.family_name,
                        FALLBACK_GLYPH
                    );
                    self.glyph(FALLBACK_GLYPH).with_context(|| {
                        format!(
                            "character {:?} and fallback {:?} are missing from font {:?}",
                            c, FALLBACK_GLYPH, self.family_name
                        )
                    })?
                }
            };
            if let Some(outline) = &glyph.o {
                let glyph_paths = parse_outline(outline, scale, offset)
                    .with_context(|| format!("bad outline for glyph {:?}", c))?;
                paths.push(glyph_paths);
            }
            offset.x += glyph.ha * scale;
        }
        Ok(paths)
    }

    /// Shapes of `text`, flattening curves into `curve_segments` pieces.
    pub fn generate_shapes(
        &self,
        text: &str,
        size: f32,
        curve_segments: u32,
    ) -> anyhow::Result<Vec<Shape>> {
        Ok(self
            .generate_paths(text, size)?
            .iter()
            .flat_map(|glyph| to_shapes(glyph, curve_segments))
            .collect())
    }
}

/// Parse a glyph outline, mapping font units into layout space.
pub fn parse_outline(
    outline: &str,
    scale: f32,
    offset: Vector2<f32>,
) -> anyhow::Result<Vec<SubPath>> {
    let mut cursor = Cursor {
        tokens: outline.split_whitespace(),
        scale,
        offset,
    };
    let mut builder = PathBuilder::new();
    while let Some(command) = cursor.tokens.next() {
        match command {
            "m" => builder.move_to(cursor.point(command)?),
            "l" => builder.line_to(cursor.point(command)?)?,
            "q" => {
                let to = cursor.point(command)?;
                let control = cursor.point(command)?;
                builder.quadratic_to(control, to)?;
            }
            "b" => {
                let to = cursor.point(command)?;
                let control1 = cursor.point(command)?;
                let control2 = cursor.point(command)?;
                builder.cubic_to(control1, control2, to)?;
            }
            other => bail!("unknown outline command {:?}", other),
        }
    }
    Ok(builder.finish())
}

struct Cursor<'a> {
    tokens: std::str::SplitWhitespace<'a>,
    scale: f32,
    offset: Vector2<f32>,
}

impl Cursor<'_> {
    fn coordinate(&mut self, command: &str) -> anyhow::Result<f32> {
        let token = self
            .tokens
            .next()
            .with_context(|| format!("command {:?} is missing coordinates", command))?;
        token
            .parse::<f32>()
            .with_context(|| format!("{:?} is not a coordinate", token))
    }

    fn point(&mut self, command: &str) -> anyhow::Result<Vector2<f32>> {
        let x = self.coordinate(command)?;
        let y = self.coordinate(command)?;
        Ok(Vector2::new(
            x * self.scale + self.offset.x,
            y * self.scale + self.offset.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::Segment;

    #[test]
    fn outline_commands_are_scaled_and_offset() {
        let paths = parse_outline(
            "m 0 0 l 100 0 q 100 100 200 50 b 0 100 0 50 50 100",
            0.5,
            Vector2::new(1.0, 0.0),
        )
        .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].start, Vector2::new(1.0, 0.0));
        assert_eq!(
            paths[0].segments[1],
            Segment::Quadratic {
                control: Vector2::new(101.0, 25.0),
                to: Vector2::new(51.0, 50.0),
            }
        );
        assert_eq!(paths[0].segments[2].end(), Vector2::new(1.0, 50.0));
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(parse_outline("m 0 0 z", 1.0, Vector2::new(0.0, 0.0)).is_err());
        assert!(parse_outline("m 0", 1.0, Vector2::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let json = r#"{ "glyphs": {}, "resolution": 0 }"#;
        assert!(Font::from_json(json).is_err());
    }

    #[test]
    fn missing_glyph_falls_back_to_question_mark() {
        let json = r#"{
            "glyphs": {
                "?": { "ha": 500, "o": "m 0 0 l 0 100 l 100 100 l 100 0 " }
            },
            "resolution": 1000,
            "boundingBox": { "xMin": 0, "yMin": -200, "xMax": 600, "yMax": 800 }
        }"#;
        let font = Font::from_json(json).unwrap();
        let shapes = font.generate_shapes("xy", 1.0, 4).unwrap();
        assert_eq!(shapes.len(), 2);
        assert!((shapes[1].contour[0].x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn newline_moves_to_the_next_line() {
        let json = r#"{
            "glyphs": {
                "a": { "ha": 500, "o": "m 0 0 l 0 100 l 100 100 l 100 0 " }
            },
            "resolution": 1000,
            "underlineThickness": 50,
            "boundingBox": { "xMin": 0, "yMin": -200, "xMax": 600, "yMax": 800 }
        }"#;
        let font = Font::from_json(json).unwrap();
        let paths = font.generate_paths("a\na", 1.0).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1][0].start, Vector2::new(0.0, -1.05));
        assert!(font.generate_paths("b", 1.0).is_err());
    }
}
