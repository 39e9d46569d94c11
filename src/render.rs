//! SVG rendering of symbols.
//!
//! The symbol is drawn as a single path with one square per dark module on
//! top of a rounded background rectangle. The quiet zone of
//! [QUIET_ZONE] modules is part of the image, so the markup can be inlined
//! into a page as is.
use core::fmt::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::placement::{Bitmap, QUIET_ZONE};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Colors and shapes used for the generated SVG.
///
/// Colors are passed to SVG as they are, so anything SVG understands works
/// (`#fff`, `white`, `rgb(255, 255, 255)`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SvgStyle {
    /// Fill of the background including the quiet zone.
    pub background: String,
    /// Fill of the dark modules.
    pub foreground: String,
    /// Corner radius of the background in pixels.
    pub corner_radius: u32,
    /// Fill of the placeholder shown if encoding fails.
    pub fallback_background: String,
    /// Text color of the placeholder label.
    pub fallback_foreground: String,
    /// Corner radius of the placeholder in pixels.
    pub fallback_radius: u32,
    /// Label centered in the placeholder.
    pub fallback_label: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            background: "#fff".into(),
            foreground: "#000".into(),
            corner_radius: 8,
            fallback_background: "#f3f4f6".into(),
            fallback_foreground: "#6b7280".into(),
            fallback_radius: 12,
            fallback_label: "QR".into(),
        }
    }
}

impl SvgStyle {
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    pub fn with_foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = color.into();
        self
    }

    pub fn with_corner_radius(mut self, radius: u32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_fallback_colors(
        mut self,
        background: impl Into<String>,
        foreground: impl Into<String>,
    ) -> Self {
        self.fallback_background = background.into();
        self.fallback_foreground = foreground.into();
        self
    }

    pub fn with_fallback_radius(mut self, radius: u32) -> Self {
        self.fallback_radius = radius;
        self
    }

    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }
}

/// Render the bitmap as SVG of `pixel_size` times `pixel_size` pixels.
///
/// The module size is `pixel_size / (width + 2 * QUIET_ZONE)` and may be
/// fractional. Coordinates are written with one decimal.
pub fn render_svg(
    bitmap: &Bitmap<bool>,
    pixel_size: u32,
    style: &SvgStyle,
) -> Result<String, fmt::Error> {
    let total = bitmap.width() + 2 * QUIET_ZONE;
    let cell = f64::from(pixel_size) / total as f64;

    let mut svg = String::with_capacity(256 + bitmap.width() * bitmap.height() * 16);
    write!(
        svg,
        "<svg xmlns=\"{SVG_NS}\" viewBox=\"0 0 {pixel_size} {pixel_size}\" \
         width=\"{pixel_size}\" height=\"{pixel_size}\">"
    )?;
    write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\" rx=\"{}\"/>",
        Escaped(&style.background),
        style.corner_radius
    )?;
    svg.push_str("<path d=\"");
    for (x, y) in bitmap.pixels() {
        let px = (x + QUIET_ZONE) as f64 * cell;
        let py = (y + QUIET_ZONE) as f64 * cell;
        write!(svg, "M{px:.1},{py:.1}h{cell:.1}v{cell:.1}h-{cell:.1}z")?;
    }
    write!(svg, "\" fill=\"{}\"/></svg>", Escaped(&style.foreground))?;
    Ok(svg)
}

/// The placeholder shown instead of a symbol, same size as [render_svg].
pub fn fallback_svg(pixel_size: u32, style: &SvgStyle) -> String {
    format!(
        "<svg xmlns=\"{SVG_NS}\" width=\"{s}\" height=\"{s}\" viewBox=\"0 0 {s} {s}\">\
         <rect width=\"100%\" height=\"100%\" fill=\"{bg}\" rx=\"{rx}\"/>\
         <text x=\"50%\" y=\"50%\" text-anchor=\"middle\" dominant-baseline=\"middle\" \
         font-family=\"monospace\" font-size=\"12\" fill=\"{fg}\">{label}</text></svg>",
        s = pixel_size,
        bg = Escaped(&style.fallback_background),
        rx = style.fallback_radius,
        fg = Escaped(&style.fallback_foreground),
        label = Escaped(&style.fallback_label),
    )
}

// Writes the text with XML special characters replaced.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{fallback_svg, render_svg, SvgStyle};
    use crate::QrCode;

    #[test]
    fn fallback_default() {
        assert_eq!(
            fallback_svg(200, &SvgStyle::default()),
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"200\" height=\"200\" ",
                "viewBox=\"0 0 200 200\"><rect width=\"100%\" height=\"100%\" fill=\"#f3f4f6\" ",
                "rx=\"12\"/><text x=\"50%\" y=\"50%\" text-anchor=\"middle\" ",
                "dominant-baseline=\"middle\" font-family=\"monospace\" font-size=\"12\" ",
                "fill=\"#6b7280\">QR</text></svg>",
            )
        );
    }

    #[test]
    fn fallback_escapes_label() {
        let style = SvgStyle::default().with_fallback_label("<QR & co>");
        let svg = fallback_svg(100, &style);
        assert!(svg.contains(">&lt;QR &amp; co&gt;</text>"));
    }

    #[test]
    fn svg_header_and_background() {
        let code = QrCode::encode(b"hi").unwrap();
        let svg = render_svg(code.bitmap(), 290, &SvgStyle::default()).unwrap();
        assert!(svg.starts_with(concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 290 290\" ",
            "width=\"290\" height=\"290\"><rect width=\"100%\" height=\"100%\" ",
            "fill=\"#fff\" rx=\"8\"/><path d=\"M",
        )));
        assert!(svg.ends_with("\" fill=\"#000\"/></svg>"));
    }

    #[test]
    fn one_square_per_dark_module() {
        let code = QrCode::encode(b"hi").unwrap();
        let svg = render_svg(code.bitmap(), 290, &SvgStyle::default()).unwrap();
        let dark = code.bitmap().pixels().count();
        assert_eq!(svg.matches('M').count(), dark);
        assert_eq!(svg.matches('z').count(), dark);
        // 21 + 8 modules in 290 pixels, the top left finder starts at the
        // quiet zone
        assert!(svg.contains("<path d=\"M40.0,40.0h10.0v10.0h-10.0z"));
    }

    #[test]
    fn custom_colors() {
        let style = SvgStyle::default()
            .with_background("white")
            .with_foreground("#123456")
            .with_corner_radius(0);
        let code = QrCode::encode(b"hi").unwrap();
        let svg = render_svg(code.bitmap(), 100, &style).unwrap();
        assert!(svg.contains("fill=\"white\" rx=\"0\""));
        assert!(svg.contains("fill=\"#123456\""));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn style_partial_config() {
        let style: SvgStyle = serde_json::from_str(r##"{"foreground": "#333"}"##).unwrap();
        assert_eq!(style, SvgStyle::default().with_foreground("#333"));
    }
}
