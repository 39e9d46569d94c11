//! QR code encoder for payment URIs.
//!
//! The crate turns a short text, typically an `ethereum:` payment URI, into
//! a QR code symbol and renders it as inline SVG. It implements the byte
//! mode, the error correction level L and the versions 1 to 10, which is all
//! a checkout page needs.
//!
//! # Example
//!
//! ```rust
//! let uri = crypax_qr::uri::eip681_uri(
//!     "0x71C7656EC7ab88b098defB751B7401B5f6d8976F",
//!     crypax_qr::uri::U256::from(1_500_000_000_000_000_000u64),
//!     1,
//! );
//! let svg = crypax_qr::encode(&uri, 256);
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! The rendering functions never fail. If the payload is too large a
//! placeholder image of the same size is returned instead. Use [QrCode]
//! directly to handle the errors yourself or to render the symbol into other
//! formats.
//!
//! ```rust
//! # use crypax_qr::QrCode;
//! let code = QrCode::encode_str("ethereum:0x0")?;
//! print!("{}", code.bitmap().unicode());
//! # Ok::<(), crypax_qr::EncodeError>(())
//! ```
mod encodation;
mod error;
pub mod errorcode;
pub mod placement;
mod version;

pub mod data;
pub mod render;
pub mod uri;

pub use error::EncodeError;
pub use render::SvgStyle;
pub use version::Version;

use placement::{Bitmap, MatrixMap, Visitor, FORMAT_INFO};

struct CodewordPlacer(Vec<u8>);

impl Visitor<bool> for CodewordPlacer {
    fn visit(&mut self, idx: usize, bits: &mut [bool; 8]) {
        debug_assert!(idx < self.0.len(), "more free modules than codewords");
        let codeword = self.0.get(idx).copied().unwrap_or(0);
        for (i, bit) in bits.iter_mut().enumerate() {
            // 0 = MSB
            // 7 = LSB
            *bit = ((codeword >> (7 - i)) & 1) == 1;
        }
    }
}

/// An encoded QR code symbol.
pub struct QrCode {
    version: Version,
    bitmap: Bitmap<bool>,
}

impl QrCode {
    /// Encode the bytes into the smallest version they fit in.
    pub fn encode(data: &[u8]) -> Result<Self, EncodeError> {
        let (codewords, version) = data::encode_data(data)?;
        let codewords = errorcode::encode_error(&codewords, version);
        let mut map = MatrixMap::new(version);
        map.traverse(&mut CodewordPlacer(codewords));
        map.apply_mask();
        map.draw_format_info(FORMAT_INFO);
        Ok(Self {
            version,
            bitmap: map.bitmap(),
        })
    }

    /// Encode the UTF-8 bytes of `text`.
    pub fn encode_str(text: &str) -> Result<Self, EncodeError> {
        Self::encode(text.as_bytes())
    }

    /// The version chosen for the payload.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Number of modules per side, without quiet zone.
    pub fn width(&self) -> usize {
        self.bitmap.width()
    }

    pub fn bitmap(&self) -> &Bitmap<bool> {
        &self.bitmap
    }

    pub fn into_bitmap(self) -> Bitmap<bool> {
        self.bitmap
    }

    /// Render the symbol as SVG markup of `pixel_size` times `pixel_size`.
    pub fn svg(&self, pixel_size: u32, style: &SvgStyle) -> Result<String, EncodeError> {
        Ok(render::render_svg(&self.bitmap, pixel_size, style)?)
    }
}

/// Encode `payload` and render it as SVG with the default style.
///
/// See [encode_with_style].
pub fn encode(payload: &str, pixel_size: u32) -> String {
    encode_with_style(payload, pixel_size, &SvgStyle::default())
}

/// Encode `payload` and render it as SVG of `pixel_size` times `pixel_size`.
///
/// If encoding fails, for example because the payload is longer than the
/// capacity of the largest version, a placeholder image of the same size is
/// returned. The error is logged as a warning.
pub fn encode_with_style(payload: &str, pixel_size: u32, style: &SvgStyle) -> String {
    match QrCode::encode_str(payload).and_then(|code| code.svg(pixel_size, style)) {
        Ok(svg) => svg,
        Err(err) => {
            tracing::warn!(
                error = %err,
                len = payload.len(),
                "Failed to encode QR code, rendering placeholder"
            );
            render::fallback_svg(pixel_size, style)
        }
    }
}
