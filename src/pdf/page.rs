//! Content-stream construction and page-tree assembly.
//!
//! `PageBuilder` records drawing operations for one page; `assemble` turns
//! the finished pages into document bytes. Footers are drawn by the report
//! code *after* all pages exist, which is when `page X of Y` finally knows
//! its denominator.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::core::{ReportError, Rgb};

use super::font::{Face, encode_winansi};

/// Resource name under which the optional logo XObject is registered.
pub(crate) const LOGO_RESOURCE: &str = "Im1";

fn real(v: f32) -> Object {
    Object::Real(v)
}

/// Drawing surface for one page. Coordinates are PDF points with the origin
/// at the bottom-left corner.
pub(crate) struct PageBuilder {
    ops: Vec<Operation>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Solid rectangle. `(x, y)` is the lower-left corner.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.ops
            .push(Operation::new("rg", vec![real(r), real(g), real(b)]));
        self.ops.push(Operation::new(
            "re",
            vec![real(x), real(y), real(w), real(h)],
        ));
        self.ops.push(Operation::new("f", vec![]));
    }

    /// Rectangle outline.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, line_width: f32) {
        let (r, g, b) = color.to_unit();
        self.ops
            .push(Operation::new("RG", vec![real(r), real(g), real(b)]));
        self.ops.push(Operation::new("w", vec![real(line_width)]));
        self.ops.push(Operation::new(
            "re",
            vec![real(x), real(y), real(w), real(h)],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }

    /// Straight line segment.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, line_width: f32) {
        let (r, g, b) = color.to_unit();
        self.ops
            .push(Operation::new("RG", vec![real(r), real(g), real(b)]));
        self.ops.push(Operation::new("w", vec![real(line_width)]));
        self.ops.push(Operation::new("m", vec![real(x1), real(y1)]));
        self.ops.push(Operation::new("l", vec![real(x2), real(y2)]));
        self.ops.push(Operation::new("S", vec![]));
    }

    /// Text run with its baseline starting at `(x, y)`.
    pub fn text(&mut self, x: f32, y: f32, content: &str, face: Face, size: f32, color: Rgb) {
        let (r, g, b) = color.to_unit();
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![face.resource().into(), real(size)],
        ));
        self.ops
            .push(Operation::new("rg", vec![real(r), real(g), real(b)]));
        self.ops.push(Operation::new("Td", vec![real(x), real(y)]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_winansi(content),
                lopdf::StringFormat::Literal,
            )],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Place the registered logo XObject scaled into the given box.
    pub fn logo(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![real(w), real(0.0), real(0.0), real(h), real(x), real(y)],
        ));
        self.ops
            .push(Operation::new("Do", vec![LOGO_RESOURCE.into()]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.ops
    }
}

/// A decoded logo ready for embedding: JPEG bytes plus pixel dimensions.
pub(crate) struct LogoImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Build the final document from finished pages.
///
/// One shared resource dictionary registers both Helvetica faces and, when
/// present, the logo image XObject.
pub(crate) fn assemble(
    pages: Vec<PageBuilder>,
    paper: (f32, f32),
    logo: Option<LogoImage>,
) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Face::Regular.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Face::Bold.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });

    let mut resources = dictionary! {
        "Font" => dictionary! {
            Face::Regular.resource() => Object::Reference(font_regular),
            Face::Bold.resource() => Object::Reference(font_bold),
        },
    };

    if let Some(image) = logo {
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => Object::Integer(image.width as i64),
                "Height" => Object::Integer(image.height as i64),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => Object::Integer(8),
                "Filter" => "DCTDecode",
            },
            image.bytes,
        )
        .with_compression(false); // already JPEG-compressed
        let image_id = doc.add_object(stream);
        resources.set(
            "XObject",
            dictionary! { LOGO_RESOURCE => Object::Reference(image_id) },
        );
    }
    let resources_id = doc.add_object(resources);

    let (page_w, page_h) = paper;
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page.into_operations(),
        };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::Pdf(format!("failed to encode content stream: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(page_w),
                real(page_h),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ReportError::Pdf(format!("failed to save document: {e}")))?;
    Ok(bytes)
}

/// Read the pixel dimensions out of a JPEG's SOF marker.
///
/// Returns `None` for anything that is not a baseline/progressive JPEG;
/// the caller then falls back to the text brand mark.
pub(crate) fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 3 < bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        match marker {
            // Standalone markers carry no length field.
            0xD0..=0xD9 | 0x01 => {
                i += 2;
            }
            // SOF0..SOF15 except the arithmetic-table markers.
            0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => {
                if i + 9 > bytes.len() {
                    return None;
                }
                let height = u32::from(bytes[i + 5]) << 8 | u32::from(bytes[i + 6]);
                let width = u32::from(bytes[i + 7]) << 8 | u32::from(bytes[i + 8]);
                return Some((width, height));
            }
            _ => {
                let len = usize::from(bytes[i + 2]) << 8 | usize::from(bytes[i + 3]);
                if len < 2 {
                    return None;
                }
                i += 2 + len;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_dimensions_from_minimal_header() {
        // SOI, APP0 (16 bytes), SOF0 with 120x80.
        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        jpeg.extend_from_slice(&[0; 14]);
        jpeg.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x50, 0x00, 0x78]);
        assert_eq!(jpeg_dimensions(&jpeg), Some((120, 80)));
    }

    #[test]
    fn non_jpeg_is_rejected() {
        assert_eq!(jpeg_dimensions(b"PNG not jpeg"), None);
        assert_eq!(jpeg_dimensions(&[]), None);
    }

    #[test]
    fn assemble_produces_pdf_bytes() {
        let mut page = PageBuilder::new();
        page.text(72.0, 720.0, "hola", Face::Regular, 12.0, Rgb(0, 0, 0));
        let bytes = assemble(vec![page], (612.0, 792.0), None).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
