//! Thin drawing layer over lopdf content streams
//!
//! Coordinates are PDF points with the origin at the bottom-left corner and
//! are rounded to whole points.

use hunt_core::error::{HuntError, Result};
use hunt_core::imaging::{self, JPEG_QUALITY};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::text::{encode_win_ansi, text_width};

/// US Letter
pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Font objects shared by every page
#[derive(Debug, Clone, Copy)]
pub struct Fonts {
    regular: ObjectId,
    bold: ObjectId,
}

impl Fonts {
    pub fn register(doc: &mut Document) -> Self {
        let mut font = |base: &str| {
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base,
                "Encoding" => "WinAnsiEncoding",
            })
        };
        Self {
            regular: font("Helvetica"),
            bold: font("Helvetica-Bold"),
        }
    }

    fn resources(&self) -> Dictionary {
        dictionary! {
            Font::Regular.resource_name() => self.regular,
            Font::Bold.resource_name() => self.bold,
        }
    }
}

/// A JPEG image XObject added to the document
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedImage {
    id: ObjectId,
    pub width: u32,
    pub height: u32,
}

/// Decode `bytes` and embed them as a baseline RGB JPEG
pub fn embed_jpeg(doc: &mut Document, bytes: &[u8]) -> Result<EmbeddedImage> {
    let image = imaging::decode(bytes)?;
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(HuntError::Image("image has no pixels".to_string()));
    }
    let jpeg = imaging::encode_jpeg(&image, JPEG_QUALITY)?;

    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
            "Filter" => "DCTDecode",
        },
        jpeg,
    );
    Ok(EmbeddedImage {
        id: doc.add_object(stream),
        width,
        height,
    })
}

/// Operations and image references for one page
#[derive(Default)]
pub struct PageCanvas {
    operations: Vec<Operation>,
    images: Vec<(String, ObjectId)>,
}

impl PageCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, font: Font, size: i64, x: f64, y: f64, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().into()), Object::Integer(size)],
            ),
            Operation::new("Td", vec![points(x), points(y)]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Text horizontally centred on `center_x`
    pub fn centered_text(&mut self, font: Font, size: i64, center_x: f64, y: f64, text: &str) {
        let x = center_x - text_width(text, size as f64) / 2.0;
        self.text(font, size, x, y, text);
    }

    /// Draw an embedded image into the box with bottom-left corner (x, y)
    pub fn image(&mut self, image: &EmbeddedImage, x: f64, y: f64, width: f64, height: f64) {
        let name = format!("Im{}", self.images.len() + 1);
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    points(width),
                    Object::Integer(0),
                    Object::Integer(0),
                    points(height),
                    points(x),
                    points(y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.clone().into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        self.images.push((name, image.id));
    }

    /// Stroke a 1pt rectangle outline
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("w", vec![Object::Integer(1)]),
            Operation::new(
                "re",
                vec![points(x), points(y), points(width), points(height)],
            ),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Write the page's content stream and page object into the document
    pub fn finish(self, doc: &mut Document, parent: ObjectId, fonts: &Fonts) -> Result<ObjectId> {
        let operations = self.operations;
        let content = Content { operations }
            .encode()
            .map_err(|e| HuntError::Report(format!("Failed to encode page content: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let mut xobjects = Dictionary::new();
        for (name, id) in self.images {
            xobjects.set(name, id);
        }

        Ok(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => parent,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => fonts.resources(),
                "XObject" => xobjects,
            },
        }))
    }
}

fn points(value: f64) -> Object {
    Object::Integer(value.round() as i64)
}
