//! Drawing primitives on top of printpdf layers, and profile-image decoding.
//!
//! Layout works top-down in millimetres; PDF space starts at the bottom-left corner. The
//! [`PagePainter`] flips the vertical axis so callers can hand it layout coordinates directly.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use image::GenericImageView;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Line, Mm, PdfLayerReference,
    Point, Polygon, Px, Rgb,
};

use crate::fonts::FontSet;
use crate::layout::{DrawOp, Rect, TextRun};
use crate::model::ImageSource;
use crate::richtext::Color;

const DEFAULT_IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;
const UNDERLINE_OFFSET_MM: f32 = 0.8;
const UNDERLINE_THICKNESS_PT: f32 = 0.5;
const FRAME_THICKNESS_PT: f32 = 1.0;
const CIRCLE_SEGMENTS: usize = 32;

/// Reasons a profile image could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to open image file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data URI: {0}")]
    DataUri(&'static str),
    #[error("data URI payload is not valid base64")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decode image")]
    Decode(#[from] image::ImageError),
}

/// Loads an image from in-memory bytes, guessing the format from its contents.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, ImageError> {
    Ok(image::load_from_memory(bytes.as_ref())?)
}

/// Loads an image file.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, ImageError> {
    let path = path.as_ref();
    let open_error = |source| ImageError::Open {
        path: path.to_path_buf(),
        source,
    };
    let reader = image::io::Reader::open(path)
        .map_err(open_error)?
        .with_guessed_format()
        .map_err(open_error)?;
    Ok(reader.decode()?)
}

/// Loads an image from a `data:<mime>;base64,<payload>` URI.
pub fn decode_image_from_data_uri(uri: &str) -> Result<image::DynamicImage, ImageError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or(ImageError::DataUri("missing 'data:' scheme"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or(ImageError::DataUri("missing ',' separator"))?;
    if !header.ends_with(";base64") {
        return Err(ImageError::DataUri("payload is not base64-encoded"));
    }
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    decode_image_from_bytes(bytes)
}

/// Loads the image an [`ImageSource`] points at.
pub fn decode_image(source: &ImageSource) -> Result<image::DynamicImage, ImageError> {
    match source {
        ImageSource::DataUri(uri) => decode_image_from_data_uri(uri),
        ImageSource::Path(path) => decode_image_from_path(path),
    }
}

fn pdf_color(color: Color) -> printpdf::Color {
    let (r, g, b) = color.to_unit();
    printpdf::Color::Rgb(Rgb::new(r, g, b, None))
}

/// Replays layout operations onto one printpdf layer.
pub struct PagePainter<'a> {
    layer: PdfLayerReference,
    fonts: &'a FontSet,
    page_height: f32,
}

impl<'a> PagePainter<'a> {
    pub fn new(layer: PdfLayerReference, fonts: &'a FontSet, page_height: f32) -> Self {
        Self {
            layer,
            fonts,
            page_height,
        }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(Mm(x), Mm(self.page_height - y))
    }

    /// Draws `op`. `image` is the decoded profile picture, if any.
    pub fn draw(&self, op: &DrawOp, image: Option<&image::DynamicImage>) {
        match op {
            DrawOp::FillRect { rect, color } => self.fill_rect(*rect, *color),
            DrawOp::FillCircle {
                center_x,
                center_y,
                radius,
                color,
            } => self.circle(*center_x, *center_y, *radius, *color, PaintMode::Fill),
            DrawOp::StrokeCircle {
                center_x,
                center_y,
                radius,
                color,
            } => {
                self.layer.set_outline_thickness(FRAME_THICKNESS_PT);
                self.circle(*center_x, *center_y, *radius, *color, PaintMode::Stroke);
            }
            DrawOp::Image { rect } => {
                if let Some(image) = image {
                    self.image(image, *rect);
                }
            }
            DrawOp::Text(run) => self.text(run),
        }
    }

    pub fn fill_rect(&self, rect: Rect, color: Color) {
        let points = vec![
            (self.point(rect.x, rect.y), false),
            (self.point(rect.x + rect.width, rect.y), false),
            (self.point(rect.x + rect.width, rect.bottom()), false),
            (self.point(rect.x, rect.bottom()), false),
        ];
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![points],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn circle(&self, cx: f32, cy: f32, radius: f32, color: Color, mode: PaintMode) {
        let points = (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = 2.0 * std::f32::consts::PI * i as f32 / CIRCLE_SEGMENTS as f32;
                (
                    self.point(cx + radius * angle.cos(), cy + radius * angle.sin()),
                    false,
                )
            })
            .collect();

        match mode {
            PaintMode::Stroke => self.layer.set_outline_color(pdf_color(color)),
            _ => self.layer.set_fill_color(pdf_color(color)),
        }
        self.layer.add_polygon(Polygon {
            rings: vec![points],
            mode,
            winding_order: WindingOrder::NonZero,
        });
    }

    /// Draws one line of text, with a rule under it when the span is underlined.
    pub fn text(&self, run: &TextRun) {
        let span = &run.span;
        if span.text().is_empty() {
            return;
        }

        self.layer.set_fill_color(pdf_color(span.color()));
        self.layer.use_text(
            span.text(),
            span.size(),
            Mm(run.x),
            Mm(self.page_height - run.baseline),
            self.fonts.get(span.variant()),
        );

        if span.is_underlined() {
            let y = run.baseline + UNDERLINE_OFFSET_MM;
            self.layer.set_outline_color(pdf_color(span.color()));
            self.layer.set_outline_thickness(UNDERLINE_THICKNESS_PT);
            self.layer.add_line(Line {
                points: vec![
                    (self.point(run.x, y), false),
                    (self.point(run.x + run.bounds.width, y), false),
                ],
                is_closed: false,
            });
        }
    }

    /// Scales `image` to fill `rect`.
    pub fn image(&self, image: &image::DynamicImage, rect: Rect) {
        let (px_width, px_height) = image.dimensions();
        if px_width == 0 || px_height == 0 {
            return;
        }

        let natural_width = MM_PER_INCH * px_width as f32 / DEFAULT_IMAGE_DPI;
        let natural_height = MM_PER_INCH * px_height as f32 / DEFAULT_IMAGE_DPI;

        let xobject = ImageXObject {
            width: Px(px_width as usize),
            height: Px(px_height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: image.to_rgb8().into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        };

        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x)),
                translate_y: Some(Mm(self.page_height - rect.bottom())),
                scale_x: Some(rect.width / natural_width),
                scale_y: Some(rect.height / natural_height),
                dpi: Some(DEFAULT_IMAGE_DPI),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            4,
            3,
            image::Rgb([200, 10, 10]),
        ));
        let mut bytes = Vec::new();
        image
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn decodes_data_uri() {
        let source = ImageSource::from_bytes(png_bytes(), "image/png");
        let image = decode_image(&source).expect("decodes");
        assert_eq!(image.dimensions(), (4, 3));
    }

    #[test]
    fn rejects_non_base64_data_uri() {
        let error = decode_image_from_data_uri("data:image/png,rawbytes")
            .err()
            .expect("plain payload rejected");
        assert!(matches!(error, ImageError::DataUri(_)));
    }

    #[test]
    fn rejects_corrupt_payload() {
        let source = ImageSource::from_bytes(b"not an image", "image/png");
        assert!(matches!(decode_image(&source), Err(ImageError::Decode(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = decode_image_from_path("/definitely/not/here.png")
            .err()
            .expect("missing file rejected");
        assert!(error.to_string().contains("/definitely/not/here.png"));
    }
}
