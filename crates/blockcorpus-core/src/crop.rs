//! Cropping page images to object regions
//!
//! One object's image blob is the PNG encoding of the page image cropped
//! to the object's bounding box. The source image's own encoding does not
//! matter; output is always PNG.

use crate::error::Result;
use crate::record::BBox;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Crop `image` to `bbox` and return the PNG-encoded bytes
///
/// Pure function of its inputs. The bbox is validated against the image
/// dimensions first; an empty or out-of-bounds box fails with
/// [`CorpusError::InvalidBBox`](crate::CorpusError::InvalidBBox) rather
/// than being clamped.
pub fn crop_to_png(image: &DynamicImage, bbox: &BBox) -> Result<Vec<u8>> {
    bbox.validate(image.width(), image.height())?;

    let cropped = image.crop_imm(bbox.left, bbox.top, bbox.width, bbox.height);

    let mut buf = Cursor::new(Vec::new());
    cropped.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
