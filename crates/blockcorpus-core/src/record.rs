//! Input and output record types
//!
//! Input pages follow the layout-dataset shape: one raster image per page
//! plus an ordered list of annotated objects. Output blocks are the flat
//! rows of the shared multi-modal corpus schema, one per object.

use crate::error::{CorpusError, Result};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounding box in pixel coordinates, relative to the page image
///
/// Serializes as a 4-element array `[left, top, width, height]`, the
/// representation used both by the dataset and by `extended_fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct BBox {
    /// Left edge (x) of the region
    pub left: u32,
    /// Top edge (y) of the region
    pub top: u32,
    /// Region width, must be non-zero
    pub width: u32,
    /// Region height, must be non-zero
    pub height: u32,
}

impl BBox {
    /// Create a bounding box from `(left, top, width, height)`
    #[must_use]
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check that the box is non-empty and lies fully inside an image of
    /// `img_width` x `img_height` pixels.
    ///
    /// The underlying image library would silently clamp an oversized
    /// crop; we fail fast instead so a malformed annotation aborts the
    /// run with a descriptive error.
    pub fn validate(&self, img_width: u32, img_height: u32) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CorpusError::InvalidBBox {
                reason: format!("empty region {self}"),
            });
        }
        let right = self.left.checked_add(self.width);
        let bottom = self.top.checked_add(self.height);
        match (right, bottom) {
            (Some(r), Some(b)) if r <= img_width && b <= img_height => Ok(()),
            _ => Err(CorpusError::InvalidBBox {
                reason: format!("{self} exceeds page bounds {img_width}x{img_height}"),
            }),
        }
    }
}

impl From<[u32; 4]> for BBox {
    fn from([left, top, width, height]: [u32; 4]) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl From<BBox> for [u32; 4] {
    fn from(b: BBox) -> Self {
        [b.left, b.top, b.width, b.height]
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Fixed, ordered category table for annotated layout objects
///
/// The dataset encodes object categories as integer indices into this
/// table. Variant order is the table order; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockLabel {
    /// Caption for figures, tables, or other elements
    #[serde(rename = "Caption")]
    Caption,
    /// Footnote or endnote text
    #[serde(rename = "Footnote")]
    Footnote,
    /// Mathematical formula or equation
    #[serde(rename = "Formula")]
    Formula,
    /// Item in a bulleted or numbered list
    #[serde(rename = "List-item")]
    ListItem,
    /// Running footer at bottom of page
    #[serde(rename = "Page-footer")]
    PageFooter,
    /// Running header at top of page
    #[serde(rename = "Page-header")]
    PageHeader,
    /// Raster image or photograph
    #[serde(rename = "Picture")]
    Picture,
    /// Section or chapter heading
    #[serde(rename = "Section-header")]
    SectionHeader,
    /// Tabular data structure
    #[serde(rename = "Table")]
    Table,
    /// Regular body text paragraph
    #[serde(rename = "Text")]
    Text,
    /// Document or section title
    #[serde(rename = "Title")]
    Title,
}

/// Category table in index order
pub const CATEGORY_TABLE: [BlockLabel; 11] = [
    BlockLabel::Caption,
    BlockLabel::Footnote,
    BlockLabel::Formula,
    BlockLabel::ListItem,
    BlockLabel::PageFooter,
    BlockLabel::PageHeader,
    BlockLabel::Picture,
    BlockLabel::SectionHeader,
    BlockLabel::Table,
    BlockLabel::Text,
    BlockLabel::Title,
];

impl BlockLabel {
    /// Look up a label by its integer category id
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::UnknownCategory`] when `id` is outside the
    /// table.
    pub fn from_category_id(id: i64) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| CATEGORY_TABLE.get(i).copied())
            .ok_or(CorpusError::UnknownCategory {
                category_id: id,
                max: CATEGORY_TABLE.len() - 1,
            })
    }

    /// The label string written to the `block_type` column
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Caption => "Caption",
            Self::Footnote => "Footnote",
            Self::Formula => "Formula",
            Self::ListItem => "List-item",
            Self::PageFooter => "Page-footer",
            Self::PageHeader => "Page-header",
            Self::Picture => "Picture",
            Self::SectionHeader => "Section-header",
            Self::Table => "Table",
            Self::Text => "Text",
            Self::Title => "Title",
        }
    }
}

impl fmt::Display for BlockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One annotated region on a page
#[derive(Debug, Clone)]
pub struct LayoutObject {
    /// Region of the page image covered by this object
    pub bbox: BBox,
    /// Index into [`CATEGORY_TABLE`]
    pub category_id: i64,
    /// Extracted text content, absent for non-text regions
    pub text: Option<String>,
    /// Structured OCR sub-regions, serialized verbatim into `ocr_text`
    pub cells: serde_json::Value,
}

/// One document page with its raster image and annotated objects
///
/// Object order within `objects` is significant and preserved in the
/// output.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Document identifier; pages of one document share this value
    pub doc_name: String,
    /// Page index within the document
    pub page_no: i64,
    /// Dataset grouping label for the document
    pub doc_category: String,
    /// Dataset collection the document belongs to
    pub collection: String,
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
    /// Full-page raster image that objects are cropped from
    pub image: DynamicImage,
    /// Annotated regions, in reading order as given by the dataset
    pub objects: Vec<LayoutObject>,
}

/// Page-level metadata folded into the `extended_fields` JSON column
///
/// Field order here is the serialization order in the output file.
#[derive(Debug, Serialize)]
pub struct ExtendedFields<'a> {
    pub doc_category: &'a str,
    pub collection: &'a str,
    pub page_no: i64,
    pub width: u32,
    pub height: u32,
    pub bbox: BBox,
}

/// One flat output row of the shared corpus schema
///
/// The `audio` and `stt_text` columns of the schema are always null for
/// this modality and therefore carry no field here; the persistence step
/// emits them as null columns.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    /// Entity identifier, equal to the source document's `doc_name`
    pub entity_id: String,
    /// Zero-based per-document sequence number
    pub block_id: i64,
    /// File-generation date, `YYYYMMDD`, shared by every row of a run
    pub timestamp: String,
    /// JSON-serialized [`ExtendedFields`]
    pub extended_fields: String,
    /// Raw object text, null when the object carries none
    pub text: Option<String>,
    /// PNG-encoded crop of the page image at the object's bbox
    pub image: Vec<u8>,
    /// JSON-serialized OCR cell structure
    pub ocr_text: String,
    /// Category label for the object
    pub block_type: BlockLabel,
    /// Lowercase hex MD5 digest of `entity_id`
    pub file_md5: String,
    /// Source page number
    pub page_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_table_lookup() {
        assert_eq!(BlockLabel::from_category_id(0).unwrap(), BlockLabel::Caption);
        assert_eq!(BlockLabel::from_category_id(6).unwrap(), BlockLabel::Picture);
        assert_eq!(BlockLabel::from_category_id(9).unwrap(), BlockLabel::Text);
        assert_eq!(BlockLabel::from_category_id(10).unwrap(), BlockLabel::Title);
    }

    #[test]
    fn category_id_out_of_range() {
        for id in [-1, 11, i64::MAX] {
            let err = BlockLabel::from_category_id(id).unwrap_err();
            assert!(matches!(
                err,
                crate::CorpusError::UnknownCategory { category_id, max: 10 } if category_id == id
            ));
        }
    }

    #[test]
    fn label_strings_match_table_order() {
        let names: Vec<&str> = CATEGORY_TABLE.iter().map(BlockLabel::as_str).collect();
        assert_eq!(
            names,
            [
                "Caption",
                "Footnote",
                "Formula",
                "List-item",
                "Page-footer",
                "Page-header",
                "Picture",
                "Section-header",
                "Table",
                "Text",
                "Title",
            ]
        );
    }

    #[test]
    fn bbox_serializes_as_array() {
        let bbox = BBox::new(1, 2, 3, 4);
        assert_eq!(serde_json::to_string(&bbox).unwrap(), "[1,2,3,4]");
        let back: BBox = serde_json::from_str("[1,2,3,4]").unwrap();
        assert_eq!(back, bbox);
    }

    #[test]
    fn bbox_validation() {
        assert!(BBox::new(0, 0, 10, 10).validate(100, 100).is_ok());
        assert!(BBox::new(90, 90, 10, 10).validate(100, 100).is_ok());
        assert!(BBox::new(0, 0, 0, 10).validate(100, 100).is_err());
        assert!(BBox::new(0, 0, 10, 0).validate(100, 100).is_err());
        assert!(BBox::new(95, 0, 10, 10).validate(100, 100).is_err());
        assert!(BBox::new(0, 95, 10, 10).validate(100, 100).is_err());
        // left + width overflowing u32 must not wrap into a "valid" box
        assert!(BBox::new(u32::MAX, 0, 2, 2).validate(100, 100).is_err());
    }

    #[test]
    fn extended_fields_json_shape() {
        let fields = ExtendedFields {
            doc_category: "financial_reports",
            collection: "ann_reports_00_04_fancy",
            page_no: 3,
            width: 1025,
            height: 1025,
            bbox: BBox::new(10, 20, 30, 40),
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(
            json,
            r#"{"doc_category":"financial_reports","collection":"ann_reports_00_04_fancy","page_no":3,"width":1025,"height":1025,"bbox":[10,20,30,40]}"#
        );
    }
}
