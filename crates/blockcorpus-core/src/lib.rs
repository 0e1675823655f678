//! # blockcorpus-core
//!
//! Converts a document-layout dataset (per-page images annotated with
//! bounding-box objects) into flat corpus block records and persists them
//! as a single Parquet file.
//!
//! Each annotated object on a page becomes one output row: the page
//! image is cropped to the object's bounding box, PNG-encoded, and paired
//! with the document/page metadata in a schema shared across a
//! multi-modal corpus. The audio and speech-to-text columns of that
//! schema are placeholders here and always null.
//!
//! ## Pipeline
//!
//! ```no_run
//! use blockcorpus_core::{build, persist};
//! # fn pages() -> Vec<blockcorpus_core::PageRecord> { Vec::new() }
//!
//! let rows = build(pages())?;
//! persist(&rows, std::path::Path::new("corpus.parquet"))?;
//! # Ok::<(), blockcorpus_core::CorpusError>(())
//! ```
//!
//! ## Output columns
//!
//! | Column | Type | Contents |
//! |--------|------|----------|
//! | `entity_id` | string | document identifier |
//! | `block_id` | int64 | zero-based per-document sequence number |
//! | `timestamp` | string | run date, `YYYYMMDD`, one value per run |
//! | `extended_fields` | string | JSON: doc_category, collection, page_no, width, height, bbox |
//! | `text` | string? | object text, null when absent |
//! | `image` | binary | PNG crop of the object region |
//! | `ocr_text` | string | JSON-serialized OCR cell structure |
//! | `audio` | binary? | always null |
//! | `stt_text` | string? | always null |
//! | `block_type` | string | category label (`Text`, `Table`, `Picture`, ...) |
//! | `file_md5` | string | lowercase hex MD5 of the document identifier |
//! | `page_id` | int64 | page number |
//!
//! ## Guarantees
//!
//! - Rows are grouped by document and ordered by ascending page number;
//!   object order within a page is preserved.
//! - Per-document block ids count up from 0 with no gaps and reset for
//!   each document.
//! - Identical document identifiers always produce identical `file_md5`
//!   values.
//! - The run is all-or-nothing: any malformed bounding box, out-of-range
//!   category id, or write failure aborts it with no usable output.

pub mod builder;
pub mod crop;
pub mod error;
pub mod record;
pub mod table;

pub use builder::{build, build_with_date};
pub use crop::crop_to_png;
pub use error::{CorpusError, Result};
pub use record::{
    BBox, BlockLabel, BlockRecord, ExtendedFields, LayoutObject, PageRecord, CATEGORY_TABLE,
};
pub use table::{block_schema, persist};
