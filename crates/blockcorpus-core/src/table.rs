//! Columnar persistence of block records
//!
//! Converts the in-memory row sequence into one Arrow record batch and
//! writes it as a single Parquet file. The write replaces whatever was at
//! the destination path; nothing is durable until [`persist`] returns
//! `Ok`.
//!
//! The column set is the shared multi-modal corpus schema. `audio` and
//! `stt_text` belong to other modalities and are emitted as all-null
//! placeholder columns.

use crate::error::Result;
use crate::record::BlockRecord;
use arrow::array::{ArrayRef, BinaryArray, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// The corpus block schema, in column order
#[must_use]
pub fn block_schema() -> Schema {
    Schema::new(vec![
        Field::new("entity_id", DataType::Utf8, false),
        Field::new("block_id", DataType::Int64, false),
        Field::new("timestamp", DataType::Utf8, false),
        Field::new("extended_fields", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, true),
        Field::new("image", DataType::Binary, false),
        Field::new("ocr_text", DataType::Utf8, false),
        Field::new("audio", DataType::Binary, true),
        Field::new("stt_text", DataType::Utf8, true),
        Field::new("block_type", DataType::Utf8, false),
        Field::new("file_md5", DataType::Utf8, false),
        Field::new("page_id", DataType::Int64, false),
    ])
}

/// Write `rows` to `destination` as one Parquet file
///
/// All-or-nothing from the caller's perspective: an `Err` means the file
/// at `destination` has no guaranteed contents and the run should be
/// repeated from scratch.
pub fn persist(rows: &[BlockRecord], destination: &Path) -> Result<()> {
    let schema = Arc::new(block_schema());
    let n = rows.len();

    let entity_id = StringArray::from_iter_values(rows.iter().map(|r| r.entity_id.as_str()));
    let block_id = Int64Array::from_iter_values(rows.iter().map(|r| r.block_id));
    let timestamp = StringArray::from_iter_values(rows.iter().map(|r| r.timestamp.as_str()));
    let extended_fields =
        StringArray::from_iter_values(rows.iter().map(|r| r.extended_fields.as_str()));
    let text = StringArray::from(rows.iter().map(|r| r.text.as_deref()).collect::<Vec<_>>());
    let image = BinaryArray::from_vec(rows.iter().map(|r| r.image.as_slice()).collect());
    let ocr_text = StringArray::from_iter_values(rows.iter().map(|r| r.ocr_text.as_str()));
    let audio = BinaryArray::from_opt_vec(vec![None; n]);
    let stt_text = StringArray::from(vec![None::<&str>; n]);
    let block_type = StringArray::from_iter_values(rows.iter().map(|r| r.block_type.as_str()));
    let file_md5 = StringArray::from_iter_values(rows.iter().map(|r| r.file_md5.as_str()));
    let page_id = Int64Array::from_iter_values(rows.iter().map(|r| r.page_id));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(entity_id),
        Arc::new(block_id),
        Arc::new(timestamp),
        Arc::new(extended_fields),
        Arc::new(text),
        Arc::new(image),
        Arc::new(ocr_text),
        Arc::new(audio),
        Arc::new(stt_text),
        Arc::new(block_type),
        Arc::new(file_md5),
        Arc::new(page_id),
    ];
    let batch = RecordBatch::try_new(Arc::clone(&schema), columns)?;

    let file = File::create(destination)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    info!("wrote {} rows to {}", n, destination.display());
    Ok(())
}
