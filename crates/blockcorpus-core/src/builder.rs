//! Record builder: pages in, flat block rows out
//!
//! This is the whole transformation: sort the pages into canonical order,
//! walk every object in every page, crop its region out of the page
//! image, and assemble one flat [`BlockRecord`] per object. The function
//! either produces the complete row sequence or fails; there is no
//! partial output.

use crate::crop::crop_to_png;
use crate::error::Result;
use crate::record::{BlockLabel, BlockRecord, ExtendedFields, PageRecord};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::collections::HashMap;

/// Build block records for `pages`, timestamped with today's date
///
/// Input order is irrelevant: pages are stably sorted by
/// `(doc_name, page_no)` first, so output rows are grouped by document in
/// ascending page order. Object order within a page is preserved.
///
/// # Errors
///
/// Fails on the first malformed bounding box, out-of-range category id,
/// or serialization failure; nothing is returned in that case.
pub fn build(pages: Vec<PageRecord>) -> Result<Vec<BlockRecord>> {
    build_with_date(pages, Local::now().date_naive())
}

/// Build block records with an explicit run date
///
/// `build` computes the date once per invocation; this variant takes it
/// as a parameter so output can be pinned byte-for-byte.
pub fn build_with_date(mut pages: Vec<PageRecord>, run_date: NaiveDate) -> Result<Vec<BlockRecord>> {
    // stable sort keeps object order untouched and page ties in input order
    pages.sort_by(|a, b| (a.doc_name.as_str(), a.page_no).cmp(&(b.doc_name.as_str(), b.page_no)));

    let timestamp = run_date.format("%Y%m%d").to_string();
    let mut counters: HashMap<String, i64> = HashMap::new();
    let mut rows = Vec::new();

    debug!("building block records for {} pages", pages.len());

    for page in &pages {
        let counter = counters.entry(page.doc_name.clone()).or_insert(0);
        let file_md5 = format!("{:x}", md5::compute(page.doc_name.as_bytes()));

        for obj in &page.objects {
            let block_type = BlockLabel::from_category_id(obj.category_id)?;
            let image = crop_to_png(&page.image, &obj.bbox)?;
            let extended_fields = serde_json::to_string(&ExtendedFields {
                doc_category: &page.doc_category,
                collection: &page.collection,
                page_no: page.page_no,
                width: page.width,
                height: page.height,
                bbox: obj.bbox,
            })?;
            let ocr_text = serde_json::to_string(&obj.cells)?;

            rows.push(BlockRecord {
                entity_id: page.doc_name.clone(),
                block_id: *counter,
                timestamp: timestamp.clone(),
                extended_fields,
                text: obj.text.clone(),
                image,
                ocr_text,
                block_type,
                file_md5: file_md5.clone(),
                page_id: page.page_no,
            });
            *counter += 1;
        }
    }

    info!(
        "built {} block records from {} pages across {} documents",
        rows.len(),
        pages.len(),
        counters.len()
    );
    Ok(rows)
}
