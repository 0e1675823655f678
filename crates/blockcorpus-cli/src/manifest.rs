//! JSONL page manifest loading
//!
//! The converter consumes the dataset through a manifest file: one JSON
//! object per line describing a page, with `image` pointing at the page
//! raster on disk. Relative image paths are resolved against the
//! manifest's directory.
//!
//! Example line:
//!
//! ```json
//! {"doc_name": "docA", "page_no": 0, "doc_category": "financial_reports",
//!  "collection": "ann_reports", "width": 100, "height": 100,
//!  "image": "pages/docA_0.png",
//!  "objects": [{"bbox": [0, 0, 10, 10], "category_id": 9, "text": "..."}]}
//! ```

use anyhow::{Context, Result};
use blockcorpus_core::{BBox, LayoutObject, PageRecord};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ManifestPage {
    doc_name: String,
    page_no: i64,
    doc_category: String,
    collection: String,
    width: u32,
    height: u32,
    image: PathBuf,
    objects: Vec<ManifestObject>,
}

#[derive(Debug, Deserialize)]
struct ManifestObject {
    bbox: BBox,
    category_id: i64,
    #[serde(default)]
    text: Option<String>,
    // missing cells deserialize as JSON null and are emitted verbatim
    #[serde(default)]
    cells: serde_json::Value,
}

/// Load every page listed in a JSONL manifest, opening its image
///
/// Fails on the first malformed line or unreadable image; a run never
/// continues past a broken page.
pub fn load(path: &Path) -> Result<Vec<PageRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut pages = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry: ManifestPage = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed page record", path.display(), lineno + 1))?;
        pages.push(into_page(entry, base)?);
    }
    Ok(pages)
}

fn into_page(entry: ManifestPage, base: &Path) -> Result<PageRecord> {
    let image_path = if entry.image.is_absolute() {
        entry.image.clone()
    } else {
        base.join(&entry.image)
    };
    let image = image::open(&image_path)
        .with_context(|| format!("failed to open page image {}", image_path.display()))?;

    if image.width() != entry.width || image.height() != entry.height {
        warn!(
            "{} page {}: manifest says {}x{} but image is {}x{}",
            entry.doc_name,
            entry.page_no,
            entry.width,
            entry.height,
            image.width(),
            image.height()
        );
    }

    let objects = entry
        .objects
        .into_iter()
        .map(|o| LayoutObject {
            bbox: o.bbox,
            category_id: o.category_id,
            text: o.text,
            cells: o.cells,
        })
        .collect();

    Ok(PageRecord {
        doc_name: entry.doc_name,
        page_no: entry.page_no,
        doc_category: entry.doc_category,
        collection: entry.collection,
        width: entry.width,
        height: entry.height,
        image,
        objects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use tempfile::TempDir;

    fn write_page_image(dir: &Path, name: &str, width: u32, height: u32) {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn load_single_page() {
        let dir = TempDir::new().unwrap();
        write_page_image(dir.path(), "page.png", 50, 60);

        let manifest = dir.path().join("pages.jsonl");
        std::fs::write(
            &manifest,
            r#"{"doc_name":"docA","page_no":0,"doc_category":"laws","collection":"gov","width":50,"height":60,"image":"page.png","objects":[{"bbox":[1,2,3,4],"category_id":9,"text":"hi","cells":[]}]}"#,
        )
        .unwrap();

        let pages = load(&manifest).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].doc_name, "docA");
        assert_eq!(pages[0].image.width(), 50);
        assert_eq!(pages[0].objects.len(), 1);
        assert_eq!(pages[0].objects[0].bbox, BBox::new(1, 2, 3, 4));
        assert_eq!(pages[0].objects[0].text.as_deref(), Some("hi"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_page_image(dir.path(), "page.png", 10, 10);

        let manifest = dir.path().join("pages.jsonl");
        std::fs::write(
            &manifest,
            format!(
                "\n{}\n\n",
                r#"{"doc_name":"d","page_no":0,"doc_category":"c","collection":"c","width":10,"height":10,"image":"page.png","objects":[]}"#
            ),
        )
        .unwrap();

        assert_eq!(load(&manifest).unwrap().len(), 1);
    }

    #[test]
    fn missing_text_and_cells_default() {
        let dir = TempDir::new().unwrap();
        write_page_image(dir.path(), "page.png", 10, 10);

        let manifest = dir.path().join("pages.jsonl");
        std::fs::write(
            &manifest,
            r#"{"doc_name":"d","page_no":0,"doc_category":"c","collection":"c","width":10,"height":10,"image":"page.png","objects":[{"bbox":[0,0,2,2],"category_id":6}]}"#,
        )
        .unwrap();

        let pages = load(&manifest).unwrap();
        assert_eq!(pages[0].objects[0].text, None);
        assert_eq!(pages[0].objects[0].cells, serde_json::Value::Null);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("pages.jsonl");
        std::fs::write(&manifest, "{not json}\n").unwrap();

        let err = load(&manifest).unwrap_err();
        assert!(format!("{err:#}").contains(":1:"));
    }

    #[test]
    fn missing_field_fails() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("pages.jsonl");
        // no doc_name
        std::fs::write(
            &manifest,
            r#"{"page_no":0,"doc_category":"c","collection":"c","width":10,"height":10,"image":"page.png","objects":[]}"#,
        )
        .unwrap();

        assert!(load(&manifest).is_err());
    }

    #[test]
    fn missing_image_file_fails() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("pages.jsonl");
        std::fs::write(
            &manifest,
            r#"{"doc_name":"d","page_no":0,"doc_category":"c","collection":"c","width":10,"height":10,"image":"nope.png","objects":[]}"#,
        )
        .unwrap();

        let err = load(&manifest).unwrap_err();
        assert!(format!("{err:#}").contains("nope.png"));
    }
}
