//! Shared helpers for integration tests: parse generated bytes back with
//! lopdf and poke at pages, text and resources.

use lopdf::{Dictionary, Object};
use std::error::Error;

pub type TestResult = Result<(), Box<dyn Error>>;

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct GeneratedPdf {
    pub doc: lopdf::Document,
}

#[allow(dead_code)]
impl GeneratedPdf {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Box<dyn Error>> {
        Ok(GeneratedPdf {
            doc: lopdf::Document::load_mem(bytes)?,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extract the text of one page (pages are numbered from 1).
    pub fn page_text(&self, page: u32) -> Result<String, Box<dyn Error>> {
        Ok(self.doc.extract_text(&[page])?)
    }

    pub fn all_text(&self) -> Result<String, Box<dyn Error>> {
        let pages: Vec<u32> = self.doc.get_pages().keys().copied().collect();
        Ok(self.doc.extract_text(&pages)?)
    }

    /// The resolved resources dictionary of one page.
    pub fn page_resources(&self, page: u32) -> Result<Dictionary, Box<dyn Error>> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page)
            .copied()
            .ok_or_else(|| format!("no page {}", page))?;
        let page_dict = self.doc.get_dictionary(page_id)?;
        let resources = match page_dict.get(b"Resources")? {
            Object::Reference(id) => self.doc.get_dictionary(*id)?.clone(),
            Object::Dictionary(dict) => dict.clone(),
            other => return Err(format!("unexpected Resources object: {:?}", other).into()),
        };
        Ok(resources)
    }
}

#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $page:expr, $needle:expr) => {{
        let text = $pdf.page_text($page)?;
        assert!(
            text.contains($needle),
            "page {} does not contain {:?}, got: {:?}",
            $page,
            $needle,
            text
        );
    }};
}
