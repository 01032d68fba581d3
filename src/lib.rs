//! Convenience helpers for building styled PDF documents on top of
//! [`lopdf`].
//!
//! The entry point is [`Document`]: create one, append titled sections,
//! paragraphs, images and tables, then call [`Document::save`]. Layout is
//! deliberately simple: a top-down cursor per page, greedy word wrapping
//! with an approximate character width, and automatic page breaks. Named
//! style presets (`title`, `paragraph`, `page_number`, `table`,
//! `no_header`) are registered out of the box and can be overridden or
//! extended, including from JSON.
//!
//! ```no_run
//! use pagecraft::{Document, TableData, TableOptions};
//!
//! fn main() -> Result<(), pagecraft::DocumentError> {
//!     let mut doc = Document::new("report.pdf");
//!     doc.set_page_numbering(true);
//!     doc.add_title("Quarterly Report")?;
//!     doc.add_paragraph("Numbers were up. Morale followed.")?;
//!     let data = TableData::from_rows(vec![
//!         vec!["Region", "Revenue"],
//!         vec!["North", "1200"],
//!         vec!["South", "870"],
//!     ]);
//!     doc.add_table(&data, &TableOptions::default())?;
//!     doc.save()
//! }
//! ```

mod document;
mod error;
mod image;
mod render;
mod style;
mod table;
mod text;
mod units;

pub use document::{Document, DocumentOptions};
pub use error::DocumentError;
pub use image::{HorizontalAnchor, ImageOptions, ImagePosition, VerticalAnchor};
pub use style::{Color, Font, ParagraphStyle, StyleSheet, TableStyle, TextAlign};
pub use table::{ColumnWidths, TableData, TableOptions, TablePosition};
pub use text::{approx_text_width, wrap_text};
pub use units::{Margins, PageSize, CM, INCH, MM};
