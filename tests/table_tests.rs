mod common;

use common::{GeneratedPdf, TestResult};
use pagecraft::{ColumnWidths, Document, DocumentError, TableData, TableOptions, TablePosition};
use serde_json::json;

fn roster(rows: usize) -> TableData {
    let mut data = vec![vec!["Name".to_string(), "Score".to_string()]];
    for i in 0..rows {
        data.push(vec![format!("player-{}", i), format!("{}", i * 10)]);
    }
    TableData::from_rows(data)
}

#[test]
fn table_cells_appear_in_output() -> TestResult {
    common::init_logging();
    let mut doc = Document::new("unused.pdf");
    doc.add_table(&roster(3), &TableOptions::default())?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_pdf_contains_text!(pdf, 1, "Name");
    assert_pdf_contains_text!(pdf, 1, "player-2");
    Ok(())
}

#[test]
fn header_repeats_on_every_page() -> TestResult {
    let mut doc = Document::new("unused.pdf");
    doc.add_table(&roster(60), &TableOptions::default())?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert!(pdf.page_count() >= 2);
    for page in 1..=pdf.page_count() as u32 {
        assert_pdf_contains_text!(pdf, page, "Name");
    }
    assert_pdf_contains_text!(pdf, pdf.page_count() as u32, "player-59");
    Ok(())
}

#[test]
fn lone_header_moves_to_the_next_page() -> TestResult {
    let mut doc = Document::new("unused.pdf");
    // Leave less room than a header plus one body row.
    doc.add_space(640.0);
    doc.add_table(&roster(2), &TableOptions::default())?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_eq!(pdf.page_count(), 2);
    let first = pdf.page_text(1)?;
    assert!(!first.contains("Name"), "header stranded on page 1: {:?}", first);
    assert_pdf_contains_text!(pdf, 2, "Name");
    assert_pdf_contains_text!(pdf, 2, "player-0");
    Ok(())
}

#[test]
fn no_header_style_skips_the_header_band() -> TestResult {
    let mut doc = Document::new("unused.pdf");
    let data = TableData::from_rows(vec![vec!["a", "b"], vec!["c", "d"]]);
    doc.add_table(&data, &TableOptions::default().with_style("no_header"))?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_pdf_contains_text!(pdf, 1, "a");
    assert_pdf_contains_text!(pdf, 1, "d");
    Ok(())
}

#[test]
fn records_become_a_table_with_sorted_columns() -> TestResult {
    let records = json!([
        { "name": "ada", "score": 9 },
        { "name": "bob", "score": 4 }
    ]);
    let data = TableData::from_records(&records)?;
    assert_eq!(data.rows[0], vec!["name".to_string(), "score".to_string()]);

    let mut doc = Document::new("unused.pdf");
    doc.add_table(&data, &TableOptions::default())?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_pdf_contains_text!(pdf, 1, "ada");
    assert_pdf_contains_text!(pdf, 1, "score");
    Ok(())
}

#[test]
fn fixed_widths_must_match_column_count() {
    let mut doc = Document::new("unused.pdf");
    let options = TableOptions::default().with_widths(ColumnWidths::Fixed(vec![100.0]));
    let err = doc.add_table(&roster(1), &options).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidTable(_)));
}

#[test]
fn ragged_rows_are_rejected() {
    let mut doc = Document::new("unused.pdf");
    let data = TableData::from_rows(vec![vec!["a", "b"], vec!["only-one"]]);
    let err = doc.add_table(&data, &TableOptions::default()).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidTable(_)));
}

#[test]
fn cell_text_is_centered_in_its_column() -> TestResult {
    let mut doc = Document::new("unused.pdf");
    let data = TableData::from_rows(vec![vec!["ab"]]);
    let options = TableOptions::default()
        .with_style("no_header")
        .with_widths(ColumnWidths::Fixed(vec![200.0]))
        .with_position(TablePosition::Default);
    doc.add_table(&data, &options)?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;

    let pages = pdf.doc.get_pages();
    let content = pdf.doc.get_page_content(pages[&1])?;
    let ops = lopdf::content::Content::decode(&content)?.operations;
    let td = ops
        .iter()
        .find(|op| op.operator == "Td")
        .ok_or("no text positioning operator on the page")?;
    let x = td.operands[0].as_float()?;
    // Two 8pt characters in a 200pt column starting at the left margin.
    let expected = 72.0 + (200.0 - 2.0 * 8.0 * 0.6) / 2.0;
    assert!((x - expected).abs() < 0.01, "text x = {}, expected {}", x, expected);
    Ok(())
}

#[test]
fn long_cells_wrap_inside_their_column() -> TestResult {
    let mut doc = Document::new("unused.pdf");
    let data = TableData::from_rows(vec![
        vec!["Field", "Value"],
        vec![
            "notes",
            "a rather long remark that cannot possibly fit on a single line \
             inside a narrow fixed column",
        ],
    ]);
    let options = TableOptions::default().with_widths(ColumnWidths::Fixed(vec![80.0, 160.0]));
    doc.add_table(&data, &options)?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_pdf_contains_text!(pdf, 1, "rather");
    assert_pdf_contains_text!(pdf, 1, "column");
    Ok(())
}
