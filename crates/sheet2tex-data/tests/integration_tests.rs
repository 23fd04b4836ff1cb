//! Integration tests for sheet2tex-data

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use sheet2tex_data::{
    Cell, ColumnKind, DataError, DataSource, ExcelSource, LoadOptions, SourceKind, TableLoader,
};

/// Write a workbook with a "Pivot" sheet (header + 3 rows) and an empty
/// "Notes" sheet
fn write_pivot_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("pivot.xlsx");
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Pivot").unwrap();
    sheet.write_string(0, 0, "Region").unwrap();
    sheet.write_string(0, 1, "Sales").unwrap();
    sheet.write_string(0, 2, "Share").unwrap();
    sheet.write_string(1, 0, "North").unwrap();
    sheet.write_number(1, 1, 1500).unwrap();
    sheet.write_number(1, 2, 0.25).unwrap();
    sheet.write_string(2, 0, "South").unwrap();
    sheet.write_number(2, 1, 2500).unwrap();
    sheet.write_number(2, 2, 0.75).unwrap();
    sheet.write_string(3, 0, "Total").unwrap();
    sheet.write_number(3, 1, 4000).unwrap();
    sheet.write_number(3, 2, 1).unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();

    workbook.save(&path).unwrap();
    path
}

fn excel_options(sheet: &str, header_row: bool) -> LoadOptions {
    LoadOptions {
        kind: SourceKind::Excel,
        sheet_name: sheet.to_string(),
        header_row,
        ..Default::default()
    }
}

#[test]
fn test_excel_list_sheets() {
    let dir = TempDir::new().unwrap();
    let path = write_pivot_workbook(dir.path());

    let source = ExcelSource::new(&path).expect("Failed to open Excel file");
    assert_eq!(source.list_sheets().unwrap(), vec!["Pivot", "Notes"]);
    assert_eq!(source.default_sheet(), Some("Pivot".to_string()));
}

#[test]
fn test_excel_load_with_header() {
    let dir = TempDir::new().unwrap();
    let path = write_pivot_workbook(dir.path());

    let table = TableLoader::load(&path, &excel_options("Pivot", true)).unwrap();

    assert_eq!(table.header().unwrap(), ["Region", "Sales", "Share"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows()[0][1], Cell::Int(1500));
    assert_eq!(table.rows()[0][2], Cell::Float(0.25));
    assert_eq!(table.rows()[2][2], Cell::Int(1));
    assert_eq!(
        table.column_kinds(),
        vec![ColumnKind::Textual, ColumnKind::Numeric, ColumnKind::Numeric]
    );
}

#[test]
fn test_excel_load_without_header() {
    let dir = TempDir::new().unwrap();
    let path = write_pivot_workbook(dir.path());

    let table = TableLoader::load(&path, &excel_options("Pivot", false)).unwrap();

    assert!(table.header().is_none());
    assert_eq!(table.row_count(), 4);
    // The header text now sits in the body, so no column is numeric
    assert!(table.column_kinds().iter().all(|k| *k == ColumnKind::Textual));
}

#[test]
fn test_excel_invalid_sheet_name() {
    let dir = TempDir::new().unwrap();
    let path = write_pivot_workbook(dir.path());

    let result = TableLoader::load(&path, &excel_options("Sheet1", true));
    match result {
        Err(DataError::SheetNotFound { name, available }) => {
            assert_eq!(name, "Sheet1");
            assert_eq!(available, vec!["Pivot", "Notes"]);
        }
        other => panic!("Expected SheetNotFound, got {:?}", other),
    }
}

#[test]
fn test_excel_empty_sheet() {
    let dir = TempDir::new().unwrap();
    let path = write_pivot_workbook(dir.path());

    let result = TableLoader::load(&path, &excel_options("Notes", true));
    assert!(matches!(result, Err(DataError::EmptyTable(_))));
}

#[test]
fn test_excel_file_not_found() {
    let result = TableLoader::load("/nonexistent/path/file.xlsx", &excel_options("Sheet1", true));
    assert!(matches!(result, Err(DataError::FileNotFound(_))));
}

#[test]
fn test_excel_flag_on_text_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pivot.csv");
    std::fs::write(&path, "A,B\n1,2\n").unwrap();

    let result = TableLoader::load(&path, &excel_options("Sheet1", true));
    assert!(matches!(result, Err(DataError::WorkbookOpen(_))));
}

#[test]
fn test_csv_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pivot.csv");
    std::fs::write(&path, "Name,Total\nA,1000\n,\nB,2000\n").unwrap();

    let table = TableLoader::load(&path, &LoadOptions::delimited()).unwrap();

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[1], vec![Cell::Text("B".to_string()), Cell::Int(2000)]);
    assert_eq!(
        table.column_kinds(),
        vec![ColumnKind::Textual, ColumnKind::Numeric]
    );
}

#[test]
fn test_csv_sheet_name_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pivot.csv");
    std::fs::write(&path, "Name,Total\nA,1\n").unwrap();

    let options = LoadOptions {
        sheet_name: "DoesNotMatter".to_string(),
        ..LoadOptions::delimited()
    };
    assert!(TableLoader::load(&path, &options).is_ok());
}

#[test]
fn test_csv_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let result = TableLoader::load(&path, &LoadOptions::delimited());
    assert!(matches!(result, Err(DataError::EmptyTable(_))));
}

#[test]
fn test_csv_unicode_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unicode.csv");
    std::fs::write(&path, "Name,City\nHéléne,Zürich\nТест,Москва\n日本語,東京\n").unwrap();

    let table = TableLoader::load(&path, &LoadOptions::delimited()).unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows()[1][0], Cell::Text("Тест".to_string()));
    assert_eq!(table.rows()[2][1], Cell::Text("東京".to_string()));
}

#[test]
fn test_list_sheets_delimited() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pivot.csv");
    std::fs::write(&path, "A\n1\n").unwrap();

    let sheets = TableLoader::list_sheets(&path, SourceKind::Delimited).unwrap();
    assert_eq!(sheets, vec!["data"]);
}
