//! WorkbookSelections - モデル・シナリオ一覧をワークブックから読む
//!
//! # シート構成
//! - シート `model` と `scenario`
//! - 1 行目はヘッダ、1 列目は行インデックス（捨てる）、2 列目が値

use async_trait::async_trait;
use calamine::{Data, Reader, Sheets, open_workbook_auto_from_rs};
use std::io::{Cursor, Read, Seek};
use std::sync::Arc;
use tracing::info;

use crate::domain::{Location, SelectionLists, SelectionLoadError};
use crate::ports::{ByteSource, SelectionProvider};

pub const MODEL_SHEET: &str = "model";
pub const SCENARIO_SHEET: &str = "scenario";

/// WorkbookSelections は xlsx/xls/ods から一覧を読む
///
/// 取得は `ByteSource` 経由なので、リモートでもローカルでもよい。
pub struct WorkbookSelections {
    location: Location,
    source: Arc<dyn ByteSource>,
}

impl WorkbookSelections {
    pub fn new(location: Location, source: Arc<dyn ByteSource>) -> Self {
        Self { location, source }
    }
}

#[async_trait]
impl SelectionProvider for WorkbookSelections {
    async fn load_selections(&self) -> Result<SelectionLists, SelectionLoadError> {
        let bytes = self.source.fetch(&self.location).await?;
        let lists = tokio::task::spawn_blocking(move || parse_workbook(bytes))
            .await
            .map_err(|e| SelectionLoadError::Workbook(format!("parser task failed: {e}")))??;

        info!(
            workbook = %self.location,
            models = lists.models().len(),
            scenarios = lists.scenarios().len(),
            "selections loaded"
        );
        Ok(lists)
    }
}

/// Parse both sheets out of raw workbook bytes.
pub fn parse_workbook(bytes: Vec<u8>) -> Result<SelectionLists, SelectionLoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SelectionLoadError::Workbook(e.to_string()))?;

    let models = read_sheet(&mut workbook, MODEL_SHEET)?;
    let scenarios = read_sheet(&mut workbook, SCENARIO_SHEET)?;
    Ok(SelectionLists::new(models, scenarios))
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet: &str,
) -> Result<Vec<String>, SelectionLoadError> {
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| SelectionLoadError::MissingSheet {
            sheet: sheet.to_string(),
            reason: e.to_string(),
        })?;

    let values = column_values(range.rows());
    if values.is_empty() {
        return Err(SelectionLoadError::EmptySheet(sheet.to_string()));
    }
    Ok(values)
}

/// Values of the data column: header row dropped, index column dropped,
/// blank cells skipped, text trimmed.
pub fn column_values<'a>(rows: impl IntoIterator<Item = &'a [Data]>) -> Vec<String> {
    rows.into_iter()
        .skip(1)
        .filter_map(|row| row.get(1))
        .filter_map(cell_text)
        .collect()
}

fn cell_text(cell: &Data) -> Option<String> {
    if matches!(cell, Data::Empty) {
        return None;
    }
    let text = cell.to_string().trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemorySource;
    use crate::ports::FetchError;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn header_and_index_column_are_dropped() {
        let rows = vec![
            vec![Data::Empty, s("model")],
            vec![Data::Float(0.0), s("IMAGE")],
            vec![Data::Float(1.0), s(" REMIND ")],
            vec![Data::Float(2.0), s("MESSAGE")],
        ];
        let values = column_values(rows.iter().map(Vec::as_slice));
        assert_eq!(values, vec!["IMAGE", "REMIND", "MESSAGE"]);
    }

    #[test]
    fn blank_cells_and_short_rows_are_skipped() {
        let rows = vec![
            vec![Data::Empty, s("scenario")],
            vec![Data::Int(0), s("SSP1")],
            vec![Data::Int(1), Data::Empty],
            vec![Data::Int(2)],
            vec![Data::Int(3), s("   ")],
            vec![Data::Int(4), s("SSP2")],
        ];
        let values = column_values(rows.iter().map(Vec::as_slice));
        assert_eq!(values, vec!["SSP1", "SSP2"]);
    }

    /// pandas の `to_excel` と同じ並び：A1 は空、1 列目に行番号、2 列目に値
    fn xlsx(sheets: &[(&str, &[&str])]) -> Vec<u8> {
        let mut book = rust_xlsxwriter::Workbook::new();
        for (name, values) in sheets {
            let sheet = book.add_worksheet();
            sheet.set_name(*name).unwrap();
            sheet.write_string(0, 1, *name).unwrap();
            for (i, value) in values.iter().enumerate() {
                let row = i as u32 + 1;
                sheet.write_number(row, 0, i as u32).unwrap();
                sheet.write_string(row, 1, *value).unwrap();
            }
        }
        book.save_to_buffer().unwrap()
    }

    #[test]
    fn both_sheets_are_read_from_a_real_workbook() {
        let bytes = xlsx(&[
            (MODEL_SHEET, &["IMAGE", "REMIND"]),
            (SCENARIO_SHEET, &["SSP1", "SSP2"]),
        ]);
        let lists = parse_workbook(bytes).unwrap();
        assert_eq!(lists.models(), ["IMAGE", "REMIND"]);
        assert_eq!(lists.scenarios(), ["SSP1", "SSP2"]);
    }

    #[test]
    fn missing_scenario_sheet_is_reported_by_name() {
        let bytes = xlsx(&[(MODEL_SHEET, &["IMAGE"])]);
        let err = parse_workbook(bytes).unwrap_err();
        assert!(matches!(
            err,
            SelectionLoadError::MissingSheet { ref sheet, .. } if sheet == SCENARIO_SHEET
        ));
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let bytes = xlsx(&[(MODEL_SHEET, &["IMAGE"]), (SCENARIO_SHEET, &[])]);
        let err = parse_workbook(bytes).unwrap_err();
        assert!(matches!(
            err,
            SelectionLoadError::EmptySheet(ref sheet) if sheet == SCENARIO_SHEET
        ));
    }

    #[tokio::test]
    async fn provider_loads_a_workbook_through_the_source() {
        let url = "https://h/Scope of the study.xlsx";
        let bytes = xlsx(&[(MODEL_SHEET, &["MESSAGE"]), (SCENARIO_SHEET, &["SSP5"])]);
        let source = Arc::new(InMemorySource::new().with_bytes(url, bytes));
        let provider = WorkbookSelections::new(Location::Remote(url.into()), source);

        let lists = provider.load_selections().await.unwrap();
        assert_eq!(lists.default_selection().unwrap().label(), "MESSAGE - SSP5");
    }

    #[test]
    fn garbage_bytes_are_not_a_workbook() {
        let err = parse_workbook(b"not a spreadsheet".to_vec()).unwrap_err();
        assert!(matches!(err, SelectionLoadError::Workbook(_)));
    }

    #[tokio::test]
    async fn unreachable_workbook_is_a_fetch_error() {
        let url = "https://h/Scope of the study.xlsx";
        let source = Arc::new(InMemorySource::new().with_failure(
            url,
            FetchError::Status {
                location: url.into(),
                status: 404,
            },
        ));
        let provider = WorkbookSelections::new(Location::Remote(url.into()), source);
        let err = provider.load_selections().await.unwrap_err();
        assert!(matches!(
            err,
            SelectionLoadError::Fetch(FetchError::Status { status: 404, .. })
        ));
    }
}
