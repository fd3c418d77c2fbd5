use super::format::format_value;
use super::payload::{lookup, ReportPayload};
use contracts::shared::reports::{ColumnSpec, TableColumn, TableData, TableRow, TableSpec};
use serde_json::Value;

/// Projects the table spec's record list.
///
/// `default_max_rows` applies when the spec declares no limit; `None`
/// keeps every row (used for export).
pub fn project_table(
    payload: &ReportPayload,
    spec: &TableSpec,
    default_max_rows: Option<usize>,
) -> TableData {
    let records: &[Value] = if spec.path.is_empty() {
        payload.root().as_array().map(Vec::as_slice).unwrap_or(&[])
    } else {
        payload.records(&spec.path)
    };
    project_records(records, &spec.columns, spec.max_rows.or(default_max_rows))
}

/// Like `project_table` but without any row limit
pub fn project_full_table(payload: &ReportPayload, spec: &TableSpec) -> TableData {
    let unlimited = TableSpec {
        max_rows: None,
        ..spec.clone()
    };
    project_table(payload, &unlimited, None)
}

pub fn project_records(
    records: &[Value],
    columns: &[ColumnSpec],
    max_rows: Option<usize>,
) -> TableData {
    let limit = max_rows.unwrap_or(records.len());
    let rows = records
        .iter()
        .take(limit)
        .map(|record| project_row(record, columns))
        .collect();

    TableData {
        columns: columns
            .iter()
            .map(|c| TableColumn {
                key: c.key.clone(),
                label: c.label.clone(),
            })
            .collect(),
        rows,
        total_rows: records.len(),
    }
}

fn project_row(record: &Value, columns: &[ColumnSpec]) -> TableRow {
    let mut row = TableRow::default();
    for column in columns {
        let value = lookup(record, column.source_path()).unwrap_or(&column.default);
        row.cells.insert(
            column.key.clone(),
            format_value(value, column.format, column.decimals),
        );
    }
    row
}
