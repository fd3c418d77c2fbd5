/// Default export handler for report tables (CSV download in the browser)
use contracts::shared::reports::{ExportFormat, ExportRequest, TableData};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Handles an export request from a report view.
///
/// - `csv`   — comma-separated download
/// - `excel` — semicolon-separated CSV with a UTF-8 BOM, as Excel expects
/// - `pdf`   — logged only; rendering PDFs is left to the backend
pub fn export_report(request: &ExportRequest) -> Result<(), String> {
    match request.format {
        ExportFormat::Csv => {
            let content = build_csv(&request.table, ',', false)?;
            download_csv(&content, &export_file_name(request))
        }
        ExportFormat::Excel => {
            let content = build_csv(&request.table, ';', true)?;
            download_csv(&content, &export_file_name(request))
        }
        ExportFormat::Pdf => {
            log::info!(
                "PDF export requested for {} ({} rows)",
                request.report_id,
                request.table.total_rows
            );
            Ok(())
        }
    }
}

/// `{report_id}_{from}_{to}.csv`, date part omitted when unfiltered
pub fn export_file_name(request: &ExportRequest) -> String {
    match &request.criteria.date_range {
        Some(range) => format!("{}_{}_{}.csv", request.report_id, range.from, range.to),
        None => format!("{}.csv", request.report_id),
    }
}

/// Header row of column labels, then one line per row in column order
pub fn build_csv(table: &TableData, delimiter: char, with_bom: bool) -> Result<String, String> {
    if table.rows.is_empty() {
        return Err("No data to export".to_string());
    }

    let mut csv_content = String::new();
    if with_bom {
        csv_content.push('\u{FEFF}');
    }

    let separator = delimiter.to_string();
    let headers: Vec<String> = table
        .columns
        .iter()
        .map(|c| escape_csv_cell(&c.label, delimiter))
        .collect();
    csv_content.push_str(&headers.join(&separator));
    csv_content.push('\n');

    for row in &table.rows {
        let cells: Vec<String> = table
            .row_values(row)
            .iter()
            .map(|cell| escape_csv_cell(cell, delimiter))
            .collect();
        csv_content.push_str(&cells.join(&separator));
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Quotes a cell holding the delimiter, quotes or line breaks
fn escape_csv_cell(cell: &str, delimiter: char) -> String {
    if cell.contains(delimiter) || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
