use contracts::shared::reports::TableData;
use leptos::prelude::*;
use thaw::*;

/// Column labels in display order
fn header_labels(data: &TableData) -> Vec<String> {
    data.columns.iter().map(|col| col.label.clone()).collect()
}

/// Cells of every row, in column order
fn body_cells(data: &TableData) -> Vec<Vec<String>> {
    data.rows.iter().map(|row| data.row_values(row)).collect()
}

/// "Showing N of M" when the display limit cut rows off
fn table_caption(data: &TableData) -> Option<String> {
    data.is_truncated()
        .then(|| format!("Showing {} of {}", data.rows.len(), data.total_rows))
}

#[component]
pub fn TableBlock(#[prop(into)] table: Signal<TableData>) -> impl IntoView {
    view! {
        {move || {
            let data = table.get();
            if data.rows.is_empty() {
                return view! {
                    <div class="report-table__empty">"No data available"</div>
                }
                .into_any();
            }

            let caption = table_caption(&data);
            let header = header_labels(&data)
                .into_iter()
                .map(|label| view! { <TableHeaderCell>{label}</TableHeaderCell> })
                .collect_view();
            let rows = body_cells(&data)
                .into_iter()
                .map(|cells| {
                    let cells = cells
                        .into_iter()
                        .map(|cell| view! {
                            <TableCell>
                                <TableCellLayout truncate=true>{cell}</TableCellLayout>
                            </TableCell>
                        })
                        .collect_view();
                    view! { <TableRow>{cells}</TableRow> }
                })
                .collect_view();

            view! {
                <div class="report-table">
                    <Table>
                        <TableHeader>
                            <TableRow>{header}</TableRow>
                        </TableHeader>
                        <TableBody>{rows}</TableBody>
                    </Table>
                    {caption.map(|text| view! { <div class="report-table__caption">{text}</div> })}
                </div>
            }
            .into_any()
        }}
    }
}
