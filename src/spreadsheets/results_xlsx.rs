use crate::errors::ServerError;
use crate::experiments::EvaluationSummary;
use rust_xlsxwriter::{Chart, ChartType, Workbook};

const SHEET: &str = "Results";

/// Summary table, best test MAE first, with a grouped column chart
/// of test and train MAE beside it.
pub fn export_results_xlsx(results: &[EvaluationSummary], label: &str) -> Result<Vec<u8>, ServerError> {
    let mut rows: Vec<&EvaluationSummary> = results.iter().collect();
    rows.sort_by(|a, b| a.mae_test_mean.total_cmp(&b.mae_test_mean));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET)
        .map_err(|e| ServerError::XlsxError(format!("Failed to name sheet: {}", e)))?;

    // Headers
    let headers = [
        "Preprocessor",
        "MAE test (mean)",
        "MAE test (std)",
        "MAE train (mean)",
        "MAE train (std)",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, summary) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &summary.preprocessor)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write name: {}", e)))?;

        let numbers = [
            summary.mae_test_mean,
            summary.mae_test_std,
            summary.mae_train_mean,
            summary.mae_train_std,
        ];
        for (offset, value) in numbers.into_iter().enumerate() {
            worksheet
                .write_number(r, (offset + 1) as u16, value)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write score: {}", e)))?;
        }
    }

    if !rows.is_empty() {
        let last = rows.len() as u32;
        let mut chart = Chart::new(ChartType::Column);

        chart
            .add_series()
            .set_name("MAE (Test)")
            .set_categories((SHEET, 1, 0, last, 0))
            .set_values((SHEET, 1, 1, last, 1));
        chart
            .add_series()
            .set_name("MAE (Train)")
            .set_categories((SHEET, 1, 0, last, 0))
            .set_values((SHEET, 1, 3, last, 3));

        chart.title().set_name("Cross-validated MAE");
        chart.x_axis().set_name(label);
        chart.y_axis().set_name("MAE");

        worksheet
            .insert_chart(1, 7, &chart)
            .map_err(|e| ServerError::XlsxError(format!("Failed to insert chart: {}", e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}
