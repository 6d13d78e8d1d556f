// templates/pages/report.rs
use crate::experiments::EvaluationSummary;
use crate::templates::desktop_layout;
use chrono::Utc;
use maud::{html, Markup};

pub fn report_page(chart: Markup, rows: &[&EvaluationSummary]) -> Markup {
    desktop_layout(
        "Model selection",
        html! {
            main class="container" {
                h1 { "Model selection" }
                p class="hint" { "Generated " (Utc::now().format("%Y-%m-%d %H:%M UTC")) }

                div class="chart" { (chart) }

                table class="results" {
                    thead {
                        tr {
                            th { "Preprocessor" }
                            th { "MAE test (mean)" }
                            th { "MAE test (std)" }
                            th { "MAE train (mean)" }
                            th { "MAE train (std)" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td { (row.preprocessor) }
                                td { (format!("{:.2}", row.mae_test_mean)) }
                                td { (format!("{:.2}", row.mae_test_std)) }
                                td { (format!("{:.2}", row.mae_train_mean)) }
                                td { (format!("{:.2}", row.mae_train_std)) }
                            }
                        }
                    }
                }
            }
        },
    )
}
