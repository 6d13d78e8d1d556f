// src/experiments/chart.rs
//! Two-panel bar chart (test MAE, train MAE) with std error bars.

use crate::experiments::cv::EvaluationSummary;
use crate::templates::pages::report_page;
use maud::{html, Markup};

const PALETTE: [&str; 6] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b"];

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 800.0;
const PANEL_GAP: f64 = 40.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 140.0;
const Y_TICKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subset {
    Test,
    Train,
}

impl Subset {
    fn title(self) -> &'static str {
        match self {
            Subset::Test => "MAE (Test)",
            Subset::Train => "MAE (Train)",
        }
    }

    fn mean(self, s: &EvaluationSummary) -> f64 {
        match self {
            Subset::Test => s.mae_test_mean,
            Subset::Train => s.mae_train_mean,
        }
    }

    fn std(self, s: &EvaluationSummary) -> f64 {
        match self {
            Subset::Test => s.mae_test_std,
            Subset::Train => s.mae_train_std,
        }
    }
}

/// Full HTML report: chart plus the summary table, best test MAE first.
pub fn visualize_results(results: &[EvaluationSummary], label: &str) -> Markup {
    let mut table: Vec<&EvaluationSummary> = results.iter().collect();
    table.sort_by(|a, b| a.mae_test_mean.total_cmp(&b.mae_test_mean));
    report_page(comparison_chart(results, label), &table)
}

/// Colours follow insertion order; each panel sorts ascending by its own mean.
pub fn comparison_chart(results: &[EvaluationSummary], label: &str) -> Markup {
    let y_max = nice_max(
        results
            .iter()
            .flat_map(|s| {
                [
                    s.mae_test_mean + s.mae_test_std,
                    s.mae_train_mean + s.mae_train_std,
                ]
            })
            .fold(0.0, f64::max),
    );

    let panel_width = (WIDTH - PANEL_GAP) / 2.0;

    html! {
        svg
            xmlns="http://www.w3.org/2000/svg"
            width=(WIDTH)
            height=(HEIGHT)
            viewBox=(format!("0 0 {WIDTH} {HEIGHT}"))
            font-family="sans-serif"
            font-size="12"
        {
            @for (i, subset) in [Subset::Test, Subset::Train].into_iter().enumerate() {
                g transform=(format!("translate({:.1},0)", i as f64 * (panel_width + PANEL_GAP))) {
                    (panel(results, subset, label, panel_width, y_max, i == 0))
                }
            }
        }
    }
}

fn panel(
    results: &[EvaluationSummary],
    subset: Subset,
    label: &str,
    width: f64,
    y_max: f64,
    show_y_labels: bool,
) -> Markup {
    let mut ordered: Vec<(usize, &EvaluationSummary)> = results.iter().enumerate().collect();
    ordered.sort_by(|a, b| subset.mean(a.1).total_cmp(&subset.mean(b.1)));

    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let slot = if ordered.is_empty() { plot_w } else { plot_w / ordered.len() as f64 };
    let bar_w = slot * 0.9;
    let y = |v: f64| MARGIN_TOP + plot_h - (v / y_max) * plot_h;
    let baseline = y(0.0);

    html! {
        text x=(px(MARGIN_LEFT + plot_w / 2.0)) y=(px(MARGIN_TOP - 20.0)) text-anchor="middle" font-size="16" {
            (subset.title())
        }

        @for t in 0..=Y_TICKS {
            @let value = y_max * t as f64 / Y_TICKS as f64;
            line
                x1=(px(MARGIN_LEFT)) x2=(px(MARGIN_LEFT + plot_w))
                y1=(px(y(value))) y2=(px(y(value)))
                stroke="#e5e7eb" {}
            @if show_y_labels {
                text x=(px(MARGIN_LEFT - 8.0)) y=(px(y(value) + 4.0)) text-anchor="end" {
                    (format!("{value:.0}"))
                }
            }
        }

        @for (pos, (color_idx, summary)) in ordered.iter().enumerate() {
            @let mean = subset.mean(summary);
            @let std = subset.std(summary);
            @let cx = MARGIN_LEFT + slot * (pos as f64 + 0.5);
            rect
                x=(px(cx - bar_w / 2.0))
                y=(px(y(mean)))
                width=(px(bar_w))
                height=(px(baseline - y(mean)))
                fill=(PALETTE[color_idx % PALETTE.len()]) {
                title { (summary.preprocessor) ": " (format!("{mean:.2}")) }
            }
            line x1=(px(cx)) x2=(px(cx)) y1=(px(y(mean - std))) y2=(px(y(mean + std))) stroke="#111" {}
            line x1=(px(cx - 6.0)) x2=(px(cx + 6.0)) y1=(px(y(mean + std))) y2=(px(y(mean + std))) stroke="#111" {}
            line x1=(px(cx - 6.0)) x2=(px(cx + 6.0)) y1=(px(y(mean - std))) y2=(px(y(mean - std))) stroke="#111" {}
            text
                x=(px(cx)) y=(px(baseline + 16.0))
                text-anchor="end"
                transform=(format!("rotate(-30 {} {})", px(cx), px(baseline + 16.0)))
            {
                (summary.preprocessor)
            }
        }

        line x1=(px(MARGIN_LEFT)) x2=(px(MARGIN_LEFT + plot_w)) y1=(px(baseline)) y2=(px(baseline)) stroke="#111" {}
        line x1=(px(MARGIN_LEFT)) x2=(px(MARGIN_LEFT)) y1=(px(MARGIN_TOP)) y2=(px(baseline)) stroke="#111" {}

        text x=(px(MARGIN_LEFT + plot_w / 2.0)) y=(px(HEIGHT - 20.0)) text-anchor="middle" {
            (label)
        }
    }
}

/// Round the axis maximum up to 1, 2 or 5 times a power of ten.
fn nice_max(v: f64) -> f64 {
    if v <= 0.0 || !v.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(v.log10().floor());
    let scaled = v / magnitude;
    let step = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn px(v: f64) -> String {
    format!("{v:.1}")
}
