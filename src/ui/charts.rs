use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, ScrollArea, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, LineStyle, Plot,
    PlotPoints, Points, VLine,
};

use crate::color::{self, CountryColors};
use crate::data::aggregate::{
    BoxStats, CorrelationMatrix, CountrySeries, CountryValue, GroupMatrix, HistBin, PivotTable,
    YearValue,
};

pub const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Year ticks: whole years only, no thousands separator.
pub fn fmt_year_tick(mark: GridMark) -> String {
    if (mark.value - mark.value.round()).abs() < 1e-6 {
        format!("{:.0}", mark.value)
    } else {
        String::new()
    }
}

/// Tick formatter for index-positioned category axes: the category name at
/// integer positions, nothing elsewhere.
fn category_tick(categories: &[String], mark: GridMark) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}

/// Compact cell text for heat grids.
fn fmt_compact(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.0}k", v / 1_000.0)
    } else {
        format!("{v:.0}")
    }
}

// ---------------------------------------------------------------------------
// Line / area charts
// ---------------------------------------------------------------------------

/// Filled area of one per-year series.
pub fn area_by_year(ui: &mut Ui, id: &str, title: &str, data: &[YearValue], color: Color32) {
    ui.strong(title);
    let points: PlotPoints = data.iter().map(|yv| [yv.year as f64, yv.value]).collect();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_formatter(|mark, _| fmt_year_tick(mark))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(color).width(1.5).fill(0.0));
        });
}

/// One line per country, colored from the country map.
pub fn lines_by_country(
    ui: &mut Ui,
    id: &str,
    title: &str,
    series: &[CountrySeries],
    colors: &CountryColors,
    percent_axis: bool,
) {
    ui.strong(title);
    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(|mark, _| fmt_year_tick(mark));
    if percent_axis {
        plot = plot.include_y(0.0).include_y(100.0);
    }
    plot.show(ui, |plot_ui| {
        for s in series {
            let points: PlotPoints = s.points.iter().map(|yv| [yv.year as f64, yv.value]).collect();
            plot_ui.line(
                Line::new(points)
                    .name(&s.country)
                    .color(colors.color_for(&s.country))
                    .width(1.5),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Simple per-year bars of one series.
pub fn bars_by_year(ui: &mut Ui, id: &str, title: &str, data: &[YearValue], color: Color32) {
    ui.strong(title);
    let bars: Vec<Bar> = data
        .iter()
        .map(|yv| Bar::new(yv.year as f64, yv.value).width(0.7))
        .collect();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_formatter(|mark, _| fmt_year_tick(mark))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

/// Stacked bars: one bar group per category, one stacked segment per series.
pub fn stacked_matrix_bars(
    ui: &mut Ui,
    id: &str,
    title: &str,
    matrix: &GroupMatrix,
    palette: &[Color32],
) {
    ui.strong(title);
    let categories = matrix.categories.clone();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _| category_tick(&categories, mark))
        .show(ui, |plot_ui| {
            let mut charts: Vec<BarChart> = Vec::new();
            for (i, (label, values)) in matrix.series.iter().enumerate() {
                let bars: Vec<Bar> = values
                    .iter()
                    .enumerate()
                    .map(|(x, &v)| Bar::new(x as f64, v).width(0.7))
                    .collect();
                let chart = {
                    let below: Vec<&BarChart> = charts.iter().collect();
                    BarChart::new(bars)
                        .name(label)
                        .color(palette[i % palette.len()])
                        .stack_on(&below)
                };
                charts.push(chart);
            }
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Grouped (side-by-side) bars: one cluster per category.
pub fn grouped_matrix_bars(
    ui: &mut Ui,
    id: &str,
    title: &str,
    matrix: &GroupMatrix,
    palette: &[Color32],
) {
    ui.strong(title);
    let n_series = matrix.series.len().max(1);
    let bar_width = 0.7 / n_series as f64;
    let categories = matrix.categories.clone();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _| category_tick(&categories, mark))
        .show(ui, |plot_ui| {
            for (i, (label, values)) in matrix.series.iter().enumerate() {
                let offset = (i as f64 + 0.5) * bar_width - 0.35;
                let bars: Vec<Bar> = values
                    .iter()
                    .enumerate()
                    .map(|(x, &v)| Bar::new(x as f64 + offset, v).width(bar_width))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(label)
                        .color(palette[i % palette.len()]),
                );
            }
        });
}

/// Ranked per-country bars, one color per country. Horizontal layout puts
/// countries on the y axis.
pub fn ranked_bars(
    ui: &mut Ui,
    id: &str,
    title: &str,
    data: &[CountryValue],
    colors: &CountryColors,
    horizontal: bool,
) {
    ui.strong(title);
    let names: Vec<String> = data.iter().map(|cv| cv.country.clone()).collect();
    let mut plot = Plot::new(id).height(CHART_HEIGHT);
    if horizontal {
        let names = names.clone();
        plot = plot.y_axis_formatter(move |mark, _| category_tick(&names, mark));
    } else {
        let names = names.clone();
        plot = plot.x_axis_formatter(move |mark, _| category_tick(&names, mark));
    }
    plot.show(ui, |plot_ui| {
        for (i, cv) in data.iter().enumerate() {
            let mut chart = BarChart::new(vec![Bar::new(i as f64, cv.value).width(0.7)])
                .color(colors.color_for(&cv.country));
            if horizontal {
                chart = chart.horizontal();
            }
            plot_ui.bar_chart(chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Per-country scatter with an optional dashed OLS overlay.
pub fn scatter_by_country(
    ui: &mut Ui,
    id: &str,
    title: &str,
    groups: &[(String, Vec<[f64; 2]>)],
    colors: &CountryColors,
    trend: Option<(f64, f64)>,
    x_label: &str,
    y_label: &str,
) {
    ui.strong(title);
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            for (country, points) in groups {
                plot_ui.points(
                    Points::new(points.clone())
                        .name(country)
                        .color(colors.color_for(country))
                        .radius(3.0),
                );
            }
            if let Some((slope, intercept)) = trend {
                let xs: Vec<f64> = groups.iter().flat_map(|(_, p)| p.iter().map(|q| q[0])).collect();
                let lo = xs.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                if lo < hi {
                    let line: PlotPoints =
                        vec![[lo, slope * lo + intercept], [hi, slope * hi + intercept]].into();
                    plot_ui.line(
                        Line::new(line)
                            .name("OLS trend")
                            .color(Color32::DARK_GRAY)
                            .style(LineStyle::dashed_loose())
                            .width(1.5),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Histogram bars with optional mean/median markers.
pub fn histogram_bars(
    ui: &mut Ui,
    id: &str,
    title: &str,
    bins: &[HistBin],
    mean: f64,
    median: f64,
    color: Color32,
) {
    ui.strong(title);
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width((b.upper - b.lower).max(f64::EPSILON)))
        .collect();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
            if mean.is_finite() {
                plot_ui.vline(
                    VLine::new(mean)
                        .name(format!("Mean {mean:.1}"))
                        .color(Color32::RED)
                        .style(LineStyle::dashed_loose()),
                );
            }
            if median.is_finite() {
                plot_ui.vline(
                    VLine::new(median)
                        .name(format!("Median {median:.1}"))
                        .color(Color32::BLUE)
                        .style(LineStyle::dashed_loose()),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// One box per country from its five-number summary.
pub fn box_plots(ui: &mut Ui, id: &str, title: &str, stats: &[(String, BoxStats)], colors: &CountryColors) {
    ui.strong(title);
    let names: Vec<String> = stats.iter().map(|(c, _)| c.clone()).collect();
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _| category_tick(&names, mark))
        .show(ui, |plot_ui| {
            for (i, (country, s)) in stats.iter().enumerate() {
                let elem = BoxElem::new(
                    i as f64,
                    BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max),
                )
                .box_width(0.5);
                plot_ui.box_plot(
                    BoxPlot::new(vec![elem])
                        .name(country)
                        .color(colors.color_for(country)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Heat grids (pivot heatmap, correlation matrix)
// ---------------------------------------------------------------------------

fn heat_cell(ui: &mut Ui, text: &str, background: Color32, width: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 22.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, CornerRadius::same(2), background);
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(10.0),
        color::contrast_text(background),
    );
}

/// Country × year heat grid over a zero-filled pivot table.
pub fn heat_grid(ui: &mut Ui, title: &str, pivot: &PivotTable) {
    ui.strong(title);
    if pivot.is_empty() {
        ui.weak("No data for the current selection.");
        return;
    }
    let max = pivot.max_value();
    ScrollArea::horizontal().id_salt(title.to_string()).show(ui, |ui| {
        egui::Grid::new(title.to_string())
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                ui.label("");
                for year in &pivot.years {
                    ui.small(year.to_string());
                }
                ui.end_row();

                for (r, country) in pivot.countries.iter().enumerate() {
                    ui.small(country);
                    for c in 0..pivot.years.len() {
                        let v = pivot.values[r][c];
                        let t = if max > 0.0 { (v / max) as f32 } else { 0.0 };
                        heat_cell(ui, &fmt_compact(v), color::sequential(t), 46.0);
                    }
                    ui.end_row();
                }
            });
    });
}

/// Correlation matrix as a diverging heat grid. NaN cells render dimmed.
pub fn corr_grid(ui: &mut Ui, title: &str, corr: &CorrelationMatrix) {
    ui.strong(title);
    egui::Grid::new(title.to_string())
        .spacing([2.0, 2.0])
        .show(ui, |ui| {
            ui.label("");
            for label in &corr.labels {
                ui.small(*label);
            }
            ui.end_row();

            for (r, label) in corr.labels.iter().enumerate() {
                ui.small(*label);
                for c in 0..corr.labels.len() {
                    let v = corr.values[r][c];
                    if v.is_nan() {
                        heat_cell(ui, "–", Color32::from_gray(60), 90.0);
                    } else {
                        heat_cell(ui, &format!("{v:.2}"), color::diverging(v as f32), 90.0);
                    }
                }
                ui.end_row();
            }
        });
}
