use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoryCol, Dataset, Metric, ObservationRow};

// ---------------------------------------------------------------------------
// Summary row types
// ---------------------------------------------------------------------------

/// One (year, value) cell of a per-year summary.
#[derive(Debug, Clone, PartialEq)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// One (country, value) cell of a per-country summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryValue {
    pub country: String,
    pub value: f64,
}

/// A per-country time series, points in ascending year order.
#[derive(Debug, Clone)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<YearValue>,
}

/// Row count for one (primary, secondary) categorical combination.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCount {
    pub primary: String,
    pub secondary: String,
    pub count: u64,
}

/// Summed metric for one (primary, secondary) categorical combination.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSum {
    pub primary: String,
    pub secondary: String,
    pub value: f64,
}

/// Cross-tab: rows = countries, columns = years, cell = summed metric.
/// Every |countries| × |years| cell is present; absent combinations hold 0.0.
#[derive(Debug, Clone)]
pub struct PivotTable {
    pub countries: Vec<String>,
    pub years: Vec<i32>,
    /// Row-major: `values[country][year]`.
    pub values: Vec<Vec<f64>>,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() || self.years.is_empty()
    }

    /// Largest cell value, for color scaling.
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .cloned()
            .fold(0.0_f64, f64::max)
    }
}

/// Pairwise Pearson correlations over [`Metric::CORRELATION_SET`].
/// Cells are NaN when undefined (< 2 rows, or zero variance).
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<&'static str>,
    pub values: Vec<Vec<f64>>,
}

/// Five-number summary for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// One histogram bin over `[lower, upper)` (the last bin is inclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct HistBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl HistBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// Country → channel → category summary (summed buyers, mean spend).
#[derive(Debug, Clone)]
pub struct BreakdownRow {
    pub country: String,
    pub channel: String,
    pub category: String,
    pub buyers: u64,
    pub mean_spend: f64,
}

/// The six headline figures. Sums are 0 and means NaN on an empty view.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub total_buyers: u64,
    pub total_spend_usd: f64,
    pub total_items: u64,
    pub mean_age: f64,
    pub mean_satisfied: f64,
    pub mean_recommend: f64,
}

/// Chart-ready pivot of a pair table: one bar group per category, one
/// series per distinct secondary label, absent combinations filled with 0.
#[derive(Debug, Clone)]
pub struct GroupMatrix {
    pub categories: Vec<String>,
    pub series: Vec<(String, Vec<f64>)>,
}

impl GroupMatrix {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String, f64)>) -> Self {
        let mut cells: BTreeMap<(String, String), f64> = BTreeMap::new();
        let mut categories: BTreeSet<String> = BTreeSet::new();
        let mut labels: BTreeSet<String> = BTreeSet::new();

        for (primary, secondary, value) in pairs {
            categories.insert(primary.clone());
            labels.insert(secondary.clone());
            *cells.entry((primary, secondary)).or_insert(0.0) += value;
        }

        let categories: Vec<String> = categories.into_iter().collect();
        let series = labels
            .into_iter()
            .map(|label| {
                let values = categories
                    .iter()
                    .map(|cat| {
                        cells
                            .get(&(cat.clone(), label.clone()))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .collect();
                (label, values)
            })
            .collect();

        GroupMatrix { categories, series }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// View helpers
// ---------------------------------------------------------------------------

fn rows_in<'a>(
    dataset: &'a Dataset,
    indices: &'a [usize],
) -> impl Iterator<Item = &'a ObservationRow> + 'a {
    indices.iter().map(move |&i| &dataset.rows[i])
}

/// All values of one metric across the view, in view order.
pub fn metric_values(dataset: &Dataset, indices: &[usize], metric: Metric) -> Vec<f64> {
    rows_in(dataset, indices).map(|r| metric.get(r)).collect()
}

/// Distinct countries present in the view, sorted.
pub fn countries_in_view(dataset: &Dataset, indices: &[usize]) -> Vec<String> {
    let set: BTreeSet<&str> = rows_in(dataset, indices)
        .map(|r| r.country.as_str())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// Reductions – each is a pure function of the filtered view
// ---------------------------------------------------------------------------

/// Group by year, sum a metric. One row per distinct year, ascending.
pub fn sum_by_year(dataset: &Dataset, indices: &[usize], metric: Metric) -> Vec<YearValue> {
    let mut sums: BTreeMap<i32, f64> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        *sums.entry(row.year).or_insert(0.0) += metric.get(row);
    }
    sums.into_iter()
        .map(|(year, value)| YearValue { year, value })
        .collect()
}

/// Sum a metric per year, then running-total across ascending years.
pub fn cumulative_by_year(dataset: &Dataset, indices: &[usize], metric: Metric) -> Vec<YearValue> {
    let mut running = 0.0;
    sum_by_year(dataset, indices, metric)
        .into_iter()
        .map(|yv| {
            running += yv.value;
            YearValue {
                year: yv.year,
                value: running,
            }
        })
        .collect()
}

fn by_country(
    dataset: &Dataset,
    indices: &[usize],
    metric: Metric,
    reduce: impl Fn(&[f64]) -> f64,
) -> Vec<CountryValue> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        groups.entry(&row.country).or_default().push(metric.get(row));
    }
    let mut out: Vec<CountryValue> = groups
        .into_iter()
        .map(|(country, values)| CountryValue {
            country: country.to_string(),
            value: reduce(&values),
        })
        .collect();
    // Ranking order: descending value, ties broken by name.
    out.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.country.cmp(&b.country))
    });
    out
}

/// Group by country, sum a metric. Descending by sum.
pub fn sum_by_country(dataset: &Dataset, indices: &[usize], metric: Metric) -> Vec<CountryValue> {
    by_country(dataset, indices, metric, |vals| vals.iter().sum())
}

/// Group by country, arithmetic mean of a metric. Descending by mean.
pub fn mean_by_country(dataset: &Dataset, indices: &[usize], metric: Metric) -> Vec<CountryValue> {
    by_country(dataset, indices, metric, mean)
}

/// Per-country time series of a metric, ascending years within each series.
pub fn series_by_country(
    dataset: &Dataset,
    indices: &[usize],
    metric: Metric,
) -> Vec<CountrySeries> {
    let mut groups: BTreeMap<&str, BTreeMap<i32, f64>> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        groups
            .entry(&row.country)
            .or_default()
            .insert(row.year, metric.get(row));
    }
    groups
        .into_iter()
        .map(|(country, points)| CountrySeries {
            country: country.to_string(),
            points: points
                .into_iter()
                .map(|(year, value)| YearValue { year, value })
                .collect(),
        })
        .collect()
}

/// Cross-tab: country rows × year columns, cells = summed metric,
/// missing combinations filled with 0 so encodings stay well-defined.
pub fn pivot_sum(dataset: &Dataset, indices: &[usize], metric: Metric) -> PivotTable {
    let mut countries: BTreeSet<&str> = BTreeSet::new();
    let mut years: BTreeSet<i32> = BTreeSet::new();
    let mut cells: BTreeMap<(&str, i32), f64> = BTreeMap::new();

    for row in rows_in(dataset, indices) {
        countries.insert(row.country.as_str());
        years.insert(row.year);
        *cells.entry((row.country.as_str(), row.year)).or_insert(0.0) += metric.get(row);
    }

    let countries: Vec<String> = countries.iter().map(|c| c.to_string()).collect();
    let years: Vec<i32> = years.into_iter().collect();
    let values = countries
        .iter()
        .map(|country| {
            years
                .iter()
                .map(|&year| {
                    cells
                        .get(&(country.as_str(), year))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect();

    PivotTable {
        countries,
        years,
        values,
    }
}

/// Group by two categorical columns, count rows per combination. Sorted by
/// (primary, secondary).
pub fn group_count(
    dataset: &Dataset,
    indices: &[usize],
    primary: CategoryCol,
    secondary: CategoryCol,
) -> Vec<PairCount> {
    let mut counts: BTreeMap<(String, String), u64> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        *counts
            .entry((primary.value(row), secondary.value(row)))
            .or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((primary, secondary), count)| PairCount {
            primary,
            secondary,
            count,
        })
        .collect()
}

/// Group by two categorical columns, sum a metric per combination.
pub fn group_sum(
    dataset: &Dataset,
    indices: &[usize],
    primary: CategoryCol,
    secondary: CategoryCol,
    metric: Metric,
) -> Vec<PairSum> {
    let mut sums: BTreeMap<(String, String), f64> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        *sums
            .entry((primary.value(row), secondary.value(row)))
            .or_insert(0.0) += metric.get(row);
    }
    sums.into_iter()
        .map(|((primary, secondary), value)| PairSum {
            primary,
            secondary,
            value,
        })
        .collect()
}

/// Country → channel → category: summed buyers and mean spend per group,
/// sorted by descending buyers.
pub fn channel_category_breakdown(dataset: &Dataset, indices: &[usize]) -> Vec<BreakdownRow> {
    let mut groups: BTreeMap<(String, String, String), (u64, Vec<f64>)> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        let entry = groups
            .entry((
                row.country.clone(),
                row.top_channel.clone(),
                row.top_category.clone(),
            ))
            .or_insert((0, Vec::new()));
        entry.0 += row.total_buyers;
        entry.1.push(row.avg_spend_usd);
    }
    let mut out: Vec<BreakdownRow> = groups
        .into_iter()
        .map(|((country, channel, category), (buyers, spends))| BreakdownRow {
            country,
            channel,
            category,
            buyers,
            mean_spend: mean(&spends),
        })
        .collect();
    out.sort_by(|a, b| b.buyers.cmp(&a.buyers).then_with(|| a.country.cmp(&b.country)));
    out
}

/// The six headline figures of the dashboard.
pub fn kpis(dataset: &Dataset, indices: &[usize]) -> Kpis {
    let mut total_buyers = 0u64;
    let mut total_spend_usd = 0.0;
    let mut total_items = 0u64;
    let mut ages = Vec::with_capacity(indices.len());
    let mut satisfied = Vec::with_capacity(indices.len());
    let mut recommend = Vec::with_capacity(indices.len());

    for row in rows_in(dataset, indices) {
        total_buyers += row.total_buyers;
        total_spend_usd += row.total_spend_usd;
        total_items += row.total_items;
        ages.push(row.avg_age);
        satisfied.push(row.pct_satisfied);
        recommend.push(row.pct_recommend);
    }

    Kpis {
        total_buyers,
        total_spend_usd,
        total_items,
        mean_age: mean(&ages),
        mean_satisfied: mean(&satisfied),
        mean_recommend: mean(&recommend),
    }
}

/// Scatter points of (x metric, y metric), grouped by country.
pub fn points_by_country(
    dataset: &Dataset,
    indices: &[usize],
    x: Metric,
    y: Metric,
) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut groups: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        groups
            .entry(&row.country)
            .or_default()
            .push([x.get(row), y.get(row)]);
    }
    groups
        .into_iter()
        .map(|(country, points)| (country.to_string(), points))
        .collect()
}

/// Five-number summary of one metric per country, countries sorted.
pub fn spread_by_country(
    dataset: &Dataset,
    indices: &[usize],
    metric: Metric,
) -> Vec<(String, BoxStats)> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in rows_in(dataset, indices) {
        groups.entry(&row.country).or_default().push(metric.get(row));
    }
    groups
        .into_iter()
        .filter_map(|(country, values)| box_stats(&values).map(|s| (country.to_string(), s)))
        .collect()
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean; NaN for an empty slice (undefined statistic, never an
/// error).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Linearly interpolated quantile over a sorted slice (0 ≤ q ≤ 1).
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Five-number summary; `None` for an empty slice.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(BoxStats {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Equal-width histogram over [min, max]. Degenerate input (single value)
/// collapses to one bin; empty input yields no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;
    if width <= 0.0 {
        return vec![HistBin {
            lower: min,
            upper: max,
            count: values.len() as u64,
        }];
    }

    let mut counts = vec![0u64; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Ordinary least-squares fit: `Some((slope, intercept))`, or `None` when
/// fewer than two points or zero x-variance.
pub fn linear_fit(points: &[[f64; 2]]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for p in points {
        sxx += (p[0] - mean_x) * (p[0] - mean_x);
        sxy += (p[0] - mean_x) * (p[1] - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

/// Pearson correlation; NaN when fewer than two points or either side has
/// zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return f64::NAN;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        sxx += (x - mean_x) * (x - mean_x);
        syy += (y - mean_y) * (y - mean_y);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx.sqrt() * syy.sqrt())
}

/// Pairwise Pearson correlation over [`Metric::CORRELATION_SET`].
///
/// A view with fewer than two rows produces an all-NaN matrix rather than
/// failing, so rendering has one uniform path.
pub fn correlation_matrix(dataset: &Dataset, indices: &[usize]) -> CorrelationMatrix {
    let metrics = Metric::CORRELATION_SET;
    let labels: Vec<&'static str> = metrics.iter().map(|m| m.label()).collect();
    let columns: Vec<Vec<f64>> = metrics
        .iter()
        .map(|&m| metric_values(dataset, indices, m))
        .collect();

    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson(a, b)).collect())
        .collect();

    CorrelationMatrix { labels, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{all_countries, filtered_indices};

    fn row(country: &str, year: i32, buyers: u64, avg_spend: f64) -> ObservationRow {
        ObservationRow {
            country: country.to_string(),
            year,
            total_buyers: buyers,
            total_spend_usd: buyers as f64 * avg_spend,
            avg_spend_usd: avg_spend,
            avg_income_usd: avg_spend * 40.0,
            total_items: buyers * 3,
            avg_items: 3.0,
            avg_age: 30.0 + (year - 2000) as f64 * 0.1,
            pct_satisfied: 80.0,
            pct_recommend: 75.0,
            pct_first_time: 20.0,
            top_channel: if year % 2 == 0 { "Online" } else { "Mercado" }.to_string(),
            top_platform: "Vinted".to_string(),
            top_category: "Ropa casual".to_string(),
            top_motivation: "Precio".to_string(),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_rows(vec![
            row("Perú", 2020, 100, 20.0),
            row("Perú", 2021, 150, 22.0),
            row("Perú", 2022, 160, 24.0),
            row("México", 2020, 80, 30.0),
            row("México", 2021, 85, 31.0),
            row("Chile", 2022, 61, 40.0),
        ])
    }

    fn full(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn sum_by_year_is_ascending_with_one_row_per_year() {
        let ds = sample();
        let sums = sum_by_year(&ds, &full(&ds), Metric::TotalBuyers);
        let years: Vec<i32> = sums.iter().map(|yv| yv.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
        assert_eq!(sums[0].value, 180.0); // Perú 100 + México 80
        assert_eq!(sums[1].value, 235.0);
        assert_eq!(sums[2].value, 221.0);
    }

    #[test]
    fn sum_by_year_is_additive_over_country_partitions() {
        // Sum over the full table equals the sum of sums over any partition
        // of the table by disjoint country subsets.
        let ds = sample();
        let whole = sum_by_year(&ds, &full(&ds), Metric::TotalBuyers);

        let part_a: crate::data::filter::CountrySelection =
            ["Perú"].iter().map(|s| s.to_string()).collect();
        let part_b: crate::data::filter::CountrySelection =
            ["México", "Chile"].iter().map(|s| s.to_string()).collect();
        let sums_a = sum_by_year(&ds, &filtered_indices(&ds, (2000, 2026), &part_a), Metric::TotalBuyers);
        let sums_b = sum_by_year(&ds, &filtered_indices(&ds, (2000, 2026), &part_b), Metric::TotalBuyers);

        let mut combined: BTreeMap<i32, f64> = BTreeMap::new();
        for yv in sums_a.iter().chain(&sums_b) {
            *combined.entry(yv.year).or_insert(0.0) += yv.value;
        }
        for yv in &whole {
            assert_eq!(combined.get(&yv.year), Some(&yv.value));
        }
    }

    #[test]
    fn cumulative_sum_is_monotonic_for_nonnegative_metrics() {
        let ds = sample();
        let cum = cumulative_by_year(&ds, &full(&ds), Metric::TotalSpend);
        assert!(cum.windows(2).all(|w| w[0].value <= w[1].value));
        let last = cum.last().unwrap();
        let total: f64 = metric_values(&ds, &full(&ds), Metric::TotalSpend).iter().sum();
        assert!((last.value - total).abs() < 1e-9);
    }

    #[test]
    fn mean_by_country_ranks_descending() {
        let ds = sample();
        let means = mean_by_country(&ds, &full(&ds), Metric::AvgSpend);
        assert_eq!(means[0].country, "Chile");
        assert_eq!(means[0].value, 40.0);
        assert!(means.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn pivot_has_every_cell_filled() {
        let ds = sample();
        let all = all_countries(&ds);
        let indices = filtered_indices(&ds, (2000, 2026), &all);
        let pivot = pivot_sum(&ds, &indices, Metric::TotalBuyers);

        assert_eq!(pivot.countries.len(), 3);
        assert_eq!(pivot.years.len(), 3);
        assert_eq!(pivot.values.len(), 3);
        assert!(pivot.values.iter().all(|r| r.len() == 3));

        // Chile has no 2020/2021 rows: filled with 0, not a missing marker.
        let chile = pivot.countries.iter().position(|c| c == "Chile").unwrap();
        let y2020 = pivot.years.iter().position(|&y| y == 2020).unwrap();
        assert_eq!(pivot.values[chile][y2020], 0.0);
        let y2022 = pivot.years.iter().position(|&y| y == 2022).unwrap();
        assert_eq!(pivot.values[chile][y2022], 61.0);
    }

    #[test]
    fn group_count_totals_match_view_length() {
        let ds = sample();
        let counts = group_count(&ds, &full(&ds), CategoryCol::Country, CategoryCol::TopChannel);
        let total: u64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total as usize, ds.len());

        let peru_online = counts
            .iter()
            .find(|c| c.primary == "Perú" && c.secondary == "Online")
            .unwrap();
        assert_eq!(peru_online.count, 2); // buyers 100 and 160
    }

    #[test]
    fn group_sum_by_year_uses_four_digit_labels() {
        let ds = sample();
        let sums = group_sum(
            &ds,
            &full(&ds),
            CategoryCol::Year,
            CategoryCol::TopChannel,
            Metric::TotalBuyers,
        );
        assert!(sums.iter().all(|p| p.primary.len() == 4));
    }

    #[test]
    fn empty_view_yields_empty_well_typed_summaries() {
        let ds = sample();
        let empty: Vec<usize> = Vec::new();

        assert!(sum_by_year(&ds, &empty, Metric::TotalBuyers).is_empty());
        assert!(mean_by_country(&ds, &empty, Metric::AvgSpend).is_empty());
        assert!(cumulative_by_year(&ds, &empty, Metric::TotalSpend).is_empty());
        assert!(group_count(&ds, &empty, CategoryCol::Country, CategoryCol::TopChannel).is_empty());
        assert!(pivot_sum(&ds, &empty, Metric::TotalBuyers).is_empty());

        let k = kpis(&ds, &empty);
        assert_eq!(k.total_buyers, 0);
        assert_eq!(k.total_spend_usd, 0.0);
        assert_eq!(k.total_items, 0);
        assert!(k.mean_age.is_nan());
        assert!(k.mean_satisfied.is_nan());

        let corr = correlation_matrix(&ds, &empty);
        assert_eq!(corr.labels.len(), 5);
        assert!(corr.values.iter().flatten().all(|v| v.is_nan()));
    }

    #[test]
    fn correlation_is_nan_below_two_rows_and_defined_above() {
        let ds = sample();
        let one = vec![0usize];
        assert!(correlation_matrix(&ds, &one)
            .values
            .iter()
            .flatten()
            .all(|v| v.is_nan()));

        let corr = correlation_matrix(&ds, &full(&ds));
        // Diagonal of a varying column is exactly 1.
        let spend = Metric::CORRELATION_SET
            .iter()
            .position(|&m| m == Metric::AvgSpend)
            .unwrap();
        assert!((corr.values[spend][spend] - 1.0).abs() < 1e-12);
        // avg_income is avg_spend * 40 in the fixture: perfectly correlated.
        let income = Metric::CORRELATION_SET
            .iter()
            .position(|&m| m == Metric::AvgIncome)
            .unwrap();
        assert!((corr.values[spend][income] - 1.0).abs() < 1e-12);
        // Zero-variance column (avg_items is constant): NaN, not an error.
        let items = Metric::CORRELATION_SET
            .iter()
            .position(|&m| m == Metric::AvgItems)
            .unwrap();
        assert!(corr.values[items][items].is_nan());
    }

    #[test]
    fn kpis_sum_and_average_the_right_columns() {
        let ds = sample();
        let k = kpis(&ds, &full(&ds));
        assert_eq!(k.total_buyers, 100 + 150 + 160 + 80 + 85 + 61);
        assert_eq!(k.total_items, k.total_buyers * 3);
        assert!((k.mean_satisfied - 80.0).abs() < 1e-12);
    }

    #[test]
    fn series_by_country_is_year_ascending() {
        let ds = sample();
        let series = series_by_country(&ds, &full(&ds), Metric::TotalBuyers);
        let peru = series.iter().find(|s| s.country == "Perú").unwrap();
        let years: Vec<i32> = peru.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
    }

    #[test]
    fn histogram_covers_range_and_total() {
        let values = [1.0, 2.0, 2.5, 3.0, 9.0, 10.0];
        let bins = histogram(&values, 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].lower, 1.0);
        assert_eq!(bins[2].upper, 10.0);
        let total: u64 = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, values.len() as u64);
        // Max value lands in the last (inclusive) bin.
        assert!(bins[2].count >= 1);
    }

    #[test]
    fn histogram_degenerate_and_empty_inputs() {
        assert!(histogram(&[], 10).is_empty());
        let single = histogram(&[5.0, 5.0, 5.0], 10);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 3);
    }

    #[test]
    fn box_stats_reproduce_known_quartiles() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.max, 5.0);
        assert!(box_stats(&[]).is_none());
    }

    #[test]
    fn linear_fit_recovers_an_exact_line() {
        let points = [[0.0, 1.0], [1.0, 3.0], [2.0, 5.0], [3.0, 7.0]];
        let (slope, intercept) = linear_fit(&points).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
        assert!((intercept - 1.0).abs() < 1e-12);

        assert!(linear_fit(&[[1.0, 2.0]]).is_none());
        assert!(linear_fit(&[[1.0, 2.0], [1.0, 5.0]]).is_none()); // zero x-variance
    }

    #[test]
    fn median_handles_even_and_odd_lengths() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn group_matrix_fills_absent_combinations() {
        let matrix = GroupMatrix::from_pairs(vec![
            ("Perú".to_string(), "Online".to_string(), 2.0),
            ("México".to_string(), "Mercado".to_string(), 1.0),
        ]);
        assert_eq!(matrix.categories, vec!["México", "Perú"]);
        assert_eq!(matrix.series.len(), 2);
        let online = matrix.series.iter().find(|(l, _)| l == "Online").unwrap();
        assert_eq!(online.1, vec![0.0, 2.0]);
    }

    #[test]
    fn breakdown_aggregates_buyers_and_mean_spend() {
        let ds = sample();
        let rows = channel_category_breakdown(&ds, &full(&ds));
        let total: u64 = rows.iter().map(|r| r.buyers).sum();
        assert_eq!(total, 100 + 150 + 160 + 80 + 85 + 61);
        // Perú/Online/Ropa casual groups the 2020 and 2022 rows.
        let peru = rows
            .iter()
            .find(|r| r.country == "Perú" && r.channel == "Online")
            .unwrap();
        assert_eq!(peru.buyers, 260);
        assert!((peru.mean_spend - 22.0).abs() < 1e-12);
        // Ranking order: descending buyers.
        assert!(rows.windows(2).all(|w| w[0].buyers >= w[1].buyers));
    }
}
