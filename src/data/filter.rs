use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter predicate: inclusive year range + country multi-select
// ---------------------------------------------------------------------------

/// Slider bounds for the year range.
pub const YEAR_MIN: i32 = 2000;
pub const YEAR_MAX: i32 = 2026;

/// The set of currently selected countries. Empty means nothing selected,
/// which filters everything out (not an error).
pub type CountrySelection = BTreeSet<String>;

/// Initialise a [`CountrySelection`] with every country selected.
pub fn all_countries(dataset: &Dataset) -> CountrySelection {
    dataset.countries.clone()
}

/// Return indices of rows inside the inclusive year range whose country is
/// selected.
///
/// The result is a stable, order-preserving subsequence of row indices:
/// * empty `selected` → empty result
/// * `lo > hi` → empty result
pub fn filtered_indices(
    dataset: &Dataset,
    year_range: (i32, i32),
    selected: &CountrySelection,
) -> Vec<usize> {
    let (lo, hi) = year_range;
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| lo <= row.year && row.year <= hi && selected.contains(&row.country))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ObservationRow;

    fn row(country: &str, year: i32, buyers: u64) -> ObservationRow {
        ObservationRow {
            country: country.to_string(),
            year,
            total_buyers: buyers,
            total_spend_usd: buyers as f64 * 25.0,
            avg_spend_usd: 25.0,
            avg_income_usd: 1200.0,
            total_items: buyers * 3,
            avg_items: 3.0,
            avg_age: 31.5,
            pct_satisfied: 80.0,
            pct_recommend: 75.0,
            pct_first_time: 20.0,
            top_channel: "Online".to_string(),
            top_platform: "Vinted".to_string(),
            top_category: "Ropa casual".to_string(),
            top_motivation: "Precio".to_string(),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_rows(vec![
            row("Perú", 2020, 100),
            row("Perú", 2021, 150),
            row("México", 2020, 80),
            row("México", 2022, 90),
            row("Chile", 2021, 60),
        ])
    }

    fn select(names: &[&str]) -> CountrySelection {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn every_output_row_matches_the_predicate_and_none_is_lost() {
        let ds = sample();
        let selected = select(&["Perú", "Chile"]);
        let indices = filtered_indices(&ds, (2020, 2021), &selected);

        for &i in &indices {
            let r = &ds.rows[i];
            assert!((2020..=2021).contains(&r.year));
            assert!(selected.contains(&r.country));
        }
        // Lossless: every qualifying row appears exactly once.
        let expected: Vec<usize> = ds
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| (2020..=2021).contains(&r.year) && selected.contains(&r.country))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn output_preserves_input_order() {
        let ds = sample();
        let indices = filtered_indices(&ds, (YEAR_MIN, YEAR_MAX), &all_countries(&ds));
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_row_example() {
        // filter years=[2020,2020], countries={Perú} → exactly (Perú, 2020, 100)
        let ds = sample();
        let indices = filtered_indices(&ds, (2020, 2020), &select(&["Perú"]));
        assert_eq!(indices.len(), 1);
        let r = &ds.rows[indices[0]];
        assert_eq!((r.country.as_str(), r.year, r.total_buyers), ("Perú", 2020, 100));
    }

    #[test]
    fn empty_selection_yields_empty_result() {
        let ds = sample();
        assert!(filtered_indices(&ds, (2000, 2026), &CountrySelection::new()).is_empty());
    }

    #[test]
    fn inverted_range_yields_empty_result() {
        let ds = sample();
        assert!(filtered_indices(&ds, (2022, 2020), &all_countries(&ds)).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let selected = select(&["Perú", "México"]);
        let range = (2020, 2021);

        let first = filtered_indices(&ds, range, &selected);
        // Re-filter the already-filtered view with the same bounds.
        let narrowed: Vec<ObservationRow> = first.iter().map(|&i| ds.rows[i].clone()).collect();
        let again = filtered_indices(&Dataset::from_rows(narrowed.clone()), range, &selected);

        assert_eq!(again.len(), first.len());
        for (&j, &i) in again.iter().zip(&first) {
            assert_eq!(narrowed[j], ds.rows[i]);
        }
    }
}
