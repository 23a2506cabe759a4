use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ObservationRow – one row of the dataset (one country × year)
// ---------------------------------------------------------------------------

/// A single observation: purchase behavior for one country in one year.
///
/// Field order is the canonical column order of the CSV schema; exports
/// reproduce it byte-identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRow {
    pub country: String,
    pub year: i32,
    pub total_buyers: u64,
    pub total_spend_usd: f64,
    pub avg_spend_usd: f64,
    pub avg_income_usd: f64,
    pub total_items: u64,
    pub avg_items: f64,
    pub avg_age: f64,
    pub pct_satisfied: f64,
    pub pct_recommend: f64,
    pub pct_first_time: f64,
    pub top_channel: String,
    pub top_platform: String,
    pub top_category: String,
    pub top_motivation: String,
}

impl ObservationRow {
    /// Canonical column order, matching the struct fields above.
    pub const COLUMNS: [&'static str; 16] = [
        "country",
        "year",
        "total_buyers",
        "total_spend_usd",
        "avg_spend_usd",
        "avg_income_usd",
        "total_items",
        "avg_items",
        "avg_age",
        "pct_satisfied",
        "pct_recommend",
        "pct_first_time",
        "top_channel",
        "top_platform",
        "top_category",
        "top_motivation",
    ];
}

// ---------------------------------------------------------------------------
// Metric – numeric column accessor
// ---------------------------------------------------------------------------

/// Names one numeric column and knows how to read it from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalBuyers,
    TotalSpend,
    AvgSpend,
    AvgIncome,
    TotalItems,
    AvgItems,
    AvgAge,
    PctSatisfied,
    PctRecommend,
    PctFirstTime,
}

impl Metric {
    /// The fixed column set the correlation matrix is computed over.
    pub const CORRELATION_SET: [Metric; 5] = [
        Metric::AvgSpend,
        Metric::AvgItems,
        Metric::AvgAge,
        Metric::AvgIncome,
        Metric::PctSatisfied,
    ];

    pub fn get(self, row: &ObservationRow) -> f64 {
        match self {
            Metric::TotalBuyers => row.total_buyers as f64,
            Metric::TotalSpend => row.total_spend_usd,
            Metric::AvgSpend => row.avg_spend_usd,
            Metric::AvgIncome => row.avg_income_usd,
            Metric::TotalItems => row.total_items as f64,
            Metric::AvgItems => row.avg_items,
            Metric::AvgAge => row.avg_age,
            Metric::PctSatisfied => row.pct_satisfied,
            Metric::PctRecommend => row.pct_recommend,
            Metric::PctFirstTime => row.pct_first_time,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalBuyers => "Total buyers",
            Metric::TotalSpend => "Total spend (USD)",
            Metric::AvgSpend => "Avg spend (USD)",
            Metric::AvgIncome => "Avg income (USD)",
            Metric::TotalItems => "Total items",
            Metric::AvgItems => "Avg items",
            Metric::AvgAge => "Avg age",
            Metric::PctSatisfied => "% satisfied",
            Metric::PctRecommend => "% recommend",
            Metric::PctFirstTime => "% first-time",
        }
    }
}

// ---------------------------------------------------------------------------
// CategoryCol – categorical column accessor
// ---------------------------------------------------------------------------

/// Names one categorical grouping column.
///
/// `Year` is included because several breakdowns group by it; years render
/// in their 4-digit form, so lexicographic order matches numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryCol {
    Country,
    Year,
    TopChannel,
    TopPlatform,
    TopCategory,
    TopMotivation,
}

impl CategoryCol {
    pub fn value(self, row: &ObservationRow) -> String {
        match self {
            CategoryCol::Country => row.country.clone(),
            CategoryCol::Year => row.year.to_string(),
            CategoryCol::TopChannel => row.top_channel.clone(),
            CategoryCol::TopPlatform => row.top_platform.clone(),
            CategoryCol::TopCategory => row.top_category.clone(),
            CategoryCol::TopMotivation => row.top_motivation.clone(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryCol::Country => "Country",
            CategoryCol::Year => "Year",
            CategoryCol::TopChannel => "Top channel",
            CategoryCol::TopPlatform => "Top platform",
            CategoryCol::TopCategory => "Top category",
            CategoryCol::TopMotivation => "Top motivation",
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table with a pre-computed country index.
///
/// Immutable after load: downstream stages derive read-only index views,
/// they never mutate rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All observations, in file order.
    pub rows: Vec<ObservationRow>,
    /// Sorted set of distinct country names.
    pub countries: BTreeSet<String>,
}

impl Dataset {
    /// Build the country index from loaded rows.
    ///
    /// The source data asserts one row per (country, year); duplicates are
    /// warned about, not rejected.
    pub fn from_rows(rows: Vec<ObservationRow>) -> Self {
        let mut countries = BTreeSet::new();
        let mut seen: BTreeSet<(String, i32)> = BTreeSet::new();

        for row in &rows {
            countries.insert(row.country.clone());
            if !seen.insert((row.country.clone(), row.year)) {
                log::warn!("duplicate observation for {} / {}", row.country, row.year);
            }
        }

        Dataset { rows, countries }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
