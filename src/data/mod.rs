/// Data layer: core types, loading, filtering, aggregation, export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (year coerced to integer)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<ObservationRow>, country index (immutable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + country selection → row indices
///   └──────────┘
///        │
///        ├────────────────┐
///        ▼                ▼
///   ┌──────────┐    ┌──────────┐
///   │ aggregate │    │  export   │  sums / means / pivots / corr · CSV out
///   └──────────┘    └──────────┘
/// ```
pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
