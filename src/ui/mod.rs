/// UI layer: panels (filters, KPIs), shared chart builders, and the six
/// dashboard tabs. Everything here renders from [`crate::state::AppState`];
/// aggregations are recomputed from the filtered view each render pass.
pub mod charts;
pub mod panels;
pub mod tabs;
