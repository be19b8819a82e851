/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  load once, hand out Arc<Table>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec predicates → filtered Table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group_mean / value_percentage / value_counts
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod store;

pub use aggregate::{group_mean, value_counts, value_percentage};
pub use error::{LoadError, PipelineError};
pub use filter::{filter_rows, FilterSpec};
pub use model::{Column, ColumnKind, Scalar, Statistic, SummaryRow, Table};
pub use store::DatasetStore;
