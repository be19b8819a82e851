//! Global Findex survey explorer: a load-once survey table and the
//! filter/aggregate pipeline behind the dashboard's analysis views.
//!
//! ```no_run
//! use findex_explorer::analysis::RegionalQuery;
//! use findex_explorer::data::DatasetStore;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = DatasetStore::new("data_cleaned.csv");
//! let table = store.load()?;
//! let query = RegionalQuery::default_for(&table)?;
//! for row in query.run(&table)? {
//!     println!("{}: {:.3}", row.group, row.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod glossary;
