mod loader;

pub use loader::{BracketRecord, RebateRecord, TaxTableLoader, TaxTableLoaderError};
