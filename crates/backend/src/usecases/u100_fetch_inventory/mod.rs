pub mod fetcher;

pub use fetcher::{SheetFetcher, SheetSnapshot};
