pub mod combine;
pub mod store;

pub use combine::{combine_records, write_combined, CombinedDataset};
pub use store::{labels_path, load_record, save_record, segments_path};
