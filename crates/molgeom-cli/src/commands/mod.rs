pub mod features;
pub mod formats;
pub mod measure;
