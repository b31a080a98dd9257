pub mod backup;
pub mod progress;
