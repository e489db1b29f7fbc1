pub mod extract;
pub mod render;

pub use extract::extract_report;
