mod bundle;
mod csv_export;
mod json;
mod markdown;

pub use bundle::*;
pub use csv_export::to_csv;
pub use json::to_pretty_json;
pub use markdown::to_markdown;
