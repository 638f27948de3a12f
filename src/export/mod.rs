// Export Formatter
// Pure renderings of patterns, the selection and the catalog

pub mod markdown;
pub mod json;
pub mod gist;

pub use gist::{GistPayload, GistReceipt, PublishError, PublishResult};
pub use json::{export_catalog, export_pattern, export_selection, ExportFile};
pub use markdown::{format_catalog, format_pattern, format_selection};
