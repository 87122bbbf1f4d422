pub mod endpoints;
pub mod fetch;
pub mod http_client;

pub use endpoints::SheetEndpoints;
pub use fetch::{HttpSheetSource, SheetSource, fetch_text};
pub use http_client::create_http_client_with_timeout;
