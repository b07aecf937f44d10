pub mod catalog;
pub mod config;
mod error;
pub mod markup;
pub mod navigator;
pub mod placeholder;
pub mod protection;
pub mod resolver;

pub use catalog::{Catalog, CatalogEntry, PROJECT_CATALOG};
pub use config::ViewerConfig;
pub use error::FolioError;
pub use navigator::{Direction, LoadTicket, NavigateOutcome, Navigator, PageView, ViewerState};
pub use resolver::{resolve_page, ImageProbe, ProbeResult, Resolution};
