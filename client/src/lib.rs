mod app;
pub mod dom;
pub mod loader;
pub mod protection;
pub mod viewer;

pub use app::{read_config, render_year_cards, run};
