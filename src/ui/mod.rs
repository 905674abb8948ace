//! Terminal UI for playing Connect Four against the search engine.

mod app;
mod game_view;

pub use app::App;
