pub mod app;
pub mod handlers;
pub mod navigation;
pub mod ui;
