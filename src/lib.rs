// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod error;
pub mod game;
pub mod kana;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod selection;
pub mod timer;
pub mod ui;
