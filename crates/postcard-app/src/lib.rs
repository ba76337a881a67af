//! Postcard Editor Application
//!
//! The application shell tying the editor, the surface display list and the
//! exporter together, plus the browser bindings.

mod shell;

pub use shell::{AppConfig, AppError, EditorShell, ExportJob};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{PostcardEditor, run_wasm};
