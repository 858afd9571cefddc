// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Client and scene binder for the protein modeling workbench.
//!
//! A user submits a sequence or a PDB file to the workbench backend, which
//! creates a project. The client loads that project, assembles the PDB
//! text of its first protein and binds structure, contacts and membrane to
//! a 3D viewer.
//!
//! # Key entry points
//!
//! - [`app::App`] - the single state container driving every backend call
//! - [`binder::VisualizationBinder`] - viewer lifecycle and incremental
//!   layer updates
//! - [`model::Project`] - the typed project payload
//! - [`pdb`] - PDB text assembly and parsing
//! - [`settings`] - server constants normalized for display
//! - [`options::Config`] - TOML configuration
//!
//! # Architecture
//!
//! Everything runs on one thread of control. The [`rest::Backend`] trait
//! is the transport seam (blocking HTTP via `ureq` behind the `http`
//! feature), and the [`viewer::Viewer`] trait is the render seam.
//! [`viewer::SceneViewer`] is an in-memory implementation that keeps named
//! layers, mesh primitives and camera state.

pub mod app;
pub mod binder;
pub mod error;
pub mod model;
pub mod options;
pub mod pdb;
pub mod rest;
pub mod secondary_structure;
pub mod settings;
pub mod viewer;

pub use error::PmwError;
