//! Wire contract between host automation code and the browsed document.
//!
//! Nothing in a page shares memory with the host. Every routine that runs
//! in-page is a [`PageScript`] (a function declaration shipped as source text),
//! and every argument or result crossing the boundary is one of the serde
//! types in [`types`].
//!
//! Types in this crate are:
//! - **Pure data**: no behavior beyond rendering and (de)serialization
//! - **Stable**: changes only when an in-page routine changes shape
//!
//! The readiness engine and action helpers live in `ngsync`.

pub mod script;
pub mod scripts;
pub mod types;

pub use script::PageScript;
pub use types::*;
