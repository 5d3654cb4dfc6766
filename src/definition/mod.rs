/// Goto definition support.
///
/// Resolves a `CALL name(` invocation to the matching `JINIE name(`
/// declaration, searching the current document first, then the definition
/// files beside it, then the shared child folder.
///
/// - [`resolve`]: the per-request search, from call site to [`Resolution`].
/// - [`files`]: listing definition files in a folder and scanning them.
///
/// [`Resolution`]: crate::types::Resolution
pub mod files;
pub mod resolve;

pub use resolve::{SearchTier, find_definition};
