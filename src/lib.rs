// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod reconciler;
pub mod runtime;
pub mod sprint;
pub mod stats;
pub mod surface;
pub mod words;
