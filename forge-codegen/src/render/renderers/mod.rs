//! Built-in service renderers.

mod backend;
mod frontend;
mod generic;

pub use backend::BackendRenderer;
pub use frontend::FrontendRenderer;
pub use generic::GenericRenderer;
