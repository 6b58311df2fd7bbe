pub mod context;
pub mod state;

pub use context::RequestContext;
pub use state::AppState;
