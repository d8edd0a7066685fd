//! Model Context Protocol surface: tools, the brewery type resource and the
//! by-state prompt.

pub mod prompts;
pub mod resources;
pub mod server;

pub use server::BreweryMcpServer;
