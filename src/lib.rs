//! Open Brewery DB MCP server
//!
//! This library provides the validation, query and formatting pipeline behind
//! the brewery-mcp server, which exposes the public Open Brewery DB directory
//! to LLM clients over the Model Context Protocol.

pub mod app_state;
pub mod config;
pub mod mcp;
pub mod models;
pub mod routes;
pub mod services;
