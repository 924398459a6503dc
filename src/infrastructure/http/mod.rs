//! HTTP Infrastructure - RESTful API
//!
//! 路由、handler、DTO、中间件与服务器启动

pub mod dto;
pub mod handlers;
mod middleware;
mod routes;
mod server;
mod state;

pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
