//! HTTP API: server, routing, and the request pipeline.
//!
//! Every request passes through request logging, then (except `/login`)
//! bearer authentication, before reaching a handler.

pub mod app;
pub mod context;
pub mod middleware;
