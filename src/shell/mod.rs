// Composition root.
//
// Responsibilities
// - Read config from environment.
// - Pick the database connector and start the connection attempt.
// - Wire middleware, resource routers and health routes into one router.
// - Bind the listener and serve.

pub mod bootstrap;
pub mod config;
pub mod http;
pub mod json_body;
pub mod state;
