// Module layout (Clean Architecture style)
// - bootstrap: configuration and service wiring
// - infrastructure: Postgres and in-memory storage adapters
// - presentation: HTTP handlers, validation, auth middleware, routing
// - application: ports, use cases, access tokens
// - domain: core records

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
