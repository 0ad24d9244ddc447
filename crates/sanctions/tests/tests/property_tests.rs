#[path = "property/identifier_format.rs"]
mod identifier_format;

#[path = "property/expiry_monotonic.rs"]
mod expiry_monotonic;

#[path = "property/refresh_idempotent.rs"]
mod refresh_idempotent;

#[path = "property/agent_matching.rs"]
mod agent_matching;
