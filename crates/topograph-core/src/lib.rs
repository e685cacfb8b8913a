//! Topograph core types.
//!
//! - **Identifiers**: interned node keys and cluster paths ([`identifier::Id`])
//! - **Colors**: CSS color parsing for styling ([`color::Color`])
//! - **Resources**: the kinds of infrastructure a node can depict ([`resource`])
//! - **Graph**: the directed graph that validates edge endpoints ([`graph`])
//! - **Semantic**: the read-only diagram model ([`semantic`])
//! - **Builder**: the scoped builder producing that model ([`builder`])

pub mod builder;
pub mod color;
pub mod graph;
pub mod identifier;
pub mod resource;
pub mod semantic;
