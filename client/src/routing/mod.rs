//! Route table, guards, resolvers and the router that evaluates them.
//!
//! SYSTEM CONTEXT
//! ==============
//! `routes` declares what exists, `guards` decide who may enter, `resolvers`
//! fetch what a page needs, and `router` runs them in that order.

pub mod guards;
pub mod resolvers;
pub mod router;
pub mod routes;
