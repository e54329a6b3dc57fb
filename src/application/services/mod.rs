//! Business logic services orchestrating domain operations.

pub mod resolver_service;
pub mod shortener_service;
pub mod stats_service;

pub use resolver_service::ResolverService;
pub use shortener_service::ShortenerService;
pub use stats_service::StatsService;
