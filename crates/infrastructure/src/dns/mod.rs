pub mod forwarding;
pub mod resolver;
pub mod server;

pub use resolver::{build_resolver, SystemResolver, UpstreamExchangeResolver};
pub use server::{DnsMessageHandler, ANSWER_TTL};
