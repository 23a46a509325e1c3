pub mod cache;
pub mod dns;

pub use cache::{AddCacheEntryUseCase, CountCacheEntriesUseCase, DumpCacheUseCase};
pub use dns::{AnswerSource, HandleDnsQueryUseCase, NoAnswerReason, QueryOutcome};
