mod lookup_policy;

pub use lookup_policy::LookupPolicy;
