//! Mapping between `dnstoy_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides agree on the IANA type codes, so the mapping goes through `u16`
//! and never loses a type: codes the domain enum does not name travel as
//! `RecordType::Other`.

use dnstoy_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from(u16::from(hickory_type))
    }
}
