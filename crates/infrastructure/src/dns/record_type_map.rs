//! Mapping between `dns_repeater_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! The domain only distinguishes A and AAAA; everything else keeps its
//! 16-bit code, so the mapping is total in both directions.

use dns_repeater_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::Other(code) => HickoryRecordType::from(*code),
        }
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
