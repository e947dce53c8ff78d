//! Wire codec
//!
//! Translates between the domain `Message` and RFC 1035 wire format, using
//! `hickory-proto` for the byte-level work (name compression included).

mod record_type_map;
mod records;

pub use record_type_map::RecordTypeMapper;

use hickory_proto::op::{
    Message as HickoryMessage, MessageType, OpCode as HickoryOpCode, Query,
    ResponseCode as HickoryResponseCode,
};
use hickory_proto::rr::DNSClass;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use records::{name_from_hickory, name_to_hickory, record_from_hickory, record_to_hickory};
use rootwalk_domain::{
    DomainError, Message, OpCode, Question, RecordClass, ResponseCode,
};

/// Classic DNS/UDP payload limit without EDNS(0).
pub const MAX_UDP_PAYLOAD: usize = 512;

pub struct WireCodec;

impl WireCodec {
    pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
        let message_type = if message.is_response {
            MessageType::Response
        } else {
            MessageType::Query
        };

        let mut wire = HickoryMessage::new(message.id, message_type, op_code_to_hickory(message.op_code));
        wire.set_authoritative(message.authoritative);
        wire.set_truncated(message.truncated);
        wire.set_recursion_desired(message.recursion_desired);
        wire.set_recursion_available(message.recursion_available);
        wire.set_response_code(response_code_to_hickory(message.response_code));

        for question in &message.questions {
            let mut query = Query::new();
            query.set_name(name_to_hickory(&question.name)?);
            query.set_query_type(RecordTypeMapper::to_hickory(&question.record_type));
            query.set_query_class(DNSClass::IN);
            wire.add_query(query);
        }
        for record in &message.answers {
            wire.add_answer(record_to_hickory(record)?);
        }
        for record in &message.authorities {
            wire.add_name_server(record_to_hickory(record)?);
        }
        for record in &message.additionals {
            wire.add_additional(record_to_hickory(record)?);
        }

        let mut buf = Vec::with_capacity(MAX_UDP_PAYLOAD);
        let mut encoder = BinEncoder::new(&mut buf);
        wire.emit(&mut encoder)
            .map_err(|e| DomainError::Format(format!("Failed to serialize DNS message: {}", e)))?;

        Ok(buf)
    }

    pub fn decode(bytes: &[u8]) -> Result<Message, DomainError> {
        let wire = HickoryMessage::from_vec(bytes)
            .map_err(|e| DomainError::Format(format!("Failed to parse DNS message: {}", e)))?;

        let questions = wire
            .queries()
            .iter()
            .map(|query| {
                let mut question = Question::new(
                    name_from_hickory(query.name())?,
                    RecordTypeMapper::from_hickory(query.query_type()),
                );
                question.class = RecordClass::from_u16(u16::from(query.query_class()));
                Ok(question)
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let answers = wire
            .answers()
            .iter()
            .map(record_from_hickory)
            .collect::<Result<Vec<_>, _>>()?;
        let authorities = wire
            .name_servers()
            .iter()
            .map(record_from_hickory)
            .collect::<Result<Vec<_>, _>>()?;
        let additionals = wire
            .additionals()
            .iter()
            .map(record_from_hickory)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Message {
            id: wire.id(),
            is_response: wire.message_type() == MessageType::Response,
            op_code: op_code_from_hickory(wire.op_code()),
            authoritative: wire.authoritative(),
            truncated: wire.truncated(),
            recursion_desired: wire.recursion_desired(),
            recursion_available: wire.recursion_available(),
            response_code: response_code_from_hickory(wire.response_code()),
            questions,
            answers,
            authorities,
            additionals,
        })
    }
}

fn op_code_to_hickory(op_code: OpCode) -> HickoryOpCode {
    match op_code {
        OpCode::Query => HickoryOpCode::Query,
        OpCode::Status => HickoryOpCode::Status,
        OpCode::Notify => HickoryOpCode::Notify,
        OpCode::Update => HickoryOpCode::Update,
        // hickory rejects unassigned op-codes while decoding, so none reach here
        OpCode::Other(_) => HickoryOpCode::Query,
    }
}

fn op_code_from_hickory(op_code: HickoryOpCode) -> OpCode {
    match op_code {
        HickoryOpCode::Query => OpCode::Query,
        HickoryOpCode::Status => OpCode::Status,
        HickoryOpCode::Notify => OpCode::Notify,
        HickoryOpCode::Update => OpCode::Update,
        other => OpCode::from_u8(u8::from(other)),
    }
}

fn response_code_to_hickory(code: ResponseCode) -> HickoryResponseCode {
    match code {
        ResponseCode::NoError => HickoryResponseCode::NoError,
        ResponseCode::FormErr => HickoryResponseCode::FormErr,
        ResponseCode::ServFail => HickoryResponseCode::ServFail,
        ResponseCode::NXDomain => HickoryResponseCode::NXDomain,
        ResponseCode::NotImp => HickoryResponseCode::NotImp,
        ResponseCode::Refused => HickoryResponseCode::Refused,
        ResponseCode::Other(code) => HickoryResponseCode::Unknown(code),
    }
}

fn response_code_from_hickory(code: HickoryResponseCode) -> ResponseCode {
    match code {
        HickoryResponseCode::NoError => ResponseCode::NoError,
        HickoryResponseCode::FormErr => ResponseCode::FormErr,
        HickoryResponseCode::ServFail => ResponseCode::ServFail,
        HickoryResponseCode::NXDomain => ResponseCode::NXDomain,
        HickoryResponseCode::NotImp => ResponseCode::NotImp,
        HickoryResponseCode::Refused => ResponseCode::Refused,
        other => ResponseCode::from_u16(u16::from(other)),
    }
}
