use crate::{Question, ResourceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpCode {
    #[default]
    Query,
    Status,
    Notify,
    Update,
    Other(u8),
}

impl OpCode {
    pub fn to_u8(&self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::Status => 2,
            OpCode::Notify => 4,
            OpCode::Update => 5,
            OpCode::Other(code) => *code,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code {
            0 => OpCode::Query,
            2 => OpCode::Status,
            4 => OpCode::Notify,
            5 => OpCode::Update,
            other => OpCode::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Other(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "OTHER",
        }
    }
}

/// A DNS message, independent of its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub id: u16,
    pub is_response: bool,
    pub op_code: OpCode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    /// An iterative query: one question, recursion not requested.
    pub fn query(id: u16, question: Question) -> Self {
        Self {
            id,
            questions: vec![question],
            ..Self::default()
        }
    }

    /// A response skeleton for `request`: same id, op-code, recursion-desired
    /// flag and questions, with no records yet.
    pub fn reply_to(request: &Message, response_code: ResponseCode) -> Self {
        Self {
            id: request.id,
            is_response: true,
            op_code: request.op_code,
            recursion_desired: request.recursion_desired,
            recursion_available: true,
            response_code,
            questions: request.questions.clone(),
            ..Self::default()
        }
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Whether this message is a plausible reply to `query`: flagged as a
    /// response, same id, and echoing the first question.
    pub fn answers_query(&self, query: &Message) -> bool {
        self.is_response
            && self.id == query.id
            && match (self.question(), query.question()) {
                (Some(ours), Some(theirs)) => {
                    ours.name == theirs.name && ours.record_type == theirs.record_type
                }
                (None, None) => true,
                _ => false,
            }
    }
}
