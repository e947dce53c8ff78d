#![allow(dead_code)]
mod builders;
mod dns_server_mock;
mod stub_transport;

pub use builders::*;
pub use dns_server_mock::MockDnsServer;
pub use stub_transport::{Scripted, StubTransport};
