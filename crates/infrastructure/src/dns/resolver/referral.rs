use rootwalk_domain::{DnsName, Message, RecordBody};
use std::net::Ipv4Addr;

/// A way to reach one of the nameservers named in a referral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextHop<'a> {
    /// The additional section carried the nameserver's address.
    Glue(Ipv4Addr),
    /// Only the nameserver's name is known; it must be resolved first.
    Glueless(&'a DnsName),
}

/// NS records of the authority section in order, each paired with the first
/// matching A record of the additional section when there is one.
pub fn referral_candidates(response: &Message) -> impl Iterator<Item = NextHop<'_>> {
    response
        .authorities
        .iter()
        .filter_map(|record| match &record.body {
            RecordBody::Ns(target) => Some(target),
            _ => None,
        })
        .map(|target| {
            response
                .additionals
                .iter()
                .find_map(|extra| match extra.body {
                    RecordBody::A(address) if extra.owner == *target => Some(address),
                    _ => None,
                })
                .map_or(NextHop::Glueless(target), NextHop::Glue)
        })
}
