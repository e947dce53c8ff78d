use crate::DomainError;
use compact_str::CompactString;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

/// A fully-qualified domain name.
///
/// Always stored dot-terminated. Comparison and hashing ignore ASCII case,
/// so `Example.COM.` and `example.com.` are the same key.
#[derive(Clone)]
pub struct DnsName {
    text: CompactString,
}

impl DnsName {
    pub fn root() -> Self {
        Self {
            text: CompactString::const_new("."),
        }
    }

    /// Parses presentation form, appending the trailing dot when missing.
    /// `\.`, `\\` and `\DDD` escapes count as one octet each.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "." {
            return Ok(Self::root());
        }

        let mut labels = split_labels(trimmed);
        let dotted = labels.last().is_some_and(|label| label.is_empty());
        if dotted {
            labels.pop();
        }
        check_labels(&labels, input)?;

        let mut text = CompactString::with_capacity(trimmed.len() + 1);
        text.push_str(trimmed);
        if !dotted {
            text.push('.');
        }
        Ok(Self { text })
    }

    /// Builds a name from raw wire labels, root last label excluded.
    pub fn from_wire_labels<'a, I>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let labels: Vec<&[u8]> = labels.into_iter().collect();
        if labels.is_empty() {
            return Ok(Self::root());
        }

        let mut text = CompactString::default();
        for label in &labels {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(
                    "empty label in wire name".to_string(),
                ));
            }
            escape_label(label, &mut text);
            text.push('.');
        }

        let owned: Vec<Vec<u8>> = labels.iter().map(|label| label.to_vec()).collect();
        check_labels(&owned, &text)?;
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_root(&self) -> bool {
        self.text == "."
    }

    /// Raw label octets with escapes resolved, root excluded.
    pub fn wire_labels(&self) -> Vec<Vec<u8>> {
        if self.is_root() {
            return Vec::new();
        }
        let mut labels = split_labels(&self.text);
        labels.pop();
        labels
    }

    pub fn label_count(&self) -> usize {
        self.wire_labels().len()
    }
}

fn check_labels(labels: &[Vec<u8>], input: &str) -> Result<(), DomainError> {
    // wire length: one length octet per label plus the terminating zero
    let mut wire_len = 1;
    for label in labels {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "empty label in '{}'",
                input
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label of {} octets in '{}' is longer than {}",
                label.len(),
                input,
                MAX_LABEL_LEN
            )));
        }
        wire_len += label.len() + 1;
    }
    if wire_len > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' longer than {} octets",
            input, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Splits presentation text on unescaped dots. A trailing dot yields a final
/// empty label.
fn split_labels(text: &str) -> Vec<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut labels = Vec::new();
    let mut current = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let digits = bytes.get(i + 1..i + 4).filter(|d| d.iter().all(u8::is_ascii_digit));
                match digits {
                    Some(d) => {
                        let value = d
                            .iter()
                            .fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0'));
                        current.push(u8::try_from(value).unwrap_or(u8::MAX));
                        i += 4;
                    }
                    None => {
                        current.push(bytes.get(i + 1).copied().unwrap_or(b'\\'));
                        i += 2;
                    }
                }
            }
            b'.' => {
                labels.push(std::mem::take(&mut current));
                i += 1;
            }
            byte => {
                current.push(byte);
                i += 1;
            }
        }
    }
    labels.push(current);
    labels
}

fn escape_label(label: &[u8], out: &mut CompactString) {
    for &byte in label {
        match byte {
            b'.' | b'\\' => {
                out.push('\\');
                out.push(char::from(byte));
            }
            0x21..=0x7e => out.push(char::from(byte)),
            _ => {
                out.push('\\');
                out.push_str(&format!("{:03}", byte));
            }
        }
    }
}

impl PartialEq for DnsName {
    fn eq(&self, other: &Self) -> bool {
        self.text.eq_ignore_ascii_case(&other.text)
    }
}

impl Eq for DnsName {}

impl Hash for DnsName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.text.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DnsName({})", self.text)
    }
}

impl FromStr for DnsName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
