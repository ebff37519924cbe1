//! Fixed-width identifier canonicalization.
//!
//! Inbound trace and span identifiers may arrive narrower than their canonical
//! widths (16 and 8 bytes). They are left-padded with zero bytes and rendered
//! as lower-case hex. Input wider than the canonical width is a hard error:
//! truncating it would silently discard identity.

use instana_pdata::{SpanId, TraceId};
use thiserror::Error;

const TRACE_ID_BYTES: usize = 16;
const SPAN_ID_BYTES: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("identifier is {got} bytes wide, canonical width is {want}")]
    TooWide { want: usize, got: usize },
}

fn canonicalize<const N: usize>(bytes: &[u8]) -> Result<[u8; N], IdError> {
    if bytes.len() > N {
        return Err(IdError::TooWide {
            want: N,
            got: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

/// Canonical 32-hex-char form of a trace identifier.
pub fn hex_trace_id(id: &TraceId) -> Result<String, IdError> {
    Ok(hex::encode(canonicalize::<TRACE_ID_BYTES>(id.as_bytes())?))
}

/// Canonical 16-hex-char form of a span identifier.
pub fn hex_span_id(id: &SpanId) -> Result<String, IdError> {
    Ok(hex::encode(canonicalize::<SPAN_ID_BYTES>(id.as_bytes())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn full_width_trace_id_is_unchanged() {
        let id = TraceId::new((1u8..=16).collect::<Vec<_>>());
        assert_eq!(
            hex_trace_id(&id).unwrap(),
            "0102030405060708090a0b0c0d0e0f10"
        );
    }

    #[test]
    fn narrow_ids_are_left_padded() {
        let id = TraceId::new(vec![1]);
        assert_eq!(
            hex_trace_id(&id).unwrap(),
            "00000000000000000000000000000001"
        );
        let id = SpanId::new(vec![0xab, 0xcd]);
        assert_eq!(hex_span_id(&id).unwrap(), "000000000000abcd");
    }

    #[test]
    fn span_id_hex_matches_bytes() {
        let id = SpanId::new(vec![1, 2, 3, 4, 10, 11, 12, 13]);
        assert_eq!(hex_span_id(&id).unwrap(), "010203040a0b0c0d");
    }

    #[test]
    fn over_width_input_is_rejected() {
        let id = TraceId::new(vec![0; 17]);
        assert_matches!(
            hex_trace_id(&id),
            Err(IdError::TooWide { want: 16, got: 17 })
        );
        let id = SpanId::new(vec![1; 9]);
        assert_matches!(hex_span_id(&id), Err(IdError::TooWide { want: 8, got: 9 }));
    }

    #[test]
    fn canonical_is_identity_on_full_width_input() {
        fn test(bytes: Vec<u8>) -> bool {
            let mut bytes = bytes;
            bytes.resize(16, 0x5a);
            canonicalize::<16>(&bytes).unwrap() == bytes[..16]
        }
        quickcheck::quickcheck(test as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn padding_preserves_the_suffix() {
        fn test(bytes: Vec<u8>) -> bool {
            let mut bytes = bytes;
            bytes.truncate(16);
            let canonical = canonicalize::<16>(&bytes).unwrap();
            canonical[..16 - bytes.len()].iter().all(|b| *b == 0)
                && canonical[16 - bytes.len()..] == bytes[..]
        }
        quickcheck::quickcheck(test as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn hex_round_trips() {
        fn test(bytes: Vec<u8>) -> bool {
            let mut bytes = bytes;
            bytes.truncate(16);
            let id = TraceId::new(bytes.clone());
            let encoded = hex_trace_id(&id).unwrap();
            let decoded = hex::decode(&encoded).unwrap();
            decoded[16 - bytes.len()..] == bytes[..]
        }
        quickcheck::quickcheck(test as fn(Vec<u8>) -> bool);
    }
}
