//! Archive framing and the size budget.
//!
//! ```text
//! archive := entry_count:variant (name blob)*
//! name    := length:variant ascii_byte*
//! ```
//!
//! Entries keep their declared order; the runtime looks models up by
//! position as well as by name.

use crate::error::{EncodeError, EncodeResult};
use crate::varint::pack_variant;

/// Size of the extended memory region the archive is copied into.
pub const MAX_ARCHIVE_SIZE: usize = 0x7fff;

/// A named, already encoded blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub blob: Vec<u8>,
}

/// Append a length-prefixed ASCII string.
pub fn pack_name(out: &mut Vec<u8>, name: &str) -> EncodeResult<()> {
    if !name.is_ascii() {
        return Err(EncodeError::NonAsciiName {
            name: name.to_owned(),
        });
    }
    pack_variant(out, name.len())?;
    out.extend_from_slice(name.as_bytes());
    Ok(())
}

/// Concatenate entries into an archive.
pub fn encode_archive(entries: &[ArchiveEntry]) -> EncodeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(entries.iter().map(|e| e.blob.len() + 8).sum());
    pack_variant(&mut out, entries.len())?;
    for entry in entries {
        pack_name(&mut out, &entry.name)?;
        out.extend_from_slice(&entry.blob);
    }
    Ok(out)
}

/// Fail if `size` bytes do not fit the extended memory region.
pub fn check_budget(size: usize) -> EncodeResult<()> {
    if size > MAX_ARCHIVE_SIZE {
        return Err(EncodeError::BudgetExceeded {
            size,
            limit: MAX_ARCHIVE_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn entries_in_declared_order() {
        let entries = [
            ArchiveEntry {
                name: "mountain".into(),
                blob: vec![0xaa],
            },
            ArchiveEntry {
                name: "bf109".into(),
                blob: vec![0xbb, 0xcc],
            },
        ];
        let archive = encode_archive(&entries).unwrap();
        let mut expected = vec![2, 8];
        expected.extend_from_slice(b"mountain");
        expected.push(0xaa);
        expected.push(5);
        expected.extend_from_slice(b"bf109");
        expected.extend_from_slice(&[0xbb, 0xcc]);
        assert_eq!(archive, expected);
    }

    #[test]
    fn non_ascii_names_are_rejected() {
        let err = pack_name(&mut Vec::new(), "bücker").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn budget_edge() {
        assert!(check_budget(MAX_ARCHIVE_SIZE).is_ok());
        let err = check_budget(32768).unwrap_err();
        assert_eq!(
            err,
            EncodeError::BudgetExceeded {
                size: 32768,
                limit: 32767
            }
        );
        assert_eq!(err.kind(), ErrorKind::BudgetExceeded);
        assert!(err.to_string().contains("32768"));
    }
}
