//! Maker-note extraction from container EXIF blocks.
//!
//! A HEIF `Exif` item starts with a 4-byte big-endian offset to the TIFF
//! header, optionally followed by the `Exif\0\0` signature. Blocks are parsed
//! individually; a malformed block is skipped with a warning rather than
//! aborting, since a maker note is only needed for gain-map application.

use exif::{In, Reader, Tag, Value};
use tracing::warn;

/// Vendor signature carried at the start of an Apple maker note.
const APPLE_SIGNATURE: &[u8] = b"Apple iOS";

/// Returns the first Apple maker-note payload found among `blocks`.
///
/// Each block is a raw container EXIF item. Blocks without a maker note, or
/// with a maker note from another vendor, are passed over silently; blocks
/// that fail to parse are skipped with a warning.
pub fn find_apple_maker_note(blocks: &[Vec<u8>]) -> Option<Vec<u8>> {
    for block in blocks {
        let Some(tiff) = tiff_payload(block) else {
            warn!("Skipping truncated EXIF block ({} bytes)", block.len());
            continue;
        };
        let exif = match Reader::new().read_raw(tiff.to_vec()) {
            Ok(exif) => exif,
            Err(e) => {
                warn!("Skipping malformed EXIF block: {e}");
                continue;
            }
        };
        if let Some(field) = exif.get_field(Tag::MakerNote, In::PRIMARY) {
            if let Value::Undefined(bytes, _) = &field.value {
                if bytes.starts_with(APPLE_SIGNATURE) {
                    return Some(bytes.clone());
                }
            }
        }
    }
    None
}

/// Locates the TIFF structure inside a raw container EXIF item.
fn tiff_payload(block: &[u8]) -> Option<&[u8]> {
    if block.len() < 4 {
        return None;
    }
    let offset = u32::from_be_bytes([block[0], block[1], block[2], block[3]]) as usize;
    let start = 4usize.checked_add(offset)?;
    let mut payload = block.get(start..)?;
    if let Some(rest) = payload.strip_prefix(b"Exif\0\0") {
        payload = rest;
    }
    if payload.len() < 8 {
        return None;
    }
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal little-endian TIFF with one IFD holding a MakerNote tag.
    fn tiff_with_maker_note(note: &[u8]) -> Vec<u8> {
        let mut tiff = vec![
            b'I', b'I', 42, 0, // little-endian TIFF magic
            8, 0, 0, 0, // IFD offset
            1, 0, // one entry
        ];
        // MakerNote (0x927c), UNDEFINED, count, offset to value
        tiff.extend_from_slice(&0x927cu16.to_le_bytes());
        tiff.extend_from_slice(&7u16.to_le_bytes());
        tiff.extend_from_slice(&(note.len() as u32).to_le_bytes());
        let value_offset = 10 + 12 + 4;
        tiff.extend_from_slice(&(value_offset as u32).to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes()); // next IFD
        tiff.extend_from_slice(note);
        tiff
    }

    fn exif_block(note: &[u8]) -> Vec<u8> {
        let mut block = vec![0, 0, 0, 0]; // zero TIFF header offset
        block.extend_from_slice(&tiff_with_maker_note(note));
        block
    }

    #[test]
    fn test_apple_maker_note_found() {
        let note = b"Apple iOS\0\x01MM\x00\x2a";
        let blocks = vec![exif_block(note)];
        assert_eq!(find_apple_maker_note(&blocks).as_deref(), Some(&note[..]));
    }

    #[test]
    fn test_non_apple_vendor_rejected() {
        let blocks = vec![exif_block(b"Canon\0\0\0\0")];
        assert!(find_apple_maker_note(&blocks).is_none());
    }

    #[test]
    fn test_malformed_block_skipped() {
        let note = b"Apple iOS\0\x01";
        let blocks = vec![vec![1, 2], vec![0xff; 32], exif_block(note)];
        assert_eq!(find_apple_maker_note(&blocks).as_deref(), Some(&note[..]));
    }

    #[test]
    fn test_empty() {
        assert!(find_apple_maker_note(&[]).is_none());
    }
}
