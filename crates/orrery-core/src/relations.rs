//! # Relationship Decoder
//!
//! The store keeps species-to-species relations (contact, alliance,
//! enmity) and system visitation as packed bit vectors: bit `i` set
//! means the relation holds with participant `i + 1`. This module turns
//! those words into explicit, ordered participant id lists, once, at
//! graph-build time. No downstream component re-inspects raw bits.

// =============================================================================
// DECODER
// =============================================================================

/// Decode a packed relation set into ascending 1-based participant ids.
///
/// - Bit `i` of `words` corresponds to participant `i + 1`.
/// - `exclude` drops that id from the result (a species never relates
///   to itself); pass `None` for sets with no owner, such as a system's
///   visitation set.
/// - Ids beyond `participants` are never produced, regardless of stray
///   high bits in the words.
///
/// Total and pure: an all-zero set decodes to an empty list.
#[must_use]
pub fn decode_relation(words: &[u32], exclude: Option<u16>, participants: usize) -> Vec<u16> {
    let mut ids = Vec::new();
    for bit in 0..participants.min(words.len() * 32) {
        if words[bit / 32] & (1 << (bit % 32)) != 0 {
            let id = (bit + 1) as u16;
            if exclude != Some(id) {
                ids.push(id);
            }
        }
    }
    ids
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_decodes_to_nothing() {
        assert!(decode_relation(&[0, 0, 0, 0], None, 100).is_empty());
        assert!(decode_relation(&[], None, 100).is_empty());
    }

    #[test]
    fn single_bit_maps_to_one_based_id() {
        // Bit 0 => participant 1, bit 33 => participant 34.
        assert_eq!(decode_relation(&[1, 0], None, 64), vec![1]);
        assert_eq!(decode_relation(&[0, 2], None, 64), vec![34]);
    }

    #[test]
    fn ids_come_out_ascending() {
        let words = [0b1010_0101, 0, 0b1, 0];
        let ids = decode_relation(&words, None, 100);
        assert_eq!(ids, vec![1, 3, 6, 8, 65]);
    }

    #[test]
    fn self_id_is_excluded() {
        let words = [0b111, 0, 0, 0];
        assert_eq!(decode_relation(&words, Some(2), 100), vec![1, 3]);
        // Excluding an id that is not set changes nothing.
        assert_eq!(decode_relation(&words, Some(50), 100), vec![1, 2, 3]);
    }

    #[test]
    fn participant_count_bounds_the_output() {
        // High bits beyond the roster never leak into the result.
        let words = [u32::MAX, u32::MAX, u32::MAX, u32::MAX];
        let ids = decode_relation(&words, None, 5);
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn short_word_slice_is_not_overrun() {
        // One word only covers 32 participants even if more are asked for.
        let ids = decode_relation(&[u32::MAX], None, 100);
        assert_eq!(ids.len(), 32);
        assert_eq!(*ids.last().unwrap(), 32);
    }
}
