//! Shortcode ↔ media id codec.
//!
//! A shortcode is a base-64 numeral over `A-Z a-z 0-9 - _`; each symbol's
//! position in that alphabet is its digit value, most significant first.

use num_bigint::BigUint;

use crate::core::error::{ResolveError, ResolveResult};

/// Numeric media id as used by `i.instagram.com/api/v1/media/<id>/info/`.
///
/// Unbounded: private-post shortcodes run to ~40 symbols, well past 128 bits.
pub type MediaId = BigUint;

pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn symbol_value(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 26),
        '0'..='9' => Some(c as u32 - '0' as u32 + 52),
        '-' => Some(62),
        '_' => Some(63),
        _ => None,
    }
}

/// Decode a shortcode into its media id.
///
/// Fails with [`ResolveError::InvalidShortcode`] on any symbol outside the
/// alphabet. The empty string decodes to 0.
///
/// ```
/// use reelcore::instagram::media_id::{media_id_from_shortcode, MediaId};
///
/// assert_eq!(media_id_from_shortcode("A").unwrap(), MediaId::from(0u32));
/// assert_eq!(media_id_from_shortcode("_").unwrap(), MediaId::from(63u32));
/// assert_eq!(media_id_from_shortcode("BA").unwrap(), MediaId::from(64u32));
/// ```
pub fn media_id_from_shortcode(shortcode: &str) -> ResolveResult<MediaId> {
    shortcode.chars().try_fold(MediaId::default(), |acc, c| {
        let digit = symbol_value(c).ok_or_else(|| ResolveError::InvalidShortcode {
            shortcode: shortcode.to_string(),
            reason: format!("symbol {:?} is not in the shortcode alphabet", c),
        })?;
        Ok(acc * 64u32 + digit)
    })
}

/// Encode a media id back into its shortcode (no leading `A` padding).
pub fn shortcode_from_media_id(id: &MediaId) -> String {
    id.to_radix_be(64)
        .into_iter()
        .map(|digit| char::from(ALPHABET[usize::from(digit)]))
        .collect()
}
