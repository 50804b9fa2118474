use encoding_rs::{Encoding, EUC_KR, UTF_8};
use std::borrow::Cow;

use crate::error::{ProcessingError, Result};

/// Decode raw dataset bytes, trying UTF-8 first and CP949 second.
///
/// The public-data portal publishes most standard datasets in CP949, but
/// re-saved copies are often UTF-8 with a BOM. `EUC_KR` in `encoding_rs` is
/// the WHATWG definition, which is the CP949 superset.
pub fn decode_text(bytes: &[u8]) -> Result<(Cow<'_, str>, &'static Encoding)> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            return Err(ProcessingError::InvalidFormat(format!(
                "Malformed {} input after byte order mark",
                encoding.name()
            )));
        }
        return Ok((text, encoding));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((Cow::Borrowed(text), UTF_8));
    }

    EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text, EUC_KR))
        .ok_or_else(|| {
            ProcessingError::InvalidFormat("Input is neither UTF-8 nor CP949 encoded".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let (text, encoding) = decode_text("시도명,시군구명".as_bytes()).unwrap();
        assert_eq!(text, "시도명,시군구명");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("위도".as_bytes());

        let (text, encoding) = decode_text(&bytes).unwrap();
        assert_eq!(text, "위도");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_decode_cp949() {
        let (encoded, _, _) = EUC_KR.encode("대구광역시,수성구");
        assert!(std::str::from_utf8(&encoded).is_err());

        let (text, encoding) = decode_text(&encoded).unwrap();
        assert_eq!(text, "대구광역시,수성구");
        assert_eq!(encoding, EUC_KR);
    }

    #[test]
    fn test_reject_undecodable_bytes() {
        assert!(decode_text(&[0xFF, 0xFF, 0x80]).is_err());
    }
}
