use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

/// Text encodings understood by the string accessors.
///
/// Encodings parse from their common names, ignoring case: `utf8`/`utf-8`, `utf16le`/`ucs2`,
/// `latin1`/`binary`, `ascii` and `hex`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Encoding {
    /// UTF-8. Invalid sequences decode to U+FFFD.
    #[default]
    #[strum(to_string = "utf8", serialize = "utf-8")]
    Utf8,
    /// UTF-16, little-endian code units. Invalid sequences decode to U+FFFD.
    #[strum(
        to_string = "utf16le",
        serialize = "utf-16le",
        serialize = "ucs2",
        serialize = "ucs-2"
    )]
    Utf16Le,
    /// One byte per character. Characters above U+00FF keep only their low byte when written.
    #[strum(to_string = "latin1", serialize = "binary")]
    Latin1,
    /// Like [`Encoding::Latin1`] when writing; decoding clears the high bit of every byte.
    #[strum(to_string = "ascii")]
    Ascii,
    /// Two hexadecimal digits per byte.
    #[strum(to_string = "hex")]
    Hex,
}

impl Encoding {
    /// Looks up an encoding by name.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| Error::UnknownEncoding(name.to_owned()))
    }

    /// Encodes `text` completely.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        Ok(match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Latin1 | Self::Ascii => text.chars().map(|c| c as u32 as u8).collect(),
            Self::Hex => hex::decode(text).map_err(|_| Error::InvalidHex)?,
        })
    }

    /// Decodes `bytes` into a string. Decoding never fails; see the variant docs for how invalid
    /// input is handled. A trailing odd byte is ignored by [`Encoding::Utf16Le`].
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Ascii => bytes.iter().map(|&b| char::from(b & 0x7f)).collect(),
            Self::Hex => hex::encode(bytes),
        }
    }

    /// Returns the length of the longest prefix of `encoded` that is at most `limit` bytes long
    /// and does not end in the middle of a character.
    pub(crate) fn boundary(self, encoded: &[u8], limit: usize) -> usize {
        let limit = limit.min(encoded.len());
        match self {
            Self::Utf8 => {
                let mut end = limit;
                while end > 0 && end < encoded.len() && encoded[end] & 0xc0 == 0x80 {
                    end -= 1;
                }
                end
            }
            Self::Utf16Le => {
                let mut end = limit & !1;
                if end >= 2 && end < encoded.len() {
                    let last = u16::from_le_bytes([encoded[end - 2], encoded[end - 1]]);
                    // a high surrogate without its low half
                    if (0xd800..0xdc00).contains(&last) {
                        end -= 2;
                    }
                }
                end
            }
            Self::Latin1 | Self::Ascii | Self::Hex => limit,
        }
    }
}
