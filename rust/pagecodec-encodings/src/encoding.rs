use pagecodec_common::error::Error;
use serde::{Deserialize, Serialize};

/// Page encodings supported for the byte-array physical type.
///
/// Discriminants are the encoding codes stored in page headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Encoding {
    Plain = 0,
    /// Legacy name of the dictionary encoding, used by older writers.
    PlainDictionary = 2,
    RleDictionary = 8,
}

impl Encoding {
    pub fn is_dictionary(self) -> bool {
        matches!(self, Encoding::PlainDictionary | Encoding::RleDictionary)
    }
}

impl TryFrom<i32> for Encoding {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Encoding::Plain),
            2 => Ok(Encoding::PlainDictionary),
            8 => Ok(Encoding::RleDictionary),
            _ => Err(Error::not_implemented(format!(
                "byte-array decoder for encoding {value}"
            ))),
        }
    }
}
