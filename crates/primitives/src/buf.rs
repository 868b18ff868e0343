use std::{fmt, str};

use alloy_primitives::FixedBytes;
use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ParseError;

// 32-byte buf, used for leaf/node hashes, roots and digests
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf32(pub FixedBytes<32>);

impl Buf32 {
    pub const LEN: usize = 32;

    pub fn zero() -> Self {
        Self([0; 32].into())
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Lowercase hex without a `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for Buf32 {
    fn from(value: [u8; 32]) -> Self {
        Self(FixedBytes::from(value))
    }
}

impl From<FixedBytes<32>> for Buf32 {
    fn from(value: FixedBytes<32>) -> Self {
        Self(value)
    }
}

impl From<Buf32> for [u8; 32] {
    fn from(value: Buf32) -> Self {
        value.0.into()
    }
}

impl AsRef<[u8]> for Buf32 {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl TryFrom<&[u8]> for Buf32 {
    type Error = ParseError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = value.try_into().map_err(|_| ParseError::InvalidLength {
            expected: Self::LEN,
            actual: value.len(),
        })?;
        Ok(arr.into())
    }
}

impl str::FromStr for Buf32 {
    type Err = ParseError;

    /// Parses hex, with or without a leading `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Debug for Buf32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0; 64];
        hex::encode_to_slice(self.0, &mut buf).expect("buf: enc hex");
        f.write_str(str::from_utf8(&buf).expect("buf: hex is ascii"))
    }
}

impl fmt::Display for Buf32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Serialize for Buf32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Buf32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl BorshSerialize for Buf32 {
    fn serialize<W: std::io::prelude::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.0.as_slice())
    }
}

impl BorshDeserialize for Buf32 {
    fn deserialize_reader<R: std::io::prelude::Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut array = [0u8; 32];
        reader.read_exact(&mut array)?;
        Ok(Self(array.into()))
    }
}

impl<'a> Arbitrary<'a> for Buf32 {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut array = [0u8; 32];
        u.fill_buffer(&mut array)?;
        Ok(Buf32(array.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_accepts_prefix() {
        let raw = "11".repeat(32);
        let a: Buf32 = raw.parse().unwrap();
        let b: Buf32 = format!("0x{raw}").parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Buf32::from([0x11; 32]));
        assert_eq!(a.to_hex(), raw);
    }

    #[test]
    fn test_hex_parse_rejects_bad_input() {
        assert!(matches!(
            "abcd".parse::<Buf32>(),
            Err(ParseError::InvalidLength {
                expected: 32,
                actual: 2
            })
        ));
        assert!(matches!(
            "zz".repeat(32).parse::<Buf32>(),
            Err(ParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let buf = Buf32::from([0xab; 32]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: Buf32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn test_serde_deserialize_inside_struct() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Entry {
            root: Buf32,
        }

        let entry: Entry =
            serde_json::from_str(&format!("{{\"root\":\"0x{}\"}}", "cd".repeat(32))).unwrap();
        assert_eq!(entry.root, Buf32::from([0xcd; 32]));
        assert!(serde_json::from_str::<Entry>("{\"root\":\"cd\"}").is_err());
        assert!(serde_json::from_str::<Entry>("{\"root\":7}").is_err());
    }

    #[test]
    fn test_borsh_is_raw_bytes() {
        let buf = Buf32::from([7; 32]);
        let enc = borsh::to_vec(&buf).unwrap();
        assert_eq!(enc, vec![7; 32]);
    }
}
