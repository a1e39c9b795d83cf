//! Serde adapters for 64-bit word settings.
//!
//! TOML integers are signed, so a seed or derivation key of `2^63` or more
//! cannot be written as a bare number. These settings also accept a string
//! holding a decimal or `0x`-prefixed hex value:
//!
//! ```toml
//! [engine]
//! seed = "0xffffffffffffffff"
//!
//! [derive]
//! keys = [0, 1, "0x8000000000000000"]
//! ```
//!
//! Words that fit an `i64` serialize as integers; larger ones serialize as hex
//! strings so the rendered file loads back.

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Parses a decimal or `0x`-prefixed hex word. Underscores are ignored.
pub fn parse_word(text: &str) -> Result<u64, String> {
    let trimmed = text.trim();
    let digits = trimmed.replace('_', "");
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    };
    parsed.map_err(|err| format!("invalid word {trimmed:?}: {err}"))
}

struct WordVisitor;

impl Visitor<'_> for WordVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer, or a decimal or 0x-prefixed hex string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        parse_word(value).map_err(E::custom)
    }
}

/// A single word setting, for use inside sequences.
struct WordValue(u64);

impl<'de> Deserialize<'de> for WordValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WordVisitor).map(WordValue)
    }
}

impl Serialize for WordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(&self.0, serializer)
    }
}

pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    if i64::try_from(*value).is_ok() {
        serializer.serialize_u64(*value)
    } else {
        serializer.serialize_str(&format!("{value:#x}"))
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(WordVisitor)
}

/// Word lists. A bare integer is a one-element list and a string may hold
/// several comma-separated words, which is how environment variables carry them.
pub mod list {
    use super::{
        Deserializer, SeqAccess, SerializeSeq, Serializer, Visitor, WordValue, de, fmt,
        parse_word,
    };

    struct WordsVisitor;

    impl<'de> Visitor<'de> for WordsVisitor {
        type Value = Vec<u64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of words or a comma-separated string of words")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<u64>, A::Error> {
            let mut words = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(WordValue(word)) = seq.next_element()? {
                words.push(word);
            }
            Ok(words)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Vec<u64>, E> {
            Ok(vec![value])
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Vec<u64>, E> {
            u64::try_from(value)
                .map(|word| vec![word])
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Vec<u64>, E> {
            value
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| parse_word(part).map_err(E::custom))
                .collect()
        }
    }

    pub fn serialize<S: Serializer>(words: &[u64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(words.len()))?;
        for &word in words {
            seq.serialize_element(&WordValue(word))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
        deserializer.deserialize_any(WordsVisitor)
    }
}
