use derive_more::Display;
use fnv::FnvHasher;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
    time::{SystemTime, UNIX_EPOCH},
};

/// The seed that a map's noise function is built from. Maps generated from
/// the same seed and config are identical.
///
/// Anything can be a seed: a number is used as-is, and any other text is
/// hashed. In a config file, a seed can be written as an integer or a
/// string. It's always written back out as a string though, because TOML
/// integers are signed and can't hold every `u64`.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Seed {
    /// An integer seed, which can be used directly
    Int(u64),
    /// A textual string, which will be hashed into a u64 before use
    Text(String),
}

impl Seed {
    /// Convert the seed to a `u64`
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }

    /// Fold this seed down to the 32 bits that the noise function accepts.
    /// Both halves of the `u64` contribute, so seeds that differ only in
    /// their upper bits still produce different maps.
    pub fn to_noise_seed(&self) -> u32 {
        let seed = self.to_u64();
        ((seed >> 32) ^ seed) as u32
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

// Numeric text is the same seed as the number it spells
impl From<&str> for Seed {
    fn from(seed_str: &str) -> Self {
        match seed_str.parse::<u64>() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(seed_str.into()),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        // Integer or string, so there's no single type to hint at
        deserializer.deserialize_any(SeedVisitor)
    }
}

struct SeedVisitor;

// Smaller integer types get forwarded to the u64/i64 methods by default
impl<'de> Visitor<'de> for SeedVisitor {
    type Value = Seed;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or string")
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Seed, E> {
        Ok(Seed::Int(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Seed, E> {
        u64::try_from(value).map(Seed::Int).map_err(|_| {
            E::custom(format!("seed can't be negative: {}", value))
        })
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Seed, E> {
        Ok(value.into())
    }
}

/// Something that hands out a seed for each map a generator produces. The
/// generator asks for exactly one seed per map.
pub trait SeedSource {
    fn next_seed(&mut self) -> Seed;
}

/// Always hands out the same seed, so every map generated from the same
/// config is identical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedSeed(pub Seed);

impl SeedSource for FixedSeed {
    fn next_seed(&mut self) -> Seed {
        self.0.clone()
    }
}

impl From<Seed> for FixedSeed {
    fn from(seed: Seed) -> Self {
        Self(seed)
    }
}

impl From<u64> for FixedSeed {
    fn from(seed: u64) -> Self {
        Self(seed.into())
    }
}

impl From<&str> for FixedSeed {
    fn from(seed: &str) -> Self {
        Self(seed.into())
    }
}

/// An RNG that is seeded once from the wall clock, then hands out a fresh
/// random seed for every map. Two maps from the same source will (almost
/// certainly) differ.
#[derive(Clone, Debug)]
pub struct TimeSeedSource {
    rng: Pcg64,
}

impl TimeSeedSource {
    pub fn new() -> Self {
        // A clock set before 1970 just gets us a seed of 0, which is fine
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        debug!("Seeding map RNG from clock: {}", nanos);
        Self {
            rng: Pcg64::seed_from_u64(nanos),
        }
    }
}

impl Default for TimeSeedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedSource for TimeSeedSource {
    fn next_seed(&mut self) -> Seed {
        Seed::Int(self.rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token,
    };

    #[test]
    fn test_from_str() {
        // Valid u64 -> parses as an int
        assert_eq!(Seed::from("0"), Seed::Int(0));
        assert_eq!(
            Seed::from("12506774975058000"),
            Seed::Int(12506774975058000)
        );

        // Invalid u64 -> stores the raw text
        assert_eq!(Seed::from("-1"), Seed::Text("-1".into()));
        assert_eq!(
            Seed::from("archipelago"),
            Seed::Text("archipelago".into())
        );
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Seed::Int(0).to_u64(), 0);
        assert_eq!(Seed::Int(12506774975058000).to_u64(), 12506774975058000);

        // Text seeds hash, and the hash is stable between calls
        let text = Seed::Text("archipelago".into());
        assert_eq!(text.to_u64(), text.clone().to_u64());
        assert_ne!(text.to_u64(), Seed::Text("continent".into()).to_u64());
    }

    #[test]
    fn test_to_noise_seed() {
        assert_eq!(Seed::Int(0).to_noise_seed(), 0);
        assert_eq!(Seed::Int(7).to_noise_seed(), 7);
        // Upper half gets folded into the lower half
        assert_eq!(Seed::Int(1 << 32).to_noise_seed(), 1);
        assert_eq!(Seed::Int((5 << 32) | 3).to_noise_seed(), 6);
    }

    #[test]
    fn test_serialize() {
        assert_ser_tokens(&Seed::Int(0), &[Token::String("0")]);
        assert_ser_tokens(
            &Seed::Int(12506774975058000),
            &[Token::String("12506774975058000")],
        );
        assert_ser_tokens(
            &Seed::Text("archipelago".into()),
            &[Token::String("archipelago")],
        );
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Seed::Int(0), &[Token::String("0")]);
        assert_de_tokens(&Seed::Int(42), &[Token::U64(42)]);
        assert_de_tokens(&Seed::Text("-1".into()), &[Token::String("-1")]);

        assert_de_tokens(&Seed::Int(7), &[Token::I8(7)]);
        assert_de_tokens(&Seed::Int(3), &[Token::U16(3)]);

        assert_de_tokens_error::<Seed>(
            &[Token::I32(-1)],
            "seed can't be negative: -1",
        );
        assert_de_tokens_error::<Seed>(
            &[Token::Bool(false)],
            "invalid type: boolean `false`, \
            expected a non-negative integer or string",
        );
    }

    #[test]
    fn test_fixed_seed_source() {
        let mut source = FixedSeed::from(99);
        assert_eq!(source.next_seed(), Seed::Int(99));
        assert_eq!(source.next_seed(), Seed::Int(99));
    }

    #[test]
    fn test_time_seed_source() {
        let mut source = TimeSeedSource::new();
        let first = source.next_seed();
        let second = source.next_seed();
        // A PCG stream won't repeat on consecutive draws
        assert_ne!(first, second);
    }
}
