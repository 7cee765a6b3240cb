//! Type-safe value domains for passenger fields.
//!
//! Each categorical field is an enum whose variants map one-to-one onto the
//! exact tokens the classification pipeline was trained on. Parsing is exact:
//! `"male"` is a [`Sex`], `"Male"` and `" male"` are not.
//!
//! Integer fields with a bounded domain are newtypes ([`PassengerId`],
//! [`FamilyCount`]) or an enum ([`Pclass`]) that refuse out-of-range values at
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a categorical field enum backed by a fixed token vocabulary.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in widget order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Every token, in widget order.
            pub const TOKENS: &'static [&'static str] = &[$($token),+];

            /// Returns the token as the model expects it.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    _ => Err(format!(
                        "expected one of {}, got '{s}'",
                        quoted_list(Self::TOKENS)
                    )),
                }
            }
        }
    };
}

token_enum! {
    /// Passenger sex as recorded on the manifest.
    pub enum Sex {
        Male => "male",
        Female => "female",
    }
}

token_enum! {
    /// Port of embarkation: Cherbourg, Queenstown or Southampton.
    pub enum Embarked {
        Cherbourg => "C",
        Queenstown => "Q",
        Southampton => "S",
    }
}

token_enum! {
    /// Honorific extracted from the passenger name during feature engineering.
    pub enum Title {
        Mr => "Mr",
        Mrs => "Mrs",
        Miss => "Miss",
        Master => "Master",
        /// Any honorific too rare to keep as its own category.
        Rare => "Rare Title",
    }
}

token_enum! {
    /// Travelling group size bucket.
    pub enum GroupSize {
        Single => "Single",
        Couple => "Couple",
        Groups => "Groups",
        LargeGroup => "Large Group",
    }
}

token_enum! {
    /// Ticket fare bucket.
    pub enum FareCategory {
        UpTo10 => "0-10",
        UpTo25 => "10-25",
        UpTo40 => "25-40",
        UpTo70 => "40-70",
        UpTo100 => "70-100",
        Over100 => "100+",
    }
}

token_enum! {
    /// Age bucket.
    pub enum AgeCategory {
        UpTo16 => "0-16",
        UpTo32 => "16-32",
        UpTo48 => "32-48",
        UpTo64 => "48-64",
        Over64 => "64+",
    }
}

/// Ticket class. Serialized as the integer the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Pclass {
    First,
    Second,
    Third,
}

impl Pclass {
    /// Every class, in widget order.
    pub const ALL: &'static [Pclass] = &[Pclass::First, Pclass::Second, Pclass::Third];

    /// Every class as its integer value.
    pub const VALUES: &'static [i64] = &[1, 2, 3];

    pub const fn value(&self) -> i64 {
        match self {
            Pclass::First => 1,
            Pclass::Second => 2,
            Pclass::Third => 3,
        }
    }
}

impl TryFrom<i64> for Pclass {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Pclass::First),
            2 => Ok(Pclass::Second),
            3 => Ok(Pclass::Third),
            _ => Err(format!("expected one of 1, 2, 3, got {value}")),
        }
    }
}

impl From<Pclass> for i64 {
    fn from(value: Pclass) -> Self {
        value.value()
    }
}

impl fmt::Display for Pclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Passenger identifier. Any integer from 1 upwards; not checked against a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PassengerId(i64);

impl PassengerId {
    pub const MIN: i64 = 1;

    pub fn new(value: i64) -> Result<Self, String> {
        if value >= Self::MIN {
            Ok(Self(value))
        } else {
            Err(format!("expected an integer >= {}, got {value}", Self::MIN))
        }
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for PassengerId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PassengerId> for i64 {
    fn from(value: PassengerId) -> Self {
        value.0
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Count of relatives aboard (siblings/spouses or parents/children), 0 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct FamilyCount(u8);

impl FamilyCount {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 10;

    pub fn new(value: i64) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            // Range check above keeps the cast lossless.
            Ok(Self(value as u8))
        } else {
            Err(format!(
                "expected an integer between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub const fn get(&self) -> i64 {
        self.0 as i64
    }
}

impl TryFrom<i64> for FamilyCount {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FamilyCount> for i64 {
    fn from(value: FamilyCount) -> Self {
        value.get()
    }
}

impl fmt::Display for FamilyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn quoted_list(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|token| format!("'{token}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
