use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::private::Sealed;

/// The Discord epoch, the first second of 2015.
pub const EPOCH: DateTime<Utc> = {
    // we have to use let-else because const .unwrap() has not been stabilized
    let Some(naived) = NaiveDate::from_ymd_opt(2015, 1, 1) else {
        panic!("Failed to convert epoch to NaiveDate")
    };

    let Some(naivedt) = naived.and_hms_opt(0, 0, 0) else {
        panic!("Failed to convert NaiveDate to NaiveDateTime")
    };

    naivedt.and_utc()
};

const TS_OFFSET: u64 = 22;

/// Marker trait for newtypes over snowflakes
pub trait Snowflake: Into<u64> + Clone + Sealed
where u64: Into<Self> {
    /// Gets the creation timestamp of the snowflake. The shifted value
    /// always fits in 42 bits, so this never fails.
    fn timestamp(self) -> DateTime<Utc> {
        EPOCH + TimeDelta::milliseconds((self.into() >> TS_OFFSET) as i64)
    }
}

/// Declares a snowflake newtype. The id deserializes from either a decimal
/// string or a plain number and always serializes as a string, which is how
/// the host hands ids around.
macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[::serde_with::serde_as]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
                 ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(
            #[serde_as(as = "::serde_with::PickFirst<(::serde_with::DisplayFromStr, _)>")]
            pub u64
        );

        crate::model::snowflake::newtype_sf_impl!($name);
        crate::model::snowflake::extra_sf_impls!($name);
    }
}

macro_rules! newtype_sf_impl {
    ($ty:ty) => {
        impl crate::private::Sealed for $ty {}

        impl From<$ty> for u64 {
            fn from(sf: $ty) -> u64 {
                sf.0
            }
        }

        impl From<u64> for $ty {
            fn from(sf: u64) -> Self {
                Self(sf)
            }
        }

        impl crate::model::snowflake::Snowflake for $ty {}
    }
}

macro_rules! extra_sf_impls {
    ($ty:ty) => {
        impl From<$ty> for ::chrono::DateTime<::chrono::Utc> {
            fn from(sf: $ty) -> Self {
                use crate::model::snowflake::Snowflake;
                sf.timestamp()
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>)
                   -> Result<(), ::std::fmt::Error> {
                write!(f, "{id}",
                       id = self.0)
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = <u64 as ::std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(u64::from_str(s)?))
            }
        }
    }
}

pub(crate) use snowflake_id;
pub(crate) use newtype_sf_impl;
pub(crate) use extra_sf_impls;
