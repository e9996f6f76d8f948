//! Newtypes for the billed quantities.

use std::ops::Mul;

macro_rules! quantity {
    (@base $(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(
            ::derive_more::Add,
            ::derive_more::AddAssign,
            ::derive_more::FromStr,
            ::derive_more::Sub,
            ::derive_more::SubAssign,
            ::derive_more::Sum,
            ::serde::Deserialize,
            ::serde::Serialize,
            ::std::clone::Clone,
            ::std::marker::Copy,
        )]
        #[must_use]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: Self = Self(0.0);
        }

        impl ::std::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl ::std::cmp::Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                ::ordered_float::OrderedFloat(self.0).cmp(&::ordered_float::OrderedFloat(other.0))
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                ::ordered_float::OrderedFloat(self.0).eq(&::ordered_float::OrderedFloat(other.0))
            }
        }

        impl ::std::cmp::Eq for $name {}
    };

    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        quantity!(@base $(#[$meta])* $name);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(formatter, "{} {}", self.0, $unit)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(formatter, "{}{}", self.0, $unit)
            }
        }
    };

    ($(#[$meta:meta])* $name:ident, $unit:literal, precision = $precision:literal) => {
        quantity!(@base $(#[$meta])* $name);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(formatter, "{:.*} {}", $precision, self.0, $unit)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(formatter, "{:.*}{}", $precision, self.0, $unit)
            }
        }
    };
}

quantity!(
    /// Amount in euros.
    Cost,
    "€",
    precision = 2
);

quantity!(
    /// Consumed energy.
    KilowattHours,
    "kWh"
);

quantity!(
    /// Energy unit price in euros per kilowatt-hour.
    KilowattHourRate,
    "€/kWh"
);

quantity!(
    /// Contracted capacity price in euros per day.
    DailyRate,
    "€/dia"
);

impl Cost {
    /// Rounds to whole cents, the way each invoice line is rounded.
    pub fn round_to_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Mul<f64> for Cost {
    type Output = Self;

    fn mul(self, factor: f64) -> Self::Output {
        Self(self.0 * factor)
    }
}

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rate: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rate.0)
    }
}

impl Mul<f64> for KilowattHourRate {
    type Output = Self;

    fn mul(self, factor: f64) -> Self::Output {
        Self(self.0 * factor)
    }
}

impl Mul<f64> for DailyRate {
    type Output = Cost;

    /// Multiplies the daily rate by a number of days.
    fn mul(self, days: f64) -> Self::Output {
        Cost(self.0 * days)
    }
}
