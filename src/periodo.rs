//! Regulated period and tariff vocabulary.

use std::fmt::{Display, Formatter};

use enumset::{EnumSet, enum_set};
use serde::{Deserialize, Serialize};

/// Regulated time period («período horário») within a delivery day.
#[derive(Debug, enumset::EnumSetType, Deserialize, Serialize)]
pub enum PeriodoHorario {
    /// Peak.
    Ponta,

    /// Half-peak.
    Cheias,

    /// Off-peak.
    #[serde(rename = "Vazio Normal")]
    VazioNormal,

    /// Deep off-peak, the small hours.
    #[serde(rename = "Super Vazio")]
    SuperVazio,
}

impl PeriodoHorario {
    /// The two off-peak («vazio») period kinds.
    pub const OFF_PEAK: EnumSet<Self> = enum_set!(Self::VazioNormal | Self::SuperVazio);

    #[must_use]
    pub fn is_off_peak(self) -> bool {
        Self::OFF_PEAK.contains(self)
    }
}

impl Display for PeriodoHorario {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ponta => write!(f, "Ponta"),
            Self::Cheias => write!(f, "Cheias"),
            Self::VazioNormal => write!(f, "Vazio Normal"),
            Self::SuperVazio => write!(f, "Super Vazio"),
        }
    }
}

/// Billing band on the invoice.
///
/// Which bands apply depends on the plan's [`OpcaoHoraria`]: a single-rate
/// plan bills everything as [`Tarifa::Normal`], a two-rate plan collapses the
/// four periods into [`Tarifa::Vazio`] and [`Tarifa::ForaDeVazio`], and a
/// three-rate plan keeps [`Tarifa::Ponta`] and [`Tarifa::Cheias`] apart.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum Tarifa {
    Ponta,
    Cheias,
    Vazio,

    #[serde(rename = "Fora de Vazio")]
    ForaDeVazio,

    Normal,
}

impl Display for Tarifa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ponta => write!(f, "Ponta"),
            Self::Cheias => write!(f, "Cheias"),
            Self::Vazio => write!(f, "Vazio"),
            Self::ForaDeVazio => write!(f, "Fora de Vazio"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}

/// Metering option («opção horária») of a supply contract.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OpcaoHoraria {
    /// One rate for the whole day.
    Simples,

    /// Off-peak and out-of-off-peak rates.
    #[serde(rename = "Bi-Horária")]
    BiHoraria,

    /// Peak, half-peak and off-peak rates.
    #[serde(rename = "Tri-Horária")]
    TriHoraria,
}

impl OpcaoHoraria {
    pub const TODAS: [Self; 3] = [Self::Simples, Self::BiHoraria, Self::TriHoraria];

    /// Whether contracting this option requires choosing a cycle.
    #[must_use]
    pub const fn requer_ciclo(self) -> bool {
        !matches!(self, Self::Simples)
    }
}

impl Display for OpcaoHoraria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simples => write!(f, "Simples"),
            Self::BiHoraria => write!(f, "Bi-Horária"),
            Self::TriHoraria => write!(f, "Tri-Horária"),
        }
    }
}
