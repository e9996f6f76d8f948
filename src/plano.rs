//! Supply plans and the billing rules that apply to them.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    ciclo::Ciclo,
    error::PlanoError,
    periodo::{OpcaoHoraria, PeriodoHorario, Tarifa},
    quantity::{Cost, DailyRate, KilowattHourRate, KilowattHours},
    time::Interval,
};

/// Reduced VAT multiplier.
pub const IVA_REDUZIDA: f64 = 1.06;

/// Intermediate VAT multiplier.
pub const IVA_INTERMEDIA: f64 = 1.13;

/// Normal VAT multiplier.
pub const IVA_NORMAL: f64 = 1.23;

/// Excise duty («imposto especial de consumo») per kilowatt-hour.
pub const IMPOSTO_ESPECIAL_CONSUMO: KilowattHourRate = KilowattHourRate(0.001);

/// Monthly public broadcasting levy («contribuição para o audiovisual»).
pub const CONTRIB_AUDIOVISUAL: Cost = Cost(2.85);

/// Monthly DGEG operating levy.
pub const TAXA_DGEG: Cost = Cost(0.07);

/// Highest capacity whose energy is billed under the split VAT regime.
const PLAFOND_MAX_KVA: f64 = 6.9;

/// Highest capacity with reduced VAT on the whole capacity charge.
const IVA_REDUZIDA_MAX_KVA: f64 = 3.45;

/// Contracted capacity in kVA.
///
/// Only the normalized values from the regulated tariff book can be
/// contracted, so constructing one validates the value.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Potencia(f64);

impl Potencia {
    /// Normalized capacities from the regulated tariff book.
    pub const REGULADAS: [f64; 13] =
        [1.15, 2.3, 3.45, 4.6, 5.75, 6.9, 10.35, 13.8, 17.25, 20.7, 27.6, 34.5, 41.4];

    pub fn new(kva: f64) -> Result<Self, PlanoError> {
        if Self::REGULADAS.contains(&kva) {
            Ok(Self(kva))
        } else {
            Err(PlanoError::PotenciaForaDaTabela(kva))
        }
    }

    #[must_use]
    pub const fn kva(self) -> f64 {
        self.0
    }

    /// Position in the regulated table, as the simulator form expects it.
    #[expect(clippy::float_cmp)]
    #[must_use]
    pub fn index(self) -> usize {
        Self::REGULADAS.iter().position(|kva| *kva == self.0).unwrap()
    }
}

impl TryFrom<f64> for Potencia {
    type Error = PlanoError;

    fn try_from(kva: f64) -> Result<Self, Self::Error> {
        Self::new(kva)
    }
}

impl From<Potencia> for f64 {
    fn from(potencia: Potencia) -> Self {
        potencia.0
    }
}

impl FromStr for Potencia {
    type Err = PlanoError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let kva =
            string.parse().map_err(|_| PlanoError::PotenciaInvalida(string.to_string()))?;
        Self::new(kva)
    }
}

impl Display for Potencia {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kVA", self.0)
    }
}

/// Supply plan: contracted capacity, metering option and its prices.
#[derive(Clone, Debug)]
pub struct Plano {
    potencia: Potencia,
    opcao: OpcaoHoraria,
    ciclo: Option<Ciclo>,
    custo_kwh: BTreeMap<Tarifa, KilowattHourRate>,
    custo_potencia: Option<DailyRate>,
}

impl Plano {
    pub fn new(
        potencia: Potencia,
        opcao: OpcaoHoraria,
        ciclo: Option<Ciclo>,
    ) -> Result<Self, PlanoError> {
        if opcao.requer_ciclo() && ciclo.is_none() {
            return Err(PlanoError::CicloEmFalta(opcao));
        }
        Ok(Self { potencia, opcao, ciclo, custo_kwh: BTreeMap::new(), custo_potencia: None })
    }

    #[must_use]
    pub const fn potencia(&self) -> Potencia {
        self.potencia
    }

    #[must_use]
    pub const fn opcao_horaria(&self) -> OpcaoHoraria {
        self.opcao
    }

    #[must_use]
    pub const fn ciclo(&self) -> Option<Ciclo> {
        self.ciclo
    }

    pub fn definir_custo_kwh(&mut self, tarifa: Tarifa, custo: KilowattHourRate) {
        self.custo_kwh.insert(tarifa, custo);
    }

    pub fn definir_custo_potencia(&mut self, custo: DailyRate) {
        self.custo_potencia = Some(custo);
    }

    fn ciclo_contratado(&self) -> Result<Ciclo, PlanoError> {
        self.ciclo.ok_or(PlanoError::CicloEmFalta(self.opcao))
    }

    fn custo_unitario(&self, tarifa: Tarifa) -> Result<KilowattHourRate, PlanoError> {
        self.custo_kwh.get(&tarifa).copied().ok_or(PlanoError::SemCustoKwh(tarifa))
    }

    /// Billing band applicable at the given time.
    ///
    /// Collapses the resolved period into the band the plan's metering option
    /// actually bills: both off-peak periods land on [`Tarifa::Vazio`], and a
    /// two-rate plan folds peak and half-peak into [`Tarifa::ForaDeVazio`].
    pub fn tarifa_actual(&self, em: NaiveDateTime) -> Result<Tarifa, PlanoError> {
        match self.opcao {
            OpcaoHoraria::Simples => Ok(Tarifa::Normal),
            OpcaoHoraria::BiHoraria => {
                let periodo = self.ciclo_contratado()?.periodo_horario(em)?;
                Ok(if periodo.is_off_peak() { Tarifa::Vazio } else { Tarifa::ForaDeVazio })
            }
            OpcaoHoraria::TriHoraria => {
                let periodo = self.ciclo_contratado()?.periodo_horario(em)?;
                Ok(match periodo {
                    PeriodoHorario::Ponta => Tarifa::Ponta,
                    PeriodoHorario::Cheias => Tarifa::Cheias,
                    PeriodoHorario::VazioNormal | PeriodoHorario::SuperVazio => Tarifa::Vazio,
                })
            }
        }
    }

    /// Interval of the period the moment falls into, under the plan's cycle.
    pub fn intervalo(&self, em: NaiveDateTime) -> Result<Interval, PlanoError> {
        Ok(self.ciclo_contratado()?.intervalo(em)?)
    }

    /// Endless walk over the period intervals under the plan's cycle,
    /// starting with the one covering the given moment.
    pub fn intervalos(
        &self,
        from: NaiveDateTime,
    ) -> Result<impl Iterator<Item = Interval>, PlanoError> {
        Ok(self.ciclo_contratado()?.intervalos(from))
    }

    /// Interval of the period right after the current one.
    pub fn proximo_intervalo(&self, em: NaiveDateTime) -> Result<Interval, PlanoError> {
        Ok(self.ciclo_contratado()?.proximo_intervalo(em)?)
    }

    /// Monthly volume billed at the intermediate VAT rate («plafond»).
    fn plafond(&self, tarifa: Tarifa, familia_numerosa: bool) -> Result<KilowattHours, PlanoError> {
        let kwh = match (self.opcao, tarifa) {
            (OpcaoHoraria::Simples, Tarifa::Normal) => {
                if familia_numerosa { 150.0 } else { 100.0 }
            }
            (OpcaoHoraria::BiHoraria | OpcaoHoraria::TriHoraria, Tarifa::Vazio) => {
                if familia_numerosa { 60.0 } else { 40.0 }
            }
            (OpcaoHoraria::BiHoraria, Tarifa::ForaDeVazio) => {
                if familia_numerosa { 90.0 } else { 60.0 }
            }
            (OpcaoHoraria::TriHoraria, Tarifa::Cheias) => {
                if familia_numerosa { 64.3 } else { 42.9 }
            }
            (OpcaoHoraria::TriHoraria, Tarifa::Ponta) => {
                if familia_numerosa { 25.7 } else { 17.1 }
            }
            _ => return Err(PlanoError::TarifaNaoAplicavel { tarifa, opcao: self.opcao }),
        };
        Ok(KilowattHours(kwh))
    }

    /// Energy cost of the consumption billed under the given tariff, VAT
    /// included.
    ///
    /// Consumption up to the «plafond» carries the intermediate VAT rate and
    /// the remainder the normal rate; each share is rounded like an invoice
    /// line. See <https://www.erse.pt/media/pzievesl/ersexplica_aplicação-do-iva.pdf>.
    pub fn custo_kwh(
        &self,
        tarifa: Tarifa,
        kwh: KilowattHours,
        familia_numerosa: bool,
    ) -> Result<Cost, PlanoError> {
        let custo = self.custo_unitario(tarifa)?;
        let plafond = self.plafond(tarifa, familia_numerosa)?;
        if kwh > plafond {
            Ok((plafond * custo * IVA_INTERMEDIA).round_to_cents()
                + ((kwh - plafond) * custo * IVA_NORMAL).round_to_cents())
        } else {
            Ok((kwh * custo * IVA_INTERMEDIA).round_to_cents())
        }
    }

    /// Marginal energy price at the given time, VAT included.
    ///
    /// Above 6.9 kVA the normal VAT rate applies to every kilowatt-hour.
    /// Otherwise the price depends on whether the consumption so far has
    /// exhausted the «plafond».
    pub fn custo_kwh_actual(
        &self,
        em: NaiveDateTime,
        kwh_consumidos: KilowattHours,
        familia_numerosa: bool,
    ) -> Result<KilowattHourRate, PlanoError> {
        let tarifa = self.tarifa_actual(em)?;
        let custo = self.custo_unitario(tarifa)?;
        if self.potencia.kva() > PLAFOND_MAX_KVA {
            return Ok(custo * IVA_NORMAL);
        }
        let plafond = self.plafond(tarifa, familia_numerosa)?;
        if kwh_consumidos > plafond {
            Ok(custo * IVA_NORMAL)
        } else {
            Ok(custo * IVA_INTERMEDIA)
        }
    }

    /// Fixed charges over the given number of days, excluding the excise
    /// duty: the contracted capacity plus the broadcasting and DGEG levies,
    /// each line rounded separately.
    pub fn custos_fixos(&self, dias: u32) -> Result<Cost, PlanoError> {
        let custo_potencia = self.custo_potencia.ok_or(PlanoError::SemCustoPotencia)?;
        let iva = if self.potencia.kva() <= IVA_REDUZIDA_MAX_KVA {
            warn!(potencia = %self.potencia, "reduced VAT applies to the whole capacity charge");
            IVA_REDUZIDA
        } else {
            IVA_NORMAL
        };
        Ok((custo_potencia * f64::from(dias) * iva).round_to_cents()
            + (CONTRIB_AUDIOVISUAL * IVA_REDUZIDA).round_to_cents()
            + (TAXA_DGEG * IVA_NORMAL).round_to_cents())
    }
}

impl Display for Plano {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.potencia, self.opcao)?;
        if let Some(ciclo) = self.ciclo {
            write!(f, " {ciclo}")?;
        }
        Ok(())
    }
}

/// Excise duty on the consumed energy, VAT included.
#[must_use]
pub fn imposto_especial_consumo(kwh: KilowattHours) -> Cost {
    (kwh * IMPOSTO_ESPECIAL_CONSUMO * IVA_NORMAL).round_to_cents()
}
