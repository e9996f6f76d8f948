//! Client for the official ERSE price simulator.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use ureq::Agent;

use crate::{error::SimuladorError, plano::Potencia, quantity::KilowattHours};

const URL: &str = "https://simulador.precos.erse.pt/connectors/simular_eletricidade/";

/// Queries the simulator for the cheapest market offer matching a
/// consumption profile.
pub struct Simulador {
    client: Agent,
    potencia: Potencia,
    period_start: NaiveDate,
    period_end: NaiveDate,
}

impl Simulador {
    /// The period end defaults to today.
    pub fn new(potencia: Potencia, period_start: NaiveDate, period_end: Option<NaiveDate>) -> Self {
        let client =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(10))).build().into();
        Self {
            client,
            potencia,
            period_start,
            period_end: period_end.unwrap_or_else(|| Local::now().date_naive()),
        }
    }

    /// Cheapest offer for a single-rate profile.
    pub fn melhor_tarifa_simples(&self, energia: KilowattHours) -> Result<Oferta, SimuladorError> {
        self.simular(energia.0.to_string(), String::new(), String::new())
    }

    /// Cheapest offer for a two-rate profile.
    ///
    /// The form reuses its first two slots for the out-of-off-peak and
    /// off-peak consumptions.
    pub fn melhor_tarifa_bihorario(
        &self,
        fora_de_vazio: KilowattHours,
        vazio: KilowattHours,
    ) -> Result<Oferta, SimuladorError> {
        self.simular(fora_de_vazio.0.to_string(), vazio.0.to_string(), String::new())
    }

    /// Cheapest offer for a three-rate profile.
    pub fn melhor_tarifa_trihorario(
        &self,
        ponta: KilowattHours,
        cheias: KilowattHours,
        vazio: KilowattHours,
    ) -> Result<Oferta, SimuladorError> {
        self.simular(ponta.0.to_string(), cheias.0.to_string(), vazio.0.to_string())
    }

    #[instrument(skip_all)]
    fn simular(
        &self,
        ponta: String,
        cheias: String,
        vazio: String,
    ) -> Result<Oferta, SimuladorError> {
        let request =
            Request::new(self.potencia, self.period_start, self.period_end, ponta, cheias, vazio);
        let body = serde_qs::to_string(&request)?;
        debug!(%body, "simulating…");
        let response: Response = self
            .client
            .post(URL)
            .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
            .send(&body)?
            .body_mut()
            .read_json()?;
        response
            .resultados
            .into_iter()
            .next()
            .and_then(|resultado| resultado.ofertas.into_iter().next())
            .ok_or(SimuladorError::SemOfertas)
    }
}

#[derive(Serialize)]
struct Request {
    #[serde(rename = "pageStartIndex")]
    page_start_index: u8,

    #[serde(rename = "pageStep")]
    page_step: u8,

    /// `3` is residential.
    #[serde(rename = "caseType")]
    case_type: u8,

    /// Index of the capacity in the regulated table.
    #[serde(rename = "electSupply")]
    elect_supply: usize,

    /// `1` single-rate, `2` two-rate, `3` three-rate.
    cycle: u8,

    /// `3` means the billing period is given explicitly.
    #[serde(rename = "electCalendar")]
    elect_calendar: u8,

    #[serde(rename = "electCalendarPeriodStart")]
    period_start: NaiveDate,

    #[serde(rename = "electCalendarPeriodEnd")]
    period_end: NaiveDate,

    #[serde(rename = "electPonta")]
    ponta: String,

    #[serde(rename = "electCheias")]
    cheias: String,

    #[serde(rename = "electVazio")]
    vazio: String,
}

impl Request {
    fn new(
        potencia: Potencia,
        period_start: NaiveDate,
        period_end: NaiveDate,
        ponta: String,
        cheias: String,
        vazio: String,
    ) -> Self {
        let cycle = if !vazio.is_empty() {
            3
        } else if !cheias.is_empty() {
            2
        } else {
            1
        };
        Self {
            page_start_index: 0,
            page_step: 1,
            case_type: 3,
            elect_supply: potencia.index(),
            cycle,
            elect_calendar: 3,
            period_start,
            period_end,
            ponta,
            cheias,
            vazio,
        }
    }
}

#[derive(Deserialize)]
struct Response {
    #[serde(rename = "Resultados")]
    resultados: Vec<Resultado>,
}

#[derive(Deserialize)]
struct Resultado {
    #[serde(rename = "Oferta")]
    ofertas: Vec<Oferta>,
}

/// Market offer returned by the simulator.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Oferta {
    #[serde(rename = "Comercializador")]
    pub comercializador: String,

    #[serde(rename = "Nome")]
    pub nome: String,
}

impl Display for Oferta {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.comercializador, self.nome)
    }
}
