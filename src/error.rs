//! Library error types.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::{
    ciclo::Ciclo,
    periodo::{OpcaoHoraria, Tarifa},
};

#[derive(Debug, Error)]
pub enum CicloError {
    /// The shipped tables partition the day, so this only surfaces a broken
    /// table, never a gap in the regulation.
    #[error("no period of «{ciclo}» covers {at}")]
    PeriodoNaoCoberto { ciclo: Ciclo, at: NaiveDateTime },

    #[error("unknown cycle name: {0:?}")]
    NomeDesconhecido(String),
}

#[derive(Debug, Error)]
pub enum PlanoError {
    #[error("{0} kVA is not a contractable capacity")]
    PotenciaForaDaTabela(f64),

    #[error("`{0}` is not a valid capacity")]
    PotenciaInvalida(String),

    #[error("the «{0}» option requires a cycle")]
    CicloEmFalta(OpcaoHoraria),

    #[error("no energy cost is set for «{0}»")]
    SemCustoKwh(Tarifa),

    #[error("no capacity cost is set")]
    SemCustoPotencia,

    #[error("tariff «{tarifa}» does not apply to the «{opcao}» option")]
    TarifaNaoAplicavel { tarifa: Tarifa, opcao: OpcaoHoraria },

    #[error(transparent)]
    Ciclo(#[from] CicloError),
}

#[derive(Debug, Error)]
pub enum SimuladorError {
    #[error("the simulator request failed")]
    Http(#[from] ureq::Error),

    #[error("failed to encode the simulation request")]
    Encode(#[from] serde_qs::Error),

    #[error("the simulator returned no offers")]
    SemOfertas,
}
