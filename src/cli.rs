use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use erse::{ciclo::Ciclo, plano::Potencia, quantity::KilowattHours, simulador::Simulador};

use crate::{prelude::*, tables::build_intervalos_table};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the tariff period a moment falls into.
    #[clap(name = "periodo")]
    Periodo(PeriodoArgs),

    /// List the upcoming period intervals.
    #[clap(name = "proximos")]
    Proximos(ProximosArgs),

    /// Find the cheapest market offer via the ERSE simulator.
    #[clap(name = "simular")]
    Simular(SimularArgs),
}

#[derive(Parser)]
pub struct PeriodoArgs {
    /// Counting cycle.
    #[clap(long, value_enum, env = "ERSE_CICLO", default_value = "semanal")]
    ciclo: Ciclo,

    /// Moment to resolve, defaults to now.
    #[clap(long)]
    em: Option<NaiveDateTime>,
}

impl PeriodoArgs {
    pub fn run(self) -> Result {
        let em = self.em.unwrap_or_else(|| Local::now().naive_local());
        let (periodo, intervalo) = self.ciclo.resolve(em)?;
        info!(%periodo, start = %intervalo.start, end = %intervalo.end, "resolved");
        println!("{}", build_intervalos_table(&[(periodo, intervalo)]));
        Ok(())
    }
}

#[derive(Parser)]
pub struct ProximosArgs {
    /// Counting cycle.
    #[clap(long, value_enum, env = "ERSE_CICLO", default_value = "semanal")]
    ciclo: Ciclo,

    /// Moment to start from, defaults to now.
    #[clap(long)]
    em: Option<NaiveDateTime>,

    /// Number of intervals to list.
    #[clap(long, default_value_t = 12)]
    take: usize,
}

impl ProximosArgs {
    pub fn run(self) -> Result {
        let em = self.em.unwrap_or_else(|| Local::now().naive_local());
        let rows = self
            .ciclo
            .intervalos(em)
            .take(self.take)
            .map(|intervalo| Ok((self.ciclo.periodo_horario(intervalo.start)?, intervalo)))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", build_intervalos_table(&rows));
        Ok(())
    }
}

#[derive(Parser)]
pub struct SimularArgs {
    /// Contracted capacity in kVA.
    #[clap(long, env = "ERSE_POTENCIA")]
    potencia: Potencia,

    /// Billing period start.
    #[clap(long)]
    inicio: NaiveDate,

    /// Billing period end, defaults to today.
    #[clap(long)]
    fim: Option<NaiveDate>,

    #[command(subcommand)]
    command: SimularCommand,
}

#[derive(Subcommand)]
pub enum SimularCommand {
    /// Single-rate consumption.
    #[clap(name = "simples")]
    Simples {
        #[clap(long)]
        energia: KilowattHours,
    },

    /// Two-rate consumption.
    #[clap(name = "bihorario")]
    BiHorario {
        #[clap(long)]
        fora_de_vazio: KilowattHours,

        #[clap(long)]
        vazio: KilowattHours,
    },

    /// Three-rate consumption.
    #[clap(name = "trihorario")]
    TriHorario {
        #[clap(long)]
        ponta: KilowattHours,

        #[clap(long)]
        cheias: KilowattHours,

        #[clap(long)]
        vazio: KilowattHours,
    },
}

impl SimularArgs {
    pub fn run(self) -> Result {
        let simulador = Simulador::new(self.potencia, self.inicio, self.fim);
        let oferta = match self.command {
            SimularCommand::Simples { energia } => simulador.melhor_tarifa_simples(energia)?,
            SimularCommand::BiHorario { fora_de_vazio, vazio } => {
                simulador.melhor_tarifa_bihorario(fora_de_vazio, vazio)?
            }
            SimularCommand::TriHorario { ponta, cheias, vazio } => {
                simulador.melhor_tarifa_trihorario(ponta, cheias, vazio)?
            }
        };
        info!(%oferta.comercializador, %oferta.nome, "cheapest offer");
        println!("{oferta}");
        Ok(())
    }
}
