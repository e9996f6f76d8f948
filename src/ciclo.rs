//! Cycle schedules and period resolution.

pub mod tabela;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::{
    error::CicloError,
    periodo::PeriodoHorario,
    time::{Interval, TimeOfDay},
};

/// Tariff season.
///
/// Summer runs from the last Sunday of March up to the last Sunday of
/// October, following the legal time changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        let start = last_sunday_before(date.year(), 4);
        let end = last_sunday_before(date.year(), 11);
        if (start..end).contains(&date) { Self::Summer } else { Self::Winter }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summer => write!(f, "Verão"),
            Self::Winter => write!(f, "Inverno"),
        }
    }
}

/// Last Sunday strictly before the first day of the given month.
fn last_sunday_before(year: i32, month: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    first - Days::new(u64::from(first.weekday().num_days_from_monday()) + 1)
}

/// Day classes of the weekly cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DayGroup {
    /// Monday through Friday share one schedule.
    Workday,

    Saturday,
    Sunday,
}

impl DayGroup {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
            _ => Self::Workday,
        }
    }
}

/// Counting cycle («ciclo de contagem») of a supply contract.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Ciclo {
    /// Different schedules for workdays, Saturdays and Sundays.
    #[serde(rename = "Ciclo Semanal")]
    Semanal,

    /// The same schedule on every day of the year.
    #[serde(rename = "Ciclo Diário")]
    Diario,
}

impl Display for Ciclo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Semanal => write!(f, "Ciclo Semanal"),
            Self::Diario => write!(f, "Ciclo Diário"),
        }
    }
}

impl FromStr for Ciclo {
    type Err = CicloError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Ciclo Semanal" => Ok(Self::Semanal),
            "Ciclo Diário" => Ok(Self::Diario),
            _ => Err(CicloError::NomeDesconhecido(name.to_string())),
        }
    }
}

impl Ciclo {
    pub const TODOS: [Self; 2] = [Self::Semanal, Self::Diario];

    /// Well-known names, aligned with [`Ciclo::TODOS`].
    pub const NOMES: [&'static str; 2] = ["Ciclo Semanal", "Ciclo Diário"];

    fn rows(self, date: NaiveDate) -> &'static [tabela::Row] {
        let season = Season::of(date);
        match self {
            Self::Semanal => tabela::semanal(season, DayGroup::of(date)),
            Self::Diario => tabela::diario(season),
        }
    }

    /// Resolves the timestamp to its period and the concrete interval the
    /// period spans around it.
    pub fn resolve(self, at: NaiveDateTime) -> Result<(PeriodoHorario, Interval), CicloError> {
        let time = TimeOfDay::from(at.time());
        for (periodo, windows) in self.rows(at.date()) {
            for window in *windows {
                if window.contains(time) {
                    return Ok((*periodo, window.anchor(at)));
                }
            }
        }
        Err(CicloError::PeriodoNaoCoberto { ciclo: self, at })
    }

    /// Period the timestamp falls into.
    pub fn periodo_horario(self, at: NaiveDateTime) -> Result<PeriodoHorario, CicloError> {
        self.resolve(at).map(|(periodo, _)| periodo)
    }

    /// Interval of the period the timestamp falls into.
    pub fn intervalo(self, at: NaiveDateTime) -> Result<Interval, CicloError> {
        self.resolve(at).map(|(_, interval)| interval)
    }

    /// Endless walk over the period intervals, starting with the one covering
    /// the given timestamp.
    ///
    /// Consecutive intervals share their boundary: each one starts where the
    /// previous one ended, across day and season changes alike.
    pub fn intervalos(self, from: NaiveDateTime) -> impl Iterator<Item = Interval> {
        std::iter::successors(self.intervalo(from).ok(), move |interval| {
            self.intervalo(interval.end + TimeDelta::minutes(1)).ok()
        })
    }

    /// Interval of the period right after the current one.
    pub fn proximo_intervalo(self, at: NaiveDateTime) -> Result<Interval, CicloError> {
        self.intervalos(at).nth(1).ok_or(CicloError::PeriodoNaoCoberto { ciclo: self, at })
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_season_boundaries_2025_ok() {
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2025, 3, 29).unwrap()), Season::Winter);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2025, 3, 30).unwrap()), Season::Summer);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2025, 10, 25).unwrap()), Season::Summer);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2025, 10, 26).unwrap()), Season::Winter);
    }

    #[test]
    fn test_season_2024_ok() {
        // April 1st, 2024 was a Monday, so summer began the day before:
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()), Season::Summer);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2024, 3, 30).unwrap()), Season::Winter);
    }

    #[test]
    fn test_season_first_of_month_on_sunday_ok() {
        // April 1st, 2029 falls on a Sunday and must not count itself:
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2029, 3, 25).unwrap()), Season::Summer);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2029, 3, 24).unwrap()), Season::Winter);

        // Same on the autumn side: November 1st, 2026 is a Sunday:
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()), Season::Summer);
        assert_eq!(Season::of(NaiveDate::from_ymd_opt(2026, 10, 25).unwrap()), Season::Winter);
    }

    #[test]
    fn test_day_group_ok() {
        assert_eq!(DayGroup::of(NaiveDate::from_ymd_opt(2025, 3, 24).unwrap()), DayGroup::Workday);
        assert_eq!(DayGroup::of(NaiveDate::from_ymd_opt(2025, 3, 28).unwrap()), DayGroup::Workday);
        assert_eq!(DayGroup::of(NaiveDate::from_ymd_opt(2025, 3, 22).unwrap()), DayGroup::Saturday);
        assert_eq!(DayGroup::of(NaiveDate::from_ymd_opt(2025, 3, 23).unwrap()), DayGroup::Sunday);
    }

    #[test]
    fn test_resolve_winter_sunday_small_hours_ok() -> Result<(), CicloError> {
        let (periodo, interval) = Ciclo::Semanal.resolve(at(2025, 3, 23, 0, 5))?;
        assert_eq!(periodo, PeriodoHorario::VazioNormal);
        assert_eq!(interval, Interval::new(at(2025, 3, 23, 0, 0), at(2025, 3, 23, 2, 0)));
        Ok(())
    }

    #[test]
    fn test_resolve_sunday_afternoon_runs_to_midnight_ok() -> Result<(), CicloError> {
        let (periodo, interval) = Ciclo::Semanal.resolve(at(2025, 3, 23, 15, 15))?;
        assert_eq!(periodo, PeriodoHorario::VazioNormal);
        assert_eq!(interval, Interval::new(at(2025, 3, 23, 6, 0), at(2025, 3, 24, 0, 0)));
        Ok(())
    }

    #[test]
    fn test_resolve_winter_saturday_noon_ok() -> Result<(), CicloError> {
        let (periodo, interval) = Ciclo::Semanal.resolve(at(2025, 3, 22, 12, 15))?;
        assert_eq!(periodo, PeriodoHorario::Cheias);
        assert_eq!(interval, Interval::new(at(2025, 3, 22, 9, 30), at(2025, 3, 22, 13, 0)));
        Ok(())
    }

    #[test]
    fn test_resolve_winter_workday_evening_peak_ok() -> Result<(), CicloError> {
        let (periodo, interval) = Ciclo::Semanal.resolve(at(2025, 3, 24, 20, 0))?;
        assert_eq!(periodo, PeriodoHorario::Ponta);
        assert_eq!(interval, Interval::new(at(2025, 3, 24, 18, 30), at(2025, 3, 24, 21, 0)));
        Ok(())
    }

    #[test]
    fn test_resolve_daily_ignores_weekday_ok() -> Result<(), CicloError> {
        // A summer Sunday noon is still peak under the daily cycle:
        let (periodo, interval) = Ciclo::Diario.resolve(at(2025, 6, 15, 12, 0))?;
        assert_eq!(periodo, PeriodoHorario::Ponta);
        assert_eq!(interval, Interval::new(at(2025, 6, 15, 10, 30), at(2025, 6, 15, 13, 0)));
        Ok(())
    }

    #[test]
    fn test_resolve_summer_workday_ok() -> Result<(), CicloError> {
        let (periodo, interval) = Ciclo::Semanal.resolve(at(2025, 6, 2, 9, 15))?;
        assert_eq!(periodo, PeriodoHorario::Ponta);
        assert_eq!(interval, Interval::new(at(2025, 6, 2, 9, 15), at(2025, 6, 2, 12, 15)));
        Ok(())
    }

    #[test]
    fn test_proximo_intervalo_after_saturday_night_ok() -> Result<(), CicloError> {
        let interval = Ciclo::Semanal.proximo_intervalo(at(2025, 3, 22, 23, 15))?;
        assert_eq!(interval, Interval::new(at(2025, 3, 23, 0, 0), at(2025, 3, 23, 2, 0)));
        Ok(())
    }

    #[test]
    fn test_proximo_intervalo_monday_noon_ok() -> Result<(), CicloError> {
        let interval = Ciclo::Semanal.proximo_intervalo(at(2025, 3, 24, 12, 0))?;
        assert_eq!(interval, Interval::new(at(2025, 3, 24, 18, 30), at(2025, 3, 24, 21, 0)));
        Ok(())
    }

    #[test]
    fn test_intervalos_start_with_the_current_one_ok() {
        let mut intervalos = Ciclo::Semanal.intervalos(at(2025, 3, 24, 12, 0));
        assert_eq!(
            intervalos.next(),
            Some(Interval::new(at(2025, 3, 24, 12, 0), at(2025, 3, 24, 18, 30))),
        );
        assert_eq!(
            intervalos.next(),
            Some(Interval::new(at(2025, 3, 24, 18, 30), at(2025, 3, 24, 21, 0))),
        );
    }

    #[test]
    fn test_intervalos_are_contiguous_across_season_change_ok() {
        // The 2025 summer season starts on Sunday, March 30th:
        let intervalos = Ciclo::Semanal.intervalos(at(2025, 3, 29, 22, 30)).take(10).collect_vec();
        assert_eq!(intervalos[0], Interval::new(at(2025, 3, 29, 22, 0), at(2025, 3, 30, 0, 0)));
        assert_eq!(intervalos[1], Interval::new(at(2025, 3, 30, 0, 0), at(2025, 3, 30, 2, 0)));
        assert_eq!(intervalos[3], Interval::new(at(2025, 3, 30, 6, 0), at(2025, 3, 31, 0, 0)));
        // Monday the 31st follows the summer workday schedule:
        assert_eq!(intervalos[4], Interval::new(at(2025, 3, 31, 0, 0), at(2025, 3, 31, 2, 0)));
        for (previous, next) in intervalos.into_iter().tuple_windows() {
            assert_eq!(previous.end, next.start);
        }
    }

    #[test]
    fn test_intervalos_are_contiguous_across_summer_end_ok() {
        // The 2025 summer season ends on Sunday, October 26th:
        let intervalos = Ciclo::Semanal.intervalos(at(2025, 10, 25, 23, 30)).take(3).collect_vec();
        assert_eq!(intervalos[0], Interval::new(at(2025, 10, 25, 22, 0), at(2025, 10, 26, 0, 0)));
        assert_eq!(intervalos[1], Interval::new(at(2025, 10, 26, 0, 0), at(2025, 10, 26, 2, 0)));
        assert_eq!(intervalos[2], Interval::new(at(2025, 10, 26, 2, 0), at(2025, 10, 26, 6, 0)));
    }

    #[test]
    fn test_resolve_is_idempotent_ok() -> Result<(), CicloError> {
        let em = at(2025, 3, 24, 20, 0);
        assert_eq!(Ciclo::Semanal.resolve(em)?, Ciclo::Semanal.resolve(em)?);
        Ok(())
    }

    #[test]
    fn test_ciclo_from_str_ok() {
        assert_eq!("Ciclo Semanal".parse::<Ciclo>().unwrap(), Ciclo::Semanal);
        assert_eq!("Ciclo Diário".parse::<Ciclo>().unwrap(), Ciclo::Diario);
        assert!(matches!(
            "Ciclo Mensal".parse::<Ciclo>(),
            Err(CicloError::NomeDesconhecido(name)) if name == "Ciclo Mensal",
        ));
    }

    #[test]
    fn test_nomes_round_trip_ok() {
        for (ciclo, nome) in Ciclo::TODOS.into_iter().zip(Ciclo::NOMES) {
            assert_eq!(ciclo.to_string(), nome);
            assert_eq!(nome.parse::<Ciclo>().unwrap(), ciclo);
        }
    }

    #[test]
    fn test_ciclo_serde_ok() {
        assert_eq!(serde_json::to_string(&Ciclo::Diario).unwrap(), r#""Ciclo Diário""#);
        assert_eq!(
            serde_json::from_str::<Ciclo>(r#""Ciclo Semanal""#).unwrap(),
            Ciclo::Semanal,
        );
    }
}
