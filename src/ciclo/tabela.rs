//! Regulated period tables for mainland Portugal.
//!
//! Transcribed from the ERSE tariff schedule:
//! <https://www.erse.pt/atividade/regulacao/tarifas-e-precos-eletricidade/#periodos-horarios>

use crate::{
    ciclo::{DayGroup, Season},
    periodo::PeriodoHorario,
    time::{TimeOfDay, TimeWindow},
};

/// Period with its windows within a day.
pub type Row = (PeriodoHorario, &'static [TimeWindow]);

const fn window(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> TimeWindow {
    TimeWindow::new(TimeOfDay::new(start_hour, start_minute), TimeOfDay::new(end_hour, end_minute))
}

pub const SEMANAL_VERAO_UTIL: &[Row] = &[
    (PeriodoHorario::Ponta, &[window(9, 15, 12, 15)]),
    (PeriodoHorario::Cheias, &[window(7, 0, 9, 15), window(12, 15, 0, 0)]),
    (PeriodoHorario::VazioNormal, &[window(6, 0, 7, 0), window(0, 0, 2, 0)]),
    (PeriodoHorario::SuperVazio, &[window(2, 0, 6, 0)]),
];

pub const SEMANAL_VERAO_SABADO: &[Row] = &[
    (PeriodoHorario::Cheias, &[window(9, 0, 14, 0), window(20, 0, 22, 0)]),
    (
        PeriodoHorario::VazioNormal,
        &[window(0, 0, 2, 0), window(6, 0, 9, 0), window(14, 0, 20, 0), window(22, 0, 0, 0)],
    ),
    (PeriodoHorario::SuperVazio, &[window(2, 0, 6, 0)]),
];

pub const SEMANAL_INVERNO_UTIL: &[Row] = &[
    (PeriodoHorario::Ponta, &[window(9, 30, 12, 0), window(18, 30, 21, 0)]),
    (
        PeriodoHorario::Cheias,
        &[window(7, 0, 9, 30), window(12, 0, 18, 30), window(21, 0, 0, 0)],
    ),
    (PeriodoHorario::VazioNormal, &[window(6, 0, 7, 0), window(0, 0, 2, 0)]),
    (PeriodoHorario::SuperVazio, &[window(2, 0, 6, 0)]),
];

pub const SEMANAL_INVERNO_SABADO: &[Row] = &[
    (PeriodoHorario::Cheias, &[window(9, 30, 13, 0), window(18, 30, 22, 0)]),
    (
        PeriodoHorario::VazioNormal,
        &[window(0, 0, 2, 0), window(6, 0, 9, 30), window(13, 0, 18, 30), window(22, 0, 0, 0)],
    ),
    (PeriodoHorario::SuperVazio, &[window(2, 0, 6, 0)]),
];

/// Sundays have the same windows in both seasons.
pub const SEMANAL_DOMINGO: &[Row] = &[
    (PeriodoHorario::VazioNormal, &[window(0, 0, 2, 0), window(6, 0, 0, 0)]),
    (PeriodoHorario::SuperVazio, &[window(2, 0, 6, 0)]),
];

pub const DIARIO_VERAO: &[Row] = &[
    (PeriodoHorario::Ponta, &[window(10, 30, 13, 0), window(19, 30, 21, 0)]),
    (
        PeriodoHorario::Cheias,
        &[window(8, 0, 10, 30), window(13, 0, 19, 30), window(21, 0, 22, 0)],
    ),
    (
        PeriodoHorario::VazioNormal,
        &[window(0, 0, 2, 0), window(6, 0, 8, 0), window(22, 0, 0, 0)],
    ),
    (PeriodoHorario::SuperVazio, &[window(2, 0, 6, 0)]),
];

pub const DIARIO_INVERNO: &[Row] = &[
    (PeriodoHorario::Ponta, &[window(9, 0, 10, 30), window(18, 0, 20, 30)]),
    (
        PeriodoHorario::Cheias,
        &[window(8, 0, 9, 0), window(10, 30, 18, 0), window(20, 30, 22, 0)],
    ),
    (
        PeriodoHorario::VazioNormal,
        &[window(0, 0, 2, 0), window(6, 0, 8, 0), window(22, 0, 0, 0)],
    ),
    (PeriodoHorario::SuperVazio, &[window(2, 0, 6, 0)]),
];

pub const fn semanal(season: Season, day: DayGroup) -> &'static [Row] {
    match (season, day) {
        (Season::Summer, DayGroup::Workday) => SEMANAL_VERAO_UTIL,
        (Season::Summer, DayGroup::Saturday) => SEMANAL_VERAO_SABADO,
        (Season::Winter, DayGroup::Workday) => SEMANAL_INVERNO_UTIL,
        (Season::Winter, DayGroup::Saturday) => SEMANAL_INVERNO_SABADO,
        (_, DayGroup::Sunday) => SEMANAL_DOMINGO,
    }
}

pub const fn diario(season: Season) -> &'static [Row] {
    match season {
        Season::Summer => DIARIO_VERAO,
        Season::Winter => DIARIO_INVERNO,
    }
}
