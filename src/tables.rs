use comfy_table::{Attribute, Cell, Color, Table, modifiers, presets};
use erse::{periodo::PeriodoHorario, time::Interval};

pub fn build_intervalos_table(rows: &[(PeriodoHorario, Interval)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Date", "Start", "End", "Período"]);
    for (periodo, intervalo) in rows.iter().copied() {
        table.add_row(vec![
            Cell::new(intervalo.start.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(intervalo.start.format("%H:%M")),
            Cell::new(intervalo.end.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(periodo).fg(color(periodo)),
        ]);
    }
    table
}

const fn color(periodo: PeriodoHorario) -> Color {
    match periodo {
        PeriodoHorario::Ponta => Color::Red,
        PeriodoHorario::Cheias => Color::DarkYellow,
        PeriodoHorario::VazioNormal => Color::Green,
        PeriodoHorario::SuperVazio => Color::Cyan,
    }
}
