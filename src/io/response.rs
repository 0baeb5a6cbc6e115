//! Response-document JSON writing, and CSV shift-report export.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::SolveReport;
use crate::turns::{turns_from_report, DayTurns};

/// Serializes a [`SolveReport`] as pretty-printed JSON to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if serialization or writing fails.
pub fn write_report(report: &SolveReport, mut writer: impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{json}")
}

/// Writes the response document as pretty-printed JSON to stdout.
///
/// # Errors
///
/// Returns an `io::Error` if writing to stdout fails.
pub fn write_report_stdout(report: &SolveReport) -> io::Result<()> {
    write_report(report, io::stdout().lock())
}

const SHIFT_HEADER: &str = "date,depot,driver,minutes,task_count";

/// Exports a per-driver shift summary as CSV, one row per driver per day.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_shifts_csv(
    report: &SolveReport,
    catalog: &crate::tasks::TaskCatalog,
    grid: &crate::model::time::TimeGrid,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_shifts_csv(report, catalog, grid, buf)
}

/// Writes the per-driver shift summary as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_shifts_csv(
    report: &SolveReport,
    catalog: &crate::tasks::TaskCatalog,
    grid: &crate::model::time::TimeGrid,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SHIFT_HEADER.split(','))?;

    for day in &report.days {
        let turns: DayTurns = turns_from_report(day, catalog, grid);
        write_depot_rows(&mut wtr, &day.date, "T", &turns.tirano_turns)?;
        write_depot_rows(&mut wtr, &day.date, "L", &turns.livigno_turns)?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_depot_rows(
    wtr: &mut csv::Writer<impl Write>,
    date: &str,
    depot: &str,
    turns: &[crate::turns::DriverTurn],
) -> io::Result<()> {
    for (driver, turn) in turns.iter().enumerate() {
        wtr.write_record(&[
            date.to_string(),
            depot.to_string(),
            driver.to_string(),
            turn.minutes.to_string(),
            turn.tasks.len().to_string(),
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::time::TimeGrid;
    use crate::report::{DayReport, DriverStart, KindCounts, SolveStatus};
    use crate::tasks::TaskCatalog;
    use crate::model::types::TaskKind;

    #[test]
    fn write_report_produces_pretty_json() {
        let report = SolveReport::without_solution(SolveStatus::Infeasible);
        let mut buf = Vec::new();
        write_report(&report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"status\""));
        assert!(text.contains('\n'));
    }

    #[test]
    fn shift_csv_has_one_row_per_driver() {
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        let catalog = TaskCatalog::new(&grid).unwrap();
        let report = SolveReport {
            status: SolveStatus::Optimal,
            objective_deliveries: 2,
            objective_liters: 2 * 17_500,
            days: vec![DayReport {
                date: "2024-06-03".into(),
                drivers_t: 1,
                drivers_l: 1,
                counts: KindCounts::default(),
                starts: vec![
                    DriverStart { driver: 0, task: TaskKind::S, slot: 0 },
                    DriverStart { driver: 0, task: TaskKind::V, slot: 0 },
                ],
                inventory_open: Default::default(),
                inventory_close: Default::default(),
            }],
        };
        let mut buf = Vec::new();
        write_shifts_csv(&report, &catalog, &grid, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3); // header + T row + L row
        assert!(lines[1].starts_with("2024-06-03,T,0,345,1"));
        assert!(lines[2].starts_with("2024-06-03,L,0,270,1"));
    }
}
