//! Fuel-logistics scheduler entry point — CLI wiring and solve dispatch.

use std::path::Path;
use std::process;

use fuel_logistics_solver::io::request::{read_request_file, read_request_stdin};
use fuel_logistics_solver::io::response::{export_shifts_csv, write_report_stdout};
use fuel_logistics_solver::model::time::TimeGrid;
use fuel_logistics_solver::report::SolveStatus;
use fuel_logistics_solver::solver;
use fuel_logistics_solver::tasks::TaskCatalog;

/// Parsed CLI arguments.
struct CliArgs {
    input_path: Option<String>,
    shifts_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("fuel-logistics-solver — two-depot fuel delivery scheduler");
    eprintln!();
    eprintln!("Usage: fuel-logistics-solver [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>           Read the request document from a file (default: stdin)");
    eprintln!("  --shifts-out <path>      Export a per-driver shift summary as CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the REST API server instead of solving once");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("With no --input, the request document is read from stdin. The response");
    eprintln!("document is written as pretty-printed JSON to stdout.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        input_path: None,
        shifts_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--input" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --input requires a path argument");
                    process::exit(1);
                }
                cli.input_path = Some(args[i].clone());
            }
            "--shifts-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --shifts-out requires a path argument");
                    process::exit(1);
                }
                cli.shifts_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;

        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(fuel_logistics_solver::api::serve(addr));
        return;
    }

    let doc = match &cli.input_path {
        Some(path) => read_request_file(Path::new(path)),
        None => read_request_stdin(),
    };
    let doc = match doc {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: failed to read request document: {e}");
            process::exit(1);
        }
    };

    let report = solver::solve_report(&doc);

    if let Err(e) = write_report_stdout(&report) {
        eprintln!("error: failed to write response document: {e}");
        process::exit(1);
    }

    let solved = matches!(report.status, SolveStatus::Optimal | SolveStatus::Feasible);

    if !solved {
        process::exit(1);
    }

    if let Some(ref path) = cli.shifts_out {
        let grid_and_catalog = TimeGrid::new(
            doc.solver.slot_minutes,
            doc.solver.shift_minutes,
            doc.solver.livigno_entry_start_minutes,
            doc.solver.livigno_entry_end_minutes,
            doc.solver.break_window_minutes,
            doc.solver.break_drive_cap_minutes,
        )
        .ok()
        .and_then(|grid| TaskCatalog::new(&grid).ok().map(|catalog| (grid, catalog)));

        match grid_and_catalog {
            Some((grid, catalog)) => {
                if let Err(e) = export_shifts_csv(&report, &catalog, &grid, Path::new(path)) {
                    eprintln!("error: failed to write shift CSV: {e}");
                    process::exit(1);
                }
                eprintln!("Shift summary written to {path}");
            }
            None => {
                eprintln!(
                    "error: cannot export shift summary, request document's time grid is invalid"
                );
                process::exit(1);
            }
        }
    }
}
