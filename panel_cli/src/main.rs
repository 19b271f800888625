//! # Spanwise CLI Application
//!
//! Terminal front-end for the wing panel sizing engine. Loads the
//! bending-moment table and load factors (from files in the working
//! directory when present, built-in B737-800 data otherwise), sizes the
//! configured span stations, prints the results and writes a markdown
//! report plus a `.wpd` project file.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use panel_core::file_io::{save_project, FileLock};
use panel_core::loads::{LoadFactors, MomentTable};
use panel_core::materials::Material;
use panel_core::project::WingProject;
use panel_core::report::write_report;
use panel_core::station::{size_station, StationRecord};

const MOMENTS_FILE: &str = "moments.txt";
const FACTORS_FILE: &str = "load_factors.txt";
const PROJECT_FILE: &str = "wingbox.wpd";
const REPORT_FILE: &str = "results.md";

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn load_moments() -> MomentTable {
    let path = Path::new(MOMENTS_FILE);
    if path.exists() {
        match MomentTable::from_file(path) {
            Ok(table) => {
                println!("Loaded bending moments from {}", MOMENTS_FILE);
                return table;
            }
            Err(e) => {
                warn!(error = %e, "moment file unreadable, using built-in data");
                eprintln!("Could not read {}: {}", MOMENTS_FILE, e);
            }
        }
    }
    println!("Using built-in B737-800 bending moments");
    MomentTable::builtin_737_800()
}

fn load_factors() -> LoadFactors {
    let path = Path::new(FACTORS_FILE);
    if path.exists() {
        match LoadFactors::from_file(path) {
            Ok(factors) => {
                println!("Loaded load factors from {}", FACTORS_FILE);
                return factors;
            }
            Err(e) => {
                warn!(error = %e, "load factor file unreadable, using defaults");
                eprintln!("Could not read {}: {}", FACTORS_FILE, e);
            }
        }
    }
    LoadFactors::default()
}

fn print_station(record: &StationRecord) {
    println!("───────────────────────────────────────");
    println!(
        "  STATION z/L = {:.2}  (z = {:.2} m)",
        record.span_fraction, record.z_m
    );
    println!("───────────────────────────────────────");
    println!("  Design moment:   {:.2} MN·m", record.moment_nm / 1e6);
    println!(
        "  Skin:            t = {:.1} mm, {} stringers @ {:.0} mm",
        record.skin_thickness_m * 1e3,
        record.stringer_count,
        record.stringer_spacing_m * 1e3
    );
    println!(
        "  Effective width: {:.1} mm (rho = {:.3}, {} iteration(s))",
        record.effective_width_m * 1e3,
        record.rho,
        record.iterations
    );
    println!(
        "  Skin buckling:   {:.1} MPa   Column: {:.1} MPa",
        record.critical_stress_pa / 1e6,
        record.column_critical_pa / 1e6
    );
    println!(
        "  Working stress:  {:.1} MPa (margin {:.2}) {}",
        record.stress_pa / 1e6,
        record.safety_margin,
        status_icon(record.verdict)
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Spanwise CLI - Wing Panel Sizing");
    println!("================================");
    println!();

    let engineer = prompt_str("Engineer name [unassigned]: ", "unassigned");

    let mut project = WingProject::new(engineer, "B737-800");
    project.settings.station.panel_length_m =
        prompt_f64("Panel length between ribs (m) [0.5]: ", 0.5);

    let moments = load_moments();
    project.settings.load_factors = load_factors();
    println!();

    let factors = project.settings.load_factors;
    let material = Material::v95t1_sheet();
    let wing = project.wing.clone();
    let settings = project.settings.station.clone();

    let mut failures = 0usize;
    for &zl in &project.settings.span_fractions.clone() {
        let limit_moment = match moments.moment_at(zl) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Station z/L = {:.2}: {}", zl, e);
                failures += 1;
                continue;
            }
        };
        let design_moment = limit_moment * factors.ny_max * factors.safety_factor;

        match size_station(&wing, &material, zl, design_moment, &settings) {
            Ok(record) => {
                print_station(&record);
                project.add_station(record);
            }
            Err(e) => {
                eprintln!("Station z/L = {:.2} failed: {}", zl, e);
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
                failures += 1;
            }
        }
    }

    println!("═══════════════════════════════════════");
    println!(
        "  RUN SUMMARY: {} station(s) sized, {} failed — {}",
        project.station_count(),
        failures,
        if failures == 0 && project.all_satisfied() {
            "ALL PASS"
        } else {
            "ATTENTION REQUIRED"
        }
    );
    println!("═══════════════════════════════════════");

    let report_path = Path::new(REPORT_FILE);
    match write_report(&project, report_path) {
        Ok(()) => println!("Report written to {}", REPORT_FILE),
        Err(e) => eprintln!("Could not write report: {}", e),
    }

    let project_path = Path::new(PROJECT_FILE);
    match FileLock::acquire(project_path, &project.meta.engineer) {
        Ok(_lock) => match save_project(&project, project_path) {
            Ok(()) => println!("Project saved to {}", PROJECT_FILE),
            Err(e) => eprintln!("Could not save project: {}", e),
        },
        Err(e) => eprintln!("Could not lock {}: {}", PROJECT_FILE, e),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
