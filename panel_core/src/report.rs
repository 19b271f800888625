//! # Results Report
//!
//! Markdown rendering of a sizing run: a run summary table plus a
//! detailed section per station. All stresses are reported in MPa,
//! lengths in mm and moments in MN·m through the `units` conversions;
//! the stored records stay in base SI.

use std::fmt::Write as _;
use std::path::Path;

use crate::errors::{PanelError, PanelResult};
use crate::project::WingProject;
use crate::station::StationRecord;
use crate::units::{
    GigaPascals, MegaPascals, MeganewtonMeters, Meters, Millimeters, NewtonMeters, Pascals,
    SquareCentimeters, SquareMeters,
};

fn mm(value_m: f64) -> f64 {
    Millimeters::from(Meters(value_m)).0
}

fn mpa(value_pa: f64) -> f64 {
    MegaPascals::from(Pascals(value_pa)).0
}

fn mnm(value_nm: f64) -> f64 {
    MeganewtonMeters::from(NewtonMeters(value_nm)).0
}

fn gpa(value_pa: f64) -> f64 {
    GigaPascals::from(Pascals(value_pa)).0
}

fn cm2(value_m2: f64) -> f64 {
    SquareCentimeters::from(SquareMeters(value_m2)).0
}

fn verdict_label(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

/// Render one station as a markdown section.
pub fn render_station(record: &StationRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "## Station z/L = {:.2} (z = {:.2} m) — {}\n",
        record.span_fraction,
        record.z_m,
        verdict_label(record.verdict)
    );

    let _ = writeln!(out, "### Geometry\n");
    let _ = writeln!(out, "| Quantity | Value |");
    let _ = writeln!(out, "|---|---|");
    let _ = writeln!(
        out,
        "| Skin thickness | {:.1} mm |",
        mm(record.skin_thickness_m)
    );
    let _ = writeln!(out, "| Stringers | {} |", record.stringer_count);
    let _ = writeln!(
        out,
        "| Stringer spacing | {:.1} mm |",
        mm(record.stringer_spacing_m)
    );
    let _ = writeln!(
        out,
        "| Effective skin width | {:.1} mm (ρ = {:.3}) |",
        mm(record.effective_width_m),
        record.rho
    );
    let _ = writeln!(
        out,
        "| Reduced area | {:.2} cm² |",
        cm2(record.reduced_area_m2)
    );
    let _ = writeln!(
        out,
        "| Reduced inertia | {:.3e} m⁴ |",
        record.reduced_inertia_m4
    );

    let _ = writeln!(out, "\n### Stability and strength\n");
    let _ = writeln!(out, "| Quantity | Value |");
    let _ = writeln!(out, "|---|---|");
    let _ = writeln!(out, "| Design moment | {:.2} MN·m |", mnm(record.moment_nm));
    let _ = writeln!(
        out,
        "| Skin buckling stress | {:.1} MPa |",
        mpa(record.critical_stress_pa)
    );
    let _ = writeln!(
        out,
        "| Column buckling stress | {:.1} MPa |",
        mpa(record.column_critical_pa)
    );
    let _ = writeln!(
        out,
        "| Reduced modulus | {:.1} GPa |",
        gpa(record.reduced_modulus_pa)
    );
    let _ = writeln!(
        out,
        "| Extreme-fiber stress | {:.1} MPa |",
        mpa(record.stress_pa)
    );
    let _ = writeln!(
        out,
        "| Proportional-limit check | {} (margin {:.2}) |",
        verdict_label(record.strength.proportional.satisfied),
        record.safety_margin
    );
    let _ = writeln!(
        out,
        "| Compression allowable check | {} |",
        verdict_label(record.strength.allowable.satisfied)
    );
    let _ = writeln!(
        out,
        "| Convergence | {} iteration(s) |",
        record.iterations
    );

    if !record.strength.stringer_audits.is_empty() {
        let _ = writeln!(out, "\n### Stringer local buckling\n");
        let _ = writeln!(out, "| # | Web σcr (MPa) | Flange σcr (MPa) | Verdict |");
        let _ = writeln!(out, "|---|---|---|---|");
        for (i, audit) in record.strength.stringer_audits.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {:.1} | {:.1} | {} |",
                i + 1,
                mpa(audit.web.critical_stress_pa),
                mpa(audit.flange.critical_stress_pa),
                verdict_label(audit.overall_safe)
            );
        }
    }

    out
}

/// Render a full sizing run: header, summary table and per-station
/// detail sections.
pub fn render_run(project: &WingProject) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Wing Panel Sizing — {}\n", project.meta.aircraft);
    let _ = writeln!(out, "- Engineer: {}", project.meta.engineer);
    let _ = writeln!(out, "- Run: {}", project.meta.run_id);
    let _ = writeln!(
        out,
        "- Date: {}",
        project.meta.modified.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary\n");
    let _ = writeln!(
        out,
        "| z/L | M (MN·m) | t (mm) | Stringers | ρ | σ (MPa) | Margin | Verdict |"
    );
    let _ = writeln!(out, "|---|---|---|---|---|---|---|---|");
    for record in &project.stations {
        let _ = writeln!(
            out,
            "| {:.2} | {:.2} | {:.1} | {} | {:.3} | {:.1} | {:.2} | {} |",
            record.span_fraction,
            mnm(record.moment_nm),
            mm(record.skin_thickness_m),
            record.stringer_count,
            record.rho,
            mpa(record.stress_pa),
            record.safety_margin,
            verdict_label(record.verdict)
        );
    }
    let _ = writeln!(out);

    for record in &project.stations {
        out.push_str(&render_station(record));
        let _ = writeln!(out);
    }

    out
}

/// Write the rendered run report to a markdown file.
pub fn write_report(project: &WingProject, path: &Path) -> PanelResult<()> {
    let markdown = render_run(project);
    std::fs::write(path, markdown)
        .map_err(|e| PanelError::file_error("write", path.display().to_string(), e.to_string()))
}
