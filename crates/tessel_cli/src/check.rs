//! `tessel check`: parse and validate a netlist without placing it.

use tessel_common::Interner;
use tessel_diagnostics::DiagnosticSink;
use tessel_place::cluster_pins;

use crate::pipeline::{load_netlist, render_diagnostics, result_line};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `tessel check` command.
///
/// Returns exit code 0 if the netlist has no errors, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Checking {}", args.input.display());
    }

    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let (source_db, netlist) = load_netlist(&args.input, &interner, &sink)?;
    let clustering = cluster_pins(&netlist);

    let diagnostics = sink.diagnostics();
    render_diagnostics(&diagnostics, &source_db, args.format, global);

    match args.format {
        ReportFormat::Text => {
            if global.verbose {
                let stats = clustering.stats;
                eprintln!(
                    "      {} pin(s), {} singleton net(s), {} same-gate wire(s) ignored",
                    netlist.pin_count(),
                    stats.singleton_nets,
                    stats.same_gate_wires
                );
            }
            if !global.quiet {
                let detail = format!(
                    "{} gate(s), {} wire(s), {} net(s)",
                    netlist.gate_count(),
                    netlist.wire_count(),
                    clustering.len()
                );
                eprintln!("{}", result_line(&detail, &sink));
            }
        }
        ReportFormat::Json => {
            let report = serde_json::json!({
                "gates": netlist.gate_count(),
                "wires": netlist.wire_count(),
                "pins": netlist.pin_count(),
                "nets": clustering.len(),
                "errors": sink.error_count(),
                "warnings": sink.warning_count(),
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn check(dir: &TempDir, text: &str) -> i32 {
        let input = dir.path().join("design.net");
        fs::write(&input, text).unwrap();
        let args = CheckArgs {
            input,
            format: ReportFormat::Text,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };
        run(&args, &global).unwrap()
    }

    #[test]
    fn clean_netlist_passes() {
        let dir = TempDir::new().unwrap();
        assert_eq!(check(&dir, "g1 1 1\npins g1 0 0\n"), 0);
    }

    #[test]
    fn warnings_do_not_fail() {
        let dir = TempDir::new().unwrap();
        assert_eq!(check(&dir, "g1 1 1\npins g1 5 5\n"), 0);
    }

    #[test]
    fn errors_fail() {
        let dir = TempDir::new().unwrap();
        assert_eq!(check(&dir, "g1 x 1\n"), 1);
    }

    #[test]
    fn missing_file_is_err() {
        let args = CheckArgs {
            input: PathBuf::from("/nonexistent/tessel/design.net"),
            format: ReportFormat::Json,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };
        assert!(run(&args, &global).is_err());
    }
}
