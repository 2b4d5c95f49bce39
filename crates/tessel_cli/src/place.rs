//! `tessel place`: the full placement pipeline.
//!
//! 1. Resolve config (`--config`, `./tessel.toml`, defaults) and apply flags
//! 2. Parse and validate the netlist
//! 3. Place, normalize
//! 4. Write the placement file (and the dimensions file if asked)
//! 5. Render diagnostics and the summary

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tessel_common::Interner;
use tessel_config::PlacerConfig;
use tessel_diagnostics::DiagnosticSink;
use tessel_netlist::Netlist;
use tessel_place::output::{write_dimensions, write_placement, PlacementSummary};
use tessel_place::{place_design, PlaceError, PlacedDesign, PlacementOutcome};

use crate::pipeline::{load_netlist, render_diagnostics, resolve_config, result_line};
use crate::{GlobalArgs, PlaceArgs, ReportFormat};

/// Runs the `tessel place` command.
///
/// Returns exit code 0 on success and 1 if the netlist has errors or a gate
/// is infeasible under the `fail` policy. No output file is written in
/// either case.
pub fn run(args: &PlaceArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = apply_overrides(resolve_config(global)?, args);
    let text = args.format == ReportFormat::Text;
    let status = !global.quiet && text;

    if status {
        eprintln!("   Parsing {}", args.input.display());
    }
    let interner = Interner::new();
    let sink = DiagnosticSink::new();
    let (source_db, netlist) = load_netlist(&args.input, &interner, &sink)?;

    if sink.has_errors() {
        let diagnostics = sink.diagnostics();
        render_diagnostics(&diagnostics, &source_db, args.format, global);
        if text {
            if !global.quiet {
                eprintln!("{}", result_line("", &sink));
            }
        } else {
            let report = serde_json::json!({ "placed": false, "diagnostics": diagnostics });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        return Ok(1);
    }

    if status {
        eprintln!(
            "   Placing {} gate(s), {} wire(s) on a {}x{} grid ({} policy)",
            netlist.gate_count(),
            netlist.wire_count(),
            config.grid.width,
            config.grid.height,
            config.placement.on_infeasible
        );
    }
    let placed = match place_design(&netlist, &config, &interner, &sink) {
        Ok(placed) => placed,
        Err(e @ PlaceError::Infeasible { .. }) => {
            render_diagnostics(&sink.diagnostics(), &source_db, args.format, global);
            eprintln!("error: {e}");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    if global.verbose && text {
        print_net_detail(&netlist, &placed, &interner);
    }

    write_file(&args.output, |out| {
        write_placement(
            out,
            &netlist,
            &placed.placement,
            placed.report.total_wirelength,
            &interner,
        )
    })?;
    if let Some(ref path) = args.dimensions {
        write_file(path, |out| write_dimensions(out, &netlist, &interner))?;
    }

    let diagnostics = sink.diagnostics();
    render_diagnostics(&diagnostics, &source_db, args.format, global);

    let summary = PlacementSummary::new(
        &netlist,
        &placed.placement,
        placed.report.total_wirelength,
        placed.clustering.len(),
        &interner,
    );
    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                eprintln!(
                    "    Placed {} of {} gate(s) into {}",
                    placed.placement.placed_count(),
                    netlist.gate_count(),
                    args.output.display()
                );
                let (w, h) = summary.bounding_box;
                let detail = format!("wirelength {}, bounding box {w}x{h}", summary.wirelength);
                eprintln!("{}", result_line(&detail, &sink));
            }
        }
        ReportFormat::Json => {
            let report = serde_json::json!({
                "placed": true,
                "placement": summary,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(0)
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(mut config: PlacerConfig, args: &PlaceArgs) -> PlacerConfig {
    if let Some(width) = args.grid_width {
        config.grid.width = width;
    }
    if let Some(height) = args.grid_height {
        config.grid.height = height;
    }
    if let Some(policy) = args.on_infeasible {
        config.placement.on_infeasible = policy.into();
    }
    config
}

fn write_file(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<(), PlaceError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out)?;
    out.flush()?;
    Ok(())
}

fn print_net_detail(netlist: &Netlist, placed: &PlacedDesign, interner: &Interner) {
    for net in &placed.clustering.nets {
        let pins: Vec<String> = net
            .pins
            .iter()
            .map(|p| netlist.pin_name(*p, interner))
            .collect();
        eprintln!(
            "      net {}: hpwl {} [{}]",
            net.id,
            placed.report.net_wirelength[net.id.index()],
            pins.join(" ")
        );
    }
    for outcome in &placed.report.outcomes {
        let name = interner.resolve(netlist.gate(outcome.gate()).name);
        match outcome {
            PlacementOutcome::Placed { anchor, .. } => eprintln!("      placed {name} at {anchor}"),
            PlacementOutcome::Skipped(_) => eprintln!("      skipped {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PolicyArg;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    fn args(dir: &TempDir, text: &str) -> PlaceArgs {
        let input = dir.path().join("design.net");
        fs::write(&input, text).unwrap();
        PlaceArgs {
            input,
            output: dir.path().join("placed.txt"),
            dimensions: None,
            grid_width: None,
            grid_height: None,
            on_infeasible: None,
            format: ReportFormat::Text,
        }
    }

    #[test]
    fn places_two_gates() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir, "g1 2 2\npins g1 0 0\ng2 2 2\npins g2 0 0\nwire g1.p1 g2.p1\n");
        assert_eq!(run(&args, &quiet()).unwrap(), 0);
        let out = fs::read_to_string(&args.output).unwrap();
        assert_eq!(out, "bounding_box 0 2\ng1 0 2\ng2 0 0\nwirelength 2\n");
    }

    #[test]
    fn writes_dimensions_file() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, "g1 2 3\ng2 1 1\n");
        let dims = dir.path().join("dims.txt");
        args.dimensions = Some(dims.clone());
        assert_eq!(run(&args, &quiet()).unwrap(), 0);
        assert_eq!(fs::read_to_string(dims).unwrap(), "g1 2 3\ng2 1 1\n");
    }

    #[test]
    fn parse_errors_write_nothing() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir, "g1 2 2\nwire g1.p1 g7.p1\n");
        assert_eq!(run(&args, &quiet()).unwrap(), 1);
        assert!(!args.output.exists());
    }

    #[test]
    fn fail_policy_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, "g1 5 5\n");
        args.grid_width = Some(2);
        args.grid_height = Some(2);
        args.on_infeasible = Some(PolicyArg::Fail);
        assert_eq!(run(&args, &quiet()).unwrap(), 1);
        assert!(!args.output.exists());
    }

    #[test]
    fn skip_policy_omits_unplaced_gate() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, "g1 1 1\ngbig 5 5\n");
        args.grid_width = Some(3);
        args.grid_height = Some(3);
        assert_eq!(run(&args, &quiet()).unwrap(), 0);
        let out = fs::read_to_string(&args.output).unwrap();
        assert_eq!(out, "bounding_box 0 0\ng1 0 0\nwirelength 0\n");
    }

    #[test]
    fn config_file_is_honoured_and_flags_win() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("tessel.toml");
        fs::write(
            &config,
            "[grid]\nwidth = 3\nheight = 3\n\n[placement]\non_infeasible = \"fail\"\n",
        )
        .unwrap();
        let global = GlobalArgs {
            config: Some(config),
            ..quiet()
        };

        let mut args = args(&dir, "g1 1 1\ngbig 5 5\n");
        assert_eq!(run(&args, &global).unwrap(), 1);

        args.on_infeasible = Some(PolicyArg::Skip);
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn unreadable_input_is_err() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, "");
        args.input = PathBuf::from("/nonexistent/tessel/design.net");
        assert!(run(&args, &quiet()).is_err());
    }

    #[test]
    fn overrides_apply() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, "");
        args.grid_width = Some(7);
        args.on_infeasible = Some(PolicyArg::Retry);
        let config = apply_overrides(PlacerConfig::default(), &args);
        assert_eq!(config.grid.width, 7);
        assert_eq!(config.grid.height, tessel_config::DEFAULT_GRID_EXTENT);
        assert_eq!(
            config.placement.on_infeasible,
            tessel_config::InfeasiblePolicy::Retry
        );
    }
}
