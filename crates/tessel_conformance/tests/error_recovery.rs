//! Malformed input: every problem is reported in one pass, with the right
//! code, and nothing is placed.

use tessel_conformance::full_pipeline;
use tessel_diagnostics::Severity;

#[test]
fn every_error_in_one_pass() {
    let src = "g1 2 2\n\
               pins g1 0 0 1 1\n\
               g2 1 1\n\
               pins g2 0 0\n\
               g1 3 3\n\
               gfoo x 2\n\
               pins g2 0\n\
               pins g9 0 0\n\
               wire g1.p1\n\
               wire g1.p1 g2\n\
               bogus line\n\
               wire g1.p1 g2.p4\n\
               wire g1.p1 g1.p2\n\
               pins g2 3 3\n";
    let result = full_pipeline(src);
    assert!(result.has_errors);
    assert!(result.placed.is_none());
    assert!(result.output.is_none());

    let mut codes = result.codes();
    codes.sort();
    assert_eq!(
        codes,
        vec!["E100", "E101", "E102", "E103", "E104", "E105", "E106", "E107", "W200", "W201"]
    );
    assert_eq!(result.error_count, 8);
    assert_eq!(result.warning_count, 2);
}

#[test]
fn parse_errors_come_before_resolution_errors() {
    let result = full_pipeline("pins gmissing 0 0\nnope\n");
    assert_eq!(result.codes(), vec!["E100", "E105"]);
}

#[test]
fn duplicate_gate_keeps_first_declaration() {
    let result = full_pipeline("g1 2 2\ng1 5 5\n");
    assert_eq!(result.codes(), vec!["E106"]);
    let g1 = result.gate("g1").unwrap();
    assert_eq!(result.netlist.gate(g1).width, 2);
    assert_eq!(result.netlist.gate_count(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.labels.len(), 2);
}

#[test]
fn warnings_alone_still_place() {
    let result = full_pipeline("g1 1 1\npins g1 4 4\ng2 1 1\npins g2 0 0\nwire g1.p1 g2.p1\n");
    assert_eq!(result.codes(), vec!["W200"]);
    assert!(!result.has_errors);
    assert!(result.placed.is_some());
    assert!(result.diagnostics.iter().all(|d| d.severity == Severity::Warning));
}

#[test]
fn error_spans_point_at_the_bad_token() {
    let result = full_pipeline("g1 2 2\ng2 2 zz\n");
    assert_eq!(result.codes(), vec!["E102"]);
    let span = result.diagnostics[0].primary_span;
    // "g1 2 2\n" is 7 bytes; "zz" starts 5 bytes into the second line.
    assert_eq!((span.start, span.end), (12, 14));
}

#[test]
fn missing_pin_on_both_ends() {
    let result = full_pipeline("g1 1 1\ng2 1 1\nwire g1.p1 g2.p1\n");
    assert_eq!(result.codes(), vec!["E107", "E107"]);
}

#[test]
fn zero_dimensions_are_rejected() {
    let result = full_pipeline("g1 0 2\ng2 2 0\n");
    assert_eq!(result.codes(), vec!["E102", "E102"]);
}

#[test]
fn pin_index_zero_is_malformed() {
    let result = full_pipeline("g1 1 1\npins g1 0 0\ng2 1 1\npins g2 0 0\nwire g1.p0 g2.p1\n");
    assert_eq!(result.codes(), vec!["E104"]);
}
