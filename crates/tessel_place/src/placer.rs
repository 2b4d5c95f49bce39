//! Greedy perimeter-abutment placer.
//!
//! Nets are processed largest first. Within a net, each pin's gate is
//! placed (if it is not already) at whichever perimeter candidate keeps
//! the net's half-perimeter wirelength smallest so far. The first gate of
//! the whole run goes at the origin; every later gate abuts one that is
//! already placed.

use crate::candidates::CandidateSet;
use crate::cluster::{Clustering, Net};
use crate::cost::{self, BoundingBox};
use crate::error::PlaceError;
use crate::grid::{Grid, Rect};
use crate::placement::{Placement, PlacementOutcome, PlacementReport};
use tessel_common::{InternalError, Interner, TesselResult};
use tessel_config::InfeasiblePolicy;
use tessel_netlist::{GateId, NetId, Netlist, PinRef, Point};

/// Single-pass greedy placer over a borrowed grid.
pub struct GreedyPlacer<'a> {
    netlist: &'a Netlist,
    interner: &'a Interner,
    grid: &'a mut Grid,
    policy: InfeasiblePolicy,
    candidates: CandidateSet,
    placement: Placement,
    outcomes: Vec<PlacementOutcome>,
    placed_any: bool,
}

impl<'a> GreedyPlacer<'a> {
    /// Creates a placer. `grid` should be empty.
    pub fn new(
        netlist: &'a Netlist,
        interner: &'a Interner,
        grid: &'a mut Grid,
        policy: InfeasiblePolicy,
    ) -> Self {
        Self {
            netlist,
            interner,
            grid,
            policy,
            candidates: CandidateSet::new(),
            placement: Placement::new(netlist.gate_count()),
            outcomes: Vec::new(),
            placed_any: false,
        }
    }

    /// Places every gate reachable from `clustering`, then any gate with
    /// no pins, then (under [`InfeasiblePolicy::Retry`]) gives each still
    /// unplaced gate one more attempt.
    pub fn run(
        mut self,
        clustering: &Clustering,
    ) -> Result<(Placement, PlacementReport), PlaceError> {
        let mut order: Vec<&Net> = clustering.nets.iter().collect();
        order.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut net_wirelength = vec![0; clustering.len()];
        for net in order {
            let bbox = self.place_net(net)?;
            net_wirelength[net.id.index()] = bbox.hpwl();
        }

        self.place_pinless()?;

        let retried = if self.policy == InfeasiblePolicy::Retry {
            self.retry_unplaced(clustering, &mut net_wirelength)?
        } else {
            Vec::new()
        };

        let report = PlacementReport {
            total_wirelength: net_wirelength.iter().sum(),
            net_wirelength,
            unplaced: self.placement.unplaced(),
            retried,
            candidates_remaining: self.candidates.len(),
            outcomes: self.outcomes,
        };
        Ok((self.placement, report))
    }

    /// Places the unplaced gates of one net and returns the bounding box of
    /// its placed pins.
    ///
    /// Pins of gates placed by earlier nets seed the box, so each new gate
    /// is pulled toward everything the net already touches.
    fn place_net(&mut self, net: &Net) -> Result<BoundingBox, PlaceError> {
        let mut bbox = cost::net_bbox(self.netlist, &self.placement, net);
        for &pin in &net.pins {
            if let Some(p) = self.placement.pin_position(self.netlist, pin) {
                bbox.include(p);
                continue;
            }
            let offset = self.pin_offset(pin)?;
            let anchor = self.choose_anchor(pin.gate, |anchor| bbox.with(anchor + offset).hpwl());
            match anchor {
                Some(anchor) => {
                    self.commit(pin.gate, anchor)?;
                    bbox.include(anchor + offset);
                }
                None => self.skip(pin.gate)?,
            }
        }
        Ok(bbox)
    }

    /// Gates with no pins belong to no net; put each at the first feasible
    /// candidate.
    fn place_pinless(&mut self) -> Result<(), PlaceError> {
        let netlist = self.netlist;
        for gate in netlist.gates.iter().filter(|g| g.pins.is_empty()) {
            match self.choose_anchor(gate.id, |_| 0) {
                Some(anchor) => self.commit(gate.id, anchor)?,
                None => self.skip(gate.id)?,
            }
        }
        Ok(())
    }

    /// One more attempt for each unplaced gate, minimising the summed HPWL
    /// of every net it belongs to. Returns the gates that were placed.
    fn retry_unplaced(
        &mut self,
        clustering: &Clustering,
        net_wirelength: &mut [i64],
    ) -> Result<Vec<GateId>, PlaceError> {
        let mut retried = Vec::new();
        for gate in self.placement.unplaced() {
            let nets = clustering.nets_of_gate(gate);
            let boxes: Vec<BoundingBox> = nets
                .iter()
                .map(|id| cost::net_bbox(self.netlist, &self.placement, clustering.net(*id)))
                .collect();
            let pins: Vec<(NetId, Point)> = (1..=self.netlist.gate(gate).pin_count())
                .filter_map(|k| {
                    let pin = PinRef::new(gate, k);
                    Some((clustering.net_of(pin)?, self.netlist.pin_offset(pin)?))
                })
                .collect();

            let anchor = self.choose_anchor(gate, |anchor| {
                nets.iter()
                    .zip(&boxes)
                    .map(|(id, bbox)| {
                        pins.iter()
                            .filter(|(net, _)| net == id)
                            .fold(*bbox, |b, (_, offset)| b.with(anchor + *offset))
                            .hpwl()
                    })
                    .sum()
            });
            match anchor {
                Some(anchor) => {
                    self.commit(gate, anchor)?;
                    for id in &nets {
                        net_wirelength[id.index()] =
                            cost::net_hpwl(self.netlist, &self.placement, clustering.net(*id));
                    }
                    retried.push(gate);
                }
                None => self.outcomes.push(PlacementOutcome::Skipped(gate)),
            }
        }
        Ok(retried)
    }

    /// The origin for the very first gate, otherwise the cheapest feasible
    /// candidate. Ties go to the candidate added first.
    fn choose_anchor(&self, gate: GateId, cost: impl Fn(Point) -> i64) -> Option<Point> {
        let g = self.netlist.gate(gate);
        if !self.placed_any {
            let rect = Rect::of_gate(Point::ORIGIN, g.width, g.height);
            return self.grid.is_free(rect).then_some(Point::ORIGIN);
        }
        let mut best: Option<(i64, Point)> = None;
        for candidate in self.candidates.iter() {
            let anchor = candidate.anchor(g.width, g.height);
            if !self.grid.is_free(Rect::of_gate(anchor, g.width, g.height)) {
                continue;
            }
            let c = cost(anchor);
            if best.map_or(true, |(b, _)| c < b) {
                best = Some((c, anchor));
            }
        }
        best.map(|(_, anchor)| anchor)
    }

    fn commit(&mut self, gate: GateId, anchor: Point) -> TesselResult<()> {
        let g = self.netlist.gate(gate);
        let rect = Rect::of_gate(anchor, g.width, g.height);
        self.grid.mark_occupied(rect)?;
        self.placement.set(gate, anchor);
        self.candidates.expand(rect);
        self.candidates.remove_stale(self.grid);
        self.outcomes.push(PlacementOutcome::Placed { gate, anchor });
        self.placed_any = true;
        Ok(())
    }

    fn skip(&mut self, gate: GateId) -> Result<(), PlaceError> {
        if self.policy == InfeasiblePolicy::Fail {
            return Err(PlaceError::Infeasible {
                gate,
                name: self.interner.resolve(self.netlist.gate(gate).name).to_string(),
            });
        }
        self.outcomes.push(PlacementOutcome::Skipped(gate));
        Ok(())
    }

    fn pin_offset(&self, pin: PinRef) -> TesselResult<Point> {
        self.netlist.pin_offset(pin).ok_or_else(|| {
            InternalError::new(format!(
                "net contains nonexistent pin {}",
                self.netlist.pin_name(pin, self.interner)
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::cluster_pins;
    use tessel_diagnostics::DiagnosticSink;
    use tessel_netlist::parse_netlist_str;

    struct Run {
        netlist: Netlist,
        interner: Interner,
        result: Result<(Placement, PlacementReport), PlaceError>,
    }

    impl Run {
        fn ok(&self) -> &(Placement, PlacementReport) {
            self.result.as_ref().expect("placement failed")
        }

        fn gate(&self, name: &str) -> GateId {
            let ident = self.interner.get(name).expect("unknown name");
            self.netlist.find_gate(ident).expect("unknown gate")
        }

        fn position(&self, name: &str) -> Option<Point> {
            self.ok().0.position(self.gate(name))
        }
    }

    fn run_with(src: &str, grid: Grid, policy: InfeasiblePolicy) -> Run {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let (_, netlist) = parse_netlist_str("t.net", src, &interner, &sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        let clustering = cluster_pins(&netlist);
        let mut grid = grid;
        let result = GreedyPlacer::new(&netlist, &interner, &mut grid, policy).run(&clustering);
        Run {
            netlist,
            interner,
            result,
        }
    }

    fn run(src: &str) -> Run {
        run_with(src, Grid::centered(1_000_000, 1_000_000), InfeasiblePolicy::Skip)
    }

    fn assert_no_overlap(run: &Run) {
        let (placement, _) = run.ok();
        let rects: Vec<Rect> = placement
            .iter_placed()
            .filter_map(|(g, _)| placement.rect(&run.netlist, g))
            .collect();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    const TWO_GATES: &str = "g1 2 2\npins g1 0 0\ng2 2 2\npins g2 0 0\nwire g1.p1 g2.p1\n";

    /// Three gates where `gb` (4x1) only fits below the row once `gc` has
    /// been placed to the left of `g1`.
    const BLOCKED: &str = "g1 2 1\npins g1 0 0 0 0\ngb 4 1\npins gb 0 0\ngc 2 1\npins gc 1 0\n\
                           wire g1.p1 gb.p1\nwire g1.p2 gc.p1\n";

    #[test]
    fn two_connected_gates_abut() {
        let r = run(TWO_GATES);
        let (_, report) = r.ok();
        assert_eq!(r.position("g1"), Some(Point::ORIGIN));
        assert_eq!(r.position("g2"), Some(Point::new(0, -2)));
        assert_eq!(report.total_wirelength, 2);
        assert_no_overlap(&r);
    }

    #[test]
    fn unconnected_gates_have_zero_wirelength() {
        let r = run("g1 1 1\npins g1 0 0\ng2 2 1\npins g2 0 0\ng3 1 3\npins g3 0 0\n");
        let (placement, report) = r.ok();
        assert_eq!(placement.placed_count(), 3);
        assert_eq!(report.total_wirelength, 0);
        assert_eq!(report.net_wirelength, vec![0, 0, 0]);
        assert_no_overlap(&r);
    }

    #[test]
    fn larger_nets_are_placed_first() {
        let r = run(
            "ga 1 1\npins ga 0 0\ngb 1 1\npins gb 0 0\n\
             gc 1 1\npins gc 0 0\ngd 1 1\npins gd 0 0\ngx 1 1\npins gx 0 0\n\
             wire ga.p1 gb.p1\nwire gc.p1 gd.p1\nwire gd.p1 gx.p1\n",
        );
        let (_, report) = r.ok();
        let order: Vec<GateId> = report.outcomes.iter().map(|o| o.gate()).collect();
        let expected: Vec<GateId> = ["gc", "gd", "gx", "ga", "gb"]
            .iter()
            .map(|n| r.gate(n))
            .collect();
        assert_eq!(order, expected);
        assert_eq!(r.position("gc"), Some(Point::ORIGIN));
    }

    #[test]
    fn equal_size_nets_keep_pin_order() {
        let r = run(
            "ga 1 1\npins ga 0 0\ngb 1 1\npins gb 0 0\ngc 1 1\npins gc 0 0\ngd 1 1\npins gd 0 0\n\
             wire gc.p1 gd.p1\nwire ga.p1 gb.p1\n",
        );
        let (_, report) = r.ok();
        assert_eq!(report.outcomes[0].gate(), r.gate("ga"));
    }

    #[test]
    fn earlier_placed_pins_pull_new_gates() {
        // g1 and g2 are placed by the three-pin net; the later two-pin net
        // between g2 and g4 must place g4 next to g2, not next to g1.
        let r = run(
            "g1 1 1\npins g1 0 0 0 0\ng2 1 1\npins g2 0 0 0 0\ng3 1 1\npins g3 0 0\n\
             g4 1 1\npins g4 0 0\n\
             wire g1.p1 g2.p1\nwire g2.p1 g3.p1\nwire g2.p2 g4.p1\n",
        );
        let (placement, report) = r.ok();
        let g2 = r.position("g2").unwrap();
        let g4 = r.position("g4").unwrap();
        assert_eq!((g2.x - g4.x).abs() + (g2.y - g4.y).abs(), 1);
        let net = report.net_wirelength.iter().sum::<i64>();
        assert_eq!(net, report.total_wirelength);
        assert_eq!(placement.placed_count(), 4);
    }

    #[test]
    fn same_gate_wire_changes_nothing() {
        let base = "g1 2 2\npins g1 0 0 1 1\ng2 1 1\npins g2 0 0\nwire g1.p1 g2.p1\n";
        let a = run(base);
        let b = run(&format!("{base}wire g1.p1 g1.p2\n"));
        assert_eq!(a.ok().0, b.ok().0);
        assert_eq!(a.ok().1.total_wirelength, b.ok().1.total_wirelength);
    }

    #[test]
    fn pinless_gates_are_placed_last() {
        let r = run("g0 3 3\ng1 1 1\npins g1 0 0\ng2 1 1\npins g2 0 0\nwire g1.p1 g2.p1\n");
        let (placement, report) = r.ok();
        assert_eq!(placement.placed_count(), 3);
        assert_eq!(report.outcomes.last().map(|o| o.gate()), Some(r.gate("g0")));
        assert_eq!(r.position("g1"), Some(Point::ORIGIN));
        assert_no_overlap(&r);
    }

    #[test]
    fn only_pinless_gates() {
        let r = run("g1 2 2\ng2 2 2\n");
        assert_eq!(r.position("g1"), Some(Point::ORIGIN));
        assert!(r.position("g2").is_some());
        assert_eq!(r.ok().1.total_wirelength, 0);
        assert_no_overlap(&r);
    }

    #[test]
    fn empty_netlist() {
        let r = run("");
        let (placement, report) = r.ok();
        assert!(placement.is_empty());
        assert!(report.outcomes.is_empty());
        assert_eq!(report.total_wirelength, 0);
    }

    #[test]
    fn gate_larger_than_grid_is_skipped() {
        let r = run_with(
            "g1 5 5\npins g1 0 0\ng2 1 1\npins g2 0 0\nwire g1.p1 g2.p1\n",
            Grid::centered(4, 4),
            InfeasiblePolicy::Skip,
        );
        let (placement, report) = r.ok();
        assert_eq!(r.position("g1"), None);
        assert_eq!(r.position("g2"), Some(Point::ORIGIN));
        assert_eq!(report.unplaced, vec![r.gate("g1")]);
        assert_eq!(placement.placed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn skip_policy_leaves_blocked_gate_unplaced() {
        let r = run_with(BLOCKED, Grid::centered(4, 2), InfeasiblePolicy::Skip);
        let (_, report) = r.ok();
        assert_eq!(r.position("g1"), Some(Point::ORIGIN));
        assert_eq!(r.position("gc"), Some(Point::new(-2, 0)));
        assert_eq!(r.position("gb"), None);
        assert!(report
            .outcomes
            .contains(&PlacementOutcome::Skipped(r.gate("gb"))));
        assert_eq!(report.net_wirelength, vec![0, 1]);
        assert_eq!(report.total_wirelength, 1);
        assert!(report.retried.is_empty());
    }

    #[test]
    fn retry_policy_places_blocked_gate() {
        let r = run_with(BLOCKED, Grid::centered(4, 2), InfeasiblePolicy::Retry);
        let (placement, report) = r.ok();
        assert_eq!(r.position("gb"), Some(Point::new(-2, -1)));
        assert_eq!(report.retried, vec![r.gate("gb")]);
        assert!(report.unplaced.is_empty());
        assert_eq!(report.net_wirelength, vec![3, 1]);
        assert_eq!(report.total_wirelength, 4);
        assert_eq!(placement.placed_count(), 3);
        assert_no_overlap(&r);
    }

    #[test]
    fn fail_policy_names_the_gate() {
        let r = run_with(BLOCKED, Grid::centered(4, 2), InfeasiblePolicy::Fail);
        match &r.result {
            Err(PlaceError::Infeasible { gate, name }) => {
                assert_eq!(*gate, r.gate("gb"));
                assert_eq!(name, "gb");
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn candidate_count_is_bounded_by_perimeters() {
        let r = run(
            "g1 3 2\npins g1 0 0 2 1\ng2 1 4\npins g2 0 0\n\
             g3 2 2\npins g3 1 1\ng4 1 1\npins g4 0 0\n\
             wire g1.p1 g2.p1\nwire g1.p2 g3.p1\nwire g3.p1 g4.p1\n",
        );
        let (_, report) = r.ok();
        let bound: u64 = r.netlist.gates.iter().map(|g| g.perimeter()).sum();
        assert!(report.candidates_remaining as u64 <= bound);
        assert_no_overlap(&r);
    }
}
