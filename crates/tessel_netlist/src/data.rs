//! Netlist data structures.
//!
//! A [`Netlist`] owns gates in declaration order and the wires between their
//! pins. It is immutable once built; placement results live elsewhere and
//! refer back to gates by [`GateId`].

use crate::ids::GateId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Sub};
use tessel_common::{Ident, Interner};
use tessel_source::Span;

/// An integer grid coordinate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    /// Creates a point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A fixed-size rectangular cell with pins at fixed offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    /// Index of this gate in the netlist.
    pub id: GateId,
    /// Interned gate name, e.g. `g3`.
    pub name: Ident,
    /// Width in grid cells (positive).
    pub width: u32,
    /// Height in grid cells (positive).
    pub height: u32,
    /// Pin offsets from the bottom-left corner. Pin `p<k>` is `pins[k - 1]`.
    pub pins: Vec<Point>,
    /// Where the gate was declared.
    pub span: Span,
}

impl Gate {
    /// Returns the offset of 1-based pin `pin`, if it exists.
    pub fn pin_offset(&self, pin: u32) -> Option<Point> {
        let idx = usize::try_from(pin).ok()?.checked_sub(1)?;
        self.pins.get(idx).copied()
    }

    /// Number of pins on this gate.
    pub fn pin_count(&self) -> u32 {
        self.pins.len() as u32
    }

    /// Perimeter length `2·(w + h)`.
    pub fn perimeter(&self) -> u64 {
        2 * (u64::from(self.width) + u64::from(self.height))
    }

    /// Returns `true` if `offset` lies within the gate's rectangle.
    pub fn contains_offset(&self, offset: Point) -> bool {
        (0..i64::from(self.width)).contains(&offset.x)
            && (0..i64::from(self.height)).contains(&offset.y)
    }
}

/// A pin addressed structurally as `(gate, 1-based index)`.
///
/// Ordering is by gate declaration order, then pin index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PinRef {
    /// The owning gate.
    pub gate: GateId,
    /// 1-based pin index.
    pub pin: u32,
}

impl PinRef {
    /// Creates a pin reference.
    pub fn new(gate: GateId, pin: u32) -> Self {
        Self { gate, pin }
    }
}

/// An undirected connection between two pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    /// One endpoint.
    pub a: PinRef,
    /// The other endpoint.
    pub b: PinRef,
    /// Where the wire was declared.
    pub span: Span,
}

impl Wire {
    /// Returns `true` if both endpoints are on the same gate.
    pub fn is_same_gate(&self) -> bool {
        self.a.gate == self.b.gate
    }
}

/// Gates and wires parsed from one netlist file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist {
    /// All gates, in declaration order.
    pub gates: Vec<Gate>,
    /// All wires, in declaration order.
    pub wires: Vec<Wire>,
    /// Name lookup (rebuilt on deserialization).
    #[serde(skip)]
    pub gate_by_name: HashMap<Ident, GateId>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a gate and returns its ID. The caller guarantees the name is new.
    pub fn add_gate(&mut self, name: Ident, width: u32, height: u32, span: Span) -> GateId {
        let id = GateId::from_raw(self.gates.len() as u32);
        self.gate_by_name.insert(name, id);
        self.gates.push(Gate {
            id,
            name,
            width,
            height,
            pins: Vec::new(),
            span,
        });
        id
    }

    /// Appends a pin to `gate`, returning its 1-based [`PinRef`].
    pub fn add_pin(&mut self, gate: GateId, offset: Point) -> PinRef {
        let g = self.gate_mut(gate);
        g.pins.push(offset);
        PinRef::new(gate, g.pins.len() as u32)
    }

    /// Adds a wire.
    pub fn add_wire(&mut self, a: PinRef, b: PinRef, span: Span) {
        self.wires.push(Wire { a, b, span });
    }

    /// Returns the gate with the given ID.
    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.index()]
    }

    /// Returns a mutable reference to the gate with the given ID.
    pub fn gate_mut(&mut self, id: GateId) -> &mut Gate {
        &mut self.gates[id.index()]
    }

    /// Looks up a gate by interned name.
    pub fn find_gate(&self, name: Ident) -> Option<GateId> {
        self.gate_by_name.get(&name).copied()
    }

    /// Returns the offset of a pin, or `None` for a dangling reference.
    pub fn pin_offset(&self, pin: PinRef) -> Option<Point> {
        self.gates.get(pin.gate.index())?.pin_offset(pin.pin)
    }

    /// Iterates over every pin of every gate, in gate then pin order.
    pub fn pins(&self) -> impl Iterator<Item = PinRef> + '_ {
        self.gates
            .iter()
            .flat_map(|g| (1..=g.pin_count()).map(move |k| PinRef::new(g.id, k)))
    }

    /// Number of gates.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Number of wires.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Total number of pins across all gates.
    pub fn pin_count(&self) -> usize {
        self.gates.iter().map(|g| g.pins.len()).sum()
    }

    /// Formats a pin as `g<name>.p<k>`.
    pub fn pin_name(&self, pin: PinRef, interner: &Interner) -> String {
        format!("{}.p{}", interner.resolve(self.gate(pin.gate).name), pin.pin)
    }

    /// Rebuilds the name index after deserialization.
    pub fn rebuild_indices(&mut self) {
        self.gate_by_name = self.gates.iter().map(|g| (g.name, g.id)).collect();
    }
}
