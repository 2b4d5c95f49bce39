//! Net clustering.
//!
//! Wires are two-pin connections; a net is the transitive closure of the
//! wires touching a pin. Clustering runs a union-find over every pin of the
//! netlist, so pins with no wires come out as singleton nets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tessel_netlist::{GateId, NetId, Netlist, PinRef};

/// Disjoint-set forest over `0..n` with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
        }
    }

    /// Returns the representative of `x`'s set.
    ///
    /// Iterative, so long chains cannot overflow the stack.
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = x;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns `false` if they were already
    /// in the same set.
    pub fn union(&mut self, a: u32, b: u32) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (hi, lo) = if self.rank[ra as usize] >= self.rank[rb as usize] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[lo as usize] = hi;
        if self.rank[hi as usize] == self.rank[lo as usize] {
            self.rank[hi as usize] += 1;
        }
        true
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the forest is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// A maximal set of electrically connected pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    /// This net's index in [`Clustering::nets`].
    pub id: NetId,
    /// Member pins, sorted by gate then pin index.
    pub pins: Vec<PinRef>,
}

impl Net {
    /// Number of member pins.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if the net has no pins. Nets built by
    /// [`cluster_pins`] always hold at least one.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Returns `true` if any member pin belongs to `gate`.
    pub fn touches(&self, gate: GateId) -> bool {
        self.pins.iter().any(|p| p.gate == gate)
    }
}

/// Counters describing a clustering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    /// Wires that joined two previously separate nets.
    pub merging_wires: usize,
    /// Wires between pins already in the same net.
    pub redundant_wires: usize,
    /// Wires with both ends on one gate, which are ignored.
    pub same_gate_wires: usize,
    /// Wires naming a pin that does not exist, which are ignored.
    pub dangling_wires: usize,
    /// Nets with exactly one pin.
    pub singleton_nets: usize,
}

/// The nets of a netlist.
///
/// Only the nets and counters are serialized; the pin index is rebuilt
/// when deserializing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ClusteringData")]
pub struct Clustering {
    /// Nets ordered by their smallest pin.
    pub nets: Vec<Net>,
    /// Run counters.
    pub stats: ClusterStats,
    #[serde(skip)]
    net_of_pin: HashMap<PinRef, NetId>,
}

#[derive(Deserialize)]
struct ClusteringData {
    nets: Vec<Net>,
    stats: ClusterStats,
}

impl From<ClusteringData> for Clustering {
    fn from(data: ClusteringData) -> Self {
        let net_of_pin = data
            .nets
            .iter()
            .flat_map(|net| net.pins.iter().map(move |pin| (*pin, net.id)))
            .collect();
        Self {
            nets: data.nets,
            stats: data.stats,
            net_of_pin,
        }
    }
}

impl Clustering {
    /// Returns the net containing `pin`.
    pub fn net_of(&self, pin: PinRef) -> Option<NetId> {
        self.net_of_pin.get(&pin).copied()
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.index()]
    }

    /// Returns the IDs of every net with a pin on `gate`, ascending.
    pub fn nets_of_gate(&self, gate: GateId) -> Vec<NetId> {
        let mut ids: Vec<NetId> = self
            .net_of_pin
            .iter()
            .filter(|(pin, _)| pin.gate == gate)
            .map(|(_, id)| *id)
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Number of nets.
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    /// Returns `true` if there are no nets.
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }
}

/// Groups every pin of `netlist` into nets.
///
/// Same-gate wires and wires with a missing endpoint are counted and
/// skipped. The result does not depend on wire order: nets are emitted in
/// order of their smallest pin and each net's pins are sorted.
pub fn cluster_pins(netlist: &Netlist) -> Clustering {
    let pins: Vec<PinRef> = netlist.pins().collect();
    let index: HashMap<PinRef, u32> = pins
        .iter()
        .enumerate()
        .map(|(i, p)| (*p, i as u32))
        .collect();

    let mut stats = ClusterStats::default();
    let mut uf = UnionFind::new(pins.len());
    for wire in &netlist.wires {
        if wire.is_same_gate() {
            stats.same_gate_wires += 1;
            continue;
        }
        let (Some(&a), Some(&b)) = (index.get(&wire.a), index.get(&wire.b)) else {
            stats.dangling_wires += 1;
            continue;
        };
        if uf.union(a, b) {
            stats.merging_wires += 1;
        } else {
            stats.redundant_wires += 1;
        }
    }

    // `pins` is sorted, so the first time a root is seen is at its set's
    // smallest pin, and members are pushed in ascending order.
    let mut net_of_root: HashMap<u32, NetId> = HashMap::new();
    let mut nets: Vec<Net> = Vec::new();
    let mut net_of_pin = HashMap::with_capacity(pins.len());
    for (i, pin) in pins.iter().enumerate() {
        let root = uf.find(i as u32);
        let id = *net_of_root.entry(root).or_insert_with(|| {
            let id = NetId::from_raw(nets.len() as u32);
            nets.push(Net {
                id,
                pins: Vec::new(),
            });
            id
        });
        nets[id.index()].pins.push(*pin);
        net_of_pin.insert(*pin, id);
    }
    stats.singleton_nets = nets.iter().filter(|n| n.len() == 1).count();

    Clustering {
        nets,
        stats,
        net_of_pin,
    }
}
