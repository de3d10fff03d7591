use std::collections::{HashMap, HashSet};

use crate::{
    geometry::{GridKey, Orientation, Point},
    library::SymbolLibrary,
    net::{
        Element, GlobalLabel, Junction, Label, LabelShape, NoConnect, PowerRail, PowerSymbol,
        TextNote, Wire,
    },
    placement::{self, Placement},
    SchematicError,
};

/// Leg order of an axis-aligned connection between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    HorizontalFirst,
    VerticalFirst,
}

/// Hands out `#PWR01`, `#PWR02`, ... for power-rail symbols.
#[derive(Debug, Default)]
pub struct PowerRefCounter {
    next: u32,
}

impl PowerRefCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_reference(&mut self) -> String {
        self.next += 1;
        format!("#PWR{:02}", self.next)
    }
}

/// Records placements and connection operations in order, then derives
/// junctions in [`TopologyBuilder::finish`].
pub struct TopologyBuilder<'a> {
    library: &'a SymbolLibrary,
    elements: Vec<Element>,
    /// Reference designator to index into `elements`.
    placements: HashMap<String, usize>,
    power_refs: PowerRefCounter,
}

impl<'a> TopologyBuilder<'a> {
    pub fn new(library: &'a SymbolLibrary) -> Self {
        Self {
            library,
            elements: Vec::new(),
            placements: HashMap::new(),
            power_refs: PowerRefCounter::new(),
        }
    }

    pub fn place(&mut self, placement: Placement) -> Result<(), SchematicError> {
        if self.placements.contains_key(&placement.reference) {
            return Err(SchematicError::NameAlreadyExists(placement.reference));
        }
        self.library.symbol(&placement.symbol_id)?;
        if placement.rotation != Orientation::R0 {
            return Err(SchematicError::UnsupportedOrientation {
                reference: placement.reference,
                rotation: placement.rotation,
            });
        }

        log::debug!(
            "placed {} ({}) at {}",
            placement.reference,
            placement.symbol_id,
            placement.anchor
        );
        self.placements
            .insert(placement.reference.clone(), self.elements.len());
        self.elements.push(Element::Symbol(placement));
        Ok(())
    }

    pub fn placement(&self, reference: &str) -> Result<&Placement, SchematicError> {
        match self.placements.get(reference).map(|&idx| &self.elements[idx]) {
            Some(Element::Symbol(placement)) => Ok(placement),
            _ => Err(SchematicError::NameNotFound(reference.to_string())),
        }
    }

    /// Sheet position of `pin` on the placement called `reference`.
    pub fn pin(&self, reference: &str, pin: &str) -> Result<Point, SchematicError> {
        placement::resolve(self.library, self.placement(reference)?, pin)
    }

    /// A single straight wire. Zero-length wires are dropped.
    pub fn wire(&mut self, start: Point, end: Point) -> &mut Self {
        if !start.coincides(end) {
            self.elements.push(Element::Wire(Wire { start, end }));
        }
        self
    }

    /// Axis-aligned path from `a` to `b` with at most two legs.
    pub fn connect(&mut self, a: Point, b: Point, route: Route) -> &mut Self {
        let corner = match route {
            Route::HorizontalFirst => Point::new(b.x, a.y),
            Route::VerticalFirst => Point::new(a.x, b.y),
        };
        self.wire(a, corner).wire(corner, b)
    }

    pub fn connect_pins(
        &mut self,
        (from_ref, from_pin): (&str, &str),
        (to_ref, to_pin): (&str, &str),
        route: Route,
    ) -> Result<(), SchematicError> {
        let a = self.pin(from_ref, from_pin)?;
        let b = self.pin(to_ref, to_pin)?;
        self.connect(a, b, route);
        Ok(())
    }

    /// Connect `hub` to every target and request a junction at the hub.
    pub fn branch(&mut self, hub: Point, targets: &[Point], route: Route) -> &mut Self {
        for &target in targets {
            self.connect(hub, target, route);
        }
        self.junction(hub)
    }

    /// Request a junction. Requests are reconciled against the wire graph in
    /// [`TopologyBuilder::finish`].
    pub fn junction(&mut self, at: Point) -> &mut Self {
        self.elements.push(Element::Junction(Junction { at }));
        self
    }

    pub fn label(&mut self, from: Point, at: Point, name: &str, angle: Orientation) -> &mut Self {
        self.wire(from, at);
        self.elements.push(Element::Label(Label {
            name: name.to_string(),
            at,
            angle,
        }));
        self
    }

    pub fn global_label(
        &mut self,
        from: Point,
        at: Point,
        name: &str,
        angle: Orientation,
        shape: LabelShape,
    ) -> &mut Self {
        self.wire(from, at);
        self.elements.push(Element::GlobalLabel(GlobalLabel {
            name: name.to_string(),
            at,
            angle,
            shape,
        }));
        self
    }

    /// Wire `from` to `at` and drop a power symbol for `rail` there.
    pub fn power(&mut self, rail: PowerRail, from: Point, at: Point, route: Route) -> &mut Self {
        self.connect(from, at, route);
        let reference = self.power_refs.next_reference();
        self.elements.push(Element::Power(PowerSymbol {
            rail,
            at,
            reference,
        }));
        self
    }

    pub fn no_connect(&mut self, at: Point) -> &mut Self {
        self.elements.push(Element::NoConnect(NoConnect { at }));
        self
    }

    pub fn text(&mut self, at: Point, text: &str, size: f64) -> &mut Self {
        self.elements.push(Element::Text(TextNote {
            text: text.to_string(),
            at,
            size,
        }));
        self
    }

    /// Reconcile junctions with the wire graph. A point where three or more
    /// wire ends meet always gets a junction; a point with two wire ends gets
    /// none unless one was requested and a pin or power symbol makes it a
    /// three-way node. Requested junctions that qualify keep their position
    /// in the element list; missing ones are appended.
    pub fn finish(self) -> Topology {
        let mut wire_ends: HashMap<GridKey, usize> = HashMap::new();
        let mut connections: HashMap<GridKey, usize> = HashMap::new();
        let mut end_order: Vec<Point> = Vec::new();
        for element in &self.elements {
            match element {
                Element::Wire(wire) => {
                    for point in wire.endpoints() {
                        *wire_ends.entry(point.key()).or_insert(0) += 1;
                        *connections.entry(point.key()).or_insert(0) += 1;
                        end_order.push(point);
                    }
                }
                Element::Symbol(placement) => {
                    if let Some(symbol) = self.library.get_symbol(&placement.symbol_id) {
                        for pin in &symbol.pins {
                            let at = placement::to_sheet(placement.anchor, pin.offset);
                            *connections.entry(at.key()).or_insert(0) += 1;
                        }
                    }
                }
                Element::Power(power) => {
                    *connections.entry(power.at.key()).or_insert(0) += 1;
                }
                _ => {}
            }
        }
        let count = |counts: &HashMap<GridKey, usize>, point: Point| {
            counts.get(&point.key()).copied().unwrap_or(0)
        };

        let mut placed: HashSet<GridKey> = HashSet::new();
        let mut elements = Vec::with_capacity(self.elements.len());
        for element in self.elements {
            if let Element::Junction(junction) = &element {
                if count(&connections, junction.at) < 3 {
                    log::debug!(
                        "dropped junction at {}: fewer than 3 connection ends",
                        junction.at
                    );
                    continue;
                }
                if !placed.insert(junction.at.key()) {
                    continue;
                }
            }
            elements.push(element);
        }

        for point in end_order {
            if count(&wire_ends, point) >= 3 && placed.insert(point.key()) {
                log::debug!("added junction at {}", point);
                elements.push(Element::Junction(Junction { at: point }));
            }
        }

        Topology { elements }
    }
}

/// Counts of what a topology will render, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologyStats {
    pub symbols: usize,
    pub power_symbols: usize,
    pub wires: usize,
    pub junctions: usize,
    pub labels: usize,
    pub no_connects: usize,
    pub texts: usize,
}

/// The finished, ordered element list of a sheet.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    elements: Vec<Element>,
}

impl Topology {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.elements.iter().filter_map(|element| match element {
            Element::Symbol(placement) => Some(placement),
            _ => None,
        })
    }

    /// Every symbol id referenced by a placement or a power symbol, without
    /// duplicates.
    pub fn used_symbol_ids(&self) -> HashSet<&str> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Symbol(placement) => Some(placement.symbol_id.as_str()),
                Element::Power(power) => Some(power.rail.symbol_id()),
                _ => None,
            })
            .collect()
    }

    pub fn stats(&self) -> TopologyStats {
        let mut stats = TopologyStats::default();
        for element in &self.elements {
            match element {
                Element::Symbol(_) => stats.symbols += 1,
                Element::Power(_) => stats.power_symbols += 1,
                Element::Wire(_) => stats.wires += 1,
                Element::Junction(_) => stats.junctions += 1,
                Element::Label(_) | Element::GlobalLabel(_) => stats.labels += 1,
                Element::NoConnect(_) => stats.no_connects += 1,
                Element::Text(_) => stats.texts += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        placement::PlacementBuilder,
        standard_library::{connector_id, CAPACITOR, RESISTOR},
    };

    fn place(builder: &mut TopologyBuilder, reference: &str, symbol_id: &str, x: f64, y: f64) {
        builder
            .place(
                PlacementBuilder::default()
                    .reference(reference)
                    .symbol_id(symbol_id)
                    .value("X")
                    .at(x, y)
                    .build()
                    .unwrap(),
            )
            .unwrap();
    }

    fn junctions(topology: &Topology) -> Vec<Point> {
        topology
            .elements()
            .iter()
            .filter_map(|element| match element {
                Element::Junction(junction) => Some(junction.at),
                _ => None,
            })
            .collect()
    }

    fn wires(topology: &Topology) -> Vec<Wire> {
        topology
            .elements()
            .iter()
            .filter_map(|element| match element {
                Element::Wire(wire) => Some(*wire),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn connect_never_draws_diagonals() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        builder.connect(Point::new(0.0, 0.0), Point::new(10.16, 5.08), Route::HorizontalFirst);
        builder.connect(Point::new(0.0, 0.0), Point::new(10.16, 5.08), Route::VerticalFirst);
        builder.connect(Point::new(0.0, 0.0), Point::new(0.0, 5.08), Route::HorizontalFirst);

        let topology = builder.finish();
        let wires = wires(&topology);
        assert_eq!(wires.len(), 5);
        for wire in &wires {
            assert!(wire.start.x == wire.end.x || wire.start.y == wire.end.y);
        }
        assert_eq!(wires[0].end, Point::new(10.16, 0.0));
        assert_eq!(wires[2].end, Point::new(0.0, 5.08));
    }

    #[test]
    fn duplicate_references_are_rejected() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        place(&mut builder, "R1", RESISTOR, 10.0, 10.0);
        let err = builder
            .place(
                PlacementBuilder::default()
                    .reference("R1")
                    .symbol_id(CAPACITOR)
                    .value("C")
                    .at(20.0, 20.0)
                    .build()
                    .unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, SchematicError::NameAlreadyExists(name) if name == "R1"));
    }

    #[test]
    fn unknown_symbols_and_pins_are_rejected() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        let err = builder
            .place(
                PlacementBuilder::default()
                    .reference("L1")
                    .symbol_id("Device:L")
                    .value("10u")
                    .at(0.0, 0.0)
                    .build()
                    .unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, SchematicError::UnknownSymbol(_)));

        place(&mut builder, "R1", RESISTOR, 10.0, 10.0);
        assert!(matches!(
            builder.pin("R1", "3").unwrap_err(),
            SchematicError::UnknownPin { .. }
        ));
        assert!(matches!(
            builder.pin("R9", "1").unwrap_err(),
            SchematicError::NameNotFound(name) if name == "R9"
        ));
    }

    #[test]
    fn probe_branch_gets_one_junction() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        place(&mut builder, "R1", RESISTOR, 175.26, 48.26);
        place(&mut builder, "C1", CAPACITOR, 175.26, 63.5);
        place(&mut builder, "J2", &connector_id(2), 187.96, 55.88);

        let hub = builder.pin("R1", "2").unwrap();
        let cap = builder.pin("C1", "1").unwrap();
        let jack = builder.pin("J2", "1").unwrap();
        builder.branch(hub, &[cap, jack], Route::HorizontalFirst);

        let topology = builder.finish();
        assert_eq!(hub, Point::new(175.26, 52.07));
        assert_eq!(junctions(&topology), vec![hub]);

        // R1 pin 2 and both wires meet at the hub; C1 top, the corner and
        // J2 pin 1 each see only two ends.
        let wires = wires(&topology);
        assert_eq!(wires.len(), 3);
        assert!(wires.iter().all(|w| w.start == hub || w.start == Point::new(185.42, 52.07)));
    }

    #[test]
    fn two_endpoints_get_no_junction() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        let a = Point::new(0.0, 0.0);
        builder.connect(a, Point::new(5.08, 5.08), Route::HorizontalFirst);
        builder.junction(Point::new(5.08, 0.0));

        let topology = builder.finish();
        assert!(junctions(&topology).is_empty());
    }

    #[test]
    fn wire_through_a_pin_needs_a_request_for_a_junction() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        place(&mut builder, "J1", &connector_id(2), 38.1, 55.88);
        place(&mut builder, "R1", RESISTOR, 76.2, 48.26);

        // J1 pin 1 has a wire on each side; only the pin makes a third end.
        let tip = builder.pin("J1", "1").unwrap();
        builder.wire(tip, tip.offset(30.48, 0.0));
        builder.wire(tip, tip.offset(0.0, -5.08));

        // Same shape at R1 pin 2, but this one is requested.
        let node = builder.pin("R1", "2").unwrap();
        builder.wire(node, node.offset(0.0, 5.08));
        builder.wire(node, node.offset(-2.54, 0.0));
        builder.junction(node);

        let topology = builder.finish();
        assert_eq!(tip, Point::new(35.56, 55.88));
        assert_eq!(junctions(&topology), vec![node]);
    }

    #[test]
    fn missing_junctions_are_added_and_requests_deduplicated() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        let hub = Point::new(10.16, 10.16);
        builder.junction(hub);
        builder.junction(hub);
        builder.wire(hub, Point::new(0.0, 10.16));
        builder.wire(hub, Point::new(20.32, 10.16));
        builder.wire(hub, Point::new(10.16, 0.0));
        let tee = Point::new(0.0, 0.0);
        builder.wire(tee, Point::new(10.16, 0.0));
        builder.wire(tee, Point::new(0.0, 10.16));
        builder.wire(Point::new(0.0, -5.08), tee);

        let topology = builder.finish();
        assert_eq!(junctions(&topology), vec![hub, tee]);
        assert!(matches!(topology.elements()[0], Element::Junction(_)));
    }

    #[test]
    fn power_references_count_up() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        let at = Point::new(10.16, 10.16);
        builder.power(PowerRail::Gnd, at, at.offset(0.0, 5.08), Route::VerticalFirst);
        builder.power(PowerRail::Plus5V, at, at.offset(0.0, -5.08), Route::VerticalFirst);

        let topology = builder.finish();
        let references: Vec<&str> = topology
            .elements()
            .iter()
            .filter_map(|element| match element {
                Element::Power(power) => Some(power.reference.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(references, vec!["#PWR01", "#PWR02"]);
        assert_eq!(topology.stats().wires, 2);
        assert_eq!(topology.stats().power_symbols, 2);
        assert!(topology.used_symbol_ids().contains("power:GND"));
    }

    #[test]
    fn labels_get_a_stub_wire() {
        let library = SymbolLibrary::standard().unwrap();
        let mut builder = TopologyBuilder::new(&library);
        let pin = Point::new(203.2, 101.6);
        builder.label(pin, pin.offset(-2.54, 0.0), "PROBE_PIT", Orientation::R180);
        builder.label(pin, pin, "PROBE_PIT", Orientation::R180);

        let topology = builder.finish();
        let stats = topology.stats();
        assert_eq!(stats.wires, 1);
        assert_eq!(stats.labels, 2);
    }
}
