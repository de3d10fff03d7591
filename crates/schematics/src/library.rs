use std::collections::HashMap;

use crate::{
    symbol::{PinGeometry, SymbolDefinition},
    SchematicError,
};

/// `SymbolLibrary` is the read-only catalog of symbol definitions that
/// placements refer to. It is built once, then shared by reference with the
/// resolver, the topology builder, and the serializer.
#[derive(Debug, Default)]
pub struct SymbolLibrary {
    /// Definitions in registration order. The serializer emits the library
    /// section in this order.
    symbols: Vec<SymbolDefinition>,

    index_by_id: HashMap<String, usize>,
}

impl SymbolLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding the built-in symbol set.
    pub fn standard() -> Result<Self, SchematicError> {
        let mut library = Self::new();
        library.register_standard_library()?;
        Ok(library)
    }

    pub fn add_symbol(&mut self, symbol: SymbolDefinition) -> Result<(), SchematicError> {
        if self.index_by_id.contains_key(&symbol.id) {
            return Err(SchematicError::NameAlreadyExists(symbol.id));
        }
        log::debug!("registered symbol {}", symbol.id);
        self.index_by_id.insert(symbol.id.clone(), self.symbols.len());
        self.symbols.push(symbol);
        Ok(())
    }

    pub fn get_symbol(&self, id: &str) -> Option<&SymbolDefinition> {
        self.index_by_id.get(id).map(|&idx| &self.symbols[idx])
    }

    pub fn symbol(&self, id: &str) -> Result<&SymbolDefinition, SchematicError> {
        self.get_symbol(id)
            .ok_or_else(|| SchematicError::UnknownSymbol(id.to_string()))
    }

    /// Look up the geometry of `pin` (a pin number or name) on symbol `id`.
    pub fn lookup_pin(&self, id: &str, pin: &str) -> Result<&PinGeometry, SchematicError> {
        self.symbol(id)?
            .get_pin(pin)
            .ok_or_else(|| SchematicError::UnknownPin {
                symbol: id.to_string(),
                pin: pin.to_string(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn symbols_iter(&self) -> impl Iterator<Item = &SymbolDefinition> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
