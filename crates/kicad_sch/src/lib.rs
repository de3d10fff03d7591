mod check;
mod elements;
pub mod format;
pub mod ids;
mod symbols;
mod writer;

use std::{collections::HashSet, string::FromUtf8Error};

use schematics::{net::Element, SchematicError, SymbolLibrary, TitleBlock, Topology};
use thiserror::Error;

use elements::RenderContext;
use ids::{IdSource, RandomIds};
use writer::SexprWriter;

pub use check::{label_names, validate_document};

pub const FORMAT_VERSION: u32 = 20231120;
pub const GENERATOR: &str = "eeschema";
pub const GENERATOR_VERSION: &str = "8.0";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Schematic error: {0}")]
    SchematicError(#[from] SchematicError),

    #[error("Symbol {0} is placed but missing from the library")]
    MissingSymbol(String),

    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Document-level settings of a single sheet.
#[derive(Debug, Clone, derive_builder::Builder)]
#[builder(build_fn(error = "SchematicError"))]
pub struct SheetSettings {
    #[builder(setter(into), default = "\"A3\".to_string()")]
    pub paper: String,
    /// Project name used in symbol instance paths.
    #[builder(setter(into))]
    pub project: String,
    #[builder(default)]
    pub title_block: TitleBlock,
}

/// Renders a finished [`Topology`] into `.kicad_sch` text.
pub struct KicadSchExporter<'a> {
    library: &'a SymbolLibrary,
    settings: &'a SheetSettings,
    ids: Box<dyn IdSource + 'a>,
}

impl<'a> KicadSchExporter<'a> {
    pub fn new(library: &'a SymbolLibrary, settings: &'a SheetSettings) -> Self {
        Self {
            library,
            settings,
            ids: Box::new(RandomIds),
        }
    }

    /// Replace the identifier source, e.g. with [`ids::SequentialIds`] for
    /// reproducible output.
    pub fn with_ids(mut self, ids: impl IdSource + 'a) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn export(&mut self, topology: &Topology) -> Result<String, ExportError> {
        // Every referenced symbol must resolve before any text is produced.
        let used = topology.used_symbol_ids();
        let mut missing: Vec<&str> = used
            .iter()
            .copied()
            .filter(|id| !self.library.contains(id))
            .collect();
        missing.sort();
        if let Some(id) = missing.first() {
            return Err(ExportError::MissingSymbol(id.to_string()));
        }

        let mut writer = SexprWriter::new(Vec::new());
        let document_id = self.ids.next_id();

        writer.start_block("kicad_sch")?;
        writer.write_line(&format!("(version {})", FORMAT_VERSION))?;
        writer.write_line(&format!("(generator {})", format::quote(GENERATOR)))?;
        writer.write_line(&format!(
            "(generator_version {})",
            format::quote(GENERATOR_VERSION)
        ))?;
        writer.write_line(&format!(
            "(uuid {})",
            format::quote(&document_id.to_string())
        ))?;
        writer.write_line(&format!("(paper {})", format::quote(&self.settings.paper)))?;
        self.write_title_block(&mut writer)?;
        self.write_lib_symbols(&mut writer, &used)?;

        let mut ctx = RenderContext {
            ids: self.ids.as_mut(),
            document_id,
            project: &self.settings.project,
        };
        for element in topology.elements() {
            match element {
                Element::Symbol(placement) => {
                    let symbol = self.library.symbol(&placement.symbol_id)?;
                    elements::write_placement(&mut writer, &mut ctx, symbol, placement)?;
                }
                Element::Power(power) => {
                    let symbol = self.library.symbol(power.rail.symbol_id())?;
                    elements::write_power(&mut writer, &mut ctx, symbol, power)?;
                }
                _ => elements::write_element(&mut writer, &mut ctx, element)?,
            }
        }

        writer.start_block("sheet_instances")?;
        writer.write_line("(path \"/\" (page \"1\"))")?;
        writer.end_block()?;
        writer.end_block()?;

        log::debug!("rendered {} elements", topology.elements().len());
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_title_block(&self, writer: &mut SexprWriter<Vec<u8>>) -> Result<(), ExportError> {
        let block = &self.settings.title_block;
        writer.start_block("title_block")?;
        writer.write_line(&format!("(title {})", format::quote(&block.title)))?;
        if !block.date.is_empty() {
            writer.write_line(&format!("(date {})", format::quote(&block.date)))?;
        }
        if !block.rev.is_empty() {
            writer.write_line(&format!("(rev {})", format::quote(&block.rev)))?;
        }
        if !block.company.is_empty() {
            writer.write_line(&format!("(company {})", format::quote(&block.company)))?;
        }
        for (idx, comment) in block.comments.iter().enumerate() {
            writer.write_line(&format!("(comment {} {})", idx + 1, format::quote(comment)))?;
        }
        writer.end_block()?;
        Ok(())
    }

    /// Definitions of every used symbol, in catalog order.
    fn write_lib_symbols(
        &self,
        writer: &mut SexprWriter<Vec<u8>>,
        used: &HashSet<&str>,
    ) -> Result<(), ExportError> {
        writer.start_block("lib_symbols")?;
        for symbol in self
            .library
            .symbols_iter()
            .filter(|s| used.contains(s.id.as_str()))
        {
            symbols::write_lib_symbol(writer, symbol)?;
        }
        writer.end_block()?;
        Ok(())
    }
}
