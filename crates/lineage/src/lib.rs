//! Lineage - layout engine for family-tree diagrams.
//!
//! A document lists families by surname, each with the unions of its members
//! and their children. [`LayoutEngine`] turns the document into positioned
//! family blocks: every root person's descendants are laid out as a centered
//! tree, the trees of a family are placed side by side under its title and
//! surrounded by an outline, and families that share a person are packed
//! next to each other.
//!
//! The result is a list of [`SvgFamily`] values that serialize with `serde`.

pub mod config;
pub mod graph;
pub mod layout;

mod error;

pub use lineage_core::{document, geometry, identifier, style};
pub use lineage_parser::error as parse_error;

pub use error::LineageError;
pub use layout::{SvgFamily, SvgPerson, SvgRoot, TitleNode};

use std::{fs, path::Path};

use log::{debug, info, trace};
use rayon::prelude::*;

use lineage_core::document::DocumentGraph;

use config::AppConfig;
use graph::GraphBuilder;
use layout::{
    family::FamilyComposer, outline::OutlineTracer, pack::Packer, subtree::SubtreeLayout,
};

/// Entry point for reading and laying out Lineage documents.
///
/// # Examples
///
/// ```rust
/// use lineage::{LayoutEngine, config::AppConfig};
///
/// let source = "Smith\n\nJohn + Mary = Bob, Kate\n";
///
/// let engine = LayoutEngine::new(AppConfig::default());
/// let document = engine.parse(source).expect("Failed to parse");
/// let families = engine.align(&document, 0.6).expect("Failed to lay out");
///
/// assert_eq!(families.len(), 1);
/// assert_eq!(families[0].title().name(), "Smith");
/// ```
#[derive(Debug, Default)]
pub struct LayoutEngine {
    config: AppConfig,
}

impl LayoutEngine {
    /// Create a new layout engine with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a document snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Parse`] with the source attached when the
    /// document has syntax errors.
    pub fn parse(&self, source: &str) -> Result<DocumentGraph, LineageError> {
        info!("Parsing document");

        let document =
            lineage_parser::parse(source).map_err(|err| LineageError::new_parse_error(err, source))?;

        debug!(families = document.families().len(); "Document parsed successfully");
        Ok(document)
    }

    /// Lay out every family of `document`.
    ///
    /// `font_ratio` scales the estimated width of every label; it is the
    /// ratio of the rendering font's average glyph width to its size.
    ///
    /// The phases run one after the other: subtrees of all root persons in
    /// parallel, then family composition in parallel, then outlines in
    /// parallel, then vertical stacking and packing.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Layout`] for a non-positive or non-finite
    /// `font_ratio` and [`LineageError::Config`] for a non-positive grid step.
    pub fn align(&self, document: &DocumentGraph, font_ratio: f32) -> Result<Vec<SvgFamily>, LineageError> {
        if !font_ratio.is_finite() || font_ratio <= 0.0 {
            return Err(LineageError::Layout(format!(
                "font ratio must be a positive number, got {font_ratio}"
            )));
        }

        let style = self.config.style();
        if style.grid_step() <= 0 {
            return Err(LineageError::Config(format!(
                "grid step must be positive, got {}",
                style.grid_step()
            )));
        }

        let graphs = GraphBuilder::new(document).build();
        info!(families = graphs.len(), font_ratio = font_ratio; "Laying out families");

        let subtree = SubtreeLayout::new(style, font_ratio);
        let roots: Vec<Vec<SvgRoot>> = graphs
            .par_iter()
            .map(|family| {
                family
                    .roots()
                    .par_iter()
                    .map(|&root| subtree.layout(family, root))
                    .collect()
            })
            .collect();
        debug!(roots = roots.iter().map(Vec::len).sum::<usize>(); "Subtrees laid out");

        let composer = FamilyComposer::new(style, font_ratio);
        let mut families: Vec<SvgFamily> = graphs
            .par_iter()
            .zip(roots)
            .map(|(family, roots)| composer.compose(family.label(), roots))
            .collect();

        let tracer = OutlineTracer::new(style, self.config.layout().outline());
        families.par_iter_mut().for_each(|family| {
            let bounding = tracer.trace(family);
            family.set_bounding(bounding);
        });
        debug!("Outlines traced");

        FamilyComposer::stack(&mut families);

        if self.config.layout().pack() {
            let placements = Packer::new(style).pack(&mut families);
            debug!(placements = placements.len(); "Families packed");
            trace!(placements:?; "Applied placements");
        }

        info!(families = families.len(); "Layout complete");
        Ok(families)
    }

    /// Parse `source` and lay it out with the configured font ratio.
    ///
    /// # Errors
    ///
    /// See [`LayoutEngine::parse`] and [`LayoutEngine::align`].
    pub fn align_source(&self, source: &str) -> Result<Vec<SvgFamily>, LineageError> {
        let document = self.parse(source)?;
        self.align(&document, self.config.layout().font_ratio())
    }

    /// Read a document from `path` and lay it out with the configured font
    /// ratio.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Io`] when the file cannot be read, otherwise
    /// see [`LayoutEngine::align_source`].
    pub fn align_file(&self, path: impl AsRef<Path>) -> Result<Vec<SvgFamily>, LineageError> {
        let path = path.as_ref();
        debug!(path = path.display().to_string(); "Reading document");

        let source = fs::read_to_string(path)?;
        self.align_source(&source)
    }
}
