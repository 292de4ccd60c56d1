//! isogrid - grid occupancy and depth ordering for isometric scenes.
//!
//! Multi-cell entities are placed on a fixed grid of cells. Each draw
//! assigns every entity's root cell an integer depth so that a renderer
//! layering flat sprites by ascending depth paints entities in front of
//! whatever they cover. Changes are announced through synchronous events.
//!
//! The [`Grid`] is the programmatic entry point; [`SceneBuilder`] loads a
//! whole scene from TOML and renders a text report of the result.

pub mod config;
pub mod event;
pub mod placement;
pub mod report;
pub mod scene;

mod catalog;
mod cell;
mod depth;
mod entity;
mod error;
mod grid;

pub use isogrid_core::{geometry, identifier, kind, orientation};

pub use catalog::Catalog;
pub use cell::Cell;
pub use entity::{EntityId, PlacedEntity};
pub use error::{GridError, IsogridError};
pub use grid::{AreaEntry, DrawSummary, Grid, GridBuilder};

/// Depth keys assigned by [`Grid::draw`].
pub use isogrid_core::depth::Depth;

use log::{debug, info, trace};

use config::AppConfig;
use report::ReportFormat;
use scene::{Scene, SceneConfig};

/// Builder for loading and reporting scenes.
///
/// # Examples
///
/// ```
/// use isogrid::{SceneBuilder, config::AppConfig, report::ReportFormat};
///
/// let source = r#"
///     [grid]
///     columns = 10
///     rows = 10
///
///     [kinds.chair]
///     size = [1, 1]
///
///     [[entities]]
///     kind = "chair"
///     at = [2, 2]
/// "#;
///
/// let builder = SceneBuilder::new(AppConfig::default());
/// let config = builder.parse(source).unwrap();
/// let scene = builder.build(&config).unwrap();
///
/// let report = builder.render(&scene, ReportFormat::Table);
/// assert!(report.contains("chair-0"));
/// ```
#[derive(Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse TOML source into a scene description.
    ///
    /// # Errors
    ///
    /// Returns [`IsogridError::Parse`] carrying the source text for
    /// malformed documents, unknown fields or invalid values.
    pub fn parse(&self, source: &str) -> Result<SceneConfig, IsogridError> {
        info!("Parsing scene");

        let scene: SceneConfig =
            toml::from_str(source).map_err(|err| IsogridError::new_parse_error(err, source))?;

        debug!(
            kinds = scene.kinds().len(),
            entities = scene.entities().len(),
            steps = scene.steps().len();
            "Scene parsed successfully"
        );
        trace!(scene:?; "Parsed scene");

        Ok(scene)
    }

    /// Build the grid a scene describes, place its entities, run its steps
    /// and draw the result.
    ///
    /// # Errors
    ///
    /// Returns [`IsogridError::Grid`] for the first rejected grid operation
    /// and [`IsogridError::Scene`] for steps naming unknown entities.
    pub fn build(&self, scene: &SceneConfig) -> Result<Scene, IsogridError> {
        info!(
            columns = scene.grid().columns(),
            rows = scene.grid().rows();
            "Building scene"
        );
        let built = scene::build_scene(scene, &self.config)?;
        info!(draws = built.draws().len(); "Scene built successfully");
        Ok(built)
    }

    /// Render a text report of a built scene.
    pub fn render(&self, scene: &Scene, format: ReportFormat) -> String {
        debug!(format:% = format; "Rendering report");
        report::render(scene, format)
    }
}
