//! Scene files: a grid, a catalog, placements and scripted steps in TOML.
//!
//! ```toml
//! [grid]
//! columns = 10
//! rows = 10
//!
//! [kinds.closet]
//! size = [1, 2]
//! sprites.sw = { image = "closet-sw.png", offset = [-40, 0] }
//! sprites.nw = { image = "closet-nw.png" }
//!
//! [[entities]]
//! name = "closet"
//! kind = "closet"
//! at = [2, 3]
//!
//! [[steps]]
//! op = "rotate"
//! entity = "closet"
//!
//! [[steps]]
//! op = "draw"
//! from = [2, 3]
//! ```
//!
//! Placements are applied in order and followed by a full draw. Steps then
//! run in order; if the last step leaves undrawn changes behind, a final full
//! draw settles them.

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use isogrid_core::{
    geometry::{Coord, Footprint},
    kind::{EntityKind, Sprite},
    orientation::Orientation,
};

use crate::{
    catalog::Catalog,
    config::AppConfig,
    entity::EntityId,
    error::IsogridError,
    grid::{DrawSummary, Grid, GridBuilder},
};

/// A parsed scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    grid: GridConfig,
    #[serde(default)]
    kinds: IndexMap<String, KindConfig>,
    #[serde(default)]
    entities: Vec<PlacementConfig>,
    #[serde(default)]
    steps: Vec<StepConfig>,
}

impl SceneConfig {
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn kinds(&self) -> &IndexMap<String, KindConfig> {
        &self.kinds
    }

    pub fn entities(&self) -> &[PlacementConfig] {
        &self.entities
    }

    pub fn steps(&self) -> &[StepConfig] {
        &self.steps
    }

    /// The catalog described by the `[kinds]` table.
    pub fn catalog(&self) -> Catalog {
        self.kinds
            .iter()
            .map(|(name, kind)| kind.to_kind(name))
            .collect()
    }
}

/// The `[grid]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    columns: u32,
    rows: u32,
    /// Overrides the configured depth step for this scene.
    #[serde(default)]
    step: Option<u32>,
}

impl GridConfig {
    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn step(&self) -> Option<u32> {
        self.step
    }
}

/// One `[kinds.<name>]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindConfig {
    size: Footprint,
    #[serde(default)]
    orientation: Orientation,
    #[serde(default)]
    sprites: IndexMap<Orientation, Sprite>,
}

impl KindConfig {
    fn to_kind(&self, name: &str) -> EntityKind {
        self.sprites.iter().fold(
            EntityKind::new(name, self.size).with_orientation(self.orientation),
            |kind, (orientation, sprite)| kind.with_sprite(*orientation, sprite.clone()),
        )
    }
}

/// One `[[entities]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementConfig {
    /// Label used by steps and reports. Defaults to `<kind>-<index>`.
    #[serde(default)]
    name: Option<String>,
    kind: String,
    at: Coord,
    #[serde(default)]
    orientation: Option<Orientation>,
}

/// One `[[steps]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum StepConfig {
    Place {
        entity: String,
        at: Coord,
    },
    Move {
        entity: String,
        to: Coord,
    },
    Rotate {
        entity: String,
        #[serde(default = "clockwise")]
        clockwise: bool,
    },
    Orient {
        entity: String,
        orientation: Orientation,
    },
    Remove {
        entity: String,
    },
    /// Partial draw from `from`, or a full draw when omitted.
    Draw {
        #[serde(default)]
        from: Coord,
    },
}

fn clockwise() -> bool {
    true
}

impl StepConfig {
    fn is_draw(&self) -> bool {
        matches!(self, Self::Draw { .. })
    }
}

/// A built scene: the drawn grid plus the labels of its entities.
#[derive(Debug)]
pub struct Scene {
    grid: Grid,
    labels: IndexMap<EntityId, String>,
    draws: Vec<DrawSummary>,
}

impl Scene {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The label of an entity, if it was created by the scene.
    pub fn label(&self, id: EntityId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    pub fn entity_id(&self, label: &str) -> Option<EntityId> {
        self.labels
            .iter()
            .find_map(|(id, name)| (name == label).then_some(*id))
    }

    fn require(&self, label: &str) -> Result<EntityId, IsogridError> {
        self.entity_id(label)
            .ok_or_else(|| IsogridError::Scene(format!("unknown entity `{label}` in step")))
    }

    /// Summaries of every draw performed while building, in order.
    pub fn draws(&self) -> &[DrawSummary] {
        &self.draws
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Builds a [`Scene`] from a [`SceneConfig`].
pub(crate) fn build_scene(scene: &SceneConfig, config: &AppConfig) -> Result<Scene, IsogridError> {
    let mut builder = GridBuilder::new(scene.grid.columns, scene.grid.rows)
        .with_config(config)
        .with_catalog(scene.catalog());
    if let Some(step) = scene.grid.step {
        builder = builder.with_step(step);
    }
    let grid = builder.build()?;

    let mut built = Scene {
        grid,
        labels: IndexMap::new(),
        draws: Vec::new(),
    };

    for (idx, placement) in scene.entities.iter().enumerate() {
        let label = placement
            .name
            .clone()
            .unwrap_or_else(|| format!("{}-{idx}", placement.kind));
        if built.entity_id(&label).is_some() {
            return Err(IsogridError::Scene(format!("duplicate entity name `{label}`")));
        }

        let id = match placement.orientation {
            Some(orientation) => built
                .grid
                .create_entity_oriented(&placement.kind, orientation)?,
            None => built.grid.create_entity(&placement.kind)?,
        };
        built.labels.insert(id, label);
        built.grid.place(id, placement.at.x(), placement.at.y())?;
    }
    info!(entities = built.grid.entity_count(); "Scene entities placed");

    let summary = built.grid.draw(0, 0);
    built.draws.push(summary);

    let mut dirty = false;
    for step in &scene.steps {
        debug!(step:?; "Applying scene step");
        apply_step(&mut built, step)?;
        dirty = !step.is_draw();
    }
    if dirty {
        let summary = built.grid.draw(0, 0);
        built.draws.push(summary);
    }

    Ok(built)
}

fn apply_step(scene: &mut Scene, step: &StepConfig) -> Result<(), IsogridError> {
    match step {
        StepConfig::Place { entity, at } => {
            let id = scene.require(entity)?;
            scene.grid.place(id, at.x(), at.y())?;
        }
        StepConfig::Move { entity, to } => {
            let id = scene.require(entity)?;
            scene.grid.move_entity(id, to.x(), to.y())?;
        }
        StepConfig::Rotate { entity, clockwise } => {
            let id = scene.require(entity)?;
            scene.grid.rotate(id, *clockwise)?;
        }
        StepConfig::Orient {
            entity,
            orientation,
        } => {
            let id = scene.require(entity)?;
            scene.grid.orientate(id, *orientation)?;
        }
        StepConfig::Remove { entity } => {
            let id = scene.require(entity)?;
            scene.grid.remove(id);
        }
        StepConfig::Draw { from } => {
            let summary = scene.grid.draw(from.x(), from.y());
            scene.draws.push(summary);
        }
    }
    Ok(())
}
