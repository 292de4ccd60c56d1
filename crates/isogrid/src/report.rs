//! Text reports of a drawn scene.
//!
//! - [`ReportFormat::Table`]: attached entities in paint order (ascending
//!   depth), one per line
//! - [`ReportFormat::Grid`]: a cell map showing each root's depth, handy
//!   when debugging the resolver

use std::{cmp::Reverse, fmt, str::FromStr};

use crate::{grid::Grid, scene::Scene};

/// Output layout of a report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Table,
    Grid,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Grid => "grid",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "grid" => Ok(Self::Grid),
            _ => Err(format!("unknown report format `{s}`, expected table or grid")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders `scene` in the requested format.
pub fn render(scene: &Scene, format: ReportFormat) -> String {
    Report::new(scene, format).to_string()
}

/// A report of a scene, written through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    scene: &'a Scene,
    format: ReportFormat,
}

impl<'a> Report<'a> {
    pub fn new(scene: &'a Scene, format: ReportFormat) -> Self {
        Self { scene, format }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            ReportFormat::Table => write_table(f, self.scene),
            ReportFormat::Grid => write_grid(f, self.scene.grid()),
        }
    }
}

/// Entities sorted back to front.
///
/// Entities with equal depth keep raster order of their roots; entities
/// without a depth (never drawn) sort last.
fn write_table(out: &mut impl fmt::Write, scene: &Scene) -> fmt::Result {
    let grid = scene.grid();
    let mut rows: Vec<_> = grid
        .entities()
        .map(|(id, entity)| (grid.depth_of(id), id, entity))
        .collect();
    rows.sort_by_key(|(depth, _, entity)| (Reverse(depth.is_some()), *depth, entity.root()));

    writeln!(
        out,
        "{:>6}  {:<16} {:<12} {:<10} {:<5} {:<3} sprite",
        "depth", "entity", "kind", "root", "size", "dir"
    )?;
    for (depth, id, entity) in rows {
        let depth = depth.map_or_else(|| "-".to_string(), |d| d.to_string());
        let label = scene
            .label(id)
            .map_or_else(|| id.to_string(), str::to_string);
        let root = entity
            .root()
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        let sprite = entity.sprite().map_or("-", |s| s.image());
        writeln!(
            out,
            "{depth:>6}  {label:<16} {:<12} {root:<10} {:<5} {:<3} {sprite}",
            entity.kind_id().to_string(),
            entity.footprint().to_string(),
            entity.orientation().name(),
        )?;
    }
    Ok(())
}

/// One line per row. Root cells show their depth, other occupied cells `+`
/// and empty cells `.`.
fn write_grid(out: &mut impl fmt::Write, grid: &Grid) -> fmt::Result {
    let labels: Vec<String> = grid
        .cells()
        .iter()
        .map(|cell| match (cell.is_root(), cell.is_occupied(), cell.depth()) {
            (true, _, Some(depth)) => depth.to_string(),
            (true, _, None) => "?".to_string(),
            (false, true, _) => "+".to_string(),
            (false, false, _) => ".".to_string(),
        })
        .collect();
    let width = labels.iter().map(String::len).max().unwrap_or(1);

    for row in labels.chunks(grid.columns() as usize) {
        for (idx, label) in row.iter().enumerate() {
            if idx > 0 {
                out.write_char(' ')?;
            }
            write!(out, "{label:>width$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneBuilder, config::AppConfig};

    const SRC: &str = r#"
        [grid]
        columns = 4
        rows = 3

        [kinds.chair]
        size = [1, 1]
        sprites.sw = { image = "chair.png" }

        [kinds.bench]
        size = [2, 1]

        [[entities]]
        name = "bench"
        kind = "bench"
        at = [1, 1]

        [[entities]]
        name = "chair"
        kind = "chair"
        at = [0, 0]
    "#;

    fn scene() -> Scene {
        let builder = SceneBuilder::new(AppConfig::default());
        builder.build(&builder.parse(SRC).unwrap()).unwrap()
    }

    #[test]
    fn test_format_names() {
        assert_eq!("grid".parse::<ReportFormat>(), Ok(ReportFormat::Grid));
        assert_eq!(ReportFormat::Table.to_string(), "table");
        assert!("svg".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_table_lists_paint_order() {
        let table = render(&scene(), ReportFormat::Table);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("depth"));
        assert!(lines[1].contains("chair") && lines[1].contains("chair.png"));
        assert!(lines[2].contains("bench") && lines[2].contains("2x1"));
    }

    #[test]
    fn test_report_display_matches_render() {
        let scene = scene();
        let report = Report::new(&scene, ReportFormat::Table);
        assert_eq!(format!("{report}"), render(&scene, ReportFormat::Table));
    }

    #[test]
    fn test_grid_dump() {
        let dump = render(&scene(), ReportFormat::Grid);
        assert_eq!(dump, "1 . . .\n. 2 + .\n. . . .\n");
    }
}
