//! Integration tests for the SceneBuilder API

use isogrid::{
    GridError, IsogridError, SceneBuilder,
    config::{AppConfig, DepthConfig, RotationConfig},
    orientation::{Orientation, RotationOrder},
    report::ReportFormat,
};

const ROOM: &str = r#"
    [grid]
    columns = 10
    rows = 10

    [kinds.chair]
    size = [1, 1]

    [kinds.closet]
    size = [1, 2]

    [[entities]]
    name = "chair"
    kind = "chair"
    at = [2, 2]

    [[entities]]
    name = "closet"
    kind = "closet"
    at = [2, 3]
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = SceneBuilder::default();
}

#[test]
fn test_parse_and_build_room() {
    let builder = SceneBuilder::default();
    let config = builder.parse(ROOM).expect("Failed to parse scene");
    let scene = builder.build(&config).expect("Failed to build scene");

    let grid = scene.grid();
    let chair = scene.entity_id("chair").unwrap();
    let closet = scene.entity_id("closet").unwrap();
    assert_eq!(grid.depth_of(chair).map(|d| d.value()), Some(5));
    assert_eq!(grid.depth_of(closet).map(|d| d.value()), Some(6));
}

#[test]
fn test_render_table() {
    let builder = SceneBuilder::default();
    let scene = builder.build(&builder.parse(ROOM).unwrap()).unwrap();
    let report = builder.render(&scene, ReportFormat::Table);

    let chair_line = report.lines().position(|l| l.contains("chair ")).unwrap();
    let closet_line = report.lines().position(|l| l.contains("closet")).unwrap();
    assert!(chair_line < closet_line, "chair is painted first:\n{report}");
}

#[test]
fn test_parse_error_keeps_source() {
    let builder = SceneBuilder::default();
    let source = "[grid]\ncolumns = \"ten\"\nrows = 2\n";

    match builder.parse(source) {
        Err(IsogridError::Parse { src, .. }) => assert_eq!(src, source),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_kind_is_grid_error() {
    let builder = SceneBuilder::default();
    let source = r#"
        [grid]
        columns = 3
        rows = 3

        [[entities]]
        kind = "sofa"
        at = [0, 0]
    "#;
    let err = builder.build(&builder.parse(source).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        IsogridError::Grid(GridError::UnknownEntityKind(ref kind)) if kind == "sofa"
    ));
}

#[test]
fn test_builder_with_config() {
    let order = RotationOrder::new(vec![Orientation::SouthWest, Orientation::SouthEast]).unwrap();
    let config = AppConfig::new(DepthConfig::new(3), RotationConfig::new(order));
    let builder = SceneBuilder::new(config);

    let source = format!(
        "{ROOM}\n{}",
        r#"
        [[steps]]
        op = "rotate"
        entity = "closet"
        "#
    );
    let scene = builder.build(&builder.parse(&source).unwrap()).unwrap();
    let grid = scene.grid();
    let chair = scene.entity_id("chair").unwrap();
    let closet = scene.entity_id("closet").unwrap();

    assert_eq!(grid.step(), 3);
    assert_eq!(
        grid.entity(closet).unwrap().orientation(),
        Orientation::SouthEast
    );
    assert_eq!(grid.depth_of(chair).map(|d| d.value()), Some(7));
}
