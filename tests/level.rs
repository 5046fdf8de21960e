use level_json::level::{BrickKind, Level, LoadError, Point};
use level_json::Kind;
use std::path::PathBuf;

const LEVEL: &str = r#"
// Two towers and a lonely idol
{
    "name": "Towers",
    "destroy": 2,
    "bricks": [
        ["n", 0, 0.5, 1, 1],
        ["d", 2, 0.5, 1, 1],
        ["c", 0, 1.5, 0.5, 1],
        ["s", 2, 1.5, 0.5, 1],
        ["g", 1, 3, 3, 0.25],   /* bridge */
        ["x", 1, 3.5, 0.5, 0.5]
    ],
    "idols": [
        [[1, 4.5], [-0.25, 0], [0.25, 0], [0, 0.5]]
    ]
}
"#;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "level_json_{}_{}.json",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn maps_a_whole_level() {
    let level = Level::parse(LEVEL).unwrap();

    assert_eq!(level.name, "Towers");
    assert_eq!(level.destroy, 2.0);

    let kinds: Vec<BrickKind> = level.bricks.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, BrickKind::ALL);

    let bridge = &level.bricks[4];
    assert_eq!(bridge.position, Point { x: 1.0, y: 3.0 });
    assert_eq!(bridge.width, 3.0);
    assert_eq!(bridge.height, 0.25);

    assert_eq!(level.idols.len(), 1);
    assert_eq!(level.idols[0].position, Point { x: 1.0, y: 4.5 });
    assert_eq!(
        level.idols[0].vertices,
        [
            Point { x: -0.25, y: 0.0 },
            Point { x: 0.25, y: 0.0 },
            Point { x: 0.0, y: 0.5 },
        ]
    );
}

#[test]
fn brick_codes() {
    for kind in BrickKind::ALL {
        assert_eq!(BrickKind::from_code(kind.code()), Some(kind));
        assert_eq!(kind.to_string(), kind.code());
    }

    assert_eq!(BrickKind::from_code("q"), None);
    assert_eq!(BrickKind::from_code("N"), None);
}

#[test]
fn unknown_brick_code_is_data_error() {
    let error = Level::parse(
        r#"{"name": "x", "destroy": 0, "idols": [],
            "bricks": [["q", 0, 0, 1, 1]]}"#,
    )
    .unwrap_err();

    assert_eq!(error.kind, Kind::Data);
    assert_eq!(error.message, "Bad brick type 'q' on line 2");
    assert_eq!(error.line, Some(2));
    assert_eq!(error.to_string(), "DataError: Bad brick type 'q' on line 2");
}

#[test]
fn missing_member_is_data_error() {
    let error = Level::parse("{\"name\": \"x\",\n\"bricks\": [], \"idols\": []}").unwrap_err();

    assert_eq!(error.kind, Kind::Data);
    assert_eq!(
        error.message,
        "Object on line 2 is missing required member 'destroy'"
    );
}

#[test]
fn short_brick_is_an_access_failure() {
    let error = Level::parse(
        r#"{"name": "x", "destroy": 0, "idols": [], "bricks": [["n", 0, 0, 1]]}"#,
    )
    .unwrap_err();

    assert_eq!(error.kind, Kind::Index);
}

#[test]
fn wrong_types_are_type_errors() {
    let error = Level::parse(
        r#"{"name": 5, "destroy": 0, "idols": [], "bricks": []}"#,
    )
    .unwrap_err();

    assert_eq!(error.kind, Kind::Type);
    assert_eq!(error.message, "Expected string, not number on line 1");

    let error = Level::parse(
        r#"{"name": "x", "destroy": 0, "idols": [[[0, "5"]]], "bricks": []}"#,
    )
    .unwrap_err();

    assert_eq!(error.kind, Kind::Type);
}

#[test]
fn idol_needs_a_position() {
    let error = Level::parse(
        r#"{"name": "x", "destroy": 0, "idols": [[]], "bricks": []}"#,
    )
    .unwrap_err();

    assert_eq!(error.kind, Kind::Index);
}

#[test]
fn loads_from_file() {
    let path = scratch_file("ok", LEVEL);

    let level = Level::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(level, Level::parse(LEVEL).unwrap());
}

#[test]
fn load_reports_file_and_line() {
    let path = scratch_file("broken", "{\n\"name\": \"x\",\n\"destroy\": 1 2}");

    let error = Level::load(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    match &error {
        LoadError::Json { source, .. } => assert_eq!(source.kind, Kind::Syntax),
        other => panic!("expected a json error, got {:?}", other),
    }

    assert_eq!(
        error.to_string(),
        format!(
            "Error in file {}: SyntaxError: Line 3: After value in object must be ',' or '}}', not number",
            path.display()
        )
    );
}

#[test]
fn load_missing_file() {
    let path = std::env::temp_dir().join("level_json_does_not_exist.json");

    let error = Level::load(&path).unwrap_err();

    assert!(matches!(error, LoadError::Io { .. }));
    assert!(error
        .to_string()
        .starts_with(&format!("Unable to open file {}", path.display())));
}
