use level_json::{from_value, parse, Kind};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
enum Code {
    #[serde(rename = "n")]
    Normal,
    #[serde(rename = "x")]
    Tnt,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Brick(Code, f64, f64, f64, f64);

#[derive(Debug, Deserialize)]
struct Level<'a> {
    name: &'a str,
    destroy: u32,
    bricks: Vec<Brick>,
    idols: Vec<Vec<(f64, f64)>>,
    #[serde(default)]
    hint: Option<String>,
    hard: bool,
}

#[test]
fn deserializes_into_a_struct() {
    let value = parse(
        r#"{
            // comments do not matter
            "name": "lvl1",
            "destroy": 2,
            "bricks": [["n", 0, 0.5, 1, 1], ["x", 2, 0, 1, 1]],
            "idols": [[[0, 5], [-0.5, 0]]],
            "hard": null
        }"#,
    )
    .unwrap();

    let level: Level = from_value(&value).unwrap();

    assert_eq!(level.name, "lvl1");
    assert_eq!(level.destroy, 2);
    assert_eq!(
        level.bricks,
        [
            Brick(Code::Normal, 0.0, 0.5, 1.0, 1.0),
            Brick(Code::Tnt, 2.0, 0.0, 1.0, 1.0),
        ]
    );
    assert_eq!(level.idols, [vec![(0.0, 5.0), (-0.5, 0.0)]]);
    assert_eq!(level.hint, None);
    assert!(!level.hard);
}

#[test]
fn enum_with_payload() {
    #[derive(Debug, Deserialize, PartialEq)]
    enum Shape {
        Point,
        Circle(f64),
        Rect { w: f64, h: f64 },
    }

    let value = parse(r#"["Point", {"Circle": 2}, {"Rect": {"w": 1, "h": 3}}]"#).unwrap();

    let shapes: Vec<Shape> = from_value(&value).unwrap();

    assert_eq!(
        shapes,
        [Shape::Point, Shape::Circle(2.0), Shape::Rect { w: 1.0, h: 3.0 }]
    );
}

#[test]
fn wrong_type_names_the_line_of_the_value() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Counter {
        count: f64,
    }

    let value = parse("{\n\"count\": \"x\"\n}").unwrap();

    let error = from_value::<Counter>(&value).unwrap_err();

    assert_eq!(error.kind, Kind::Data);
    assert_eq!(error.line, Some(2));
    assert!(error.message.starts_with("invalid type: string \"x\""));
    assert!(error.message.ends_with(" on line 2"));
}

#[test]
fn missing_field_names_the_line_of_the_object() {
    let value = parse("\n\n{\"name\": \"a\"}").unwrap();

    let error = from_value::<Level>(&value).unwrap_err();

    assert_eq!(error.kind, Kind::Data);
    assert_eq!(error.line, Some(3));
    assert_eq!(error.message, "missing field `destroy` on line 3");
}

#[test]
fn integers_need_whole_numbers() {
    assert_eq!(from_value::<u32>(&parse("7").unwrap()).unwrap(), 7);
    assert_eq!(from_value::<i8>(&parse("-7").unwrap()).unwrap(), -7);

    assert_eq!(from_value::<u32>(&parse("7.5").unwrap()).unwrap_err().kind, Kind::Data);
    assert_eq!(from_value::<u32>(&parse("-1").unwrap()).unwrap_err().kind, Kind::Data);
    assert_eq!(from_value::<u8>(&parse("300").unwrap()).unwrap_err().kind, Kind::Data);
}

#[test]
fn unknown_variant() {
    let error = from_value::<Code>(&parse("\"q\"").unwrap()).unwrap_err();

    assert_eq!(error.kind, Kind::Data);
    assert!(error.message.starts_with("unknown variant `q`"));
}
