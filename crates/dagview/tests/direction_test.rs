use dagview::anchor::{anchor_points, drag_connector, fallback_path};
use dagview::direction::{Affine, apply_direction};
use dagview::layout::{Layout, LayoutEdge, LayoutNode};
use dagview::{Direction, Point};

fn sample_layout() -> Layout {
    Layout {
        nodes: vec![
            LayoutNode {
                id: "a".to_string(),
                rank: 0,
                order: 0,
                point: Point::new(1.0, 2.0),
            },
            LayoutNode {
                id: "b".to_string(),
                rank: 2,
                order: 0,
                point: Point::new(-3.0, 4.0),
            },
        ],
        edges: vec![LayoutEdge {
            source: "a".to_string(),
            target: "b".to_string(),
            points: vec![Point::new(1.0, 2.0), Point::new(5.0, 3.0), Point::new(-3.0, 4.0)],
        }],
        crossings: 0,
    }
}

#[test]
fn each_direction_maps_node_centres() {
    let cases = [
        (Direction::TB, Point::new(1.0, 2.0)),
        (Direction::BT, Point::new(1.0, -2.0)),
        (Direction::LR, Point::new(2.0, 1.0)),
        (Direction::RL, Point::new(-2.0, 1.0)),
    ];
    for (direction, expected) in cases {
        let layout = apply_direction(sample_layout(), direction);
        assert_eq!(layout.position("a"), Some(expected), "{direction}");
    }
}

#[test]
fn edge_points_follow_their_nodes() {
    for direction in Direction::ALL {
        let layout = apply_direction(sample_layout(), direction);
        let points = &layout.edges[0].points;
        assert_eq!(points.first().copied(), layout.position("a"));
        assert_eq!(points.last().copied(), layout.position("b"));
        assert_eq!(points[1], direction.transform().apply(Point::new(5.0, 3.0)));
    }
}

#[test]
fn every_transform_inverts_exactly() {
    let p = Point::new(7.5, -2.25);
    for direction in Direction::ALL {
        let m = direction.transform();
        let inv = m.inverse().unwrap();
        assert_eq!(inv.apply(m.apply(p)), p, "{direction}");
    }
    assert_eq!(Affine::new(1.0, 2.0, 2.0, 4.0).inverse(), None);
}

#[test]
fn horizontal_directions() {
    assert!(Direction::LR.is_horizontal());
    assert!(Direction::RL.is_horizontal());
    assert!(!Direction::TB.is_horizontal());
    assert!(!Direction::BT.is_horizontal());
}

#[test]
fn direction_parses_case_insensitively() {
    assert_eq!("lr".parse::<Direction>(), Ok(Direction::LR));
    assert_eq!(" RL ".parse::<Direction>(), Ok(Direction::RL));
    assert_eq!("td".parse::<Direction>(), Ok(Direction::TB));
    assert!("up".parse::<Direction>().is_err());
    assert_eq!(Direction::BT.to_string(), "BT");
}

#[test]
fn direction_serializes_as_its_short_name() {
    assert_eq!(serde_json::to_string(&Direction::RL).unwrap(), "\"RL\"");
    let d: Direction = serde_json::from_str("\"BT\"").unwrap();
    assert_eq!(d, Direction::BT);
}

#[test]
fn anchors_sit_on_the_facing_boundaries() {
    let s = Point::new(0.0, 0.0);
    let t = Point::new(0.0, 300.0);
    let cases = [
        (Direction::TB, Point::new(0.0, 50.0), Point::new(0.0, 250.0)),
        (Direction::BT, Point::new(0.0, -50.0), Point::new(0.0, 350.0)),
        (Direction::LR, Point::new(90.0, 0.0), Point::new(-90.0, 300.0)),
        (Direction::RL, Point::new(-90.0, 0.0), Point::new(90.0, 300.0)),
    ];
    for (direction, source, target) in cases {
        assert_eq!(anchor_points(s, t, direction, 180.0, 100.0), (source, target));
    }
}

#[test]
fn fallback_path_is_the_anchor_pair() {
    let s = Point::new(0.0, 0.0);
    let t = Point::new(300.0, 0.0);
    assert_eq!(
        fallback_path(s, t, Direction::LR, 180.0, 100.0),
        vec![Point::new(90.0, 0.0), Point::new(210.0, 0.0)]
    );
}

#[test]
fn drag_connector_bows_across_the_dominant_axis() {
    let s = Point::new(0.0, 0.0);
    assert_eq!(
        drag_connector(s, Point::new(100.0, 0.0)),
        [s, Point::new(50.0, 20.0), Point::new(100.0, 0.0)]
    );
    assert_eq!(
        drag_connector(s, Point::new(0.0, 100.0)),
        [s, Point::new(20.0, 50.0), Point::new(0.0, 100.0)]
    );
    assert_eq!(drag_connector(s, s), [s, s, s]);
}
