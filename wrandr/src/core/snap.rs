use super::{CoordinateMapper, Output};

/// Map units within which a dragged output is pulled onto an anchor.
pub const DEFAULT_SNAP_TOLERANCE: i32 = 10;

/// Start and size of an output along one axis, in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub start: i32,
    pub size: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Position along this axis and apparent size (mode size times scale,
    /// truncated to whole pixels).
    pub fn extent(self, output: &Output) -> Extent {
        let (width, height) = output.apparent_size();
        match self {
            Axis::X => Extent {
                start: output.rect.x,
                size: width as i32,
            },
            Axis::Y => Extent {
                start: output.rect.y,
                size: height as i32,
            },
        }
    }
}

/// A position a dragged output can snap to. `map` is what the snap distance
/// is measured against; `world` is the exact edge it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub map: i32,
    pub world: i32,
}

/// Sticky alignment of a dragged output against its neighbours' edges.
///
/// Each axis is snapped on its own; there is no combined 2D distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapEngine {
    mapper: CoordinateMapper,
    tolerance: i32,
}

impl SnapEngine {
    pub fn new(mapper: CoordinateMapper, tolerance: i32) -> Self {
        Self { mapper, tolerance }
    }

    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper
    }

    /// Four anchors per neighbour, in output order: its start edge, its end
    /// edge, and both shifted back by the moving output's size so the
    /// trailing edge can line up too.
    pub fn anchor_points<F>(&self, outputs: &[Output], moving: &Output, extent: F) -> Vec<Anchor>
    where
        F: Fn(&Output) -> Extent,
    {
        let moving_size = extent(moving).size;

        outputs
            .iter()
            .filter(|o| o.name != moving.name)
            .flat_map(|o| {
                let Extent { start, size } = extent(o);
                let end = start.saturating_add(size);
                [
                    start,
                    end,
                    start.saturating_sub(moving_size),
                    end.saturating_sub(moving_size),
                ]
            })
            .map(|world| Anchor {
                map: self.mapper.world_to_map(world),
                world,
            })
            .collect()
    }

    /// Closest anchor strictly within tolerance of `pos`. Ties go to the
    /// earliest anchor.
    pub fn nearest_anchor(&self, pos: i32, anchors: &[Anchor]) -> Option<Anchor> {
        let distance = |a: &Anchor| (i64::from(a.map) - i64::from(pos)).abs();
        anchors
            .iter()
            .copied()
            .filter(|a| distance(a) < i64::from(self.tolerance))
            .min_by_key(distance)
    }

    pub fn snap_anchor<F>(
        &self,
        pos: i32,
        outputs: &[Output],
        moving: &Output,
        extent: F,
    ) -> Option<Anchor>
    where
        F: Fn(&Output) -> Extent,
    {
        let anchors = self.anchor_points(outputs, moving, extent);
        let anchor = self.nearest_anchor(pos, &anchors);
        if let Some(anchor) = anchor {
            tracing::trace!(
                "Snapped {} from {} to {} (world {})",
                moving.name,
                pos,
                anchor.map,
                anchor.world
            );
        }
        anchor
    }

    /// Snapped map position along one axis, or `pos` unchanged when no
    /// anchor is close enough.
    pub fn snap<F>(&self, pos: i32, outputs: &[Output], moving: &Output, extent: F) -> i32
    where
        F: Fn(&Output) -> Extent,
    {
        self.snap_anchor(pos, outputs, moving, extent)
            .map_or(pos, |a| a.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mode, Rect};

    fn output(name: &str, x: i32, y: i32, width: i32, height: i32) -> Output {
        let mode = Mode::new(width, height, 60000);
        Output {
            name: name.to_string(),
            active: true,
            modes: vec![mode],
            current_mode: mode,
            rect: Rect {
                x,
                y,
                width,
                height,
            },
            primary: false,
            scale: 1.0,
            make: String::new(),
            model: String::new(),
            serial: String::new(),
        }
    }

    fn engine() -> SnapEngine {
        SnapEngine::new(CoordinateMapper::new(7), DEFAULT_SNAP_TOLERANCE)
    }

    fn side_by_side() -> Vec<Output> {
        vec![
            output("A", 0, 0, 1920, 1080),
            output("B", 1920, 0, 1920, 1080),
            output("C", 5000, 3000, 1280, 1024),
        ]
    }

    fn snap_x(engine: &SnapEngine, outputs: &[Output], moving: &Output, pos: i32) -> i32 {
        engine.snap(pos, outputs, moving, |o| Axis::X.extent(o))
    }

    #[test]
    fn test_extent_uses_apparent_size() {
        let mut o = output("A", 100, 200, 1920, 1080);
        o.scale = 1.5;
        assert_eq!(Axis::X.extent(&o), Extent { start: 100, size: 2880 });
        assert_eq!(Axis::Y.extent(&o), Extent { start: 200, size: 1620 });
    }

    #[test]
    fn test_extent_truncates_fractional_size() {
        let mut o = output("A", 0, 0, 1366, 768);
        o.scale = 1.25;
        // 1366 * 1.25 = 1707.5
        assert_eq!(Axis::X.extent(&o).size, 1707);
        assert_eq!(Axis::Y.extent(&o).size, 960);
    }

    #[test]
    fn test_anchor_points_per_neighbour() {
        let outputs = side_by_side();
        let moving = &outputs[2];
        let anchors = engine().anchor_points(&outputs, moving, |o| Axis::X.extent(o));

        let worlds: Vec<i32> = anchors.iter().map(|a| a.world).collect();
        assert_eq!(
            worlds,
            vec![0, 1920, -1280, 640, 1920, 3840, 640, 2560]
        );
        let maps: Vec<i32> = anchors.iter().map(|a| a.map).collect();
        assert_eq!(maps, vec![0, 274, -182, 91, 274, 548, 91, 365]);
    }

    #[test]
    fn test_anchor_points_skip_moving_output() {
        let outputs = vec![output("A", 0, 0, 1920, 1080)];
        let anchors = engine().anchor_points(&outputs, &outputs[0], |o| Axis::X.extent(o));
        assert!(anchors.is_empty());
    }

    #[test]
    fn test_anchor_points_include_inactive_neighbours() {
        let mut outputs = side_by_side();
        outputs[0].active = false;
        let anchors = engine().anchor_points(&outputs, &outputs[2], |o| Axis::X.extent(o));
        assert_eq!(anchors.len(), 8);
    }

    #[test]
    fn test_lone_output_never_snaps() {
        let outputs = vec![output("A", 0, 0, 1920, 1080)];
        assert_eq!(snap_x(&engine(), &outputs, &outputs[0], 3), 3);
        assert_eq!(snap_x(&engine(), &outputs, &outputs[0], 0), 0);
    }

    #[test]
    fn test_snap_to_shared_edge() {
        let outputs = side_by_side();
        let moving = &outputs[2];
        let engine = engine();

        for pos in 265..=283 {
            assert_eq!(snap_x(&engine, &outputs, moving, pos), 274, "pos {}", pos);
        }
    }

    #[test]
    fn test_snap_to_far_edge() {
        let outputs = side_by_side();
        let moving = &outputs[2];
        let engine = engine();

        assert_eq!(snap_x(&engine, &outputs, moving, 557), 548);
        assert_eq!(snap_x(&engine, &outputs, moving, 540), 548);
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        let outputs = side_by_side();
        let moving = &outputs[2];
        let engine = engine();

        // Exactly 10 units away from 548 and far from every other anchor
        assert_eq!(snap_x(&engine, &outputs, moving, 558), 558);
        assert_eq!(snap_x(&engine, &outputs, moving, 559), 559);
        assert_eq!(snap_x(&engine, &outputs, moving, 600), 600);
    }

    #[test]
    fn test_trailing_edge_alignment() {
        let outputs = side_by_side();
        let moving = &outputs[2];

        // Right edge of the 1280 wide output flush with B's right edge
        assert_eq!(snap_x(&engine(), &outputs, moving, 361), 365);
    }

    #[test]
    fn test_picks_closest_anchor() {
        let outputs = side_by_side();
        let moving = &outputs[2];
        let engine = engine();

        // Y anchors from A and B: 0, 154, -146, 8
        assert_eq!(engine.snap(5, &outputs, moving, |o| Axis::Y.extent(o)), 8);
        assert_eq!(engine.snap(3, &outputs, moving, |o| Axis::Y.extent(o)), 0);
    }

    #[test]
    fn test_nearest_anchor_tie_goes_to_first() {
        let engine = engine();
        let low = Anchor { map: 10, world: 70 };
        let high = Anchor { map: 14, world: 98 };

        assert_eq!(engine.nearest_anchor(12, &[low, high]), Some(low));
        assert_eq!(engine.nearest_anchor(12, &[high, low]), Some(high));
        // Same input, same answer
        for _ in 0..10 {
            assert_eq!(engine.nearest_anchor(12, &[low, high]), Some(low));
        }
    }

    #[test]
    fn test_duplicate_anchors_tie() {
        let engine = engine();
        let a = Anchor { map: 274, world: 1920 };
        assert_eq!(engine.nearest_anchor(270, &[a, a, a]), Some(a));
    }

    #[test]
    fn test_nearest_anchor_none_in_range() {
        let engine = engine();
        let anchors = [Anchor { map: 0, world: 0 }, Anchor { map: 100, world: 700 }];
        assert_eq!(engine.nearest_anchor(50, &anchors), None);
        assert_eq!(engine.nearest_anchor(50, &[]), None);
    }

    #[test]
    fn test_axes_snap_independently() {
        let outputs = side_by_side();
        let moving = &outputs[2];
        let engine = engine();

        // x is near an anchor, y is not
        assert_eq!(snap_x(&engine, &outputs, moving, 276), 274);
        assert_eq!(engine.snap(400, &outputs, moving, |o| Axis::Y.extent(o)), 400);
    }

    #[test]
    fn test_scaled_moving_output() {
        let mut outputs = side_by_side();
        outputs[2].scale = 2.0;
        let anchors = engine().anchor_points(&outputs, &outputs[2], |o| Axis::X.extent(o));
        // 1920 - 2560
        assert_eq!(anchors[3].world, -640);
        assert_eq!(anchors[3].map, -91);
    }

    #[test]
    fn test_custom_tolerance() {
        let outputs = side_by_side();
        let moving = &outputs[2];
        let engine = SnapEngine::new(CoordinateMapper::new(7), 3);

        assert_eq!(snap_x(&engine, &outputs, moving, 276), 274);
        assert_eq!(snap_x(&engine, &outputs, moving, 278), 278);
    }

    #[test]
    fn test_anchors_saturate_at_coordinate_limits() {
        let outputs = vec![
            output("A", i32::MAX - 100, 0, 1920, 1080),
            output("B", 0, 0, 1920, 1080),
        ];
        let engine = engine();

        let anchors = engine.anchor_points(&outputs, &outputs[1], |o| Axis::X.extent(o));
        assert_eq!(anchors[0].world, i32::MAX - 100);
        assert_eq!(anchors[1].world, i32::MAX);
        assert_eq!(anchors[2].world, i32::MAX - 2020);
        assert_eq!(anchors[3].world, i32::MAX - 1920);

        assert_eq!(snap_x(&engine, &outputs, &outputs[1], 0), 0);
        assert_eq!(snap_x(&engine, &outputs, &outputs[1], i32::MIN), i32::MIN);
    }
}
