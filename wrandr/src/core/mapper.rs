/// World pixels per map unit used when none is configured.
pub const DEFAULT_DENSITY: i32 = 7;

/// Converts between world (compositor pixel) coordinates and the coarser
/// map coordinates used to draw outputs on screen.
///
/// The conversion is lossy: `world_to_map` truncates toward zero, so
/// `map_to_world(world_to_map(v))` only returns `v` when `v` is a multiple
/// of the density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMapper {
    density: i32,
}

impl CoordinateMapper {
    pub fn new(density: i32) -> Self {
        assert!(density >= 1, "density must be at least 1");
        Self { density }
    }

    pub fn world_to_map(self, value: i32) -> i32 {
        value / self.density
    }

    pub fn map_to_world(self, value: f64) -> i32 {
        (value * self.density as f64).round() as i32
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(DEFAULT_DENSITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_to_map_truncates() {
        let mapper = CoordinateMapper::new(7);
        assert_eq!(mapper.world_to_map(0), 0);
        assert_eq!(mapper.world_to_map(6), 0);
        assert_eq!(mapper.world_to_map(7), 1);
        assert_eq!(mapper.world_to_map(1920), 274);
        assert_eq!(mapper.world_to_map(1080), 154);
    }

    #[test]
    fn test_world_to_map_truncates_toward_zero_for_negatives() {
        let mapper = CoordinateMapper::new(7);
        assert_eq!(mapper.world_to_map(-6), 0);
        assert_eq!(mapper.world_to_map(-10), -1);
        assert_eq!(mapper.world_to_map(-14), -2);
    }

    #[test]
    fn test_map_to_world_rounds() {
        let mapper = CoordinateMapper::new(7);
        assert_eq!(mapper.map_to_world(274.0), 1918);
        assert_eq!(mapper.map_to_world(2.5), 18);
        assert_eq!(mapper.map_to_world(2.4), 17);
        assert_eq!(mapper.map_to_world(-1.0), -7);
    }

    #[test]
    fn test_world_round_trip_is_lossy() {
        let mapper = CoordinateMapper::new(7);
        // 1920 is not a multiple of 7
        assert_eq!(mapper.map_to_world(mapper.world_to_map(1920) as f64), 1918);
        // Multiples of the density survive
        assert_eq!(mapper.map_to_world(mapper.world_to_map(1918) as f64), 1918);
        assert_eq!(mapper.map_to_world(mapper.world_to_map(0) as f64), 0);
    }

    #[test]
    fn test_map_round_trip_exact_for_whole_map_units() {
        for density in [7, 10] {
            let mapper = CoordinateMapper::new(density);
            for v in [-300, -1, 0, 1, 137, 274, 1000] {
                assert_eq!(mapper.world_to_map(mapper.map_to_world(v as f64)), v);
            }
        }
    }

    #[test]
    fn test_map_round_trip_drops_fractional_map_units() {
        let mapper = CoordinateMapper::new(10);
        // 2.54 * 10 rounds to 25, which maps back to 2
        assert_eq!(mapper.world_to_map(mapper.map_to_world(2.54)), 2);
    }

    #[test]
    fn test_density_ten() {
        let mapper = CoordinateMapper::new(10);
        assert_eq!(mapper.world_to_map(1920), 192);
        assert_eq!(mapper.map_to_world(192.0), 1920);
    }

    #[test]
    fn test_default_density() {
        let mapper = CoordinateMapper::default();
        assert_eq!(mapper, CoordinateMapper::new(DEFAULT_DENSITY));
        assert_eq!(mapper.world_to_map(DEFAULT_DENSITY), 1);
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_zero_density() {
        CoordinateMapper::new(0);
    }
}
