use bevy::prelude::*;

/// Vertex color palette for the water surface.
///
/// Colors are linear RGB. Heights are normalized against the wave field's
/// amplitude envelope before any threshold is applied, so the palette does
/// not need retuning when the storm amplifies the waves.
#[derive(Resource, Clone, Debug)]
pub struct SeaPalette {
    pub deep: Vec3,
    pub shallow: Vec3,
    pub foam: Vec3,
    pub trough: Vec3,
    /// Normalized height above which crests blend toward foam. Lowered
    /// during storms so whitecaps appear earlier.
    pub foam_threshold: f32,
    /// Normalized height below which troughs darken.
    pub trough_threshold: f32,
}

impl Default for SeaPalette {
    fn default() -> Self {
        Self {
            deep: Vec3::new(0.0, 0.25, 0.63),
            shallow: Vec3::new(0.0, 0.63, 0.75),
            foam: Vec3::new(1.0, 1.0, 1.0),
            trough: Vec3::new(0.0, 0.12, 0.32),
            foam_threshold: 0.7,
            trough_threshold: 0.25,
        }
    }
}

impl SeaPalette {
    /// Vertex color for a wave height, given the field's current amplitude
    /// bound and storm intensity.
    pub fn color_for(&self, height: f32, bound: f32, storm: f32) -> [f32; 4] {
        let normalized = ((height + bound) / (2.0 * bound)).clamp(0.0, 1.0);
        let mut color = self.deep.lerp(self.shallow, normalized);

        let foam_threshold = self.foam_threshold - storm * 0.1;
        if normalized > foam_threshold {
            let crest = ((normalized - foam_threshold) / (1.0 - foam_threshold)).clamp(0.0, 1.0);
            let intensity = (crest * (0.6 + storm * 0.5)).min(1.0);
            color = color.lerp(self.foam, intensity);
        } else if normalized < self.trough_threshold {
            let depth = (self.trough_threshold - normalized) / self.trough_threshold;
            color = color.lerp(self.trough, depth * 0.5);
        }

        [color.x, color.y, color.z, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_stay_in_unit_range() {
        let palette = SeaPalette::default();
        for i in 0..100 {
            let height = -3.0 + i as f32 * 0.06;
            for &storm in &[0.0, 0.4, 0.8] {
                let color = palette.color_for(height, 3.0, storm);
                for channel in color {
                    assert!((0.0..=1.0).contains(&channel), "channel {channel} out of range");
                }
            }
        }
    }

    #[test]
    fn crests_foam_and_troughs_darken() {
        let palette = SeaPalette::default();
        let crest = palette.color_for(2.9, 3.0, 0.0);
        let mid = palette.color_for(0.0, 3.0, 0.0);
        let trough = palette.color_for(-2.9, 3.0, 0.0);
        // Foam is brighter than open water; troughs are darker.
        assert!(crest[0] > mid[0]);
        assert!(trough[2] < mid[2]);
    }

    #[test]
    fn storms_lower_the_foam_threshold() {
        let palette = SeaPalette::default();
        // A height just under the calm threshold foams only in a storm.
        let height = (palette.foam_threshold * 2.0 - 1.0) * 3.0 - 0.1;
        let calm = palette.color_for(height, 3.0, 0.0);
        let storm = palette.color_for(height, 3.0, 0.8);
        assert!(storm[0] > calm[0]);
    }
}
