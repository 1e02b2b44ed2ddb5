use bevy::prelude::*;

use crate::features::ocean::palette::SeaPalette;
use crate::features::ocean::wave_field::WaveField;
use crate::utils::mesh::grid_plane;

/// Side length of the water plane in world units.
pub const OCEAN_SIZE: f32 = 400.0;

/// Grid resolution. The per-frame rebuild is O(vertex count), so this trades
/// directly against the frame budget.
pub const OCEAN_SEGMENTS: u32 = 120;

/// The deformable water surface. Rest (x, z) positions are fixed at
/// construction; only heights and colors are rewritten each frame.
#[derive(Component)]
pub struct SurfaceGrid {
    rest: Vec<Vec2>,
    mesh: Handle<Mesh>,
}

impl SurfaceGrid {
    pub fn rest_vertices(&self) -> &[Vec2] {
        &self.rest
    }

    /// Evaluates the wave field at every rest vertex, producing the new
    /// position and color buffers. Pure with respect to the mesh, which
    /// keeps the per-frame deformation unit-testable.
    pub fn sample(
        &self,
        wave: &WaveField,
        palette: &SeaPalette,
        time: f32,
    ) -> (Vec<[f32; 3]>, Vec<[f32; 4]>) {
        let bound = wave.max_height_bound();
        let storm = wave.weather.storm_intensity;
        let mut positions = Vec::with_capacity(self.rest.len());
        let mut colors = Vec::with_capacity(self.rest.len());
        for rest in &self.rest {
            let height = wave.height_at(rest.x, rest.y, time);
            positions.push([rest.x, height, rest.y]);
            colors.push(palette.color_for(height, bound, storm));
        }
        (positions, colors)
    }
}

/// Spawns the ocean plane once at startup.
pub fn spawn_surface(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (mesh, rest) = grid_plane(OCEAN_SIZE, OCEAN_SEGMENTS);
    let handle = meshes.add(mesh);
    commands.spawn((
        Name::new("OceanSurface"),
        Mesh3d(handle.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.3,
            metallic: 0.1,
            ..default()
        })),
        SurfaceGrid { rest, mesh: handle },
    ));
    info!(
        "Ocean surface spawned: {}x{} segments over {}x{} units",
        OCEAN_SEGMENTS, OCEAN_SEGMENTS, OCEAN_SIZE, OCEAN_SIZE
    );
}

/// Rewrites vertex heights and colors from the wave field, then recomputes
/// smooth normals. Topology is never touched.
pub fn rebuild_surface(
    time: Res<Time>,
    wave: Option<Res<WaveField>>,
    palette: Res<SeaPalette>,
    mut meshes: ResMut<Assets<Mesh>>,
    grids: Query<&SurfaceGrid>,
) {
    let Some(wave) = wave else {
        return;
    };
    let elapsed = time.elapsed_secs();
    for grid in &grids {
        let Some(mesh) = meshes.get_mut(&grid.mesh) else {
            continue;
        };
        let (positions, colors) = grid.sample(&wave, &palette, elapsed);
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        mesh.compute_smooth_normals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_grid() -> SurfaceGrid {
        let (mesh_data, rest) = grid_plane(40.0, 8);
        // Tests never touch the asset store; a default handle is enough.
        let _ = mesh_data;
        SurfaceGrid {
            rest,
            mesh: Handle::default(),
        }
    }

    #[test]
    fn sample_preserves_vertex_count_and_rest_positions() {
        let grid = test_grid();
        let wave = WaveField::generate(21);
        let palette = SeaPalette::default();
        let (positions, colors) = grid.sample(&wave, &palette, 2.5);

        assert_eq!(positions.len(), grid.rest_vertices().len());
        assert_eq!(colors.len(), positions.len());
        for (position, rest) in positions.iter().zip(grid.rest_vertices()) {
            assert_eq!(position[0], rest.x);
            assert_eq!(position[2], rest.y);
        }
    }

    #[test]
    fn sampled_heights_match_the_wave_field() {
        // The mesh and the boat must read the same surface. The mesh path
        // goes through sample(); assert it agrees with height_at exactly.
        let grid = test_grid();
        let wave = WaveField::generate(8);
        let palette = SeaPalette::default();
        let (positions, _) = grid.sample(&wave, &palette, 7.75);
        for (position, rest) in positions.iter().zip(grid.rest_vertices()) {
            let direct = wave.height_at(rest.x, rest.y, 7.75);
            assert_eq!(position[1], direct);
        }
    }

    #[test]
    fn sampled_heights_stay_within_the_envelope() {
        let grid = test_grid();
        let wave = WaveField::generate(13);
        let palette = SeaPalette::default();
        let bound = wave.max_height_bound();
        let (positions, _) = grid.sample(&wave, &palette, 31.0);
        for position in &positions {
            assert!(position[1].abs() <= bound);
        }
    }
}
