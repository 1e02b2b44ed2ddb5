use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

/// Builds a flat XZ grid mesh centered on the origin, with vertex colors and
/// CPU-side access retained so the ocean can rewrite it every frame.
///
/// Returns the mesh together with each vertex's rest (x, z), in the same
/// order as the mesh's position attribute.
pub fn grid_plane(size: f32, segments: u32) -> (Mesh, Vec<Vec2>) {
    let verts_per_side = segments + 1;
    let step = size / segments as f32;
    let half = size / 2.0;
    let vertex_count = (verts_per_side * verts_per_side) as usize;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut colors = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut rest = Vec::with_capacity(vertex_count);

    for zi in 0..verts_per_side {
        for xi in 0..verts_per_side {
            let x = xi as f32 * step - half;
            let z = zi as f32 * step - half;
            positions.push([x, 0.0, z]);
            normals.push([0.0, 1.0, 0.0]);
            colors.push([1.0, 1.0, 1.0, 1.0]);
            uvs.push([xi as f32 / segments as f32, zi as f32 / segments as f32]);
            rest.push(Vec2::new(x, z));
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for zi in 0..segments {
        for xi in 0..segments {
            let a = zi * verts_per_side + xi;
            let b = a + 1;
            let c = a + verts_per_side;
            let d = c + 1;
            // Counter-clockwise seen from +Y.
            indices.extend_from_slice(&[a, d, b, a, c, d]);
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));

    (mesh, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_expected_vertex_and_index_counts() {
        let (mesh, rest) = grid_plane(40.0, 8);
        assert_eq!(rest.len(), 81);
        assert_eq!(mesh.count_vertices(), 81);
        let indices = mesh.indices().expect("grid should be indexed");
        assert_eq!(indices.len(), 8 * 8 * 6);
    }

    #[test]
    fn rest_positions_match_the_mesh_and_span_the_size() {
        let (_, rest) = grid_plane(100.0, 10);
        let min_x = rest.iter().map(|v| v.x).fold(f32::INFINITY, f32::min);
        let max_x = rest.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max);
        assert!((min_x + 50.0).abs() < 1e-4);
        assert!((max_x - 50.0).abs() < 1e-4);
    }
}
