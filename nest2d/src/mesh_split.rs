use std::collections::HashMap;

/// Triangle mesh with shared vertices
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedTriangleSet {
    pub vertices: Vec<[f32; 3]>,
    /// Vertex indices of every triangle
    pub indices: Vec<[u32; 3]>,
}

/// For every triangle, the triangle sharing each of its edges (edge `i` runs from vertex `i` to vertex `i + 1`).
pub fn create_neighbors_index(its: &IndexedTriangleSet) -> Vec<[Option<usize>; 3]> {
    let edge_key = |a: u32, b: u32| (a.min(b), a.max(b));

    let mut faces_per_edge: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (face_idx, face) in its.indices.iter().enumerate() {
        for i in 0..3 {
            faces_per_edge
                .entry(edge_key(face[i], face[(i + 1) % 3]))
                .or_default()
                .push(face_idx);
        }
    }

    its.indices
        .iter()
        .enumerate()
        .map(|(face_idx, face)| {
            std::array::from_fn(|i| {
                faces_per_edge[&edge_key(face[i], face[(i + 1) % 3])]
                    .iter()
                    .copied()
                    .find(|&f| f != face_idx)
            })
        })
        .collect()
}

/// Collects all triangles connected to the first unvisited one at or after `cursor`, marking them visited.
/// `cursor` is advanced past that triangle. Returns an empty list when all triangles were visited.
fn find_unvisited_neighbors(
    neighbors: &[[Option<usize>; 3]],
    visited: &mut [bool],
    cursor: &mut usize,
) -> Vec<usize> {
    let Some(first) = (*cursor..visited.len()).find(|&i| !visited[i]) else {
        *cursor = visited.len();
        return vec![];
    };
    *cursor = first + 1;
    visited[first] = true;
    let mut stack = vec![first];
    let mut component = vec![first];

    while let Some(face) = stack.pop() {
        for n in neighbors[face].iter().flatten().copied() {
            if n < visited.len() && !visited[n] {
                visited[n] = true;
                stack.push(n);
                component.push(n);
            }
        }
    }
    component
}

/// Splits a mesh into its connected components. Every part gets its own, compacted, vertex list.
pub fn split(its: &IndexedTriangleSet, neighbors: &[[Option<usize>; 3]]) -> Vec<IndexedTriangleSet> {
    let mut visited = vec![false; its.indices.len()];
    //(part, index within the part) of every vertex of the input
    let mut vertex_map: Vec<Option<(usize, u32)>> = vec![None; its.vertices.len()];
    let mut parts = vec![];
    let mut cursor = 0;

    loop {
        let faces = find_unvisited_neighbors(neighbors, &mut visited, &mut cursor);
        if faces.is_empty() {
            break;
        }
        let part_id = parts.len();
        let mut part = IndexedTriangleSet {
            vertices: Vec::with_capacity((faces.len() * 3).min(its.vertices.len())),
            indices: Vec::with_capacity(faces.len()),
        };
        for face_idx in faces {
            let face = its.indices[face_idx].map(|v| match vertex_map[v as usize] {
                Some((p, image)) if p == part_id => image,
                _ => {
                    let image = part.vertices.len() as u32;
                    vertex_map[v as usize] = Some((part_id, image));
                    part.vertices.push(its.vertices[v as usize]);
                    image
                }
            });
            part.indices.push(face);
        }
        parts.push(part);
    }
    parts
}

/// Whether the mesh consists of more than one connected component.
pub fn is_splittable(its: &IndexedTriangleSet, neighbors: &[[Option<usize>; 3]]) -> bool {
    let mut visited = vec![false; its.indices.len()];
    find_unvisited_neighbors(neighbors, &mut visited, &mut 0);
    visited.iter().any(|v| !v)
}
