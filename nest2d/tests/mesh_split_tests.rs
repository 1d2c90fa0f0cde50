#[cfg(test)]
mod tests {
    use test_case::test_case;

    use nest2d::mesh_split::{IndexedTriangleSet, create_neighbors_index, is_splittable, split};

    const CUBE_FACES: [[u32; 3]; 12] = [
        [0, 2, 1], [0, 3, 2], [4, 5, 6], [4, 6, 7],
        [0, 1, 5], [0, 5, 4], [1, 2, 6], [1, 6, 5],
        [2, 3, 7], [2, 7, 6], [3, 0, 4], [3, 4, 7],
    ];

    /// `n` unit cubes side by side along the x-axis, separated by a gap
    fn cubes(n: usize) -> IndexedTriangleSet {
        let mut its = IndexedTriangleSet::default();
        for c in 0..n {
            let x = 2.0 * c as f32;
            let base = its.vertices.len() as u32;
            its.vertices.extend([
                [x, 0.0, 0.0],
                [x + 1.0, 0.0, 0.0],
                [x + 1.0, 1.0, 0.0],
                [x, 1.0, 0.0],
                [x, 0.0, 1.0],
                [x + 1.0, 0.0, 1.0],
                [x + 1.0, 1.0, 1.0],
                [x, 1.0, 1.0],
            ]);
            its.indices.extend(CUBE_FACES.iter().map(|f| f.map(|v| v + base)));
        }
        its
    }

    #[test_case(1; "single")]
    #[test_case(2; "pair")]
    #[test_case(5; "five")]
    fn cubes_split_into_parts(n: usize) {
        let its = cubes(n);
        let neighbors = create_neighbors_index(&its);
        //closed meshes have a neighbour across every edge
        assert!(neighbors.iter().flatten().all(|n| n.is_some()));
        assert_eq!(is_splittable(&its, &neighbors), n > 1);

        let parts = split(&its, &neighbors);
        assert_eq!(parts.len(), n);
        for part in &parts {
            assert_eq!(part.indices.len(), 12);
            assert_eq!(part.vertices.len(), 8);
            assert!(part.indices.iter().flatten().all(|&v| (v as usize) < part.vertices.len()));
        }
        assert_eq!(parts.iter().map(|p| p.indices.len()).sum::<usize>(), its.indices.len());
    }

    #[test]
    fn shared_vertex_does_not_connect() {
        //two triangles meeting in a single vertex
        let its = IndexedTriangleSet {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [-1.0, 0.0, 0.0],
                [0.0, -1.0, 0.0],
            ],
            indices: vec![[0, 1, 2], [0, 3, 4]],
        };
        let neighbors = create_neighbors_index(&its);
        assert_eq!(neighbors, vec![[None; 3], [None; 3]]);
        assert!(is_splittable(&its, &neighbors));
        let parts = split(&its, &neighbors);
        assert_eq!(parts.len(), 2);
        //the shared vertex is copied into both parts
        assert!(parts.iter().all(|p| p.vertices.contains(&[0.0, 0.0, 0.0])));
    }
}
