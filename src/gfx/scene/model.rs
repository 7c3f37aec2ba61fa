//! Wavefront OBJ loading.

use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use super::object::Mesh;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to load OBJ file {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("OBJ file {0} contains no geometry")]
    Empty(String),
}

/// Meshes loaded from one OBJ file.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    /// Diffuse colour of the first material, when the MTL file provides one
    pub base_color: Option<[f32; 4]>,
}

impl Model {
    /// Loads and triangulates an OBJ file.
    ///
    /// Normals are taken from the file when every vertex has one and
    /// computed from the faces otherwise. A missing MTL file is not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| ModelError::Load {
            path: display.clone(),
            source,
        })?;

        let materials = materials.unwrap_or_else(|err| {
            warn!("no materials for {}: {}", display, err);
            Vec::new()
        });

        let meshes: Vec<Mesh> = models
            .iter()
            .filter(|m| !m.mesh.positions.is_empty())
            .map(|m| {
                let mesh = &m.mesh;
                Mesh::new(mesh.positions.clone(), mesh.normals.clone(), mesh.indices.clone())
            })
            .collect();

        if meshes.is_empty() {
            return Err(ModelError::Empty(display));
        }

        let base_color = models
            .first()
            .and_then(|m| m.mesh.material_id)
            .and_then(|id| materials.get(id))
            .and_then(|mtl| mtl.diffuse)
            .map(|[r, g, b]| [r, g, b, 1.0]);

        let name = models
            .first()
            .map(|m| m.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| display.clone())
            });

        debug!(
            "loaded {} ({} meshes, {} triangles)",
            name,
            meshes.len(),
            meshes.iter().map(Mesh::triangle_count).sum::<usize>()
        );

        Ok(Self {
            name,
            meshes,
            base_color,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("atelier_{}_{}.obj", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_quad_without_normals() {
        let path = write_temp(
            "quad",
            "o quad\nv 0 0 0\nv 1 0 0\nv 1 0 1\nv 0 0 1\nf 1 3 2\nf 1 4 3\n",
        );
        let model = Model::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(model.name, "quad");
        assert_eq!(model.meshes.len(), 1);
        assert_eq!(model.triangle_count(), 2);
        assert!(model.base_color.is_none());
        // Counter-clockwise seen from above: normals point up
        for v in &model.meshes[0].vertices {
            assert!((v.normal[1] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = Model::load("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, ModelError::Load { .. }));
        assert!(err.to_string().contains("/definitely/not/here.obj"));
    }
}
