use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::garment::{Garment, GarmentMesh, Material};

/// Loads a glTF file as a garment: one mesh per primitive, positions in world space
pub fn load_garment(path: impl AsRef<Path>) -> Result<Garment> {
    let path = path.as_ref();
    log::info!("Loading glTF garment: {:?}", path);

    let (gltf, buffers, images) = gltf::import(path)
        .with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    log::debug!(
        "glTF loaded: {} scenes, {} nodes, {} meshes, {} materials, {} images",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count(),
        gltf.materials().count(),
        images.len()
    );

    let mut meshes = Vec::new();

    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut meshes)?;
        }
    }

    if meshes.is_empty() {
        log::warn!("No geometry found in glTF file {:?}", path);
    }

    let garment = Garment::new(meshes);
    log::info!(
        "Extracted {} meshes ({} vertices) from glTF",
        garment.meshes.len(),
        garment.vertex_count()
    );
    Ok(garment)
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    meshes: &mut Vec<GarmentMesh>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, meshes)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, meshes)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    meshes: &mut Vec<GarmentMesh>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .with_context(|| format!("Mesh {:?} primitive has no positions", mesh.name()))?
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        if positions.is_empty() {
            continue;
        }

        meshes.push(GarmentMesh::new(
            mesh.name().map(str::to_string),
            positions,
            read_material(&primitive.material()),
        ));
    }

    Ok(())
}

fn read_material(material: &gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();

    Material {
        name: material.name().map(str::to_string),
        color: [r, g, b],
        map: None,
        base_texture: pbr.base_color_texture().map(|info| info.texture().index()),
        metalness: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        needs_update: false,
    }
}
