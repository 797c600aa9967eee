//! Entry point for the meshview demos.
//! Loads the assets of one demo and reports what goes to the GPU.

mod config;

use std::path::Path;

use anyhow::{Context, Result};
use asset::{
    Material, TextureData, VertexBuffer, VertexLayout, load_mtl_from_path, load_obj_from_path,
    primitives,
};

use config::{Config, Demo};

fn load_mesh(path: &Path, layout: VertexLayout) -> Result<VertexBuffer> {
    load_obj_from_path(path, layout)
        .with_context(|| format!("Failed to load mesh {}", path.display()))
}

fn load_material(path: &Path) -> Result<Material> {
    load_mtl_from_path(path)
        .with_context(|| format!("Failed to load material {}", path.display()))
}

fn load_diffuse_texture(cfg: &Config, material: &Material) -> Result<TextureData> {
    let base_dir = cfg.mtl.parent().unwrap_or(Path::new(""));
    let path = cfg
        .texture
        .clone()
        .or_else(|| material.diffuse_map_path(base_dir));

    match path {
        Some(path) => TextureData::load(&path)
            .with_context(|| format!("Failed to load diffuse texture {}", path.display())),
        None => {
            log::warn!(
                "Material '{}' has no map_Kd, using a checkerboard",
                material.name
            );
            Ok(TextureData::checkerboard(64))
        }
    }
}

fn report_buffer(label: &str, buffer: &VertexBuffer) {
    log::info!(
        "{}: {} vertices, stride {} floats ({} bytes), {} bytes total",
        label,
        buffer.vertex_count(),
        buffer.stride(),
        buffer.layout().byte_stride(),
        buffer.as_bytes().len()
    );
}

fn report_texture(texture: &TextureData) {
    log::info!(
        "Diffuse texture: {}x{} {:?}, unpack alignment {}",
        texture.width,
        texture.height,
        texture.format,
        texture.unpack_alignment()
    );
}

fn run_textured(cfg: &Config) -> Result<()> {
    let mesh = load_mesh(&cfg.obj, VertexLayout::PositionColorUv)?;
    report_buffer("Textured mesh", &mesh);

    let material = load_material(&cfg.mtl)?;
    let texture = load_diffuse_texture(cfg, &material)?;
    report_texture(&texture);
    Ok(())
}

fn run_cubes() -> Result<()> {
    let scene = primitives::two_cube_scene();
    report_buffer("Cube scene", &scene);
    Ok(())
}

fn run_phong(cfg: &Config) -> Result<()> {
    let mesh = load_mesh(&cfg.obj, VertexLayout::PositionColorUvNormal)?;
    report_buffer("Phong mesh", &mesh);

    let material = load_material(&cfg.mtl)?;
    log::info!(
        "Material '{}': ka={:?} kd={:?} ks={:?} ke={:?} q={} illum={}",
        material.name,
        material.ambient,
        material.diffuse,
        material.specular,
        material.emissive,
        material.specular_exponent,
        material.illumination_model
    );

    let texture = load_diffuse_texture(cfg, &material)?;
    report_texture(&texture);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Config::from_env();
    log::info!(
        "Starting meshview. Demo: {:?}, obj={}, mtl={}",
        cfg.demo,
        cfg.obj.display(),
        cfg.mtl.display()
    );

    match cfg.demo {
        Demo::Textured => run_textured(&cfg)?,
        Demo::Cubes => run_cubes()?,
        Demo::Phong => run_phong(&cfg)?,
    }

    log::info!("Done.");
    Ok(())
}
