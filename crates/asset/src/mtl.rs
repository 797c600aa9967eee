//! MTL material reader.
//!
//! Only a single material per file is modelled: every recognised keyword
//! writes into the same record, so repeated keys (and repeated `newmtl`
//! blocks) resolve last-one-wins.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use glam::Vec3;

use crate::error::{AssetError, AssetResult, parse_field};

/// Material fields read from an MTL file. Absent fields stay zero/empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    /// `newmtl`
    pub name: String,
    /// `Ka`
    pub ambient: Vec3,
    /// `Kd`
    pub diffuse: Vec3,
    /// `Ks`
    pub specular: Vec3,
    /// `Ke`
    pub emissive: Vec3,
    /// `Ns`
    pub specular_exponent: f32,
    /// `Ni`
    pub optical_density: f32,
    /// `d`
    pub dissolve: f32,
    /// `illum`
    pub illumination_model: i32,
    /// `map_Kd`, verbatim as written after the keyword.
    pub diffuse_map: String,
}

impl Material {
    /// The diffuse texture reference, if the file named one.
    pub fn diffuse_map(&self) -> Option<&str> {
        if self.diffuse_map.is_empty() {
            None
        } else {
            Some(&self.diffuse_map)
        }
    }

    /// Diffuse texture path with relative references resolved against
    /// `base_dir` (normally the directory holding the MTL file).
    pub fn diffuse_map_path(&self, base_dir: impl AsRef<Path>) -> Option<PathBuf> {
        let map = Path::new(self.diffuse_map()?);
        if map.is_absolute() {
            Some(map.to_path_buf())
        } else {
            Some(base_dir.as_ref().join(map))
        }
    }
}

pub fn load_mtl_from_path(path: impl AsRef<Path>) -> AssetResult<Material> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let material = load_mtl_from_reader(BufReader::new(file))?;
    log::info!("Loaded material '{}' from {:?}", material.name, path);
    Ok(material)
}

pub fn load_mtl_from_str(contents: &str) -> AssetResult<Material> {
    load_mtl_from_reader(io::Cursor::new(contents))
}

pub fn load_mtl_from_reader<R: BufRead>(reader: R) -> AssetResult<Material> {
    let mut material = Material::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|source| AssetError::Read {
            line: line_no,
            source,
        })?;
        log::trace!("mtl {line_no}: {line}");

        let trimmed = line.trim_start();
        let mut parts = trimmed.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "newmtl" => {
                material.name = parts
                    .next()
                    .ok_or(AssetError::Missing {
                        line: line_no,
                        what: "material name",
                    })?
                    .to_owned();
            }
            "Ns" => material.specular_exponent = parse_field(parts.next(), line_no, "Ns")?,
            "Ka" => material.ambient = parse_vec3(&mut parts, line_no, "Ka")?,
            "Kd" => material.diffuse = parse_vec3(&mut parts, line_no, "Kd")?,
            "Ks" => material.specular = parse_vec3(&mut parts, line_no, "Ks")?,
            "Ke" => material.emissive = parse_vec3(&mut parts, line_no, "Ke")?,
            "Ni" => material.optical_density = parse_field(parts.next(), line_no, "Ni")?,
            "d" => material.dissolve = parse_field(parts.next(), line_no, "d")?,
            "illum" => material.illumination_model = parse_field(parts.next(), line_no, "illum")?,
            "map_Kd" => {
                // Paths may contain spaces: take the rest of the line.
                material.diffuse_map = trimmed["map_Kd".len()..].trim_start().to_owned();
            }
            _ => {}
        }
    }

    Ok(material)
}

fn parse_vec3<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: &'static str,
) -> AssetResult<Vec3> {
    let r = parse_field(parts.next(), line, what)?;
    let g = parse_field(parts.next(), line, what)?;
    let b = parse_field(parts.next(), line, what)?;
    Ok(Vec3::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SUZANNE: &str = "\
# Blender MTL File: 'None'
# Material Count: 1

newmtl Material.001
Ns 323.999994
Ka 1.000000 1.000000 1.000000
Kd 0.800000 0.800000 0.800000
Ks 0.500000 0.500000 0.500000
Ke 0.000000 0.000000 0.000000
Ni 1.450000
d 1.000000
illum 2
map_Kd Suzanne.png
";

    #[test]
    fn reads_all_fields() {
        let m = load_mtl_from_str(SUZANNE).unwrap();
        assert_eq!(m.name, "Material.001");
        assert!((m.specular_exponent - 323.999994).abs() < 1e-3);
        assert_eq!(m.ambient, Vec3::ONE);
        assert_eq!(m.diffuse, Vec3::splat(0.8));
        assert_eq!(m.specular, Vec3::splat(0.5));
        assert_eq!(m.emissive, Vec3::ZERO);
        assert!((m.optical_density - 1.45).abs() < 1e-6);
        assert_eq!(m.dissolve, 1.0);
        assert_eq!(m.illumination_model, 2);
        assert_eq!(m.diffuse_map(), Some("Suzanne.png"));
    }

    #[test]
    fn name_only_yields_defaults() {
        let m = load_mtl_from_str("newmtl Foo\n").unwrap();
        assert_eq!(
            m,
            Material {
                name: "Foo".to_owned(),
                ..Material::default()
            }
        );
        assert_eq!(m.diffuse_map(), None);
        assert_eq!(m.diffuse_map_path("textures"), None);
    }

    #[test]
    fn repeated_keys_last_one_wins() {
        let src = "newmtl First\nNs 10\nmap_Kd a.png\nnewmtl Second\nNs 20\n";
        let m = load_mtl_from_str(src).unwrap();
        assert_eq!(m.name, "Second");
        assert_eq!(m.specular_exponent, 20.0);
        assert_eq!(m.diffuse_map, "a.png");
    }

    #[test]
    fn map_kd_keeps_spaces() {
        let m = load_mtl_from_str("map_Kd   my textures/wood grain.jpg\n").unwrap();
        assert_eq!(m.diffuse_map, "my textures/wood grain.jpg");
    }

    #[test]
    fn diffuse_map_resolves_relative_to_base() {
        let m = load_mtl_from_str("map_Kd Suzanne.png\n").unwrap();
        assert_eq!(
            m.diffuse_map_path("models/suzanne"),
            Some(PathBuf::from("models/suzanne/Suzanne.png"))
        );
    }

    #[test]
    fn unknown_keywords_are_ignored() {
        let m = load_mtl_from_str("newmtl A\nmap_Bump n.png\nTf 1 1 1\nsharpness 60\n").unwrap();
        assert_eq!(m.name, "A");
        assert_eq!(m.diffuse_map(), None);
    }

    #[test]
    fn malformed_value_is_a_parse_error() {
        let err = load_mtl_from_str("newmtl A\nKa 1.0 oops 1.0\n").unwrap_err();
        assert!(matches!(
            err,
            AssetError::Parse { line: 2, what: "Ka", ref token } if token == "oops"
        ));
    }

    #[test]
    fn negative_illum_is_accepted() {
        let m = load_mtl_from_str("illum -1\n").unwrap();
        assert_eq!(m.illumination_model, -1);
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let bytes: &[u8] = b"newmtl A\nmap_Kd \xff.png\n";
        let err = load_mtl_from_reader(bytes).unwrap_err();
        assert!(matches!(err, AssetError::Read { line: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn unopenable_file_is_an_error_not_a_default() {
        let err = load_mtl_from_path("no/such/material.mtl").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
