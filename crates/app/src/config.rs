//! Command-line configuration.
//! Flags follow the `--key=value` form; unknown flags are ignored.

use std::path::PathBuf;

pub const DEFAULT_OBJ: &str = "3D_Models/Suzanne/SuzanneTriTextured.obj";

/// Which of the demo programs to run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Demo {
    /// Textured mesh, position + color + uv.
    Textured,
    /// Two hand-built cubes, position + color.
    Cubes,
    /// Phong-lit textured mesh, position + color + uv + normal.
    #[default]
    Phong,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub demo: Demo,
    pub obj: PathBuf,
    pub mtl: PathBuf,
    pub texture: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut demo = Demo::default();
        let mut obj: Option<PathBuf> = None;
        let mut mtl: Option<PathBuf> = None;
        let mut texture: Option<PathBuf> = None;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(val) = arg.strip_prefix("--demo=") {
                demo = match val.to_ascii_lowercase().as_str() {
                    "textured" | "textures" => Demo::Textured,
                    "cubes" | "cube" => Demo::Cubes,
                    "phong" => Demo::Phong,
                    other => {
                        log::warn!("Unknown demo '{}', falling back to {:?}.", other, Demo::default());
                        Demo::default()
                    }
                };
            } else if let Some(val) = arg.strip_prefix("--obj=") {
                obj = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--mtl=") {
                mtl = Some(PathBuf::from(val));
            } else if let Some(val) = arg.strip_prefix("--texture=") {
                texture = Some(PathBuf::from(val));
            }
        }

        let obj = obj.unwrap_or_else(|| PathBuf::from(DEFAULT_OBJ));
        // Exporters write the material next to the mesh under the same stem.
        let mtl = mtl.unwrap_or_else(|| obj.with_extension("mtl"));

        Self {
            demo,
            obj,
            mtl,
            texture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::from_args(Vec::<String>::new());
        assert_eq!(cfg.demo, Demo::Phong);
        assert_eq!(cfg.obj, PathBuf::from(DEFAULT_OBJ));
        assert_eq!(cfg.mtl, PathBuf::from("3D_Models/Suzanne/SuzanneTriTextured.mtl"));
        assert_eq!(cfg.texture, None);
    }

    #[test]
    fn explicit_flags() {
        let cfg = Config::from_args([
            "--demo=Textured",
            "--obj=models/cube.obj",
            "--texture=wood.png",
            "--verbose",
        ]);
        assert_eq!(cfg.demo, Demo::Textured);
        assert_eq!(cfg.obj, PathBuf::from("models/cube.obj"));
        assert_eq!(cfg.mtl, PathBuf::from("models/cube.mtl"));
        assert_eq!(cfg.texture, Some(PathBuf::from("wood.png")));
    }

    #[test]
    fn unknown_demo_falls_back() {
        let cfg = Config::from_args(["--demo=raytracer", "--mtl=other.mtl"]);
        assert_eq!(cfg.demo, Demo::Phong);
        assert_eq!(cfg.mtl, PathBuf::from("other.mtl"));
    }
}
