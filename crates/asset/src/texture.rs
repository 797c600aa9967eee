//! Texture loading and data structures.

use std::path::Path;

use image::DynamicImage;

use crate::error::{AssetError, AssetResult};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// Pixel layout of [`TextureData::data`], 8 bits per channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub const fn channels(self) -> u32 {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

impl TextureData {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> AssetResult<Self> {
        let expected = width as usize * height as usize * format.channels() as usize;
        if data.len() != expected {
            return Err(AssetError::TextureSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Decode an image file. Sources with an alpha channel keep it (`Rgba8`),
    /// everything else is expanded to `Rgb8`.
    pub fn load<P: AsRef<Path>>(path: P) -> AssetResult<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let texture = Self::from_image(img)?;

        log::info!(
            "Loaded texture {}x{} ({:?}, {} bytes)",
            texture.width,
            texture.height,
            texture.format,
            texture.data.len()
        );
        Ok(texture)
    }

    pub fn from_image(img: DynamicImage) -> AssetResult<Self> {
        let (width, height) = (img.width(), img.height());
        if img.color().has_alpha() {
            Self::new(width, height, PixelFormat::Rgba8, img.into_rgba8().into_raw())
        } else {
            Self::new(width, height, PixelFormat::Rgb8, img.into_rgb8().into_raw())
        }
    }

    /// White/gray checkerboard of 8x8 squares, used when a material names
    /// no texture.
    pub fn checkerboard(size: u32) -> Self {
        const LIGHT: [u8; 4] = [255, 255, 255, 255];
        const DARK: [u8; 4] = [128, 128, 128, 255];

        let data = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x / 8 + y / 8) % 2 == 0))
            .flat_map(|light| if light { LIGHT } else { DARK })
            .collect();

        Self {
            data,
            width: size,
            height: size,
            format: PixelFormat::Rgba8,
        }
    }

    pub fn bytes_per_pixel(&self) -> u32 {
        self.format.channels()
    }

    /// Row alignment (in bytes) needed to upload `data` without padding.
    pub fn unpack_alignment(&self) -> u32 {
        if (self.width * self.bytes_per_pixel()) % 4 == 0 {
            4
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("asset-texture-{}-{}", std::process::id(), name))
    }

    #[test]
    fn rgb_png_loads_as_rgb8() {
        let path = temp_path("rgb.png");
        RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])).save(&path).unwrap();

        let tex = TextureData::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tex.format, PixelFormat::Rgb8);
        assert_eq!((tex.width, tex.height), (3, 2));
        assert_eq!(tex.data.len(), 3 * 2 * 3);
        assert_eq!(&tex.data[..3], &[10, 20, 30]);
        assert_eq!(tex.unpack_alignment(), 1);
    }

    #[test]
    fn rgba_png_loads_as_rgba8() {
        let path = temp_path("rgba.png");
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])).save(&path).unwrap();

        let tex = TextureData::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tex.format, PixelFormat::Rgba8);
        assert_eq!(tex.data, vec![1u8, 2, 3, 4].repeat(4));
    }

    #[test]
    fn grayscale_expands_to_rgb() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(1, 1, image::Luma([7])));
        let tex = TextureData::from_image(img).unwrap();
        assert_eq!(tex.format, PixelFormat::Rgb8);
        assert_eq!(tex.data, vec![7u8, 7, 7]);
    }

    #[test]
    fn missing_image_is_an_image_error() {
        let err = TextureData::load("no/such/texture.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Image);
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let err = TextureData::new(2, 2, PixelFormat::Rgb8, vec![0; 11]).unwrap_err();
        assert!(matches!(err, AssetError::TextureSize { expected: 12, actual: 11, .. }));
    }

    #[test]
    fn checkerboard_is_consistent() {
        let tex = TextureData::checkerboard(16);
        assert_eq!(tex.data.len(), 16 * 16 * 4);
        assert_eq!(&tex.data[..4], &[255, 255, 255, 255]);
        // pixel (8, 0) starts the second square
        assert_eq!(&tex.data[8 * 4..8 * 4 + 4], &[128, 128, 128, 255]);
        // row 8 flips the pattern
        let row = 16 * 4;
        assert_eq!(&tex.data[8 * row..8 * row + 4], &[128, 128, 128, 255]);
        assert!(TextureData::new(16, 16, PixelFormat::Rgba8, tex.data).is_ok());
    }
}
