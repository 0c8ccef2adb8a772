use letterfit::{Background, EngineKind};

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Engine {
    /// Codecs and resampling from the `image` crate.
    Image,
    /// `image` crate codecs with `fast_image_resize` resampling.
    Fir,
    /// `png` codec with the pure-Rust `resize` resampler.
    Resample,
    /// `tiny-skia` pixmaps for every stage.
    Skia,
}

impl From<Engine> for EngineKind {
    fn from(engine: Engine) -> Self {
        match engine {
            Engine::Image => EngineKind::ImageOps,
            Engine::Fir => EngineKind::Fir,
            Engine::Resample => EngineKind::Resample,
            Engine::Skia => EngineKind::Skia,
        }
    }
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum BackgroundKind {
    /// Transparent bars.
    Transparent,
    /// Solid black bars.
    Black,
    /// Solid white bars.
    White,
    /// Bars filled with a blurred stretch of the source image.
    Blur,
}

impl BackgroundKind {
    pub fn to_background(self, blur_block: u32) -> Background {
        match self {
            BackgroundKind::Transparent => Background::Transparent,
            BackgroundKind::Black => Background::Solid([0, 0, 0, 255]),
            BackgroundKind::White => Background::Solid([255, 255, 255, 255]),
            BackgroundKind::Blur => Background::Blur { block: blur_block },
        }
    }
}
