use clap::{Args, ValueEnum};
use skydisk_core::color::AdaptationMethod;
use skydisk_core::pipeline::PipelineConfig;
use skydisk_core::resample::Interpolation;

#[derive(Clone, Copy, ValueEnum)]
pub enum InterpolationArg {
    Nearest,
    Bilinear,
    Lanczos3,
    Lanczos4,
}

impl From<InterpolationArg> for Interpolation {
    fn from(arg: InterpolationArg) -> Self {
        match arg {
            InterpolationArg::Nearest => Interpolation::Nearest,
            InterpolationArg::Bilinear => Interpolation::Bilinear,
            InterpolationArg::Lanczos3 => Interpolation::Lanczos3,
            InterpolationArg::Lanczos4 => Interpolation::Lanczos4,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AdaptationArg {
    Bradford,
    VonKries,
    Sharp,
    CmcCat2000,
    Cat02,
    None,
}

impl From<AdaptationArg> for AdaptationMethod {
    fn from(arg: AdaptationArg) -> Self {
        match arg {
            AdaptationArg::Bradford => AdaptationMethod::Bradford,
            AdaptationArg::VonKries => AdaptationMethod::VonKries,
            AdaptationArg::Sharp => AdaptationMethod::Sharp,
            AdaptationArg::CmcCat2000 => AdaptationMethod::CmcCat2000,
            AdaptationArg::Cat02 => AdaptationMethod::Cat02,
            AdaptationArg::None => AdaptationMethod::None,
        }
    }
}

/// Processing options shared by `run` and `frame`. Unset options keep the
/// value from the config file (or the built-in default).
#[derive(Args)]
pub struct ProcessingArgs {
    /// Percentage of each channel clipped by the color balance (0-100, exclusive)
    #[arg(long)]
    pub cutoff: Option<f32>,

    /// Chromatic adaptation matrix
    #[arg(long, value_enum)]
    pub adaptation: Option<AdaptationArg>,

    /// Disable color balancing
    #[arg(long)]
    pub no_balance: bool,

    /// Output disk diameter in pixels (default: source height)
    #[arg(long)]
    pub diameter: Option<usize>,

    /// Interpolation kernel
    #[arg(long, value_enum)]
    pub interpolation: Option<InterpolationArg>,
}

impl ProcessingArgs {
    pub fn apply(&self, config: &mut PipelineConfig) {
        let cb = &mut config.color_balance;
        if self.no_balance {
            cb.enabled = false;
        } else if self.cutoff.is_some() || self.adaptation.is_some() {
            cb.enabled = true;
            if let Some(cutoff) = self.cutoff {
                cb.percent_cutoff = cutoff;
            }
            if let Some(adaptation) = self.adaptation {
                cb.adaptation = adaptation.into();
            }
        }
        if let Some(diameter) = self.diameter {
            config.projection.diameter = diameter;
        }
        if let Some(interpolation) = self.interpolation {
            config.projection.interpolation = interpolation.into();
        }
    }
}
