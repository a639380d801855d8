//! Reactive device environment: window size, font scale, color scheme.
//!
//! Every field that can change while the app runs is an [`Observable`], so
//! rules reading it re-evaluate when the host pushes a new value.

use crate::observable::{Effect, Observable, observable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

/// The platform the runtime is hosted on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformOs {
    #[default]
    Ios,
    Android,
    Web,
    Windows,
    Macos,
    Other(String),
}

impl PlatformOs {
    pub fn as_str(&self) -> &str {
        match self {
            PlatformOs::Ios => "ios",
            PlatformOs::Android => "android",
            PlatformOs::Web => "web",
            PlatformOs::Windows => "windows",
            PlatformOs::Macos => "macos",
            PlatformOs::Other(name) => name,
        }
    }

    /// Everything except the web counts as native.
    pub fn is_native(&self) -> bool {
        !matches!(self, PlatformOs::Web)
    }
}

/// Initial environment values.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub os: PlatformOs,
    pub window_width: f64,
    pub window_height: f64,
    /// Root font size in px.
    pub rem: f64,
    pub color_scheme: ColorScheme,
    pub reduced_motion: bool,
    pub rtl: bool,
    pub pixel_ratio: f64,
    pub font_scale: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            os: PlatformOs::Ios,
            window_width: 375.0,
            window_height: 812.0,
            rem: 14.0,
            color_scheme: ColorScheme::Light,
            reduced_motion: false,
            rtl: false,
            pixel_ratio: 2.0,
            font_scale: 1.0,
        }
    }
}

/// The device state every component reads from.
#[derive(Debug)]
pub struct Environment {
    pub os: PlatformOs,
    pub window_width: Observable<f64>,
    pub window_height: Observable<f64>,
    pub rem: Observable<f64>,
    /// The scheme the app asked for; follows the system unless overridden.
    pub color_scheme: Observable<ColorScheme>,
    pub system_color_scheme: Observable<ColorScheme>,
    pub reduced_motion: Observable<bool>,
    pub rtl: Observable<bool>,
    pub pixel_ratio: Observable<f64>,
    pub font_scale: Observable<f64>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(EnvironmentConfig::default())
    }
}

impl Environment {
    pub fn new(config: EnvironmentConfig) -> Self {
        Self {
            os: config.os,
            window_width: observable(config.window_width),
            window_height: observable(config.window_height),
            rem: observable(config.rem),
            color_scheme: observable(config.color_scheme),
            system_color_scheme: observable(config.color_scheme),
            reduced_motion: observable(config.reduced_motion),
            rtl: observable(config.rtl),
            pixel_ratio: observable(config.pixel_ratio),
            font_scale: observable(config.font_scale),
        }
    }

    /// Applies a window resize. Observers of both dimensions run once.
    pub fn set_window_size(&self, width: f64, height: f64) {
        crate::observable::batch(|batch| {
            self.window_width.set_in(width, batch);
            self.window_height.set_in(height, batch);
        });
    }

    /// A system appearance change also moves the app scheme.
    pub fn set_system_color_scheme(&self, scheme: ColorScheme) {
        crate::observable::batch(|batch| {
            self.system_color_scheme.set_in(scheme, batch);
            self.color_scheme.set_in(scheme, batch);
        });
    }

    /// Thinnest line the screen can draw, in dp.
    pub fn hairline_width(&self, effect: Option<&Effect>) -> f64 {
        let ratio = self.pixel_ratio.get(effect);
        let width = self.round_to_nearest_pixel(0.4, effect);
        if width == 0.0 && ratio > 0.0 {
            1.0 / ratio
        } else {
            width
        }
    }

    pub fn round_to_nearest_pixel(&self, layout_size: f64, effect: Option<&Effect>) -> f64 {
        let ratio = self.pixel_ratio.get(effect);
        if ratio <= 0.0 {
            return layout_size;
        }
        (layout_size * ratio).round() / ratio
    }

    pub fn pixel_size_for_layout_size(&self, layout_size: f64, effect: Option<&Effect>) -> f64 {
        (layout_size * self.pixel_ratio.get(effect)).round()
    }
}
