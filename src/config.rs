// Copyright (c) 2026 rezky_nightky

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::charset::{build_chars, charset_from_str, PRESETS};
use crate::particles::ParticleConfig;
use crate::rain::RainConfig;
use crate::runtime::ColorMode;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  neonfolio --fps 60 --charset portfolio --reset-pct 2.5 --particle-cap 50";

pub fn color_enabled_stdout() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn default_params_usage_for_help() -> String {
    if color_enabled_stdout() {
        let (head, rest) = DEFAULT_PARAMS_USAGE
            .split_once('\n')
            .unwrap_or((DEFAULT_PARAMS_USAGE, ""));
        format!("\x1b[1;36m{}\x1b[0m\n{}", head, rest)
    } else {
        DEFAULT_PARAMS_USAGE.to_string()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("failed to apply {name} {value} (must be a finite number)")]
    NotFinite { name: &'static str, value: f64 },
    #[error("failed to apply {name} {value} (min {min} max {max})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("invalid --colormode: {0} (allowed: 0,16,8/256,24/32)")]
    ColorMode(u16),
    #[error("{0}")]
    Charset(String),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "neonfolio", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 60.0,
        help_heading = "PERFORMANCE",
        help = "Target FPS (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed for every random choice (default: random)"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "no-loader",
        help_heading = "GENERAL",
        help = "Skip the loading splash"
    )]
    pub no_loader: bool,

    #[arg(
        long = "no-particles",
        help_heading = "GENERAL",
        help = "Disable the pointer particle trail"
    )]
    pub no_particles: bool,

    #[arg(
        long = "log-file",
        help_heading = "GENERAL",
        help = "Write log output to this file instead of stderr (default level info there, warn on stderr; RUST_LOG overrides)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "charset",
        default_value = "portfolio",
        help_heading = "RAIN",
        help = "Glyph preset for the rain (see --list-charsets)"
    )]
    pub charset: String,

    #[arg(
        long = "reset-pct",
        default_value_t = 2.5,
        help_heading = "RAIN",
        help = "Per-frame chance in percent that a finished column restarts (min 0 max 100)"
    )]
    pub reset_pct: f64,

    #[arg(
        long = "particle-cap",
        default_value_t = 50,
        help_heading = "PARTICLES",
        help = "Maximum live particles (min 0 max 10000)"
    )]
    pub particle_cap: usize,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "list-charsets",
        help_heading = "HELP",
        help = "List available charset presets and exit"
    )]
    pub list_charsets: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fps: f64,
    pub duration: Option<f64>,
    pub seed: Option<u64>,
    pub show_loader: bool,
    pub particles: bool,
    pub log_file: Option<PathBuf>,
    pub color_mode: ColorMode,
    pub rain: RainConfig,
    pub particle: ParticleConfig,
}

fn require_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name, value });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

pub fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    if term.contains("256color") {
        return ColorMode::Color256;
    }

    ColorMode::Color16
}

pub fn parse_color_mode(forced: Option<u16>) -> Result<ColorMode, ConfigError> {
    match forced {
        None => Ok(detect_color_mode_auto()),
        Some(0) => Ok(ColorMode::Mono),
        Some(16) => Ok(ColorMode::Color16),
        Some(8) | Some(256) => Ok(ColorMode::Color256),
        Some(24) | Some(32) => Ok(ColorMode::TrueColor),
        Some(m) => Err(ConfigError::ColorMode(m)),
    }
}

impl Settings {
    /// Info lines would scribble over the alternate screen, so stderr only
    /// gets warnings unless `RUST_LOG` says otherwise.
    pub fn default_log_filter(&self) -> &'static str {
        if self.log_file.is_some() {
            "info"
        } else {
            "warn"
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let fps = require_range("--fps", args.fps, 1.0, 240.0)?;
        let duration = match args.duration {
            Some(s) if !s.is_finite() => return Err(ConfigError::NotFinite { name: "--duration", value: s }),
            Some(s) if s > 0.0 => Some(require_range("--duration", s, 0.1, 86400.0)?),
            _ => None,
        };
        let reset_pct = require_range("--reset-pct", args.reset_pct, 0.0, 100.0)?;
        let cap = require_range("--particle-cap", args.particle_cap as f64, 0.0, 10_000.0)?;

        let charset = charset_from_str(&args.charset).map_err(ConfigError::Charset)?;

        let rain = RainConfig {
            reset_chance: reset_pct / 100.0,
            glyphs: build_chars(charset),
            ..RainConfig::default()
        };
        let particle = ParticleConfig {
            cap: cap as usize,
            ..ParticleConfig::default()
        };

        Ok(Self {
            fps,
            duration,
            seed: args.seed,
            show_loader: !args.no_loader,
            particles: !args.no_particles,
            log_file: args.log_file.clone(),
            color_mode: parse_color_mode(args.colormode)?,
            rain,
            particle,
        })
    }
}

pub fn print_list_charsets() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE CHARSET PRESETS:\x1b[0m");
        println!("\x1b[2mNOTE: Use only the VALUE (left side) with --charset.\x1b[0m");
    } else {
        println!("AVAILABLE CHARSET PRESETS:");
        println!("NOTE: Use only the VALUE (left side) with --charset.");
    }
    println!();
    println!("VALUE        DESCRIPTION");
    for (name, desc) in PRESETS {
        println!("{:<12} {}", name, desc);
    }
}
