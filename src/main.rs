// Copyright (c) 2026 rezky_nightky

mod animator;
mod canvas;
mod charset;
mod compose;
mod config;
mod easing;
mod frame;
mod glitch;
mod konami;
mod loader;
mod pacer;
mod page;
mod palette;
mod particles;
mod rain;
mod runtime;
mod skills;
mod surface;
mod terminal;
mod terminal_sim;
mod typewriter;

use std::fs::File;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use anyhow::{Context, Result};
use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::animator::{CancelToken, FrameLoop};
use crate::canvas::{cell_center_px, viewport_px, Canvas};
use crate::compose::Composer;
use crate::config::{
    color_enabled_stdout, default_params_usage_for_help, detect_color_mode_auto,
    print_list_charsets, Args, Settings,
};
use crate::frame::Frame;
use crate::konami::{Key, KonamiDetector};
use crate::loader::LoadingScreen;
use crate::pacer::FramePacer;
use crate::page::{Page, BANNER};
use crate::palette::PAGE_BG;
use crate::particles::ParticleField;
use crate::rain::RainField;
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn build_info() -> &'static str {
    env!("NEONFOLIO_BUILD")
}

fn git_sha() -> &'static str {
    env!("NEONFOLIO_GIT_SHA")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn init_logging(settings: &Settings) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.default_log_filter()),
    );
    if let Some(path) = &settings.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("failed to install logger")?;
    Ok(())
}

fn install_stop_handlers(token: &CancelToken) {
    #[cfg(unix)]
    {
        match Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            Ok(mut signals) => {
                let token = token.clone();
                thread::spawn(move || {
                    if let Some(sig) = signals.forever().next() {
                        info!("received signal {}, stopping", sig);
                        token.cancel();
                    }
                });
            }
            Err(e) => log::warn!("failed to install signal handlers: {}", e),
        }
    }

    #[cfg(windows)]
    {
        let token = token.clone();
        if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
            log::warn!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn rng_for(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(stream)),
        None => StdRng::from_os_rng(),
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_charsets {
        print_list_charsets();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("{}", BANNER);
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {} ({})", build_info(), git_sha());
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        println!("Color: {}", detect_color_mode_auto().label());
        return Ok(());
    }

    let settings = Settings::from_args(&args)?;
    init_logging(&settings)?;
    info!(
        "starting neonfolio {} fps={} color={} seed={:?}",
        env!("CARGO_PKG_VERSION"),
        settings.fps,
        settings.color_mode.label(),
        settings.seed
    );

    let token = CancelToken::new();
    install_stop_handlers(&token);

    run(&settings, token)?;
    info!("stopped");
    Ok(())
}

fn run(settings: &Settings, token: CancelToken) -> Result<()> {
    let mut term = Terminal::new().context("failed to prepare terminal")?;
    let (mut cols, mut rows) = term.size().context("failed to query terminal size")?;
    let (px_w, px_h) = viewport_px(cols, rows);
    debug!("viewport {}x{} cells, {}x{} px", cols, rows, px_w, px_h);

    let mut rain = FrameLoop::start(
        RainField::new(settings.rain.clone(), rng_for(settings.seed, 0)),
        Canvas::new(),
        px_w,
        px_h,
        token.clone(),
    );
    let mut particles = FrameLoop::start(
        ParticleField::new(settings.particle.clone(), rng_for(settings.seed, 1)),
        Canvas::new(),
        px_w,
        px_h,
        token.clone(),
    );
    let mut page_rng = rng_for(settings.seed, 2);

    let start_time = Instant::now();
    let mut page = Page::new(start_time, cols, rows);
    let loader = settings.show_loader.then(|| LoadingScreen::new(start_time));
    let mut konami = KonamiDetector::new();
    let mut composer = Composer::new(cols, rows);
    let mut frame = Frame::new(cols, rows);
    let mut pacer = FramePacer::new(settings.fps, start_time);
    debug!("frame period {:?}", pacer.period());
    let end_time = settings
        .duration
        .map(|s| start_time + Duration::from_secs_f64(s));

    while rain.is_running() {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            info!("duration elapsed");
            rain.stop();
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                let now = Instant::now();
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Mouse(m) => match m.kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            if settings.particles {
                                let (x, y) = cell_center_px(m.column, m.row);
                                particles.animator_mut().spawn(x, y);
                            }
                            page.pointer_moved(m.column, m.row, now, &mut page_rng);
                        }
                        MouseEventKind::ScrollUp => page.scroll_by(-1),
                        MouseEventKind::ScrollDown => page.scroll_by(1),
                        _ => {}
                    },
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        konami.push(Key::from(k.code), now);
                        match (k.code, k.modifiers) {
                            (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => token.cancel(),
                            (KeyCode::Char('c'), KeyModifiers::CONTROL) => token.cancel(),
                            (KeyCode::Char(d @ '1'..='9'), _) => {
                                let i = (d as u8 - b'1') as usize;
                                if i < page.section_count() {
                                    page.scroll_to_section(i, now);
                                }
                            }
                            (KeyCode::Up, _) => page.scroll_by(-1),
                            (KeyCode::Down, _) => page.scroll_by(1),
                            (KeyCode::PageUp, _) => page.scroll_by(-(rows as i32 - 2).max(1)),
                            (KeyCode::PageDown, _) => page.scroll_by((rows as i32 - 2).max(1)),
                            (KeyCode::Home, _) => page.scroll_by(-(page.content_rows() as i32)),
                            (KeyCode::End, _) => page.scroll_by(page.content_rows() as i32),
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if token.is_cancelled() || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if pacer.is_due(now) {
                break;
            }

            let mut timeout = pacer.timeout(now);
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if token.is_cancelled() {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            cols = nw;
            rows = nh;
            let (w, h) = viewport_px(cols, rows);
            info!("resize to {}x{} cells", cols, rows);
            rain.resize(w, h);
            particles.resize(w, h);
            composer.resize(cols, rows);
            frame = Frame::new(cols, rows);
            page.resize(cols, rows);
            debug!("rain rebuilt with {} columns", rain.animator().columns().len());
        }

        let now = Instant::now();
        rain.tick();
        if settings.particles {
            particles.tick();
        }
        page.update(now);

        composer.reset(PAGE_BG);
        composer.paint_canvas(rain.surface());
        if settings.particles {
            composer.paint_canvas(particles.surface());
        }
        page.draw(&mut composer, now);
        if let Some(l) = loader.as_ref().filter(|l| !l.is_done(now)) {
            l.draw(&mut composer, now);
        }
        if let Some(deg) = konami.hue_degrees(now) {
            composer.hue_rotate(deg);
        }

        composer.write_to(&mut frame, settings.color_mode);
        if frame.has_changes() {
            term.draw(&mut frame)?;
        }

        pacer.advance(Instant::now());
    }

    debug!(
        "rain ran {} frames, particles ran {} frames ({} live)",
        rain.ticks(),
        particles.ticks(),
        particles.animator().particles().len()
    );
    Ok(())
}
