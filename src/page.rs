// Copyright (c) 2026 rezky_nightky

//! The scrollable portfolio content drawn over the background layers.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::compose::Composer;
use crate::easing::{ease_in_out, progress};
use crate::glitch::GlitchText;
use crate::palette::{Rgba, NEON_CYAN, NEON_GREEN, TEXT_BRIGHT, TEXT_DIM, TRACK_GREY};
use crate::skills::{default_skills, SkillBar};
use crate::terminal_sim::TerminalSimulator;
use crate::typewriter::TypeWriter;

pub const SCROLL_TIME: Duration = Duration::from_millis(600);
const MARGIN: i32 = 4;
const HERO_ROWS: u16 = 4;
const PANEL: Rgba = Rgba::new(10, 10, 10, 0.8);
const PROMPT: &str = "visitor@portfolio:~$ ";

/// Printed by `--info`.
pub const BANNER: &str = "
    ███████╗ █████╗ ██╗███████╗██╗   ██╗██████╗
    ██╔════╝██╔══██╗██║██╔════╝██║   ██║██╔══██╗
    ███████╗███████║██║█████╗  ██║   ██║██████╔╝
    ╚════██║██╔══██║██║██╔══╝  ██║   ██║██╔══██╗
    ███████║██║  ██║██║██║     ╚██████╔╝██║  ██║
    ╚══════╝╚═╝  ╚═╝╚═╝╚═╝      ╚═════╝ ╚═╝  ╚═╝

    Welcome to my portfolio!
    Python Automation Expert
    Reverse Engineering Learner
    AI & Technology Enthusiast

    Try the Konami Code: ↑↑↓↓←→←→BA
";

enum Body {
    Text(Vec<&'static str>),
    Skills(Vec<SkillBar>),
    Terminal,
}

impl Body {
    fn rows(&self) -> u16 {
        match self {
            Body::Text(lines) => lines.len() as u16,
            Body::Skills(bars) => bars.len() as u16 * 2,
            Body::Terminal => 3,
        }
    }
}

struct Section {
    id: &'static str,
    title: GlitchText,
    body: Body,
}

impl Section {
    /// Title, gap, body, gap.
    fn rows(&self) -> u16 {
        self.body.rows() + 3
    }
}

#[derive(Clone, Copy, Debug)]
struct ScrollAnim {
    from: f32,
    to: f32,
    start: Instant,
}

pub struct Page {
    sections: Vec<Section>,
    hero: TypeWriter,
    terminal: TerminalSimulator,
    scroll: f32,
    anim: Option<ScrollAnim>,
    hovered: Option<usize>,
    cols: u16,
    rows: u16,
}

impl Page {
    pub fn new(now: Instant, cols: u16, rows: u16) -> Self {
        let sections = vec![
            Section {
                id: "about",
                title: GlitchText::new("## About Me"),
                body: Body::Text(vec![
                    "Python automation expert who likes to take things apart.",
                    "Reverse engineering learner: frida, adb and a lot of patience.",
                    "AI & technology enthusiast, always scripting the boring parts away.",
                ]),
            },
            Section {
                id: "skills",
                title: GlitchText::new("## Skills & Expertise"),
                body: Body::Skills(default_skills()),
            },
            Section {
                id: "terminal",
                title: GlitchText::new("## Terminal"),
                body: Body::Terminal,
            },
            Section {
                id: "contact",
                title: GlitchText::new("## Contact"),
                body: Body::Text(vec![
                    "github   : github.com/your-handle",
                    "email    : hello@example.com",
                    "pgp      : ask nicely",
                ]),
            },
        ];

        let mut hero = TypeWriter::new(
            "> Hello, World. I automate the web.",
            TypeWriter::DEFAULT_SPEED,
        );
        hero.start(now);

        Self {
            sections,
            hero,
            terminal: TerminalSimulator::new(now),
            scroll: 0.0,
            anim: None,
            hovered: None,
            cols,
            rows,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.anim = None;
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    #[cfg(test)]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Rows below the fixed nav bar.
    fn view_rows(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    pub fn content_rows(&self) -> u16 {
        HERO_ROWS + self.sections.iter().map(Section::rows).sum::<u16>()
    }

    fn max_scroll(&self) -> f32 {
        self.content_rows().saturating_sub(self.view_rows()) as f32
    }

    /// Content row of a section title.
    fn section_top(&self, i: usize) -> u16 {
        HERO_ROWS + self.sections[..i].iter().map(Section::rows).sum::<u16>()
    }

    fn first_visible_row(&self) -> i32 {
        self.scroll.round() as i32
    }

    pub fn scroll_by(&mut self, rows: i32) {
        self.anim = None;
        self.scroll = (self.scroll + rows as f32).clamp(0.0, self.max_scroll());
    }

    /// Eases the view so the section title sits at the top.
    pub fn scroll_to_section(&mut self, i: usize, now: Instant) {
        if i >= self.sections.len() {
            return;
        }
        let to = (self.section_top(i) as f32).min(self.max_scroll());
        self.anim = Some(ScrollAnim {
            from: self.scroll,
            to,
            start: now,
        });
        log::debug!("scrolling to #{}", self.sections[i].id);
    }

    fn title_at(&self, col: u16, row: u16) -> Option<usize> {
        if row == 0 {
            return None;
        }
        let content_row = row as i32 - 1 + self.first_visible_row();
        self.sections.iter().enumerate().position(|(i, s)| {
            let len = s.title.original().chars().count() as i32;
            self.section_top(i) as i32 == content_row
                && (MARGIN..MARGIN + len).contains(&(col as i32))
        })
    }

    /// Glitches a title when the pointer moves onto it.
    pub fn pointer_moved<R: Rng + ?Sized>(&mut self, col: u16, row: u16, now: Instant, rng: &mut R) {
        let hit = self.title_at(col, row);
        if hit.is_some() && hit != self.hovered {
            if let Some(i) = hit {
                self.sections[i].title.trigger(now, rng);
            }
        }
        self.hovered = hit;
    }

    pub fn update(&mut self, now: Instant) {
        if let Some(a) = self.anim {
            let t = ease_in_out(progress(now.saturating_duration_since(a.start), SCROLL_TIME));
            self.scroll = a.from + (a.to - a.from) * t;
            if t >= 1.0 {
                self.anim = None;
            }
        }

        self.hero.update(now);
        self.terminal.update(now);

        let top = self.scroll.round();
        let bottom = top + self.view_rows() as f32;
        let mut row = HERO_ROWS;
        for s in &mut self.sections {
            s.title.update(now);
            let body_top = row + 2;
            if let Body::Skills(bars) = &mut s.body {
                for (k, bar) in bars.iter_mut().enumerate() {
                    let r = (body_top + k as u16 * 2) as f32;
                    let visible = [r, r + 1.0]
                        .iter()
                        .filter(|&&y| y >= top && y < bottom)
                        .count();
                    bar.observe(visible as f32 / 2.0, now);
                }
            }
            row += s.rows();
        }
    }

    pub fn draw(&self, c: &mut Composer, now: Instant) {
        let offset = 1 - self.first_visible_row();
        let width = self.cols.saturating_sub(MARGIN as u16 * 2 - 4);
        let panel = |c: &mut Composer, content_row: i32| {
            let y = content_row + offset;
            if y >= 1 {
                c.tint(MARGIN - 2, y, width, 1, PANEL);
            }
        };
        let text = |c: &mut Composer, content_row: i32, col: i32, s: &str, fg: Rgba, bold: bool| {
            let y = content_row + offset;
            if y >= 1 {
                c.put_str(col, y, s, fg, bold);
            }
        };

        panel(c, 1);
        text(c, 1, MARGIN, self.hero.visible().as_str(), NEON_GREEN, true);
        if self.hero.is_done() {
            panel(c, 2);
            text(c, 2, MARGIN, "python // automation // reverse engineering", TEXT_DIM, false);
        }

        for (i, s) in self.sections.iter().enumerate() {
            let top = self.section_top(i) as i32;
            panel(c, top);
            text(c, top, MARGIN, s.title.text(), NEON_CYAN, true);
            let body = top + 2;
            match &s.body {
                Body::Text(lines) => {
                    for (k, line) in lines.iter().enumerate() {
                        panel(c, body + k as i32);
                        text(c, body + k as i32, MARGIN, line, TEXT_BRIGHT, false);
                    }
                }
                Body::Skills(bars) => {
                    let bar_w = width.saturating_sub(8).min(48);
                    for (k, bar) in bars.iter().enumerate() {
                        let r = body + k as i32 * 2;
                        panel(c, r);
                        panel(c, r + 1);
                        let fill = bar.fill(now);
                        text(c, r, MARGIN, bar.name(), TEXT_BRIGHT, false);
                        let pct = format!("{:>3}%", (fill * 100.0).round() as u32);
                        text(c, r, MARGIN + bar_w as i32 - 4, &pct, TEXT_DIM, false);
                        let filled = (fill * bar_w as f32).round() as u16;
                        for x in 0..bar_w {
                            let fg = if x < filled {
                                NEON_GREEN.lerp(NEON_CYAN, x as f32 / bar_w.max(1) as f32)
                            } else {
                                TRACK_GREY
                            };
                            text(c, r + 1, MARGIN + x as i32, "━", fg, false);
                        }
                    }
                }
                Body::Terminal => {
                    for k in 0..3 {
                        panel(c, body + k);
                    }
                    text(c, body, MARGIN, PROMPT, NEON_GREEN, false);
                    text(c, body, MARGIN + PROMPT.len() as i32, "whoami", TEXT_BRIGHT, false);
                    text(c, body + 1, MARGIN, "python-automation-expert", TEXT_DIM, false);
                    text(c, body + 2, MARGIN, PROMPT, NEON_GREEN, false);
                    text(
                        c,
                        body + 2,
                        MARGIN + PROMPT.len() as i32,
                        self.terminal.line(),
                        TEXT_BRIGHT,
                        false,
                    );
                }
            }
        }

        self.draw_nav(c);
    }

    fn draw_nav(&self, c: &mut Composer) {
        c.tint(0, 0, self.cols, 1, Rgba::new(10, 10, 10, 0.9));
        c.put_str(1, 0, "~/portfolio", NEON_GREEN, true);
        let mut x = 14;
        for (i, s) in self.sections.iter().enumerate() {
            let item = format!("[{}] {}", i + 1, s.id);
            c.put_str(x, 0, &item, TEXT_DIM, false);
            x += item.chars().count() as i32 + 2;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::konami::{Key, SEQUENCE};
    use crate::palette::PAGE_BG;

    fn row_text(c: &Composer, row: u16) -> String {
        (0..c.cols()).map(|x| c.shade(x, row).unwrap().ch).collect()
    }

    #[test]
    fn banner_advertises_the_konami_code() {
        assert!(BANNER.contains("Welcome to my portfolio!"));
        assert!(BANNER.contains("Try the Konami Code: ↑↑↓↓←→←→BA"));
        let hint: Vec<Key> = "↑↑↓↓←→←→BA"
            .chars()
            .map(|c| match c {
                '↑' => Key::Up,
                '↓' => Key::Down,
                '←' => Key::Left,
                '→' => Key::Right,
                c => Key::Char(c.to_ascii_lowercase()),
            })
            .collect();
        assert_eq!(hint, SEQUENCE);
    }

    #[test]
    fn nav_bar_lists_every_section() {
        let now = Instant::now();
        let page = Page::new(now, 80, 20);
        let mut c = Composer::new(80, 20);
        c.reset(PAGE_BG);
        page.draw(&mut c, now);
        let nav = row_text(&c, 0);
        for key in ["[1] about", "[2] skills", "[3] terminal", "[4] contact"] {
            assert!(nav.contains(key), "{nav}");
        }
    }

    #[test]
    fn smooth_scroll_lands_on_section_title() {
        let now = Instant::now();
        let mut page = Page::new(now, 80, 10);
        page.scroll_to_section(1, now);
        page.update(now + SCROLL_TIME / 2);
        let mid = page.scroll();
        assert!(mid > 0.0 && mid < page.section_top(1) as f32);
        page.update(now + SCROLL_TIME);
        assert_eq!(page.scroll(), page.section_top(1) as f32);

        let mut c = Composer::new(80, 10);
        c.reset(PAGE_BG);
        page.draw(&mut c, now + SCROLL_TIME);
        assert!(row_text(&c, 1).contains("## Skills & Expertise"));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let now = Instant::now();
        let mut page = Page::new(now, 80, 10);
        page.scroll_by(-5);
        assert_eq!(page.scroll(), 0.0);
        page.scroll_by(10_000);
        assert_eq!(page.scroll(), (page.content_rows() - 9) as f32);
    }

    #[test]
    fn skill_bars_start_only_once_scrolled_into_view() {
        let now = Instant::now();
        let mut page = Page::new(now, 80, 8);
        page.update(now);
        let started = |p: &Page| match &p.sections[1].body {
            Body::Skills(bars) => bars.iter().filter(|b| b.is_started()).count(),
            _ => 0,
        };
        assert_eq!(started(&page), 0);

        page.scroll_to_section(1, now);
        page.update(now + SCROLL_TIME);
        assert!(started(&page) > 0);
        assert!(started(&page) < 6);
    }

    #[test]
    fn hovering_a_title_glitches_it_once_per_enter() {
        let now = Instant::now();
        let mut page = Page::new(now, 80, 40);
        let mut rng = StdRng::seed_from_u64(3);
        let row = page.section_top(0) + 1;
        page.pointer_moved(MARGIN as u16 + 1, row, now, &mut rng);
        assert!(page.sections[0].title.is_glitched());
        assert_eq!(page.hovered, Some(0));

        page.update(now + Duration::from_millis(150));
        page.pointer_moved(MARGIN as u16 + 2, row, now + Duration::from_millis(150), &mut rng);
        assert!(!page.sections[0].title.is_glitched());

        page.pointer_moved(0, 0, now, &mut rng);
        assert_eq!(page.hovered, None);
    }

    #[test]
    fn terminal_section_shows_simulated_prompt() {
        let now = Instant::now();
        let mut page = Page::new(now, 80, 40);
        page.update(now + Duration::from_millis(6500));
        let mut c = Composer::new(80, 40);
        c.reset(PAGE_BG);
        page.draw(&mut c, now);
        let row = page.section_top(2) + 2 + 2 + 1;
        assert!(row_text(&c, row).contains("visitor@portfolio:~$ git status"));
    }
}
