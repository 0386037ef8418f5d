use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use revolve_components::carousel::{
    CarouselArgs, DEFAULT_DRAG_GAIN, DEFAULT_FRAME_DELAY, DEFAULT_RELEASE_THRESHOLD,
    LoopCarousel,
};
use revolve_ui::{PointerEvent, Px, State, Transition, logging::init_tracing};
use tracing::{debug, info};

mod projects;
mod script;
mod terminal;

use projects::{Project, portfolio};
use script::Command;
use terminal::{TerminalSurface, render};

#[derive(Parser)]
#[command(name = "revolve-example")]
#[command(version, about = "Replays a scripted interaction against an infinite-loop carousel", long_about = None)]
struct Cli {
    /// Number of portfolio projects to show
    #[arg(short = 'n', long, default_value_t = 5)]
    items: usize,
    /// Card width in pixels
    #[arg(long, default_value_t = 320, allow_negative_numbers = true)]
    width: i32,
    /// Gap between cards in pixels
    #[arg(long, default_value_t = 16, allow_negative_numbers = true)]
    gap: i32,
    /// Multiplier applied to pointer travel while dragging
    #[arg(long, default_value_t = DEFAULT_DRAG_GAIN)]
    gain: f32,
    /// Fraction of a card a release must travel to change the item
    #[arg(long, default_value_t = DEFAULT_RELEASE_THRESHOLD)]
    threshold: f32,
    /// Transition length in milliseconds
    #[arg(long = "transition", default_value_t = 500)]
    transition_ms: u64,
    /// Cards painted on each side of the focused one, beyond its neighbours
    #[arg(long, default_value_t = 0)]
    beyond: usize,
    /// Script to replay (`-` reads stdin); a built-in demo runs when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,
}

type Carousel = LoopCarousel<Project, TerminalSurface>;

/// Drives a shared carousel with a virtual clock.
struct Showcase {
    carousel: State<Carousel>,
    started: Instant,
    clock: Instant,
    beyond: usize,
}

impl Showcase {
    fn run(&mut self, command: Command) {
        let now = self.clock;
        match command {
            Command::Wait(duration) => self.advance(duration),
            command => self.carousel.with_mut(|carousel| apply(carousel, command, now)),
        }
        self.carousel.with_mut(|carousel| carousel.tick(self.clock));
        self.report(command);
    }

    /// Moves the clock forward one frame at a time, ticking the carousel on
    /// every frame like a host render loop would.
    fn advance(&mut self, duration: Duration) {
        let end = self.clock + duration;
        while self.clock < end {
            self.clock = (self.clock + DEFAULT_FRAME_DELAY).min(end);
            let now = self.clock;
            self.carousel.with_mut(|carousel| carousel.tick(now));
        }
    }

    fn report(&self, command: Command) {
        let elapsed = self.clock.duration_since(self.started).as_millis();
        let line = self.carousel.with(|carousel| {
            let surface = carousel.surface();
            let easing = match surface.transition() {
                Transition::None => "",
                Transition::Ease { .. } => " ~",
            };
            let summary = carousel
                .current_indicator_index()
                .and_then(|source| carousel.items().get(source))
                .map_or("", |project| project.summary);
            format!(
                "+{elapsed:>5}ms {:<32} index {:>2} x={}{easing}  {}  {summary}",
                format!("{command:?}"),
                carousel.logical_index(),
                surface.translate_x(),
                render(carousel, self.beyond),
            )
        });
        println!("{line}");
    }
}

fn apply(carousel: &mut Carousel, command: Command, now: Instant) {
    match command {
        Command::Next => carousel.step_forward(now),
        Command::Prev => carousel.step_backward(now),
        Command::Dot(source) => carousel.go_to(source, now),
        Command::Key(key) => carousel.handle_key(key, now),
        Command::Drag { from, to } => {
            carousel.handle_pointer(PointerEvent::pressed(from), now);
            carousel.handle_pointer(PointerEvent::moved(to), now);
            carousel.handle_pointer(PointerEvent::released(to), now);
        }
        Command::Press(x) => carousel.handle_pointer(PointerEvent::pressed(x), now),
        Command::Move(x) => carousel.handle_pointer(PointerEvent::moved(x), now),
        Command::Release(x) => carousel.handle_pointer(PointerEvent::released(x), now),
        Command::Leave(x) => carousel.handle_pointer(PointerEvent::left(x), now),
        Command::Resize { width, gap } => {
            carousel.surface_mut().resize(Px(width), Px(gap));
            carousel.remeasure();
        }
        Command::Items(count) => carousel.set_items(portfolio(count), now),
        Command::Unmount => carousel.unmount(),
        Command::Wait(_) => {}
    }
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        None => Ok(script::DEMO.to_string()),
        Some(path) if path.as_os_str() == "-" => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            Ok(source)
        }
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = read_script(cli.script.as_deref())?;
    let commands = script::parse(&source)?;
    debug!("Parsed {} script commands", commands.len());

    let args = CarouselArgs::default()
        .drag_gain(cli.gain)
        .release_threshold(cli.threshold)
        .transition(Duration::from_millis(cli.transition_ms));
    let started = Instant::now();
    let surface = TerminalSurface::new(Px(cli.width), Px(cli.gap));
    let carousel = LoopCarousel::mount(portfolio(cli.items), surface, args, started);
    info!(
        "Mounted carousel over {} projects, stride {:?}",
        carousel.items().len(),
        carousel.stride()
    );

    let mut showcase = Showcase {
        carousel: State::new(carousel),
        started,
        clock: started,
        beyond: cli.beyond,
    };
    for command in commands {
        showcase.run(command);
    }

    let writes = showcase.carousel.with(|carousel| carousel.surface().writes());
    info!("Replay finished after {writes} transform writes");
    Ok(())
}
