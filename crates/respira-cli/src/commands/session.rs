use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use clap::Args;
use respira_core::{
    BreathController, Clock, Config, Database, Event, SystemClock, Timings, VisualState,
};
use tokio::time::{Instant, MissedTickBehavior};

use crate::bell;
use crate::render::Scene;

const CANVAS_COLS: usize = 60;
const CANVAS_ROWS: usize = 20;

#[derive(Args)]
pub struct SessionArgs {
    /// Inhale seconds (invalid values fall back to 4)
    #[arg(long)]
    inhale: Option<String>,
    /// Hold seconds (invalid values fall back to 4)
    #[arg(long)]
    hold: Option<String>,
    /// Exhale seconds (invalid values fall back to 4)
    #[arg(long)]
    exhale: Option<String>,
    /// Stop after this many completed cycles
    #[arg(long)]
    cycles: Option<u64>,
    /// Stop after this many minutes
    #[arg(long)]
    minutes: Option<f64>,
    /// Disable the terminal bell
    #[arg(long)]
    no_haptics: bool,
    /// Print events as JSON lines instead of drawing
    #[arg(long)]
    json: bool,
}

impl SessionArgs {
    fn timings(&self, configured: Timings) -> Timings {
        let field = |arg: &Option<String>, fallback: u32| {
            arg.clone().unwrap_or_else(|| fallback.to_string())
        };
        Timings::from_inputs(
            &field(&self.inhale, configured.inhale),
            &field(&self.hold, configured.hold),
            &field(&self.exhale, configured.exhale),
        )
    }

    fn limit_reached(&self, cycles: u64, elapsed: Duration) -> bool {
        self.cycles.is_some_and(|n| cycles >= n)
            || self
                .minutes
                .is_some_and(|m| elapsed.as_secs_f64() >= m * 60.0)
    }
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Rc::new(Database::open()?);

    let mut controller = BreathController::new(
        Box::new(SystemClock),
        Box::new(db.clone()),
        bell::haptics(config.haptics.enabled && !args.no_haptics),
        VisualState::new(config.session.smoothing_factor),
    );
    let timings = args.timings(config.timings);
    controller.update_timings(timings.inhale, timings.hold, timings.exhale);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let completed = runtime.block_on(drive(&mut controller, &args, &config));

    if let Some(Event::SessionCompleted {
        started_at,
        cycles,
        minutes,
        at,
        ..
    }) = &completed
    {
        if let Err(e) = db.record_session(*started_at, *at, *cycles, *minutes) {
            tracing::warn!(error = %e, "failed to record session history");
        }
    }

    let printed = match &completed {
        Some(event) if args.json => emit(&args, event),
        Some(Event::SessionCompleted { cycles, minutes, .. }) => {
            summarize(&controller, *cycles, *minutes)
        }
        _ => Ok(()),
    };
    if let Err(e) = printed {
        tracing::warn!(error = %e, "failed to print session summary");
    }
    Ok(())
}

fn summarize(controller: &BreathController, cycles: u64, minutes: f64) -> io::Result<()> {
    let display = controller.statistics().display();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", controller.phase_label())?;
    writeln!(
        out,
        "This session: {cycles} cycles of {}s, {minutes:.1} min",
        controller.timings().cycle_secs()
    )?;
    writeln!(
        out,
        "All time: {} sessions, {} cycles, {} min",
        display.sessions, display.cycles, display.minutes
    )?;
    out.flush()
}

/// Tick the controller and draw frames until Ctrl-C, the session limit, or
/// stdout going away. The session is always stopped before returning.
async fn drive(
    controller: &mut BreathController,
    args: &SessionArgs,
    config: &Config,
) -> Option<Event> {
    let mut tick = tokio::time::interval(Duration::from_millis(
        config.session.tick_interval_ms.max(1),
    ));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frame = tokio::time::interval(Duration::from_millis(
        config.session.frame_interval_ms.max(1),
    ));
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut scene = (!args.json).then(|| {
        Scene::new(
            CANVAS_COLS,
            CANVAS_ROWS,
            config.session.particle_count,
            SystemClock.now_ms(),
        )
    });
    let mut stdout = io::stdout();

    let started = Instant::now();
    let opened = controller.start();
    let mut output = if scene.is_some() {
        // Clear once and hide the cursor; frames redraw from home.
        write!(stdout, "\x1b[2J\x1b[?25l").and_then(|()| stdout.flush())
    } else {
        Ok(())
    };
    if let (true, Some(event)) = (output.is_ok(), &opened) {
        output = emit(args, event);
    }

    while output.is_ok() {
        tokio::select! {
            _ = tick.tick() => {
                if let Some(event) = controller.tick() {
                    output = emit(args, &event);
                }
                if args.limit_reached(controller.cycle_count(), started.elapsed()) {
                    break;
                }
            }
            _ = frame.tick(), if scene.is_some() => {
                if let Some(scene) = scene.as_mut() {
                    let label = controller.phase_label();
                    let stats = controller.statistics().display();
                    let out = scene.frame(controller.visual_mut(), &label, &stats);
                    output = write!(stdout, "\x1b[H{out}").and_then(|()| stdout.flush());
                }
            }
            res = &mut ctrl_c => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "failed to listen for ctrl-c");
                }
                break;
            }
        }
    }

    let completed = controller.stop();
    if let Err(e) = &output {
        tracing::warn!(error = %e, "output closed, ending session");
    }
    if scene.is_some() {
        if let Err(e) = writeln!(stdout, "\x1b[?25h").and_then(|()| stdout.flush()) {
            tracing::debug!(error = %e, "failed to restore cursor");
        }
    }
    completed
}

/// Print one event as a JSON line in `--json` mode.
fn emit(args: &SessionArgs, event: &Event) -> io::Result<()> {
    if args.json {
        let mut out = io::stdout().lock();
        serde_json::to_writer(&mut out, event)?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}
