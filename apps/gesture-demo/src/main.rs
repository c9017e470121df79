//! Replays the canonical drags against console views and a headless frame
//! loop, logging every transition. Exits with an error if a drag resolves
//! differently than expected.

mod views;

use std::rc::Rc;

use anyhow::{bail, Context};
use herodrag_core::{Clock, MonotonicClock, Runtime};
use herodrag_geometry::{Point, Vector2};
use herodrag_gesture::{
    DragSample, DraggableSurface, DriverEvent, FadeableOverlay, GestureConfig, Presentation,
    RecognizerArbiter, RecognizerRole, SurfaceHandles, TransitionDriver, TransitionHost,
};
use views::{DemoNavigator, DetailCard, MapContainer, Scrim};

const CARD_WIDTH: f32 = 390.0;
const FRAME_NANOS: u64 = 16_666_667;
const MAX_FRAMES: usize = 600;

struct Scenario {
    name: &'static str,
    role: RecognizerRole,
    /// `(dx, dy)` of each `Changed`, starting from a `Began` at the origin.
    path: &'static [(f32, f32)],
    velocity: (f32, f32),
    expected: Presentation,
    expected_navigation: &'static [&'static str],
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "pull the card down past the threshold",
        role: RecognizerRole::Content,
        path: &[(0.0, 40.0), (0.0, 120.0), (0.0, 200.0)],
        velocity: (0.0, 900.0),
        expected: Presentation::Dismissed,
        expected_navigation: &["dismiss"],
    },
    Scenario {
        name: "pull the card down a little and let go",
        role: RecognizerRole::Content,
        path: &[(0.0, 40.0), (0.0, 100.0)],
        velocity: (0.0, 300.0),
        expected: Presentation::Reverting,
        expected_navigation: &[],
    },
    Scenario {
        name: "scrub the side panel in",
        role: RecognizerRole::Content,
        path: &[(-60.0, 4.0), (-180.0, 8.0), (-250.0, 10.0)],
        velocity: (-700.0, 0.0),
        expected: Presentation::PanelFinishing,
        expected_navigation: &["reveal"],
    },
    Scenario {
        name: "start the side panel and change your mind",
        role: RecognizerRole::Content,
        path: &[(-60.0, 0.0), (-90.0, 0.0)],
        velocity: (-400.0, 0.0),
        expected: Presentation::PanelCancelling,
        expected_navigation: &["reveal"],
    },
    Scenario {
        name: "swipe the map back to the results",
        role: RecognizerRole::Container,
        path: &[(60.0, 0.0), (140.0, 6.0), (220.0, 10.0)],
        velocity: (800.0, 0.0),
        expected: Presentation::DismissedToAlternate,
        expected_navigation: &["alternate"],
    },
];

struct Outcome {
    presentation: Option<Presentation>,
    navigation: Vec<&'static str>,
    frames: usize,
}

fn replay(scenario: &Scenario, config: GestureConfig) -> anyhow::Result<Outcome> {
    let runtime = Runtime::default();
    let card = DetailCard::new(Point::new(0.0, 420.0), CARD_WIDTH);
    let scrim = Scrim::new();
    let map = MapContainer::new();
    let navigator = DemoNavigator::new(runtime.frame_clock(), config.panel_settle);
    let arbiter = RecognizerArbiter::shared();

    let handles = SurfaceHandles::new(&card)
        .with_overlay(&scrim)
        .with_container(&map);
    let host: Rc<dyn TransitionHost> = navigator.clone();
    let mut driver = TransitionDriver::new(
        scenario.role,
        &arbiter,
        handles,
        host,
        runtime.frame_clock(),
        config,
    );

    let velocity = Vector2::new(scenario.velocity.0, scenario.velocity.1);
    let mut samples = vec![DragSample::began(Vector2::ZERO, velocity)];
    samples.extend(
        scenario
            .path
            .iter()
            .map(|&(dx, dy)| DragSample::changed(Vector2::new(dx, dy), velocity)),
    );
    let last = scenario
        .path
        .last()
        .map(|&(dx, dy)| Vector2::new(dx, dy))
        .context("scenario has an empty path")?;
    samples.push(DragSample::ended(last, velocity));

    let mut presentation = None;
    for sample in samples {
        match driver.handle(sample) {
            DriverEvent::Rejected(rejection) => bail!("drag rejected: {rejection}"),
            DriverEvent::Detached => bail!("card went away mid-drag"),
            DriverEvent::Finished(done) => presentation = Some(done),
            _ => {}
        }
    }

    let mut frames = 0;
    let mut frame_time = 0;
    while runtime.has_frame_callbacks() {
        frames += 1;
        if frames > MAX_FRAMES {
            bail!("still animating after {MAX_FRAMES} frames");
        }
        frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(frame_time);
    }

    let rest = card.transform();
    log::info!(
        "card at rest: {} (scale {:.3}), scrim {:.2}, map masked: {}",
        rest.is_identity(),
        rest.scale,
        scrim.alpha(),
        map.is_masked()
    );

    Ok(Outcome {
        presentation,
        navigation: navigator.history(),
        frames,
    })
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = GestureConfig::default();
    let wall = MonotonicClock::new();
    let started = wall.now();
    let mut failures = 0;

    for scenario in SCENARIOS {
        log::info!(
            "--- {} ({:?}) at {}ms",
            scenario.name,
            scenario.role,
            wall.uptime_millis()
        );
        let outcome = replay(scenario, config)
            .with_context(|| format!("scenario '{}'", scenario.name))?;

        let as_expected = outcome.presentation == Some(scenario.expected)
            && outcome.navigation == scenario.expected_navigation;
        if as_expected {
            log::info!("{:?} after {} frames", scenario.expected, outcome.frames);
        } else {
            failures += 1;
            log::error!(
                "expected {:?} {:?}, got {:?} {:?}",
                scenario.expected,
                scenario.expected_navigation,
                outcome.presentation,
                outcome.navigation
            );
        }
    }

    log::info!(
        "{} scenarios replayed in {}ms",
        SCENARIOS.len(),
        wall.elapsed_millis(started)
    );
    if failures > 0 {
        bail!("{failures} scenario(s) resolved unexpectedly");
    }
    Ok(())
}
