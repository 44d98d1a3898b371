//! crossfade — a small card carousel driven by the transition scheduler.
//!
//! Each card has an opacity.  The scenario below fades cards in, then
//! changes its mind part-way through: later transitions on the same card
//! interrupt or silently cancel earlier ones.  When a card finishes fading
//! out, a listener queues a fade back in, registered between frames.
//!
//! Events are written to `output/crossfade/`.  Set `RUST_LOG=debug` to see
//! every scheduling decision.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Result, bail};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ts_core::{
    Clock, DriverConfig, Ease, EntityId, EntryIdAllocator, GroupId, ManualClock, Namespace, Time,
    TimingDefaults,
};
use ts_output::{CsvEventWriter, EventLogObserver};
use ts_schedule::{Driver, EventKind, Listeners, Scheduler, TransitionTarget, TweenFn};

// ── Scenario ──────────────────────────────────────────────────────────────────

const SCENARIO_JSON: &str = r#"{
    "driver":   { "frame_interval_ms": 16, "max_frames": 2000 },
    "defaults": { "delay_ms": 0, "duration_ms": 250 },
    "cards": 4,
    "transitions": [
        { "card": 0, "at_ms": 0,   "to": 1.0, "ease": "linear" },
        { "card": 1, "at_ms": 0,   "to": 1.0, "delay_ms": 100 },
        { "card": 2, "at_ms": 0,   "to": 1.0, "delay_ms": 400, "duration_ms": 200 },
        { "card": 2, "at_ms": 32,  "to": 0.5, "delay_ms": 100 },
        { "card": 0, "at_ms": 128, "to": 0.0, "duration_ms": 300 },
        { "card": 3, "at_ms": 0,   "to": 1.0, "namespace": "glow", "duration_ms": 500 },
        { "card": 3, "at_ms": 48,  "to": 0.0, "duration_ms": 0 }
    ]
}"#;

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    driver:      DriverConfig,
    #[serde(default)]
    defaults:    TimingDefaults,
    cards:       usize,
    transitions: Vec<TransitionPlan>,
}

#[derive(Debug, Clone, Deserialize)]
struct TransitionPlan {
    card:        u32,
    at_ms:       u64,
    to:          f64,
    #[serde(default)]
    namespace:   Namespace,
    delay_ms:    Option<u64>,
    duration_ms: Option<u64>,
    ease:        Option<String>,
}

fn parse_ease(name: Option<&str>) -> Result<Ease> {
    Ok(match name {
        None | Some("cubic") => Ease::cubic_in_out(),
        Some("linear") => Ease::linear(),
        Some(other) => bail!("unknown ease {other:?}"),
    })
}

// ── Cards ─────────────────────────────────────────────────────────────────────

/// Opacity per card, shared with the tweens that animate it.
type Cards = Rc<RefCell<Vec<f64>>>;

/// Registers planned transitions and wires their opacity tweens.
struct Stage {
    scheduler: Scheduler,
    ids:       EntryIdAllocator,
    defaults:  TimingDefaults,
    cards:     Cards,
}

impl Stage {
    fn register(&mut self, plan: &TransitionPlan, now: Time) -> Result<()> {
        let entity = EntityId(plan.card);
        let id = self.ids.next_id();
        let timing = self
            .defaults
            .timing_at(now)
            .delay(plan.delay_ms.unwrap_or(self.defaults.delay_ms))
            .duration(plan.duration_ms.unwrap_or(self.defaults.duration_ms))
            .ease(parse_ease(plan.ease.as_deref())?);

        self.scheduler
            .register_entry(entity, plan.namespace.clone(), id, entity.index(), GroupId(0), timing);

        let Some(entry) = self.scheduler.find_entry_mut(entity, &plan.namespace, id) else {
            bail!("transition {id} missing right after registration");
        };
        let cards = Rc::clone(&self.cards);
        let to = plan.to;
        entry.tween("opacity", move |target: &TransitionTarget| {
            // Start value is read when the transition starts, not when it
            // was registered.
            let from = cards.borrow()[target.entity.index()];
            if from == to {
                return None;
            }
            let index = target.entity.index();
            Some(Box::new(move |p: f64| cards.borrow_mut()[index] = from + (to - from) * p) as TweenFn)
        })?;
        Ok(())
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let scenario: Scenario = serde_json::from_str(SCENARIO_JSON)?;
    scenario.driver.validate()?;
    info!(
        cards       = scenario.cards,
        transitions = scenario.transitions.len(),
        frame_ms    = scenario.driver.frame_interval_ms,
        "scenario loaded"
    );
    for plan in &scenario.transitions {
        if plan.card as usize >= scenario.cards {
            bail!("transition targets card {} but only {} cards exist", plan.card, scenario.cards);
        }
    }

    let mut stage = Stage {
        scheduler: Scheduler::new(),
        ids:       EntryIdAllocator::new(),
        defaults:  scenario.defaults,
        cards:     Rc::new(RefCell::new(vec![0.0; scenario.cards])),
    };

    // Listeners: count starts, and queue a fade-in after every fade-out.
    let faded_out: Rc<RefCell<Vec<TransitionTarget>>> = Rc::default();
    let starts = Rc::new(RefCell::new(0usize));
    let mut listeners = Listeners::new();
    for card in 0..scenario.cards as u32 {
        let entity = EntityId(card);
        let starts = Rc::clone(&starts);
        listeners.on(entity, &Namespace::default(), EventKind::Start, "count", move |_, _| {
            *starts.borrow_mut() += 1;
        });
        let faded_out = Rc::clone(&faded_out);
        let cards = Rc::clone(&stage.cards);
        listeners.on(entity, &Namespace::default(), EventKind::End, "refade", move |target, _| {
            if cards.borrow()[target.entity.index()] == 0.0 {
                faded_out.borrow_mut().push(target.clone());
            }
        });
    }

    let out_dir = Path::new("output/crossfade");
    let log = EventLogObserver::new(CsvEventWriter::new(out_dir)?);
    let mut notifier = (listeners, log);

    let mut driver = Driver::new(ManualClock::default(), scenario.driver.clone())?;
    let mut plans = scenario.transitions.clone();
    plans.sort_by_key(|p| p.at_ms);
    let mut plans = plans.into_iter().peekable();

    // Phase 1: feed the scripted transitions as their time comes up.
    let mut frames = 0u64;
    while plans.peek().is_some() {
        let now = driver.clock().now();
        while let Some(plan) = plans.next_if(|p| p.at_ms <= now.0) {
            stage.register(&plan, now)?;
        }
        frames += driver.run_frames(1, &mut stage.scheduler, &mut notifier).frames;
    }

    // Phase 2: drain, re-registering fade-ins requested by listeners.
    loop {
        let requested: Vec<TransitionTarget> = faded_out.borrow_mut().drain(..).collect();
        if requested.is_empty() && stage.scheduler.is_idle() {
            break;
        }
        let now = driver.clock().now();
        for target in requested {
            let plan = TransitionPlan {
                card:        target.entity.0,
                at_ms:       now.0,
                to:          1.0,
                namespace:   target.namespace,
                delay_ms:    Some(50),
                duration_ms: None,
                ease:        None,
            };
            stage.register(&plan, now)?;
        }
        let report = driver.run(&mut stage.scheduler, &mut notifier)?;
        frames += report.frames;
    }

    let (_, mut log) = notifier;
    log.finish()?;
    if let Some(e) = log.take_error() {
        eprintln!("output error: {e}");
    }

    // Summary.
    println!("Finished at {} after {frames} frames", driver.clock().now());
    println!("  starts             : {}", starts.borrow());
    println!("  events written     : {}", log.events());
    println!("  output             : {}", out_dir.display());
    println!();
    println!("{:<6} {:<8}", "Card", "Opacity");
    println!("{}", "-".repeat(15));
    for (i, opacity) in stage.cards.borrow().iter().enumerate() {
        println!("{i:<6} {opacity:<8.3}");
    }

    Ok(())
}
