//! Phased intro animation.
//!
//! One periodic callback drives the whole sequence from a tick counter:
//!
//! ```text
//! counter:  -90 ........ 85 | 90 | 95 ........ 215 | 220
//! phase:    Intro           | Transitioning -> PanelActive | Done
//! work:     ease the arcs   | swap arcs for the panel | idle | cancel timer
//! ```
//!
//! Each tick, in order:
//! 1. While the counter is below the transition value and arcs exist, apply
//!    the easing curves to every arc.
//! 2. When the counter equals the transition value, tear the arcs down and
//!    build the control panel.
//! 3. Advance the counter; when it equals the end value the sequence is done
//!    and the timer registration should be cancelled.
//!
//! Both comparisons are exact. A [`Timeline`] whose step does not land on the
//! transition value never shows the panel, and one that does not land on the
//! end value never finishes.

use core::fmt;

use crate::config::layout::ARC_COUNT;
use crate::config::timing::{FINAL_TICK, TICK_START, TICK_STEP, TRANSITION_TICK};
use crate::easing::{arc_angles, rotation};
use crate::factory::{ArcSet, ControlPanelState, PANEL_WIDGET_COUNT, build_intro, build_panel, teardown_intro};
use crate::peripherals::BatterySensor;
use crate::scene::{Scene, SceneError};
use crate::timer::TimerControl;

/// Stage of the intro sequence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Arcs are animating.
    Intro,
    /// Arcs are being replaced by the panel (only observable on failure).
    Transitioning,
    /// Panel is shown; ticks only advance the counter.
    PanelActive,
    /// Sequence finished. Further ticks do nothing.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Intro => "intro",
            Self::Transitioning => "transitioning",
            Self::PanelActive => "panel",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Tick plan of the sequence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timeline {
    start: i32,
    step: i32,
    transition: i32,
    end: i32,
}

impl Timeline {
    /// -90 to 220 in steps of 5, panel at 90.
    pub const DEFAULT: Self = Self::new(TICK_START, TICK_STEP, TRANSITION_TICK, FINAL_TICK);

    /// Panics if `step` is not positive.
    pub const fn new(
        start: i32,
        step: i32,
        transition: i32,
        end: i32,
    ) -> Self {
        assert!(step > 0, "timeline step must be positive");
        Self {
            start,
            step,
            transition,
            end,
        }
    }

    #[inline]
    pub const fn start(&self) -> i32 { self.start }

    #[inline]
    pub const fn step(&self) -> i32 { self.step }

    #[inline]
    pub const fn transition(&self) -> i32 { self.transition }

    #[inline]
    pub const fn end(&self) -> i32 { self.end }

    /// Whether the counter lands exactly on both the transition and the end.
    pub const fn is_aligned(&self) -> bool {
        self.start <= self.transition
            && self.transition < self.end
            && (self.transition - self.start) % self.step == 0
            && (self.end - self.start) % self.step == 0
    }
}

impl Default for Timeline {
    fn default() -> Self { Self::DEFAULT }
}

const _: () = assert!(Timeline::DEFAULT.is_aligned());

/// Counter and phase of a running sequence.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AnimationContext {
    pub tick: i32,
    pub phase: Phase,
}

/// Result of one tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TickOutcome {
    /// Set on the tick that built the control panel.
    pub panel: Option<ControlPanelState>,
    /// Whether the timer driving the sequence should keep running.
    pub control: TimerControl,
}

impl TickOutcome {
    const CONTINUE: Self = Self {
        panel: None,
        control: TimerControl::Continue,
    };

    const CANCEL: Self = Self {
        panel: None,
        control: TimerControl::Cancel,
    };
}

/// The intro animation state machine.
#[derive(Debug)]
pub struct Sequencer {
    ctx: AnimationContext,
    timeline: Timeline,
    arcs: Option<ArcSet>,
}

impl Sequencer {
    /// Create the intro arcs and start at the default timeline.
    pub fn start(scene: &mut Scene) -> Result<Self, SceneError> { Self::with_timeline(scene, Timeline::DEFAULT) }

    /// Create the intro arcs and start at `timeline`.
    pub fn with_timeline(
        scene: &mut Scene,
        timeline: Timeline,
    ) -> Result<Self, SceneError> {
        if !timeline.is_aligned() {
            warn!(
                "sequencer: timeline {}..{} step {} misses transition {} or end",
                timeline.start, timeline.end, timeline.step, timeline.transition
            );
        }

        let arcs = build_intro(scene)?;
        info!("sequencer: intro started at tick {}", timeline.start);
        Ok(Self {
            ctx: AnimationContext {
                tick: timeline.start,
                phase: Phase::Intro,
            },
            timeline,
            arcs: Some(arcs),
        })
    }

    #[inline]
    pub fn phase(&self) -> Phase { self.ctx.phase }

    /// Current counter value.
    #[inline]
    pub fn counter(&self) -> i32 { self.ctx.tick }

    #[inline]
    pub fn context(&self) -> AnimationContext { self.ctx }

    #[inline]
    pub fn timeline(&self) -> Timeline { self.timeline }

    #[inline]
    pub fn arcs(&self) -> Option<&ArcSet> { self.arcs.as_ref() }

    #[inline]
    pub fn is_done(&self) -> bool { self.ctx.phase == Phase::Done }

    /// Run one tick of the sequence.
    ///
    /// A failed transition aborts the sequence: the phase becomes
    /// [`Phase::Done`] and the error is returned. The scene is left as it was
    /// before the tick.
    pub fn tick<S>(
        &mut self,
        scene: &mut Scene,
        sensor: &mut S,
    ) -> Result<TickOutcome, SceneError>
    where
        S: BatterySensor + ?Sized,
    {
        if self.is_done() {
            return Ok(TickOutcome::CANCEL);
        }

        let tick = self.ctx.tick;

        if tick < self.timeline.transition {
            self.animate_arcs(scene, tick);
        }

        let mut outcome = TickOutcome::CONTINUE;
        if tick == self.timeline.transition {
            outcome.panel = Some(self.transition(scene, sensor)?);
        }

        self.ctx.tick = tick.saturating_add(self.timeline.step);
        if self.ctx.tick == self.timeline.end {
            self.set_phase(Phase::Done);
            outcome.control = TimerControl::Cancel;
        }

        Ok(outcome)
    }

    fn animate_arcs(
        &self,
        scene: &mut Scene,
        tick: i32,
    ) {
        let Some(arcs) = &self.arcs else {
            return;
        };
        let angles = arc_angles(tick);
        for (i, &id) in arcs.ids().iter().enumerate() {
            scene.set_arc_angles(id, angles);
            scene.set_arc_rotation(id, rotation(tick, i));
        }
    }

    fn transition<S>(
        &mut self,
        scene: &mut Scene,
        sensor: &mut S,
    ) -> Result<ControlPanelState, SceneError>
    where
        S: BatterySensor + ?Sized,
    {
        self.set_phase(Phase::Transitioning);

        // Check room for the panel before anything is deleted
        let freed = self.arcs.as_ref().map_or(0, ArcSet::len);
        if let Err(e) = scene.reserve(PANEL_WIDGET_COUNT.saturating_sub(freed)) {
            warn!("sequencer: no room for the control panel, aborting");
            self.set_phase(Phase::Done);
            return Err(e);
        }

        if let Some(arcs) = self.arcs.take() {
            teardown_intro(scene, arcs);
        }

        match build_panel(scene, sensor) {
            Ok(panel) => {
                self.set_phase(Phase::PanelActive);
                Ok(panel)
            }
            Err(e) => {
                self.set_phase(Phase::Done);
                Err(e)
            }
        }
    }

    fn set_phase(
        &mut self,
        phase: Phase,
    ) {
        if self.ctx.phase != phase {
            info!("sequencer: {} -> {} at tick {}", self.ctx.phase, phase, self.ctx.tick);
            self.ctx.phase = phase;
        }
    }
}

const _: () = assert!(PANEL_WIDGET_COUNT <= crate::config::layout::MAX_WIDGETS - 1);
const _: () = assert!(ARC_COUNT + 1 <= crate::config::layout::MAX_WIDGETS);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::build_logo;
    use crate::scene::WidgetKind;

    struct Battery;

    impl BatterySensor for Battery {
        fn read_level(&mut self) -> i8 { 64 }
    }

    /// Tick until the sequencer asks for cancellation, collecting outcomes.
    fn run(
        seq: &mut Sequencer,
        scene: &mut Scene,
    ) -> std::vec::Vec<TickOutcome> {
        let mut outcomes = std::vec::Vec::new();
        loop {
            let outcome = seq.tick(scene, &mut Battery).unwrap();
            outcomes.push(outcome);
            if outcome.control == TimerControl::Cancel {
                return outcomes;
            }
            assert!(outcomes.len() < 10_000, "Sequence did not terminate");
        }
    }

    fn count_arcs(scene: &Scene) -> usize {
        scene.iter().filter(|(_, w)| matches!(w.kind, WidgetKind::Arc(_))).count()
    }

    #[test]
    fn test_default_timeline_aligned() {
        assert!(Timeline::DEFAULT.is_aligned());
        assert!(!Timeline::new(-90, 7, 90, 225).is_aligned(), "Step 7 misses the transition");
        assert!(!Timeline::new(-90, 5, 90, 222).is_aligned(), "End 222 is never reached");
    }

    #[test]
    fn test_first_tick_animates_arcs() {
        let mut scene = Scene::new();
        let mut seq = Sequencer::start(&mut scene).unwrap();
        assert_eq!(
            seq.context(),
            AnimationContext {
                tick: -90,
                phase: Phase::Intro
            },
            "Sequence should start at the timeline start in Intro"
        );

        seq.tick(&mut scene, &mut Battery).unwrap();
        assert_eq!(seq.counter(), -85, "One tick advances by one step");

        let ids = seq.arcs().unwrap().ids().to_vec();
        for (i, id) in ids.into_iter().enumerate() {
            let arc = scene.arc(id).unwrap();
            assert_eq!(arc.angles.start, 0, "Start angle holds at zero for negative ticks");
            assert_eq!(arc.rotation, rotation(-90, i));
        }
    }

    #[test]
    fn test_single_transition_at_90() {
        let mut scene = Scene::new();
        let mut seq = Sequencer::start(&mut scene).unwrap();
        let outcomes = run(&mut seq, &mut scene);

        let panels: std::vec::Vec<usize> = outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| o.panel.is_some())
            .map(|(i, _)| i)
            .collect();
        // Ticks -90, -85, ..., 90: the transition is the 37th tick
        assert_eq!(panels, [36], "Panel should be built exactly once, on tick 90");
        assert_eq!(count_arcs(&scene), 0, "All arcs should be gone");
        assert_eq!(scene.len(), PANEL_WIDGET_COUNT);
    }

    #[test]
    fn test_terminates_at_220() {
        let mut scene = Scene::new();
        let mut seq = Sequencer::start(&mut scene).unwrap();
        let outcomes = run(&mut seq, &mut scene);

        // (220 - -90) / 5 = 62 ticks
        assert_eq!(outcomes.len(), 62);
        assert_eq!(seq.counter(), 220);
        assert_eq!(seq.phase(), Phase::Done);
    }

    #[test]
    fn test_inert_after_done() {
        let mut scene = Scene::new();
        let mut seq = Sequencer::start(&mut scene).unwrap();
        run(&mut seq, &mut scene);
        scene.take_dirty();

        for _ in 0..5 {
            let outcome = seq.tick(&mut scene, &mut Battery).unwrap();
            assert_eq!(outcome, TickOutcome::CANCEL);
        }
        assert_eq!(seq.counter(), 220, "Counter must not move after the end");
        assert!(!scene.take_dirty(), "Scene must not change after the end");
    }

    #[test]
    fn test_phase_progression() {
        let mut scene = Scene::new();
        let mut seq = Sequencer::start(&mut scene).unwrap();

        while seq.counter() < 90 {
            seq.tick(&mut scene, &mut Battery).unwrap();
            assert_eq!(seq.phase(), Phase::Intro);
        }
        seq.tick(&mut scene, &mut Battery).unwrap();
        assert_eq!(seq.phase(), Phase::PanelActive);
        assert!(seq.arcs().is_none());
    }

    #[test]
    fn test_arcs_frozen_at_transition_tick() {
        let mut scene = Scene::new();
        let mut seq = Sequencer::start(&mut scene).unwrap();
        while seq.counter() < 90 {
            seq.tick(&mut scene, &mut Battery).unwrap();
        }

        // The last animated tick was 85
        let id = seq.arcs().unwrap().ids()[0];
        assert_eq!(scene.arc(id).unwrap().angles, arc_angles(85));
    }

    #[test]
    fn test_misaligned_timeline_skips_transition() {
        let mut scene = Scene::new();
        let timeline = Timeline::new(-90, 7, 90, 225);
        let mut seq = Sequencer::with_timeline(&mut scene, timeline).unwrap();
        assert_eq!(seq.timeline(), timeline, "Custom timeline should be kept as given");
        let outcomes = run(&mut seq, &mut scene);

        assert!(outcomes.iter().all(|o| o.panel.is_none()), "Transition must never fire");
        assert_eq!(outcomes.len(), 45);
        assert_eq!(count_arcs(&scene), ARC_COUNT, "Arcs stay when the transition is skipped");
        assert_eq!(seq.phase(), Phase::Done);
    }

    #[test]
    fn test_transition_without_room_aborts() {
        let mut scene = Scene::new();
        let mut seq = Sequencer::with_timeline(&mut scene, Timeline::new(85, 5, 90, 100)).unwrap();
        // 3 arcs + 5 logos leave no free slot; the panel needs 2 more than the arcs free
        for _ in 0..5 {
            build_logo(&mut scene).unwrap();
        }

        seq.tick(&mut scene, &mut Battery).unwrap();
        assert_eq!(seq.tick(&mut scene, &mut Battery), Err(SceneError::Full));
        assert_eq!(seq.phase(), Phase::Done);
        assert_eq!(count_arcs(&scene), ARC_COUNT, "Arcs must survive a failed transition");
        assert_eq!(seq.tick(&mut scene, &mut Battery), Ok(TickOutcome::CANCEL));
    }
}
