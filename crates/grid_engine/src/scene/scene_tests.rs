//! Scenario tests for the scene core: registry lifecycle, frame passes and
//! click dispatch, driven through `SceneManager` with test doubles.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::config::SceneConfig;
    use crate::entity::{Capabilities, Entity, EntityCore, EntityId, EntityKind};
    use crate::foundation::math::GridPoint;
    use crate::foundation::time::ManualClock;
    use crate::input::ClickOutcome;
    use crate::render::{Color, CommandRenderer, GridMetrics, Renderer};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    const PROBE: EntityKind = EntityKind::new("Probe");

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Entity that writes every callback it receives to a shared journal
    struct Probe {
        core: EntityCore,
        label: &'static str,
        journal: Journal,
        fail_update: bool,
        click_result: EntityResult<bool>,
        visibility: Option<bool>,
        destroy_self_on_update: bool,
        stop_on_update: bool,
        redraw_on_update: bool,
        reorder_on_update: Option<i32>,
        spawn: Option<Box<dyn Entity>>,
    }

    impl Probe {
        fn new(label: &'static str, order: i32, journal: &Journal) -> Self {
            Self {
                core: EntityCore::new(0.0, 0.0, 1.0, 1.0).with_sorting_order(order),
                label,
                journal: Rc::clone(journal),
                fail_update: false,
                click_result: Ok(false),
                visibility: None,
                destroy_self_on_update: false,
                stop_on_update: false,
                redraw_on_update: false,
                reorder_on_update: None,
                spawn: None,
            }
        }

        fn at(mut self, x: f32, y: f32) -> Self {
            self.core.go_to(x, y);
            self
        }

        fn disabled(mut self) -> Self {
            self.core.set_enabled(false);
            self
        }

        fn clicks(mut self, result: EntityResult<bool>) -> Self {
            self.click_result = result;
            self
        }

        fn log(&self, entry: String) {
            self.journal.borrow_mut().push(entry);
        }
    }

    impl Entity for Probe {
        fn kind(&self) -> EntityKind {
            PROBE
        }

        fn core(&self) -> &EntityCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut EntityCore {
            &mut self.core
        }

        fn capabilities(&self) -> Capabilities {
            if self.visibility.is_some() {
                Capabilities::RENDERS_IMAGE
            } else {
                Capabilities::empty()
            }
        }

        fn is_visible(&self) -> bool {
            self.visibility.unwrap_or(true)
        }

        fn on_start(&mut self, ctx: &mut SceneContext) -> EntityResult {
            let registered = ctx.registry().by_id(self.id()).is_some();
            let probes = ctx.registry().by_kind(PROBE).len();
            self.log(format!("{}:start(registered={}, probes={})", self.label, registered, probes));
            Ok(())
        }

        fn on_destroy(&mut self, ctx: &mut SceneContext) -> EntityResult {
            let registered = ctx.registry().contains(self.id());
            self.log(format!("{}:destroy(registered={})", self.label, registered));
            Ok(())
        }

        fn update(&mut self, delta_time: f64, ctx: &mut SceneContext) -> EntityResult {
            self.log(format!("{}:update({})", self.label, delta_time));
            if let Some(child) = self.spawn.take() {
                ctx.add_boxed(child)?;
            }
            if self.destroy_self_on_update {
                ctx.destroy(self.id())?;
            }
            if self.stop_on_update {
                ctx.stop();
            }
            if self.redraw_on_update {
                ctx.request_redraw();
            }
            if let Some(order) = self.reorder_on_update.take() {
                self.core.set_sorting_order(order);
                ctx.update_sorting_layer();
            }
            if self.fail_update {
                return Err(EntityError::custom("update failed"));
            }
            Ok(())
        }

        fn fixed_update(&mut self, delta_time: f64, _ctx: &mut SceneContext) -> EntityResult {
            self.log(format!("{}:fixed({})", self.label, delta_time));
            Ok(())
        }

        fn on_draw(&mut self, renderer: &mut dyn Renderer, _ctx: &mut SceneContext) -> EntityResult {
            self.log(format!("{}:draw", self.label));
            let core = &self.core;
            renderer.draw_grid_rect(core.x(), core.y(), core.width(), core.height(), Color::WHITE, None);
            Ok(())
        }

        fn on_mouse_click(&mut self, position: GridPoint, _ctx: &mut SceneContext) -> EntityResult<bool> {
            self.log(format!("{}:click({},{})", self.label, position.x, position.y));
            self.click_result.clone()
        }
    }

    struct Rig {
        scene: SceneManager<CommandRenderer>,
        frames: QueuedFrameSource,
        clock: ManualClock,
        faults: FaultLog,
        journal: Journal,
    }

    impl Rig {
        fn new() -> Self {
            crate::foundation::logging::init_for_tests();
            let config = SceneConfig::default();
            let frames = QueuedFrameSource::new();
            let clock = ManualClock::new(0.0);
            let faults = FaultLog::new();
            let renderer = CommandRenderer::new(GridMetrics::from_config(&config));
            let scene = SceneManager::new(&config, renderer, Box::new(clock.clone()), Box::new(frames.clone()))
                .unwrap()
                .with_faults(Box::new(faults.clone()));
            Self { scene, frames, clock, faults, journal: Journal::default() }
        }

        fn probe(&self, label: &'static str, order: i32) -> Probe {
            Probe::new(label, order, &self.journal)
        }

        fn add(&mut self, probe: Probe) -> EntityId {
            self.scene.add(probe).unwrap()
        }

        fn take_journal(&self) -> Vec<String> {
            std::mem::take(&mut *self.journal.borrow_mut())
        }

        fn pump(&mut self) -> Option<FrameKind> {
            let kind = self.frames.pop()?;
            self.scene.on_frame(kind);
            Some(kind)
        }
    }

    fn assert_sorted(registry: &SceneRegistry) {
        let orders: Vec<i32> = registry.iter().map(|view| view.core().sorting_order()).collect();
        assert!(orders.windows(2).all(|pair| pair[0] <= pair[1]), "unsorted: {orders:?}");
    }

    #[test]
    fn test_registry_tracks_adds_and_destroys() {
        let mut rig = Rig::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut expected = HashSet::new();

        for step in 0..200 {
            if expected.is_empty() || rng.gen_bool(0.6) {
                let id = rig.add(rig.probe("p", rng.gen_range(-3..4)));
                assert!(expected.insert(id));
            } else if step % 2 == 0 {
                let index = rng.gen_range(0..rig.scene.registry().len());
                let id = rig.scene.registry().get(index).unwrap().id();
                rig.scene.destroy(index).unwrap();
                assert!(expected.remove(&id));
            } else {
                let id = *expected.iter().next().unwrap();
                rig.scene.destroy(id).unwrap();
                expected.remove(&id);
                assert_eq!(rig.scene.destroy(id), Err(SceneError::NotFound(id)));
            }

            let actual: HashSet<EntityId> = rig.scene.registry().iter().map(|view| view.id()).collect();
            assert_eq!(actual, expected);
            assert_eq!(rig.scene.registry().len(), expected.len());
            assert_sorted(rig.scene.registry());
        }
    }

    #[test]
    fn test_on_start_and_on_destroy_see_the_entity() {
        let mut rig = Rig::new();
        rig.add(rig.probe("a", 0));
        let b = rig.add(rig.probe("b", 0));
        rig.scene.destroy(b).unwrap();

        assert_eq!(
            rig.take_journal(),
            vec![
                "a:start(registered=true, probes=1)",
                "b:start(registered=true, probes=2)",
                "b:destroy(registered=true)",
            ]
        );
        assert!(!rig.scene.registry().contains(b));
    }

    #[test]
    fn test_registration_labels_with_kind() {
        let mut rig = Rig::new();
        let mut probe = rig.probe("a", 0);
        probe.core.set_name("custom");
        let id = rig.add(probe);
        assert_eq!(rig.scene.registry().by_id(id).unwrap().name(), "Probe");
        assert_eq!(rig.scene.registry().by_name("Probe").len(), 1);
    }

    #[test]
    fn test_failed_on_start_keeps_entity_registered() {
        struct Broken {
            core: EntityCore,
        }

        impl Entity for Broken {
            fn kind(&self) -> EntityKind {
                EntityKind::new("Broken")
            }

            fn core(&self) -> &EntityCore {
                &self.core
            }

            fn core_mut(&mut self) -> &mut EntityCore {
                &mut self.core
            }

            fn on_start(&mut self, _ctx: &mut SceneContext) -> EntityResult {
                Err(EntityError::custom("no assets"))
            }
        }

        let mut rig = Rig::new();
        let core = EntityCore::new(0.0, 0.0, 1.0, 1.0);
        let id = core.id();
        let err = rig.scene.add(Broken { core }).unwrap_err();

        assert_eq!(
            err,
            SceneError::Lifecycle {
                hook: Hook::OnStart,
                kind: EntityKind::new("Broken"),
                id,
                source: EntityError::custom("no assets"),
            }
        );
        assert!(rig.scene.registry().contains(id));
    }

    #[test]
    fn test_delta_time_between_ticks() {
        let mut rig = Rig::new();
        rig.add(rig.probe("a", 0));
        rig.take_journal();

        rig.scene.tick(100.0);
        rig.scene.tick(116.5);

        assert_eq!(
            rig.take_journal(),
            vec!["a:update(100)", "a:fixed(100)", "a:update(16.5)", "a:fixed(16.5)"]
        );
        assert!((rig.scene.frame().frame_time() - 16.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disabled_entity_ends_the_tick() {
        let mut rig = Rig::new();
        rig.add(rig.probe("a", 0));
        rig.add(rig.probe("b", 1).disabled());
        rig.add(rig.probe("c", 2));
        rig.take_journal();
        rig.scene.request_redraw();

        rig.scene.start();
        rig.pump();
        rig.clock.set(10.0);
        rig.pump();

        assert_eq!(rig.take_journal(), vec!["a:update(10)"]);
        assert!(rig.scene.frame().redraw_requested());
        assert!(rig.scene.renderer().commands().is_empty());
        assert!(rig.frames.is_empty());
        assert!(rig.scene.is_running());
    }

    #[test]
    fn test_halted_loop_restarts_only_after_stop() {
        let mut rig = Rig::new();
        let blocker = rig.add(rig.probe("a", 0).disabled());
        rig.take_journal();

        rig.scene.start();
        rig.pump();
        rig.clock.set(10.0);
        assert_eq!(rig.pump(), Some(FrameKind::Tick));
        assert!(rig.frames.is_empty());

        rig.scene.start();
        assert!(rig.frames.is_empty());

        rig.scene.registry_mut().get_mut(blocker).unwrap().core_mut().set_enabled(true);
        rig.scene.stop();
        rig.scene.start();
        assert_eq!(rig.pump(), Some(FrameKind::Prime));
        rig.clock.set(30.0);
        assert_eq!(rig.pump(), Some(FrameKind::Tick));

        assert_eq!(rig.take_journal(), vec!["a:update(20)", "a:fixed(20)"]);
        assert_eq!(rig.frames.pending(), 1);
    }

    #[test]
    fn test_disabled_bottom_entity_blocks_everything() {
        let mut rig = Rig::new();
        rig.add(rig.probe("a", 0).disabled());
        rig.add(rig.probe("b", 1));
        rig.take_journal();

        rig.scene.tick(5.0);
        assert!(rig.take_journal().is_empty());
    }

    #[test]
    fn test_update_fault_does_not_stop_the_pass() {
        let mut rig = Rig::new();
        let mut failing = rig.probe("a", 0);
        failing.fail_update = true;
        let a = rig.add(failing);
        rig.add(rig.probe("b", 1));
        rig.take_journal();

        rig.scene.tick(1.0);

        assert_eq!(rig.take_journal(), vec!["a:update(1)", "b:update(1)", "a:fixed(1)", "b:fixed(1)"]);
        assert_eq!(
            rig.faults.faults(),
            vec![Fault { hook: Hook::Update, kind: PROBE, id: a, error: EntityError::custom("update failed") }]
        );
    }

    #[test]
    fn test_redraw_runs_one_draw_pass() {
        let mut rig = Rig::new();
        rig.add(rig.probe("a", 0));
        rig.add(rig.probe("b", 1));
        rig.take_journal();

        rig.scene.request_redraw();
        rig.scene.tick(1.0);
        assert!(!rig.scene.frame().redraw_requested());
        rig.scene.tick(2.0);

        let draws: Vec<String> = rig.take_journal().into_iter().filter(|entry| entry.ends_with("draw")).collect();
        assert_eq!(draws, vec!["a:draw", "b:draw"]);
        assert_eq!(rig.scene.renderer_mut().take_commands().len(), 2);
    }

    #[test]
    fn test_redraw_requested_during_update_draws_same_tick() {
        let mut rig = Rig::new();
        let mut probe = rig.probe("a", 0);
        probe.redraw_on_update = true;
        rig.add(probe);
        rig.take_journal();

        rig.scene.tick(1.0);
        assert_eq!(rig.take_journal(), vec!["a:update(1)", "a:fixed(1)", "a:draw"]);
    }

    #[test]
    fn test_self_destroy_is_deferred_until_callback_returns() {
        let mut rig = Rig::new();
        let mut doomed = rig.probe("a", 0);
        doomed.destroy_self_on_update = true;
        let a = rig.add(doomed);
        rig.add(rig.probe("b", 1));
        rig.take_journal();

        rig.scene.tick(3.0);

        assert_eq!(
            rig.take_journal(),
            vec!["a:update(3)", "a:destroy(registered=true)", "b:update(3)", "b:fixed(3)"]
        );
        assert!(!rig.scene.registry().contains(a));
        assert!(rig.faults.is_empty());
    }

    #[test]
    fn test_entity_added_mid_tick_waits_for_next_tick() {
        let mut rig = Rig::new();
        let mut parent = rig.probe("parent", 0);
        parent.spawn = Some(Box::new(rig.probe("child", -10)));
        rig.add(parent);
        rig.take_journal();

        rig.scene.tick(1.0);
        assert_eq!(
            rig.take_journal(),
            vec!["parent:update(1)", "child:start(registered=true, probes=2)", "parent:fixed(1)"]
        );

        rig.scene.tick(2.0);
        assert_eq!(
            rig.take_journal(),
            vec!["child:update(1)", "parent:update(1)", "child:fixed(1)", "parent:fixed(1)"]
        );
    }

    #[test]
    fn test_double_start_runs_a_single_loop() {
        let mut rig = Rig::new();
        rig.add(rig.probe("a", 0));
        rig.take_journal();

        rig.scene.start();
        rig.scene.start();
        assert_eq!(rig.frames.pending(), 1);

        for frame in 1..=4 {
            rig.clock.advance(16.0);
            rig.pump();
            assert_eq!(rig.frames.pending(), 1, "frame {frame}");
        }
        assert!(rig.scene.is_running());

        let updates = rig.take_journal().iter().filter(|entry| entry.contains("update")).count();
        assert_eq!(updates, 3);
    }

    #[test]
    fn test_stop_from_callback_ends_loop() {
        let mut rig = Rig::new();
        let mut probe = rig.probe("a", 0);
        probe.stop_on_update = true;
        rig.add(probe);

        rig.scene.start();
        assert_eq!(rig.pump(), Some(FrameKind::Prime));
        assert_eq!(rig.pump(), Some(FrameKind::Tick));

        assert!(!rig.scene.is_running());
        assert!(rig.frames.is_empty());
    }

    #[test]
    fn test_click_skips_lowest_entity() {
        let mut rig = Rig::new();
        rig.add(rig.probe("a", 0));
        let b = rig.add(rig.probe("b", 1));
        rig.take_journal();

        assert_eq!(rig.scene.click(10.0, 10.0), ClickOutcome::Dropped);
        assert_eq!(rig.take_journal(), vec!["b:click(0,0)"]);
        assert!(rig.scene.registry().contains(b));
    }

    #[test]
    fn test_single_entity_never_receives_clicks() {
        let mut rig = Rig::new();
        rig.add(rig.probe("c", 0).clicks(Ok(true)));
        rig.take_journal();

        for (x, y) in [(0.0, 0.0), (10.0, 10.0), (32.0, 32.0), (500.0, 3.0)] {
            assert_eq!(rig.scene.click(x, y), ClickOutcome::Dropped);
        }
        assert!(rig.take_journal().is_empty());
    }

    #[test]
    fn test_click_falls_through_until_handled() {
        let mut rig = Rig::new();
        rig.add(rig.probe("floor", 0).clicks(Ok(true)));
        let handler = rig.add(rig.probe("handler", 1).clicks(Ok(true)));
        rig.add(rig.probe("glass", 2).clicks(Ok(false)));
        rig.take_journal();

        assert_eq!(rig.scene.click(5.0, 5.0), ClickOutcome::Handled(handler));
        assert_eq!(rig.take_journal(), vec!["glass:click(0,0)", "handler:click(0,0)"]);
    }

    #[test]
    fn test_click_skips_hidden_disabled_and_missed_entities() {
        let mut rig = Rig::new();
        rig.add(rig.probe("floor", 0));
        let target = rig.add(rig.probe("target", 1).at(2.0, 1.0).clicks(Ok(true)));
        let mut hidden = rig.probe("hidden", 2).at(2.0, 1.0).clicks(Ok(true));
        hidden.visibility = Some(false);
        rig.add(hidden);
        rig.add(rig.probe("disabled", 3).at(2.0, 1.0).clicks(Ok(true)).disabled());
        rig.add(rig.probe("elsewhere", 4).at(5.0, 5.0).clicks(Ok(true)));
        rig.take_journal();

        // bottom-right corner of cell (2, 1) is inside the box
        assert_eq!(rig.scene.click(96.0, 64.0), ClickOutcome::Handled(target));
        assert_eq!(rig.take_journal(), vec!["target:click(3,2)"]);

        assert_eq!(rig.scene.click(70.0, 40.0), ClickOutcome::Handled(target));
        assert_eq!(rig.take_journal(), vec!["target:click(2,1)"]);
    }

    #[test]
    fn test_click_fault_counts_as_unhandled() {
        let mut rig = Rig::new();
        rig.add(rig.probe("floor", 0));
        let below = rig.add(rig.probe("below", 1).clicks(Ok(true)));
        let broken = rig.add(rig.probe("broken", 2).clicks(Err(EntityError::custom("bad click"))));
        rig.take_journal();

        assert_eq!(rig.scene.click(1.0, 1.0), ClickOutcome::Handled(below));
        assert_eq!(rig.take_journal(), vec!["broken:click(0,0)", "below:click(0,0)"]);

        let faults = rig.faults.faults();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].hook, Hook::OnMouseClick);
        assert_eq!(faults[0].id, broken);
    }

    #[test]
    fn test_sorting_order_change_needs_explicit_resort() {
        let mut rig = Rig::new();
        let a = rig.add(rig.probe("a", 0));
        rig.add(rig.probe("b", 1));
        rig.take_journal();

        rig.scene.registry_mut().get_mut(a).unwrap().core_mut().set_sorting_order(9);
        rig.scene.tick(1.0);
        assert_eq!(rig.take_journal()[..2], ["a:update(1)", "b:update(1)"]);

        rig.scene.update_sorting_layer();
        rig.scene.tick(2.0);
        assert_eq!(rig.take_journal()[..2], ["b:update(1)", "a:update(1)"]);
        assert_eq!(rig.scene.registry().index_of(a), Some(1));
    }

    #[test]
    fn test_entity_resorting_itself_from_update() {
        let mut rig = Rig::new();
        let mut mover = rig.probe("a", 0);
        mover.reorder_on_update = Some(5);
        let a = rig.add(mover);
        rig.add(rig.probe("b", 1));
        rig.take_journal();

        rig.scene.tick(1.0);
        assert_sorted(rig.scene.registry());
        assert_eq!(rig.scene.registry().index_of(a), Some(1));

        rig.take_journal();
        rig.scene.tick(2.0);
        assert_eq!(rig.take_journal()[..2], ["b:update(1)", "a:update(1)"]);
    }

    #[test]
    fn test_viewport_in_config_fits_canvas() {
        let config = SceneConfig { viewport: Some((800, 600)), ..SceneConfig::default() };
        let renderer = CommandRenderer::new(GridMetrics::from_config(&config));
        let scene = SceneManager::new(
            &config,
            renderer,
            Box::new(ManualClock::new(0.0)),
            Box::new(QueuedFrameSource::new()),
        )
        .unwrap();

        // 16x16 grid: min(800 / 16, 600 / 16) = 37.5
        assert!((scene.renderer().grid_pixel_length() - 37.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SceneConfig { canvas_fraction: 0.0, ..SceneConfig::default() };
        let renderer = CommandRenderer::new(GridMetrics::from_config(&SceneConfig::default()));
        let result = SceneManager::new(
            &config,
            renderer,
            Box::new(ManualClock::new(0.0)),
            Box::new(QueuedFrameSource::new()),
        );
        assert!(matches!(result, Err(SceneError::InvalidArgument(_))));
    }
}
