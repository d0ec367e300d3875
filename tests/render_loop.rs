mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration as StdDuration, Instant as StdInstant};

    use myrtio_frame_engine::{
        Animation, Duration, FrameMode, OutputDriver, PassOutcome, Pixel, RenderTask, Renderer,
        RendererConfig, Rgb, render_pass,
    };

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[derive(Clone, Default)]
    struct RecordingDriver {
        writes: Arc<Mutex<Vec<Vec<Rgb>>>>,
    }

    impl RecordingDriver {
        fn writes(&self) -> Vec<Vec<Rgb>> {
            self.writes.lock().unwrap().clone()
        }

        fn last_write(&self) -> Vec<Rgb> {
            self.writes.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.writes.lock().unwrap().push(colors.to_vec());
        }
    }

    fn renderer(frame_delay: Duration, repeat: bool) -> (Renderer<RecordingDriver, 8>, RecordingDriver) {
        let driver = RecordingDriver::default();
        let config = RendererConfig {
            led_count: 3,
            frame_delay,
            repeat_delay: Duration::from_millis(1),
            peak_brightness: 1.0,
            repeat,
            ..RendererConfig::default()
        };
        (Renderer::new(driver.clone(), &config), driver)
    }

    fn gray(value: u8) -> Rgb {
        Rgb::new(value, value, value)
    }

    fn stepping_animation(name: &str) -> Animation {
        Animation::new(
            name,
            vec![
                vec![Pixel::gray(0, 10)],
                vec![Pixel::gray(1, 20)],
                vec![Pixel::gray(2, 30)],
            ],
        )
    }

    #[test]
    fn test_idle_when_stopped_or_empty() {
        let (renderer, driver) = renderer(Duration::from_millis(1), true);
        assert_eq!(render_pass(&renderer), PassOutcome::Idle);

        renderer.set_running(true);
        assert_eq!(render_pass(&renderer), PassOutcome::Idle);
        assert!(driver.writes().is_empty());
    }

    #[test]
    fn test_pass_plays_every_frame_in_order() {
        let (renderer, driver) = renderer(Duration::from_millis(1), true);
        renderer.set_animation(stepping_animation("Steps"));

        assert_eq!(render_pass(&renderer), PassOutcome::Completed);
        assert!(renderer.is_running());
        assert_eq!(
            driver.writes(),
            vec![
                vec![gray(10), BLACK, BLACK],
                vec![BLACK, gray(20), BLACK],
                vec![BLACK, BLACK, gray(30)],
            ]
        );
    }

    #[test]
    fn test_pass_without_repeat_finishes() {
        let (renderer, driver) = renderer(Duration::from_millis(1), false);
        renderer.set_animation(stepping_animation("Once"));

        assert_eq!(render_pass(&renderer), PassOutcome::Finished);
        assert!(!renderer.is_running());
        assert!(!renderer.exit_early());
        assert_eq!(driver.writes().len(), 3);

        assert_eq!(render_pass(&renderer), PassOutcome::Idle);
        assert_eq!(driver.writes().len(), 3);
    }

    #[test]
    fn test_overlay_mode_keeps_previous_pixels() {
        let (renderer, driver) = renderer(Duration::from_millis(1), true);
        renderer.set_animation(stepping_animation("Overlay").with_frame_mode(FrameMode::Overlay));

        assert_eq!(render_pass(&renderer), PassOutcome::Completed);
        assert_eq!(driver.last_write(), vec![gray(10), gray(20), gray(30)]);
    }

    #[test]
    fn test_brightness_change_applies_to_next_frame() {
        let (renderer, driver) = renderer(Duration::from_millis(1), true);
        renderer.set_animation(Animation::new(
            "Solid",
            vec![vec![Pixel::gray(0, 200)]],
        ));
        assert_eq!(render_pass(&renderer), PassOutcome::Completed);
        renderer.set_peak_brightness(0.5);
        assert_eq!(render_pass(&renderer), PassOutcome::Completed);
        assert_eq!(driver.last_write(), vec![gray(100), BLACK, BLACK]);
    }

    #[test]
    fn test_speed_change_interrupts_delay() {
        let (renderer, driver) = renderer(Duration::from_secs(10), true);
        renderer.set_animation(stepping_animation("Slow"));

        let started = StdInstant::now();
        let outcome = thread::scope(|scope| {
            scope.spawn(|| {
                thread::sleep(StdDuration::from_millis(30));
                renderer.set_speed(4.0);
            });
            render_pass(&renderer)
        });

        assert_eq!(outcome, PassOutcome::Interrupted);
        assert!(started.elapsed() < StdDuration::from_secs(5));
        assert!(!renderer.exit_early());
        assert!(renderer.is_running());
        assert_eq!(driver.writes().len(), 1);
    }

    #[test]
    fn test_stop_interrupts_pass() {
        let (renderer, _) = renderer(Duration::from_secs(10), true);
        renderer.set_animation(stepping_animation("Slow"));

        let outcome = thread::scope(|scope| {
            scope.spawn(|| {
                thread::sleep(StdDuration::from_millis(30));
                renderer.set_running(false);
            });
            render_pass(&renderer)
        });

        assert_eq!(outcome, PassOutcome::Interrupted);
        assert_eq!(render_pass(&renderer), PassOutcome::Idle);
    }

    #[test]
    fn test_resume_after_pause_plays_whole_animation() {
        let (renderer, driver) = renderer(Duration::from_millis(1), true);
        renderer.set_animation(stepping_animation("Steps"));
        assert_eq!(render_pass(&renderer), PassOutcome::Completed);

        renderer.set_running(false);
        renderer.set_running(true);
        assert!(!renderer.exit_early());
        assert_eq!(render_pass(&renderer), PassOutcome::Completed);
        assert_eq!(driver.writes().len(), 6);
    }

    #[test]
    fn test_speed_change_between_passes_does_not_cut_next_pass() {
        let (renderer, driver) = renderer(Duration::from_millis(1), true);
        renderer.set_animation(stepping_animation("Steps"));
        renderer.set_speed(2.0);
        assert!(renderer.exit_early());

        assert_eq!(render_pass(&renderer), PassOutcome::Completed);
        assert!(!renderer.exit_early());
        assert_eq!(driver.writes().len(), 3);
    }

    #[test]
    fn test_swap_during_pass_abandons_old_frames() {
        let driver = RecordingDriver::default();
        let renderer: Renderer<_, 8> = Renderer::new(
            driver.clone(),
            &RendererConfig {
                led_count: 3,
                frame_delay: Duration::from_millis(200),
                repeat_delay: Duration::from_millis(0),
                peak_brightness: 1.0,
                ..RendererConfig::default()
            },
        );
        renderer.set_animation(stepping_animation("Old"));

        let outcome = thread::scope(|scope| {
            scope.spawn(|| {
                thread::sleep(StdDuration::from_millis(55));
                renderer.set_animation(Animation::new("New", vec![vec![Pixel::gray(2, 30)]]));
            });
            render_pass(&renderer)
        });

        assert_eq!(outcome, PassOutcome::AnimationChanged);
        assert_eq!(driver.writes(), vec![vec![gray(10), BLACK, BLACK]]);
        assert_eq!(renderer.current_animation_name(), "New");
        assert!(renderer.is_running());
    }

    #[test]
    fn test_new_animation_replaces_old_within_repeat_delay() {
        let (renderer, driver) = renderer(Duration::from_millis(2), true);
        renderer.set_animation(Animation::new("Old", vec![vec![Pixel::gray(0, 10)]]));
        let stop = AtomicBool::new(false);

        let (before, after, name) = thread::scope(|scope| {
            scope.spawn(|| {
                let task = RenderTask::new(&renderer).with_idle_poll(Duration::from_millis(1));
                while !stop.load(Ordering::SeqCst) {
                    task.run_once();
                }
            });

            thread::sleep(StdDuration::from_millis(20));
            let before = driver.last_write();

            renderer.set_animation(Animation::new("New", vec![vec![Pixel::gray(2, 30)]]));
            thread::sleep(StdDuration::from_millis(40));
            let after = driver.last_write();
            let name = renderer.output_state().animation_name;

            stop.store(true, Ordering::SeqCst);
            (before, after, name)
        });

        assert_eq!(before, vec![gray(10), BLACK, BLACK]);
        assert_eq!(after, vec![BLACK, BLACK, gray(30)]);
        assert_eq!(name.as_str(), "New");
    }

    #[test]
    fn test_run_once_reports_outcome() {
        let (renderer, driver) = renderer(Duration::from_millis(1), false);
        let task = RenderTask::new(&renderer);
        assert_eq!(task.run_once(), PassOutcome::Idle);

        renderer.set_animation(stepping_animation("Once"));
        assert_eq!(task.run_once(), PassOutcome::Finished);
        assert_eq!(driver.writes().len(), 3);
        assert!(std::ptr::eq(task.renderer(), &renderer));
    }
}
