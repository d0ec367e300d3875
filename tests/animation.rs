mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use myrtio_frame_engine::{
        Animation, FrameBuffer, FrameMode, Pixel, Rgb, SharedAnimation, name_hash,
    };

    fn frames(count: usize, leds: u16) -> FrameBuffer {
        (0..count)
            .map(|frame| (0..leds).map(|led| Pixel::gray(led, frame as u8)).collect())
            .collect()
    }

    #[test]
    fn test_pixel_assign_color_keeps_index() {
        let mut pixel = Pixel::new(3, Rgb::new(1, 2, 3));
        let other = Pixel::new(9, Rgb::new(10, 20, 30));
        pixel.assign_color(&other);
        assert_eq!(pixel.index(), 3);
        assert_eq!(pixel.color, Rgb::new(10, 20, 30));
    }

    #[test]
    fn test_name_hash_djb2() {
        assert_eq!(name_hash(""), 5381);
        assert_eq!(name_hash("a"), 177_670);
        assert_ne!(name_hash("Breathe"), name_hash("Pulse"));
    }

    #[test]
    fn test_set_name_updates_hash() {
        let mut animation = Animation::new("Breathe", frames(2, 3));
        assert_eq!(animation.name_hash(), name_hash("Breathe"));
        for name in ["Pulse", "", "Circling Dark Spot"] {
            animation.set_name(name);
            assert_eq!(animation.name(), name);
            assert_eq!(animation.name_hash(), name_hash(name));
        }
    }

    #[test]
    fn test_set_frames_keeps_name() {
        let mut animation = Animation::new("Custom", frames(2, 3));
        animation.set_frames(frames(5, 1));
        assert_eq!(animation.name(), "Custom");
        assert_eq!(animation.frame_count(), 5);
    }

    #[test]
    fn test_default_animation_is_empty() {
        let animation = Animation::default();
        assert_eq!(animation.name(), "NONE");
        assert!(animation.is_empty());
        assert_eq!(animation.frame_mode(), FrameMode::Replace);
        assert!(animation.source().is_none());
    }

    #[test]
    fn test_clear_frames_resets_name() {
        let mut animation = Animation::new("Custom", frames(2, 3));
        animation.clear_frames();
        assert!(animation.is_empty());
        assert_eq!(animation.name(), "NONE");
        assert_eq!(animation.name_hash(), name_hash("NONE"));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let animation = Animation::new("Custom", frames(2, 3));
        let mut copy = animation.frames_deep_copy();
        copy[0][0].color = Rgb::new(255, 0, 0);
        assert_eq!(animation.frames()[0][0].color, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_shared_animation_replace() {
        let shared = SharedAnimation::default();
        let previous = shared.replace(Animation::new("Custom", frames(4, 2)));
        assert_eq!(previous.name(), "NONE");
        assert_eq!(shared.name(), "Custom");
        assert_eq!(shared.frame_count(), 4);
        assert_eq!(shared.with_frames(|frames| frames[1].len()), 2);
    }

    #[test]
    fn test_shared_animation_assign_both_directions() {
        let a = Arc::new(SharedAnimation::new(Animation::new("A", frames(3, 2))));
        let b = Arc::new(SharedAnimation::new(Animation::new("B", frames(5, 2))));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let (a, b) = (Arc::clone(&a), Arc::clone(&b));
                thread::spawn(move || {
                    for _ in 0..200 {
                        if i % 2 == 0 {
                            a.assign_from(&b);
                        } else {
                            b.assign_from(&a);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_shared_animation_assign_self_is_noop() {
        let shared = SharedAnimation::new(Animation::new("Self", frames(2, 2)));
        shared.assign_from(&shared);
        assert_eq!(shared.name(), "Self");
        assert_eq!(shared.frame_count(), 2);
    }

    #[test]
    fn test_reader_never_sees_partial_replacement() {
        let shared = Arc::new(SharedAnimation::new(Animation::new("Short", frames(2, 4))));
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let (shared, done) = (Arc::clone(&shared), Arc::clone(&done));
            thread::spawn(move || {
                for i in 0..300 {
                    let (name, count) = if i % 2 == 0 { ("Long", 40) } else { ("Short", 2) };
                    shared.replace(Animation::new(name, frames(count, 4)));
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        while !done.load(Ordering::SeqCst) {
            let snapshot = shared.snapshot();
            let expected = if snapshot.name() == "Long" { 40 } else { 2 };
            assert_eq!(snapshot.frame_count(), expected);
            assert_eq!(snapshot.frames().len(), snapshot.frame_count());
            assert_eq!(snapshot.name_hash(), name_hash(snapshot.name()));
        }
        writer.join().unwrap();
    }
}
