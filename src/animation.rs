//! Animation container
//!
//! An [`Animation`] owns a name and an ordered [`FrameBuffer`]. It is a plain
//! value: cloning deep-copies the frames. [`SharedAnimation`] wraps one in a
//! critical-section mutex for access from both execution cores.

use core::cell::RefCell;

use alloc::string::{String, ToString};
use critical_section::{CriticalSection, Mutex};

use crate::frame::{Frame, FrameBuffer, FrameMode};
use crate::generator::EffectParams;

/// Name of the empty animation
pub const EMPTY_ANIMATION_NAME: &str = "NONE";

/// DJB2 hash of a name
///
/// Used as a fast "has the animation changed?" check. Collisions are
/// possible and accepted: the set of names in use is small.
pub const fn name_hash(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash: u32 = 5381;
    let mut i = 0;
    while i < bytes.len() {
        hash = hash.wrapping_mul(33).wrapping_add(bytes[i] as u32);
        i += 1;
    }
    hash
}

/// Named sequence of frames
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    name: String,
    name_hash: u32,
    frames: FrameBuffer,
    mode: FrameMode,
    source: Option<EffectParams>,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(EMPTY_ANIMATION_NAME, FrameBuffer::new())
    }
}

impl Animation {
    /// Create an animation from a name and its frames
    pub fn new(name: &str, frames: FrameBuffer) -> Self {
        Self {
            name: name.to_string(),
            name_hash: name_hash(name),
            frames,
            mode: FrameMode::default(),
            source: None,
        }
    }

    /// Set how frames are composed onto the strip
    #[must_use]
    pub fn with_frame_mode(mut self, mode: FrameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Remember the generator parameters this animation was built from
    #[must_use]
    pub fn with_source(mut self, source: EffectParams) -> Self {
        self.source = Some(source);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hash of the current name, see [`name_hash`]
    pub const fn name_hash(&self) -> u32 {
        self.name_hash
    }

    /// Rename the animation; the hash follows the name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
        self.name_hash = name_hash(name);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Independent copy of all frames
    ///
    /// Allocates proportionally to the total pixel count.
    pub fn frames_deep_copy(&self) -> FrameBuffer {
        self.frames.clone()
    }

    /// Replace the whole frame buffer; name is left untouched
    pub fn set_frames(&mut self, frames: FrameBuffer) {
        log::debug!(
            "setting {} frames for animation '{}'",
            frames.len(),
            self.name
        );
        self.frames = frames;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop all frames and reset to the empty animation
    pub fn clear_frames(&mut self) {
        self.frames.clear();
        self.set_name(EMPTY_ANIMATION_NAME);
        self.source = None;
    }

    pub const fn frame_mode(&self) -> FrameMode {
        self.mode
    }

    /// Generator parameters, if this animation was generated
    pub const fn source(&self) -> Option<&EffectParams> {
        self.source.as_ref()
    }
}

/// Animation shared between execution cores
///
/// Every access runs inside a critical section, so readers always see a
/// whole animation: either the previous one or the replacement, never a
/// partially replaced frame buffer.
pub struct SharedAnimation {
    inner: Mutex<RefCell<Animation>>,
}

impl Default for SharedAnimation {
    fn default() -> Self {
        Self::new(Animation::default())
    }
}

impl SharedAnimation {
    pub const fn new(animation: Animation) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(animation)),
        }
    }

    /// Run `f` with a read-only view of the animation
    ///
    /// The view only lives for the duration of the call.
    pub fn with<R>(&self, f: impl FnOnce(&Animation) -> R) -> R {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }

    /// Run `f` with a read-only view of the frames
    pub fn with_frames<R>(&self, f: impl FnOnce(&[Frame]) -> R) -> R {
        self.with(|animation| f(animation.frames()))
    }

    /// Borrow the animation inside an already entered critical section
    pub(crate) fn borrow<'cs>(&'cs self, cs: CriticalSection<'cs>) -> &'cs RefCell<Animation> {
        self.inner.borrow(cs)
    }

    /// Copy of the whole animation
    pub fn snapshot(&self) -> Animation {
        self.with(Clone::clone)
    }

    /// Replace the whole animation, returning the previous one
    pub fn replace(&self, animation: Animation) -> Animation {
        critical_section::with(|cs| self.inner.replace(cs, animation))
    }

    /// Deep-copy another shared animation into this one
    ///
    /// Both cells are borrowed under a single critical section, so copying
    /// two animations into each other from different cores cannot deadlock.
    /// Assigning an animation to itself is a no-op.
    pub fn assign_from(&self, other: &SharedAnimation) {
        if core::ptr::eq(self, other) {
            return;
        }
        critical_section::with(|cs| {
            let source = other.inner.borrow_ref(cs);
            let mut target = self.inner.borrow_ref_mut(cs);
            target.clone_from(&source);
        });
    }

    pub fn set_frames(&self, frames: FrameBuffer) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).set_frames(frames));
    }

    pub fn set_name(&self, name: &str) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).set_name(name));
    }

    pub fn name(&self) -> String {
        self.with(|animation| animation.name().to_string())
    }

    pub fn name_hash(&self) -> u32 {
        self.with(Animation::name_hash)
    }

    pub fn frame_count(&self) -> usize {
        self.with(Animation::frame_count)
    }

    pub fn frames_deep_copy(&self) -> FrameBuffer {
        self.with(Animation::frames_deep_copy)
    }

    pub fn clear_frames(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).clear_frames());
    }
}
