//! Animated transitions driven by the app tick.

use std::cell::RefCell;

use viewstack_core::{Completion, Transition, ViewRef};

struct Slide {
    from: Option<ViewRef>,
    to: Option<ViewRef>,
    frame: u16,
    done: Completion,
}

/// Slides the incoming view over the outgoing one across several ticks.
///
/// [`run`](Transition::run) only records the animation; each call to
/// [`advance`](Self::advance) moves it one frame and the last frame hides the
/// outgoing view and signals completion.
pub struct SlideTransition {
    frames: u16,
    slide: RefCell<Option<Slide>>,
}

impl SlideTransition {
    pub fn new(frames: u16) -> Self {
        Self {
            frames,
            slide: RefCell::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.slide.borrow().is_some()
    }

    /// Fraction of the animation already shown, in `0.0..=1.0`.
    pub fn progress(&self) -> Option<f64> {
        self.slide
            .borrow()
            .as_ref()
            .map(|slide| f64::from(slide.frame) / f64::from(self.frames.max(1)))
    }

    /// The views taking part in the running slide.
    pub fn views(&self) -> Option<(Option<ViewRef>, Option<ViewRef>)> {
        self.slide
            .borrow()
            .as_ref()
            .map(|slide| (slide.from.clone(), slide.to.clone()))
    }

    /// Move the running slide one frame forward.
    ///
    /// Returns `false` when no slide is running.
    pub fn advance(&self) -> bool {
        let finished = {
            let mut slot = self.slide.borrow_mut();
            let Some(slide) = slot.as_mut() else {
                return false;
            };
            slide.frame = slide.frame.saturating_add(1);
            slide.frame >= self.frames
        };

        if finished {
            self.finish();
        }
        true
    }

    fn finish(&self) {
        // Take the slide out first; completing may start the next one.
        let Some(slide) = self.slide.borrow_mut().take() else {
            return;
        };
        if let Some(from) = &slide.from {
            from.set_active(false);
        }
        tracing::trace!("Slide finished");
        slide.done.complete();
    }
}

impl Transition for SlideTransition {
    fn run(&self, from: Option<ViewRef>, to: Option<ViewRef>, done: Completion) {
        if self.is_running() {
            tracing::warn!("Slide started while another was running; finishing the old one");
            self.finish();
        }

        if let Some(to) = &to {
            to.set_active(true);
        }
        *self.slide.borrow_mut() = Some(Slide {
            from,
            to,
            frame: 0,
            done,
        });

        if self.frames == 0 {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use viewstack_core::ViewNode;

    use super::*;

    fn completion() -> (Rc<Cell<bool>>, Completion) {
        let fired = Rc::new(Cell::new(false));
        let done = Completion::new({
            let fired = fired.clone();
            move || fired.set(true)
        });
        (fired, done)
    }

    #[test]
    fn completes_after_the_last_frame() {
        let slide = SlideTransition::new(3);
        let from = ViewNode::builder("from").build();
        let to = ViewNode::builder("to").active(false).build();
        let (fired, done) = completion();

        slide.run(Some(from.clone()), Some(to.clone()), done);
        assert!(slide.is_running());
        assert!(to.is_active());
        assert_eq!(slide.progress(), Some(0.0));

        assert!(slide.advance());
        assert!(slide.advance());
        assert!(!fired.get());
        assert!(from.is_active());

        assert!(slide.advance());
        assert!(fired.get());
        assert!(!from.is_active());
        assert!(!slide.is_running());
        assert!(!slide.advance());
    }

    #[test]
    fn zero_frames_completes_immediately() {
        let slide = SlideTransition::new(0);
        let (fired, done) = completion();

        slide.run(None, Some(ViewNode::builder("to").build()), done);

        assert!(fired.get());
        assert!(!slide.is_running());
    }

    #[test]
    fn views_are_exposed_while_running() {
        let slide = SlideTransition::new(2);
        let (_fired, done) = completion();
        slide.run(None, Some(ViewNode::builder("to").build()), done);

        let (from, to) = slide.views().unwrap();
        assert!(from.is_none());
        assert_eq!(to.unwrap().name(), "to");
    }

    #[test]
    fn completion_may_start_the_next_slide() {
        let slide = Rc::new(SlideTransition::new(1));
        let second = Rc::new(Cell::new(false));
        let done = Completion::new({
            let slide = slide.clone();
            let second = second.clone();
            move || {
                let (_, next) = completion();
                slide.run(None, None, next);
                second.set(true);
            }
        });

        slide.run(None, None, done);
        slide.advance();

        assert!(second.get());
        assert!(slide.is_running());
    }
}
