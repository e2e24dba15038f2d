use std::time::{Duration, Instant};

use tracing::debug;

/// Horizontal distance between neighbouring card centres.
pub const CARD_SPACING: f32 = 320.0;
pub const FOCUS_LIFT: f32 = 20.0;
pub const FOCUS_SCALE: f32 = 1.03;
pub const RESTING_SCALE: f32 = 0.95;
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(3);
pub const MOTION_DURATION: Duration = Duration::from_millis(500);
/// Cards folded further than this from the focus jump instead of tweening.
pub const MAX_TWEEN_OFFSET: isize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Shortest signed distance from `current` to `index` around a ring of `len`.
///
/// The result lies in `[-len / 2, len / 2]`.
pub fn fold_offset(index: usize, current: usize, len: usize) -> isize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let half = len / 2;
    let mut offset = index as isize - current as isize;
    if offset < -half {
        offset += len;
    } else if offset > half {
        offset -= len;
    }
    offset
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl CardTransform {
    pub fn for_offset(offset: isize) -> Self {
        if offset == 0 {
            Self {
                x: 0.0,
                y: FOCUS_LIFT,
                scale: FOCUS_SCALE,
            }
        } else {
            Self {
                x: offset as f32 * CARD_SPACING,
                y: 0.0,
                scale: RESTING_SCALE,
            }
        }
    }

    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    from: CardTransform,
    to: CardTransform,
    started: Instant,
}

impl Motion {
    fn settled(at: CardTransform, now: Instant) -> Self {
        Self {
            from: at,
            to: at,
            started: now,
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        elapsed.as_secs_f32() / MOTION_DURATION.as_secs_f32()
    }

    fn at(&self, now: Instant) -> CardTransform {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, ease_out_cubic(t))
    }

    fn is_running(&self, now: Instant) -> bool {
        self.from != self.to && self.progress(now) < 1.0
    }
}

/// Single-shot timer for automatic rotation.
///
/// Scheduling replaces any pending deadline, so there is never more than
/// one rotation queued. Firing consumes the deadline; the owner re-arms it
/// after acting on the fire.
#[derive(Clone, Debug)]
pub struct RotationTimer {
    interval: Duration,
    due: Option<Instant>,
}

impl RotationTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.interval);
    }

    /// Returns whether a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// One card's placement for a frame.
#[derive(Debug)]
pub struct Placement<'a, T> {
    pub index: usize,
    pub offset: isize,
    pub item: &'a T,
    pub transform: CardTransform,
}

/// Circular list of items with a focal index, eased transitions between
/// positions, and hover-suspended auto-rotation.
///
/// Time is passed in explicitly; the owner polls [`Carousel::tick`] from
/// its event loop.
pub struct Carousel<T> {
    items: Vec<T>,
    current: usize,
    motions: Vec<Motion>,
    timer: RotationTimer,
    hovered: bool,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, now: Instant) -> Self {
        Self::with_interval(items, ROTATION_INTERVAL, now)
    }

    pub fn with_interval(items: Vec<T>, interval: Duration, now: Instant) -> Self {
        let len = items.len();
        let motions = (0..len)
            .map(|i| Motion::settled(CardTransform::for_offset(fold_offset(i, 0, len)), now))
            .collect();
        let mut timer = RotationTimer::new(interval);
        if len > 0 {
            timer.schedule(now);
        }
        Self {
            items,
            current: 0,
            motions,
            timer,
            hovered: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&T> {
        self.items.get(self.current)
    }

    pub fn timer(&self) -> &RotationTimer {
        &self.timer
    }

    pub fn offset(&self, index: usize) -> isize {
        fold_offset(index, self.current, self.items.len())
    }

    pub fn target_transform(&self, index: usize) -> CardTransform {
        CardTransform::for_offset(self.offset(index))
    }

    pub fn transform_at(&self, index: usize, now: Instant) -> CardTransform {
        self.motions
            .get(index)
            .map(|m| m.at(now))
            .unwrap_or_else(|| self.target_transform(index))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.motions.iter().any(|m| m.is_running(now))
    }

    pub fn shift(&mut self, direction: Direction, now: Instant) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let next = match direction {
            Direction::Next => (self.current + 1) % len,
            Direction::Prev => (self.current + len - 1) % len,
        };
        self.jump_to(next, now);
    }

    /// Focus `index`, start the transition, and restart the rotation
    /// interval unless the pointer is inside the carousel.
    pub fn jump_to(&mut self, index: usize, now: Instant) {
        let len = self.items.len();
        if index >= len {
            return;
        }
        let from: Vec<_> = (0..len).map(|i| self.transform_at(i, now)).collect();
        self.current = index;
        for (i, from) in from.into_iter().enumerate() {
            let offset = self.offset(i);
            let to = CardTransform::for_offset(offset);
            self.motions[i] = if offset.abs() > MAX_TWEEN_OFFSET {
                Motion::settled(to, now)
            } else {
                Motion {
                    from,
                    to,
                    started: now,
                }
            };
        }
        if !self.hovered {
            self.timer.schedule(now);
        }
        debug!(index, "carousel focus changed");
    }

    pub fn pointer_entered(&mut self) {
        self.hovered = true;
        if self.timer.cancel() {
            debug!("carousel rotation paused");
        }
    }

    pub fn pointer_left(&mut self, now: Instant) {
        self.hovered = false;
        if !self.items.is_empty() && !self.timer.is_pending() {
            self.timer.schedule(now);
            debug!("carousel rotation resumed");
        }
    }

    /// Advance if the rotation timer is due. Returns whether a shift happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.timer.fire(now) {
            self.shift(Direction::Next, now);
            true
        } else {
            false
        }
    }

    /// Stop rotating for good; the carousel is going away.
    pub fn unmount(&mut self) {
        self.timer.cancel();
    }

    /// Placements of every card, back to front: the focal card comes last.
    pub fn placements(&self, now: Instant) -> Vec<Placement<'_, T>> {
        let mut placements: Vec<_> = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| Placement {
                index,
                offset: self.offset(index),
                item,
                transform: self.transform_at(index, now),
            })
            .collect();
        placements.sort_by_key(|p| std::cmp::Reverse(p.offset.abs()));
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(len: usize, now: Instant) -> Carousel<usize> {
        Carousel::new((0..len).collect(), now)
    }

    #[test]
    fn next_then_prev_restores_index() {
        let now = Instant::now();
        for len in 1..=12 {
            for start in 0..len {
                let mut c = carousel(len, now);
                c.jump_to(start, now);
                c.shift(Direction::Next, now);
                c.shift(Direction::Prev, now);
                assert_eq!(c.current_index(), start, "len {len} start {start}");
            }
        }
    }

    #[test]
    fn shift_wraps_both_ways() {
        let now = Instant::now();
        let mut c = carousel(3, now);
        c.shift(Direction::Prev, now);
        assert_eq!(c.current_index(), 2);
        c.shift(Direction::Next, now);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn fold_stays_within_half_ring() {
        for len in 0..=15usize {
            let half = (len / 2) as isize;
            for current in 0..len.max(1) {
                for index in 0..len {
                    let offset = fold_offset(index, current, len);
                    assert!(
                        (-half..=half).contains(&offset),
                        "len {len} current {current} index {index} -> {offset}"
                    );
                }
            }
        }
    }

    #[test]
    fn fold_takes_shortest_path() {
        assert_eq!(fold_offset(7, 0, 8), -1);
        assert_eq!(fold_offset(1, 7, 8), 2);
        assert_eq!(fold_offset(4, 0, 8), 4);
        assert_eq!(fold_offset(0, 4, 8), -4);
        assert_eq!(fold_offset(3, 0, 5), -2);
    }

    #[test]
    fn focal_card_is_lifted_and_larger() {
        let focal = CardTransform::for_offset(0);
        let side = CardTransform::for_offset(-1);
        assert_eq!(focal.y, FOCUS_LIFT);
        assert!(focal.scale > side.scale);
        assert_eq!(side.x, -CARD_SPACING);
        assert_eq!(CardTransform::for_offset(2).scale, RESTING_SCALE);
        assert_eq!(CardTransform::for_offset(2).x, 2.0 * CARD_SPACING);
    }

    #[test]
    fn ease_out_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn transition_eases_to_target() {
        let t0 = Instant::now();
        let mut c = carousel(5, t0);
        assert!(!c.is_animating(t0));

        c.shift(Direction::Next, t0);
        assert!(c.is_animating(t0));
        assert_eq!(c.transform_at(1, t0), CardTransform::for_offset(1));

        let mid = c.transform_at(1, t0 + MOTION_DURATION / 2);
        assert!(mid.x > 0.0 && mid.x < CARD_SPACING);

        let end = t0 + MOTION_DURATION;
        assert!(!c.is_animating(end));
        assert_eq!(c.transform_at(1, end), CardTransform::for_offset(0));
    }

    #[test]
    fn far_cards_jump_without_tween() {
        let t0 = Instant::now();
        let mut c = carousel(8, t0);
        c.shift(Direction::Next, t0);
        // card 5 sits opposite the new focus
        assert_eq!(c.offset(5), 4);
        assert_eq!(c.transform_at(5, t0), CardTransform::for_offset(4));
    }

    #[test]
    fn rotates_after_interval() {
        let t0 = Instant::now();
        let mut c = carousel(4, t0);
        assert!(c.timer().is_pending());
        assert!(!c.tick(t0 + ROTATION_INTERVAL - Duration::from_millis(1)));
        assert!(c.tick(t0 + ROTATION_INTERVAL));
        assert_eq!(c.current_index(), 1);
        assert_eq!(
            c.timer().due(),
            Some(t0 + ROTATION_INTERVAL + ROTATION_INTERVAL)
        );
    }

    #[test]
    fn manual_shift_restarts_interval() {
        let t0 = Instant::now();
        let mut c = carousel(4, t0);
        let t1 = t0 + Duration::from_secs(2);
        c.shift(Direction::Next, t1);
        assert!(!c.tick(t0 + ROTATION_INTERVAL));
        assert_eq!(c.current_index(), 1);
        assert!(c.tick(t1 + ROTATION_INTERVAL));
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn hover_cancels_pending_rotation() {
        let t0 = Instant::now();
        let mut c = carousel(4, t0);
        c.pointer_entered();
        assert!(!c.timer().is_pending());
        for secs in [3, 6, 30] {
            assert!(!c.tick(t0 + Duration::from_secs(secs)));
        }
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn manual_shift_while_hovered_stays_paused() {
        let t0 = Instant::now();
        let mut c = carousel(4, t0);
        c.pointer_entered();
        c.shift(Direction::Next, t0);
        assert!(!c.timer().is_pending());
        assert!(!c.tick(t0 + Duration::from_secs(10)));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn leave_resumes_once() {
        let t0 = Instant::now();
        let mut c = carousel(4, t0);
        c.pointer_entered();
        let t1 = t0 + Duration::from_secs(5);
        c.pointer_left(t1);
        assert_eq!(c.timer().due(), Some(t1 + ROTATION_INTERVAL));

        // a second leave must not push the deadline out
        c.pointer_left(t1 + Duration::from_secs(1));
        assert_eq!(c.timer().due(), Some(t1 + ROTATION_INTERVAL));

        assert!(c.tick(t1 + ROTATION_INTERVAL));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let t0 = Instant::now();
        let mut c = carousel(0, t0);
        assert!(!c.timer().is_pending());
        c.shift(Direction::Next, t0);
        c.pointer_left(t0);
        assert!(!c.timer().is_pending());
        assert!(!c.tick(t0 + Duration::from_secs(60)));
        assert!(c.placements(t0).is_empty());
        assert!(c.current().is_none());
    }

    #[test]
    fn single_card_rotates_onto_itself() {
        let t0 = Instant::now();
        let mut c = carousel(1, t0);
        assert!(c.tick(t0 + ROTATION_INTERVAL));
        assert_eq!(c.current_index(), 0);
        assert!(c.timer().is_pending());
    }

    #[test]
    fn unmount_cancels_timer() {
        let t0 = Instant::now();
        let mut c = carousel(3, t0);
        c.unmount();
        assert!(!c.timer().is_pending());
        assert!(!c.tick(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn placements_put_focus_last() {
        let t0 = Instant::now();
        let c = carousel(5, t0);
        let placements = c.placements(t0);
        assert_eq!(placements.len(), 5);
        let last = placements.last().unwrap();
        assert_eq!(last.offset, 0);
        assert_eq!(*last.item, 0);
    }

    #[test]
    fn timer_schedule_replaces_deadline() {
        let t0 = Instant::now();
        let mut timer = RotationTimer::new(Duration::from_secs(1));
        timer.schedule(t0);
        timer.schedule(t0 + Duration::from_secs(5));
        assert_eq!(timer.due(), Some(t0 + Duration::from_secs(6)));
        assert!(!timer.fire(t0 + Duration::from_secs(2)));
        assert!(timer.fire(t0 + Duration::from_secs(6)));
        assert!(!timer.is_pending());
        assert!(!timer.cancel());
    }
}
