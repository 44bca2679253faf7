//! Animated on/off switch
//!
//! [`ToggleSwitch`] owns the checked flag and the knob animation. The knob
//! moves a tenth of the remaining distance per tick (at least one pixel) until
//! it sits exactly on its target.

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Vec2};
use std::time::Duration;

/// Switch width in points
pub const SWITCH_WIDTH: i32 = 60;
/// Switch height in points; also the knob diameter
pub const SWITCH_HEIGHT: i32 = 30;
/// Animation tick period
pub const TICK: Duration = Duration::from_millis(30);

const TRACK_OFF: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xCC);
const TRACK_ON: Color32 = Color32::from_rgb(0x72, 0x89, 0xDA);
const KNOB: Color32 = Color32::WHITE;

/// Knob position/target pair advanced one tick at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnobAnimation {
    position: i32,
    target: i32,
    running: bool,
}

impl KnobAnimation {
    /// Current knob offset
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Where the knob is heading
    pub fn target(&self) -> i32 {
        self.target
    }

    /// True until the knob reaches its target
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Point the animation at a new target and (re)start it
    pub fn retarget(&mut self, target: i32) {
        self.target = target;
        self.running = true;
    }

    /// Advance one tick. Returns whether the knob moved.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let remaining = self.target - self.position;
        if remaining == 0 {
            self.running = false;
            return false;
        }

        // Integer division truncates toward zero.
        let mut delta = remaining / 10;
        if delta == 0 {
            delta = remaining.signum();
        }
        self.position += delta;

        if self.position == self.target {
            self.running = false;
        }
        true
    }
}

/// Turns frame timestamps into a count of elapsed animation ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct TickClock {
    last: Option<f64>,
}

impl TickClock {
    /// Ticks due at time `now` (seconds). The first call only arms the clock.
    pub fn due(&mut self, now: f64) -> u32 {
        let period = TICK.as_secs_f64();
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0;
        };
        let ticks = ((now - last) / period).floor().max(0.0) as u32;
        self.last = Some(last + f64::from(ticks) * period);
        ticks
    }

    /// Forget the reference time
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Binary switch with a self-animated knob
#[derive(Debug, Clone, Default)]
pub struct ToggleSwitch {
    checked: bool,
    knob: KnobAnimation,
    clock: TickClock,
}

impl ToggleSwitch {
    /// Unchecked switch with the knob at rest on the left
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch starting in the given state, knob already at rest
    pub fn with_checked(checked: bool) -> Self {
        let target = Self::target_for(checked);
        Self {
            checked,
            knob: KnobAnimation {
                position: target,
                target,
                running: false,
            },
            clock: TickClock::default(),
        }
    }

    /// Knob resting offset for a given state
    pub fn target_for(checked: bool) -> i32 {
        if checked {
            SWITCH_WIDTH - SWITCH_HEIGHT
        } else {
            0
        }
    }

    /// Current state
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Current knob offset in points
    pub fn knob_position(&self) -> i32 {
        self.knob.position()
    }

    /// True while the knob is still travelling
    pub fn is_animating(&self) -> bool {
        self.knob.is_running()
    }

    /// Flip the state and restart the animation toward the new target. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.checked = !self.checked;
        self.knob.retarget(Self::target_for(self.checked));
        self.checked
    }

    /// Advance the knob by one tick
    pub fn tick(&mut self) -> bool {
        self.knob.step()
    }

    /// Draw the switch and handle presses.
    ///
    /// The switch flips on primary-button press, not release. The returned
    /// response is `changed()` in that same frame, before the knob has moved.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let size = Vec2::new(SWITCH_WIDTH as f32, SWITCH_HEIGHT as f32);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click());

        let pressed = response.contains_pointer() && ui.input(|i| i.pointer.primary_pressed());
        if pressed {
            self.toggle();
            self.clock.reset();
            response.mark_changed();
        }

        if self.is_animating() {
            let now = ui.input(|i| i.time);
            for _ in 0..self.clock.due(now) {
                if !self.tick() {
                    break;
                }
            }
            if self.is_animating() {
                ui.ctx().request_repaint_after(TICK);
            } else {
                self.clock.reset();
            }
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui.painter(), rect);
        }
        response
    }

    fn paint(&self, painter: &egui::Painter, rect: Rect) {
        let height = rect.height();
        let track = if self.checked { TRACK_ON } else { TRACK_OFF };
        painter.rect_filled(rect, height / 2.0, track);

        let radius = height / 2.0;
        let center = Pos2::new(
            rect.left() + self.knob_position() as f32 + radius,
            rect.center().y,
        );
        painter.circle_filled(center, radius, KNOB);
    }
}
