use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 5.0;
const DOUBLE_CLICK_ZOOM: f64 = 2.5;
const WHEEL_ZOOM_BASE: f64 = 1.002;
const PINCH_SENSITIVITY: f64 = 0.01;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which way the next image slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Full-screen gallery viewer over `len` images.
///
/// Zoom lives in `[MIN_ZOOM, MAX_ZOOM]`; at `MIN_ZOOM` the image is centred
/// and arrow keys page through the gallery, otherwise they are ignored so
/// they don't fight with panning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightboxState {
    len: usize,
    selected: Option<usize>,
    direction: Option<SlideDirection>,
    scale: f64,
    offset: Point,
    drag_origin: Option<Point>,
}

impl LightboxState {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            selected: None,
            direction: None,
            scale: MIN_ZOOM,
            offset: Point::default(),
            drag_origin: None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    #[must_use]
    pub fn direction(&self) -> Option<SlideDirection> {
        self.direction
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_ZOOM
    }

    /// "3 / 41"
    #[must_use]
    pub fn counter(&self) -> Option<String> {
        self.selected
            .map(|index| format!("{} / {}", index + 1, self.len))
    }

    pub fn open(&mut self, index: usize) {
        if index < self.len {
            self.selected = Some(index);
            self.direction = None;
            self.reset_zoom();
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.direction = None;
        self.reset_zoom();
    }

    pub fn show_next(&mut self) {
        if let Some(index) = self.selected {
            self.navigate((index + 1) % self.len, SlideDirection::Right);
        }
    }

    pub fn show_previous(&mut self) {
        if let Some(index) = self.selected {
            self.navigate((index + self.len - 1) % self.len, SlideDirection::Left);
        }
    }

    pub fn handle_key(&mut self, key: LightboxKey) {
        if !self.is_open() {
            return;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowRight if !self.is_zoomed() => self.show_next(),
            LightboxKey::ArrowLeft if !self.is_zoomed() => self.show_previous(),
            _ => {}
        }
    }

    pub fn reset_zoom(&mut self) {
        self.scale = MIN_ZOOM;
        self.offset = Point::default();
        self.drag_origin = None;
    }

    /// Wheel zoom that keeps the point under the cursor fixed. `cursor` is
    /// relative to the image centre.
    pub fn zoom_with_wheel(&mut self, delta_y: f64, cursor: Point) {
        let next = (self.scale * WHEEL_ZOOM_BASE.powf(-delta_y)).clamp(MIN_ZOOM, MAX_ZOOM);
        if next == self.scale {
            return;
        }
        if next == MIN_ZOOM {
            self.reset_zoom();
            return;
        }
        let ratio = next / self.scale;
        self.offset = Point::new(
            self.offset.x - (cursor.x * ratio - cursor.x),
            self.offset.y - (cursor.y * ratio - cursor.y),
        );
        self.scale = next;
    }

    /// Double click toggles between fit and a fixed zoom towards the cursor.
    pub fn toggle_zoom(&mut self, cursor: Point) {
        if self.is_zoomed() {
            self.reset_zoom();
        } else {
            self.scale = DOUBLE_CLICK_ZOOM;
            self.offset = Point::new(-cursor.x * 1.5, -cursor.y * 1.5);
        }
    }

    /// Two-finger pinch; `distance_change` is in pixels between touches.
    pub fn pinch(&mut self, distance_change: f64) {
        self.scale = (self.scale + distance_change * PINCH_SENSITIVITY).clamp(MIN_ZOOM, MAX_ZOOM);
        if !self.is_zoomed() {
            self.reset_zoom();
        }
    }

    pub fn start_drag(&mut self, pointer: Point) {
        if self.is_zoomed() {
            self.drag_origin = Some(Point::new(
                pointer.x - self.offset.x,
                pointer.y - self.offset.y,
            ));
        }
    }

    pub fn drag_to(&mut self, pointer: Point) {
        if let Some(origin) = self.drag_origin.filter(|_| self.is_zoomed()) {
            self.offset = Point::new(pointer.x - origin.x, pointer.y - origin.y);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    fn navigate(&mut self, index: usize, direction: SlideDirection) {
        self.selected = Some(index);
        self.direction = Some(direction);
        self.reset_zoom();
    }
}
