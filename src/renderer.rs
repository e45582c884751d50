//! The watchface itself.
//!
//! `Renderer` owns all face state. The host drives it through the sink
//! traits: time ticks, button clicks and battery updates change state and
//! mark layers dirty, and `paint` draws the current state into whatever
//! `GraphicsContext` the host hands in.
//!
//! All coordinates are in the frame of the graphics context. The viewport
//! rect says where the face sits in that frame; the dial rect is placed
//! relative to it.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};
use heapless::String;

use crate::battery::{battery_label, BatteryState};
use crate::clock::{datetime_is_valid, debug_angle, hour_angle, DateTime};
use crate::config::{WatchConfig, BATTERY_HEIGHT, FACE_RADIUS};
use crate::dial::DialGeometry;
use crate::gfx::{FontKey, GraphicsContext, TextAlignment, TextOverflow};
use crate::hand::HandQuad;
use crate::input::Button;
use crate::storage::PersistStore;
use crate::theme::{ColorRole, Theme, THEME_KEY};
use crate::viewport::ViewportTransform;

pub trait TickSink {
    /// `now` is `None` when the clock could not be read.
    fn on_tick(&mut self, now: Option<DateTime>);
}

pub trait ClickSink {
    fn on_click(&mut self, button: Button);
}

pub trait BatterySink {
    fn on_battery(&mut self, state: BatteryState);
}

pub trait PaintSink {
    fn paint<G: GraphicsContext>(&mut self, ctx: &mut G);
}

/// Angle the face shows for `now`, or `None` if `now` is unusable.
pub fn face_angle(config: &WatchConfig, now: Option<DateTime>) -> Option<f32> {
    let now = now.filter(datetime_is_valid)?;
    Some(if config.debug {
        debug_angle(now.second)
    } else {
        hour_angle(now.hour, now.minute)
    })
}

pub struct Renderer<S: PersistStore> {
    config: WatchConfig,
    viewport: ViewportTransform,
    theme: Theme,
    store: S,
    angle_deg: f32,
    battery_text: String<4>,
    dial_dirty: bool,
    hand_dirty: bool,
}

impl<S: PersistStore> Renderer<S> {
    /// Sets up the face for `viewport_rect`, restoring the theme from
    /// `store`. The dial starts at 12 o'clock until the first tick.
    pub fn load(viewport_rect: Rectangle, config: WatchConfig, mut store: S) -> Self {
        let kind = config.display_kind;
        let theme = match store.read_bool(THEME_KEY) {
            Ok(Some(inverted)) => Theme::new(kind, inverted),
            Ok(None) => Theme::default_for(kind),
            Err(e) => {
                log::warn!("theme read failed, using default: {:?}", e);
                Theme::default_for(kind)
            }
        };
        log::debug!("face loaded, inverted={}", theme.inverted());

        let mut viewport = ViewportTransform::new(viewport_rect);
        viewport.recenter(0.0);

        Self {
            config,
            viewport,
            theme,
            store,
            angle_deg: 0.0,
            battery_text: battery_label(&BatteryState::default()),
            dial_dirty: true,
            hand_dirty: true,
        }
    }

    /// Tears the face down and hands the store back.
    pub fn unload(self) -> S {
        self.store
    }

    #[inline]
    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[inline]
    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    #[inline]
    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn battery_text(&self) -> &str {
        &self.battery_text
    }

    pub fn needs_paint(&self) -> bool {
        self.dial_dirty || self.hand_dirty
    }

    fn mark_dirty(&mut self) {
        self.dial_dirty = true;
        self.hand_dirty = true;
    }

    fn draw_dial<G: GraphicsContext>(&self, ctx: &mut G) {
        let bounds = self.viewport.dial_bounds();
        let dial = DialGeometry::new(bounds);
        // half the dial layer's own height, so the disc sits at the dial center
        let half_h = (bounds.size.height / 2) as i32;

        ctx.set_origin(self.viewport.dial_rect().top_left);
        ctx.set_fill_color(self.theme.color(ColorRole::Background));
        ctx.fill_circle(Point::new(half_h, half_h), FACE_RADIUS);

        ctx.set_text_color(self.theme.color(ColorRole::Foreground));
        for n in dial.numerals() {
            ctx.draw_text(
                &n.text,
                FontKey::Gothic24Bold,
                n.frame,
                TextOverflow::WordWrap,
                TextAlignment::Right,
            );
        }

        for tick in dial.hour_ticks().chain(dial.minor_ticks()) {
            ctx.set_stroke_color(self.theme.color(tick.color_role()));
            ctx.set_stroke_width(tick.stroke_width);
            ctx.draw_line(tick.inner, tick.outer);
        }
    }

    fn draw_hand<G: GraphicsContext>(&self, ctx: &mut G) {
        ctx.set_origin(Point::zero());
        let quad = HandQuad::new(
            self.viewport.dial_center(),
            self.viewport.hand_tip(self.angle_deg),
            self.config.hand_half_thickness,
        );
        ctx.set_fill_color(self.theme.color(ColorRole::Hand));
        ctx.fill_polygon(quad.points());

        if self.config.show_battery {
            let view = self.viewport.viewport_rect();
            let frame = Rectangle::new(
                view.top_left + Point::new(0, self.config.battery_top()),
                Size::new(view.size.width, BATTERY_HEIGHT),
            );
            ctx.set_text_color(self.theme.color(ColorRole::BatteryText));
            ctx.draw_text(
                &self.battery_text,
                FontKey::Gothic28Bold,
                frame,
                TextOverflow::WordWrap,
                TextAlignment::Center,
            );
        }
    }
}

impl<S: PersistStore> TickSink for Renderer<S> {
    fn on_tick(&mut self, now: Option<DateTime>) {
        self.angle_deg = match face_angle(&self.config, now) {
            Some(a) => a,
            None => {
                log::warn!("clock unavailable ({:?}), showing 12 o'clock", now);
                0.0
            }
        };
        self.viewport.recenter(self.angle_deg);
        self.mark_dirty();
        log::debug!("tick: angle {} deg", self.angle_deg);
    }
}

impl<S: PersistStore> ClickSink for Renderer<S> {
    fn on_click(&mut self, button: Button) {
        if button != Button::Select {
            return;
        }
        let inverted = self.theme.toggle();
        if let Err(e) = self.store.write_bool(THEME_KEY, inverted) {
            log::warn!("theme write failed: {:?}", e);
        }
        log::debug!("theme toggled, inverted={}", inverted);
        self.mark_dirty();
    }
}

impl<S: PersistStore> BatterySink for Renderer<S> {
    fn on_battery(&mut self, state: BatteryState) {
        self.battery_text = battery_label(&state);
        self.hand_dirty = true;
    }
}

impl<S: PersistStore> PaintSink for Renderer<S> {
    fn paint<G: GraphicsContext>(&mut self, ctx: &mut G) {
        log::trace!("paint at {} deg", self.angle_deg);

        ctx.set_origin(Point::zero());
        ctx.set_fill_color(self.theme.color(ColorRole::Background));
        ctx.fill_rect(self.viewport.viewport_rect());

        self.draw_dial(ctx);
        self.draw_hand(ctx);

        self.dial_dirty = false;
        self.hand_dirty = false;
    }
}
