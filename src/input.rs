//! Button input.
//!
//! `Debouncer` turns raw level samples into debounced presses and is plain
//! logic. On the firmware side, `ButtonState` keeps a GPIO input plus its
//! debouncer behind `critical_section` so the GPIO interrupt handler and
//! the main loop can share it.

/// Buttons the face reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Back,
    Select,
}

/// Falling-edge detector with a minimum gap between accepted presses.
/// Buttons are active low.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debouncer {
    last_high: bool,
    last_press_ms: Option<u64>,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self { last_high: true, last_press_ms: None }
    }

    /// Feeds one sample. Returns true when it is an accepted press.
    pub fn update(&mut self, level_is_low: bool, now_ms: u64, debounce_ms: u64) -> bool {
        let was_high = self.last_high;
        self.last_high = !level_is_low;

        if !(was_high && level_is_low) {
            return false;
        }
        let accept = match self.last_press_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > debounce_ms,
        };
        if accept {
            self.last_press_ms = Some(now_ms);
        }
        accept
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "esp32s3")]
mod firmware {
    use core::cell::{Cell, RefCell};

    use critical_section::Mutex;
    use esp_hal::gpio::Input;

    use super::{Button, Debouncer};

    pub struct ButtonState<'a> {
        pub input: Mutex<RefCell<Option<Input<'a>>>>,
        pub debounce: Mutex<Cell<Debouncer>>,
        pub button: Button,
    }

    impl<'a> ButtonState<'a> {
        pub const fn new(button: Button) -> Self {
            Self {
                input: Mutex::new(RefCell::new(None)),
                debounce: Mutex::new(Cell::new(Debouncer::new())),
                button,
            }
        }
    }

    // Call from the GPIO interrupt handler.
    pub fn handle_button_generic(btn: &ButtonState, now_ms: u64, debounce_ms: u64, on_press: impl Fn(Button)) {
        critical_section::with(|cs| {
            let mut binding = btn.input.borrow_ref_mut(cs);
            let Some(input) = binding.as_mut() else {
                return;
            };

            if !input.is_interrupt_set() {
                return;
            }
            input.clear_interrupt();

            let cell = btn.debounce.borrow(cs);
            let mut d = cell.get();
            let pressed = d.update(input.is_low(), now_ms, debounce_ms);
            cell.set(d);
            if pressed {
                on_press(btn.button);
            }
        });
    }
}

#[cfg(feature = "esp32s3")]
pub use firmware::{handle_button_generic, ButtonState};

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: u64 = 240;

    #[test]
    fn press_on_falling_edge_only() {
        let mut d = Debouncer::new();
        assert!(d.update(true, 1000, DEBOUNCE));
        // held down: no repeat
        assert!(!d.update(true, 1500, DEBOUNCE));
        // release
        assert!(!d.update(false, 1600, DEBOUNCE));
        assert!(d.update(true, 2000, DEBOUNCE));
    }

    #[test]
    fn bounces_are_ignored() {
        let mut d = Debouncer::new();
        assert!(d.update(true, 1000, DEBOUNCE));
        assert!(!d.update(false, 1010, DEBOUNCE));
        assert!(!d.update(true, 1020, DEBOUNCE));
        assert!(!d.update(false, 1100, DEBOUNCE));
        assert!(d.update(true, 1300, DEBOUNCE));
    }

    #[test]
    fn first_press_right_after_boot_counts() {
        let mut d = Debouncer::default();
        assert!(d.update(true, 5, DEBOUNCE));
    }
}
