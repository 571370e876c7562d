//! The checkout button handed to the host UI and the delegate it reports to.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::icon::RasterImage;

/// Receives activation events from a [`CheckoutButton`].
///
/// Implemented by the merchant's code; the button never inspects the
/// concrete type behind it.
pub trait CheckoutDelegate: Send + Sync {
    /// Called when the user activates the checkout button.
    fn checkout_selected(&self, button: &CheckoutButton);
}

/// A ready-to-display checkout control.
///
/// The button shares its icon with the factory's cache and holds only a
/// weak reference to its delegate: the caller keeps the delegate alive.
/// Buttons are never cached; each factory call produces a new one.
#[derive(Clone)]
pub struct CheckoutButton {
    icon: Arc<RasterImage>,
    delegate: Weak<dyn CheckoutDelegate>,
    accessibility_label: String,
}

impl CheckoutButton {
    pub(crate) fn new<D: CheckoutDelegate + 'static>(
        icon: Arc<RasterImage>,
        delegate: Weak<D>,
        accessibility_label: String,
    ) -> Self {
        let delegate: Weak<dyn CheckoutDelegate> = delegate;
        Self {
            icon,
            delegate,
            accessibility_label,
        }
    }

    /// The image the button displays.
    pub fn icon(&self) -> &Arc<RasterImage> {
        &self.icon
    }

    /// Logical size of the button in points, taken from its icon.
    pub fn size_points(&self) -> (f32, f32) {
        self.icon.logical_size()
    }

    pub fn accessibility_label(&self) -> &str {
        &self.accessibility_label
    }

    /// True while the delegate is still alive.
    pub fn has_delegate(&self) -> bool {
        self.delegate.strong_count() > 0
    }

    /// Forwards a user activation to the delegate.
    ///
    /// Returns `false` if the delegate has been dropped in the meantime.
    pub fn press(&self) -> bool {
        match self.delegate.upgrade() {
            Some(delegate) => {
                delegate.checkout_selected(self);
                true
            }
            None => {
                log::debug!("checkout button pressed after its delegate was dropped");
                false
            }
        }
    }
}

impl fmt::Debug for CheckoutButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutButton")
            .field("icon", &self.icon.dimensions())
            .field("has_delegate", &self.has_delegate())
            .field("accessibility_label", &self.accessibility_label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl CheckoutDelegate for Counter {
        fn checkout_selected(&self, _button: &CheckoutButton) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn icon() -> Arc<RasterImage> {
        Arc::new(RasterImage::new_full_content(RgbaImage::new(88, 20), 2.0))
    }

    #[test]
    fn press_reaches_live_delegate() {
        let delegate = Arc::new(Counter::default());
        let button = CheckoutButton::new(icon(), Arc::downgrade(&delegate), "Checkout".into());

        assert!(button.press());
        assert!(button.press());
        assert_eq!(delegate.0.load(Ordering::SeqCst), 2);
        assert_eq!(button.size_points(), (44.0, 10.0));
        assert_eq!(button.accessibility_label(), "Checkout");
    }

    #[test]
    fn press_after_delegate_dropped_is_ignored() {
        let delegate = Arc::new(Counter::default());
        let button = CheckoutButton::new(icon(), Arc::downgrade(&delegate), String::new());
        drop(delegate);

        assert!(!button.has_delegate());
        assert!(!button.press());
    }

    #[test]
    fn button_does_not_own_delegate() {
        let delegate = Arc::new(Counter::default());
        let _button = CheckoutButton::new(icon(), Arc::downgrade(&delegate), String::new());
        assert_eq!(Arc::strong_count(&delegate), 1);
    }
}
