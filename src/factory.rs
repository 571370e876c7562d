//! The checkout button factory and its icon cache.
//!
//! [`ButtonFactory`] is the single point of construction for
//! [`CheckoutButton`]s. It owns an [`IconCache`] of rendered icons keyed by
//! size, scale and style, so each distinct configuration is parsed and
//! rasterized at most once per factory.
//!
//! # Shared instance
//!
//! [`ButtonFactory::shared`] returns a process-wide factory built from
//! [`ButtonProfile::default`] on first use. Independent factories with their
//! own profile and cache can be created with [`ButtonFactory::new`] and
//! passed explicitly to whatever needs them.
//!
//! # Concurrent cache misses
//!
//! Each cache key owns a slot guarded by its own mutex. The first thread to
//! lock an empty slot renders the icon; threads that arrive while it renders
//! wait on the slot and then reuse the stored `Arc`. Misses for the same key
//! therefore collapse into a single rasterization, while different keys
//! render in parallel. A failed render removes its slot from the map, so
//! failing keys leave nothing behind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use crate::button::{CheckoutButton, CheckoutDelegate};
use crate::error::{Error, Result};
use crate::icon::RasterImage;
use crate::profile::{ButtonProfile, ButtonStyle};
use crate::raster::rasterize;

// ============================================================================
// IconRequest / IconCacheKey
// ============================================================================

/// Size, density and style of an icon to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconRequest {
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
    /// Pixels per point.
    pub scale: f32,
    pub style: ButtonStyle,
}

impl IconRequest {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
            style: ButtonStyle::Standard,
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn cache_key(&self) -> IconCacheKey {
        IconCacheKey::new(self.width, self.height, self.scale, self.style)
    }
}

/// Key for cached icons.
///
/// Uses width, height and scale (as integer bits) plus the style variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconCacheKey {
    width_bits: u32,
    height_bits: u32,
    scale_bits: u32,
    style: ButtonStyle,
}

impl IconCacheKey {
    pub fn new(width: f32, height: f32, scale: f32, style: ButtonStyle) -> Self {
        Self {
            width_bits: width.to_bits(),
            height_bits: height.to_bits(),
            scale_bits: scale.to_bits(),
            style,
        }
    }
}

// ============================================================================
// IconCache
// ============================================================================

type Slot = Arc<Mutex<Option<Arc<RasterImage>>>>;

/// Unbounded map from [`IconCacheKey`] to rendered icons.
///
/// Entries live as long as the cache; there is no eviction.
#[derive(Default)]
pub struct IconCache {
    slots: Mutex<HashMap<IconCacheKey, Slot>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached icon for `key`, if one has been rendered.
    pub fn get(&self, key: &IconCacheKey) -> Option<Arc<RasterImage>> {
        let slot = lock(&self.slots).get(key).cloned()?;
        lock(&slot).clone()
    }

    /// Returns the icon for `key`, calling `render` to produce it on a miss.
    ///
    /// Concurrent callers with the same key block until the first one
    /// finishes, then share its result; `render` runs at most once per
    /// successful insertion.
    pub fn get_or_try_insert_with<F>(&self, key: IconCacheKey, render: F) -> Result<Arc<RasterImage>>
    where
        F: FnOnce() -> Result<RasterImage>,
    {
        // Hold the map lock only long enough to find or create the slot.
        let slot = Arc::clone(lock(&self.slots).entry(key).or_default());

        let mut entry = lock(&slot);
        if let Some(icon) = entry.as_ref() {
            log::debug!("icon cache hit for {key:?}");
            return Ok(Arc::clone(icon));
        }

        log::debug!("icon cache miss for {key:?}");
        match render() {
            Ok(icon) => {
                let icon = Arc::new(icon);
                *entry = Some(Arc::clone(&icon));
                Ok(icon)
            }
            Err(err) => {
                // Slot lock is still held; nobody else can fill it meanwhile.
                let mut slots = lock(&self.slots);
                if slots.get(&key).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
                    slots.remove(&key);
                }
                Err(err)
            }
        }
    }

    /// Number of keys with a slot, rendered or in progress.
    #[cfg(test)]
    fn slot_count(&self) -> usize {
        lock(&self.slots).len()
    }

    /// Number of rendered icons held.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locks a mutex, recovering the data if another thread panicked while
/// holding it. Cache contents are only ever replaced whole, so they stay
/// consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// ButtonFactory
// ============================================================================

/// Builds checkout buttons and caches their icons.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use checkout_button::{ButtonFactory, CheckoutButton, CheckoutDelegate};
///
/// struct Cart;
///
/// impl CheckoutDelegate for Cart {
///     fn checkout_selected(&self, _button: &CheckoutButton) {
///         // start the checkout flow
///     }
/// }
///
/// let cart = Arc::new(Cart);
/// let button = ButtonFactory::shared()
///     .checkout_button(Arc::downgrade(&cart))
///     .unwrap();
/// assert!(button.press());
/// ```
pub struct ButtonFactory {
    profile: ButtonProfile,
    cache: IconCache,
    renders: AtomicUsize,
}

impl ButtonFactory {
    /// Returns the process-wide factory, creating it on first call.
    ///
    /// Safe to call from any thread: initialization runs exactly once and
    /// every caller observes the same fully constructed instance.
    pub fn shared() -> &'static ButtonFactory {
        static SHARED: OnceLock<ButtonFactory> = OnceLock::new();
        init_once(&SHARED, || ButtonFactory::new(ButtonProfile::default()))
    }

    /// Creates an independent factory with its own profile and empty cache.
    pub fn new(profile: ButtonProfile) -> Self {
        Self {
            profile,
            cache: IconCache::new(),
            renders: AtomicUsize::new(0),
        }
    }

    pub fn profile(&self) -> &ButtonProfile {
        &self.profile
    }

    /// Returns the icon for `request`, rendering and caching it on first use.
    pub fn icon(&self, request: &IconRequest) -> Result<Arc<RasterImage>> {
        self.cache
            .get_or_try_insert_with(request.cache_key(), || self.render(request))
    }

    /// Returns the icon for the profile's default size, scale and style.
    pub fn default_icon(&self) -> Result<Arc<RasterImage>> {
        self.icon(&self.profile.default_request())
    }

    /// Creates a button with the default icon, bound to `delegate`.
    ///
    /// Fails with [`Error::CallbackRequired`] if `delegate` is dangling
    /// (e.g. `Weak::new()` or already dropped); no icon is rendered in that
    /// case.
    pub fn checkout_button<D: CheckoutDelegate + 'static>(&self, delegate: Weak<D>) -> Result<CheckoutButton> {
        self.checkout_button_for(delegate, &self.profile.default_request())
    }

    /// Creates a button whose icon matches `request`.
    pub fn checkout_button_for<D: CheckoutDelegate + 'static>(
        &self,
        delegate: Weak<D>,
        request: &IconRequest,
    ) -> Result<CheckoutButton> {
        require_delegate(&delegate)?;
        let icon = self.icon(request)?;
        Ok(self.build(icon, delegate))
    }

    /// Creates a button that displays `image` as-is.
    ///
    /// Skips the cache and the rasterizer entirely. The image's size is not
    /// checked: callers supplying their own artwork are responsible for
    /// sizing it.
    pub fn checkout_button_with_image<D: CheckoutDelegate + 'static>(
        &self,
        delegate: Weak<D>,
        image: Arc<RasterImage>,
    ) -> Result<CheckoutButton> {
        require_delegate(&delegate)?;
        Ok(self.build(image, delegate))
    }

    /// How many times this factory has rasterized an icon.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Number of distinct icons currently cached.
    pub fn cached_icon_count(&self) -> usize {
        self.cache.len()
    }

    fn build<D: CheckoutDelegate + 'static>(&self, icon: Arc<RasterImage>, delegate: Weak<D>) -> CheckoutButton {
        CheckoutButton::new(icon, delegate, self.profile.accessibility_label.clone())
    }

    fn render(&self, request: &IconRequest) -> Result<RasterImage> {
        let document = self.profile.source.load()?;
        let document = match request.style {
            ButtonStyle::Standard => document,
            ButtonStyle::Monochrome(color) => document.repainted(color),
        };
        let icon = rasterize(&document, request.width, request.height, request.scale)?;
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(icon)
    }
}

/// Initializes `cell` with `make` exactly once, however many threads race on it.
fn init_once(cell: &OnceLock<ButtonFactory>, make: impl FnOnce() -> ButtonFactory) -> &ButtonFactory {
    cell.get_or_init(|| {
        log::debug!("initializing shared checkout button factory");
        make()
    })
}

fn require_delegate<D: ?Sized>(delegate: &Weak<D>) -> Result<()> {
    if delegate.strong_count() == 0 {
        return Err(Error::CallbackRequired);
    }
    Ok(())
}
