//! The site controller.
//!
//! [`Site`] owns every piece of interactive state (catalog, filtered view,
//! slider, lightbox, form flow, scroll chrome) together with the scheduler
//! that drives timers. Input arrives as [`Event`]s through [`Site::dispatch`];
//! time moves through [`Site::advance_to`]. After each transition the
//! affected part of the state is projected onto the [`Surface`].
//!
//! Everything runs on the caller's thread. An event or task runs to
//! completion before the next one starts, so the last one to run wins.

use crate::catalog::Catalog;
use crate::chrome::{ChromeState, ScrollTracker, ScrollUpdate};
use crate::config::SiteConfig;
use crate::filter::{Filter, FilteredView, apply_filter};
use crate::form::{self, BannerId, ContactFields, FormFlow, SubmitResponse, Submitter};
use crate::input::{Action, Point, SwipeTracker, key_action};
use crate::lightbox::{Lightbox, resolve_selection};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::slider::{Direction, Slider};
use crate::surface::Surface;
use crate::types::ImageDescriptor;
use serde::{Deserialize, Serialize};

/// Everything a visitor can do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Click on a filter control
    Filter { key: String },
    /// Click on the `index`-th visible gallery entry
    OpenItem { index: usize },
    CloseLightbox,
    /// Click on the lightbox backdrop (outside the image)
    BackdropClick,
    LightboxNext,
    LightboxPrev,
    /// Raw key identifier, e.g. `ArrowLeft`
    Key { key: String },
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    /// Slider arrow, `step` is `1` or `-1`
    ChangeSlide { step: i64 },
    /// Slider dot, 0-based
    JumpToSlide { index: usize },
    Submit { fields: ContactFields },
    Scroll { y: f64, viewport_height: f64 },
    ToggleMenu,
    /// In-page navigation link
    JumpToSection { id: String },
    ScrollToTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    SlideTick,
    SettleSubmission,
    DismissBanner(BannerId),
}

pub struct Site<S: Surface, B: Submitter> {
    config: SiteConfig,
    surface: S,
    submitter: B,
    catalog: Catalog,
    view: FilteredView,
    slider: Slider,
    lightbox: Lightbox,
    swipe: SwipeTracker,
    form: FormFlow,
    scroll: ScrollTracker,
    scheduler: Scheduler<Task>,
    autoplay: Option<TaskHandle>,
}

impl<S: Surface, B: Submitter> Site<S, B> {
    /// Capture the catalog from `surface`, project the initial state and
    /// start the slider's autoplay.
    pub fn start(config: SiteConfig, surface: S, submitter: B) -> Self {
        let catalog = Catalog::capture(&surface);
        let view = FilteredView::all(&catalog);
        let slider = Slider::new(surface.slide_count());
        let scroll = ScrollTracker::new(config.scroll.clone(), surface.scroll_targets());

        let mut site = Self {
            config,
            surface,
            submitter,
            catalog,
            view,
            slider,
            lightbox: Lightbox::Closed,
            swipe: SwipeTracker::default(),
            form: FormFlow::default(),
            scroll,
            scheduler: Scheduler::new(),
            autoplay: None,
        };

        site.surface.set_active_filter(site.view.filter().key());
        site.project_gallery();
        if site.slider.count() > 0 {
            site.surface.set_active_slide(site.slider.active());
            site.autoplay = Some(
                site.scheduler
                    .schedule_every(site.config.slider.interval_ms, Task::SlideTick),
            );
        }
        log::debug!(
            "site started: {} images, {} slides",
            site.catalog.len(),
            site.slider.count()
        );
        site
    }

    // ---- accessors ---------------------------------------------------------

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn filtered_images(&self) -> Vec<&ImageDescriptor> {
        self.view.images(&self.catalog).collect()
    }

    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    pub fn lightbox(&self) -> Lightbox {
        self.lightbox
    }

    /// Image the lightbox currently shows.
    pub fn lightbox_image(&self) -> Option<&ImageDescriptor> {
        self.lightbox
            .active()
            .and_then(|i| self.view.get(&self.catalog, i))
    }

    pub fn chrome(&self) -> ChromeState {
        self.scroll.chrome()
    }

    pub fn is_submitting(&self) -> bool {
        self.form.is_submitting()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn submitter(&self) -> &B {
        &self.submitter
    }

    /// Virtual time in milliseconds since start.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // ---- event loop ----------------------------------------------------------

    pub fn dispatch(&mut self, event: Event) {
        log::trace!("t={} event {:?}", self.now(), event);
        match event {
            Event::Filter { key } => self.apply_filter(&key),
            Event::OpenItem { index } => self.open(index),
            Event::CloseLightbox | Event::BackdropClick => self.close(),
            Event::LightboxNext => self.next(),
            Event::LightboxPrev => self.prev(),
            Event::Key { key } => self.key(&key),
            Event::TouchStart { x, y } => self.swipe.touch_start(Point::new(x, y)),
            Event::TouchMove { x, y } => self.touch_move(Point::new(x, y)),
            Event::ChangeSlide { step } => match Direction::from_step(step) {
                Some(direction) => self.change_slide(direction),
                None => log::trace!("ignoring slide step {step}"),
            },
            Event::JumpToSlide { index } => self.jump_to_slide(index),
            Event::Submit { fields } => {
                self.submit(fields);
            }
            Event::Scroll { y, viewport_height } => self.scroll(y, viewport_height),
            Event::ToggleMenu => self.toggle_menu(),
            Event::JumpToSection { id } => self.jump_to_section(&id),
            Event::ScrollToTop => self.scroll_to(0.0),
        }
    }

    /// Run every task due up to `time`, then move the clock there.
    ///
    /// Runs of autoplay ticks with nothing else due in between are applied
    /// as one jump, so the cost does not grow with the distance travelled.
    pub fn advance_to(&mut self, time: u64) {
        loop {
            if let Some(handle) = self.autoplay {
                let skipped = self.scheduler.skip_periodic(handle, time);
                if skipped > 0 {
                    self.slider.advance_many(skipped);
                }
            }
            let Some((_, task)) = self.scheduler.pop_due(time) else {
                break;
            };
            self.run_task(task);
        }
        self.scheduler.settle(time);
    }

    pub fn advance_by(&mut self, ms: u64) {
        self.advance_to(self.now().saturating_add(ms));
    }

    /// Cancel every timer. The state stays inspectable.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.autoplay.take() {
            self.scheduler.cancel(handle);
        }
        self.scheduler.clear();
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::SlideTick => self.change_slide(Direction::Forward),
            Task::SettleSubmission => self.settle_submission(),
            Task::DismissBanner(id) => {
                if !self.surface.remove_banner(id) {
                    log::trace!("banner {id:?} already gone");
                }
            }
        }
    }

    // ---- gallery -------------------------------------------------------------

    /// Narrow the gallery to `key` (`"all"` for everything).
    pub fn apply_filter(&mut self, key: &str) {
        let shown = self.lightbox_image().map(|img| img.location.clone());
        self.view = apply_filter(&self.catalog, Filter::from_key(key));
        log::debug!("filter '{}' -> {} of {}", key, self.view.len(), self.catalog.len());

        self.surface.set_active_filter(key);
        self.project_gallery();

        if self.lightbox.is_open() {
            self.lightbox.follow(shown.as_deref(), &self.view, &self.catalog);
            self.project_lightbox();
        }
    }

    fn project_gallery(&mut self) {
        for index in 0..self.catalog.len() {
            self.surface.set_item_visible(index, self.view.contains(index));
        }
    }

    // ---- lightbox ------------------------------------------------------------

    /// Open the lightbox on the `selection`-th visible gallery entry.
    pub fn open(&mut self, selection: usize) {
        let visible = self.surface.visible_locations();
        let Some(index) = resolve_selection(&visible, selection, &self.view, &self.catalog) else {
            log::trace!("selection {selection} does not resolve to a filtered image");
            return;
        };
        self.lightbox = Lightbox::Open { index };
        self.surface.set_scroll_locked(true);
        self.project_lightbox();
        log::debug!("lightbox open at {index}");
    }

    pub fn close(&mut self) {
        if self.lightbox.close() {
            self.surface.hide_lightbox();
            self.surface.set_scroll_locked(false);
            log::debug!("lightbox closed");
        }
    }

    pub fn next(&mut self) {
        self.step_lightbox(Direction::Forward);
    }

    pub fn prev(&mut self) {
        self.step_lightbox(Direction::Backward);
    }

    fn step_lightbox(&mut self, direction: Direction) {
        if let Some(index) = self.lightbox.step(direction, self.view.len()) {
            self.project_lightbox();
            log::debug!("lightbox {direction:?} -> {index}");
        }
    }

    fn project_lightbox(&mut self) {
        if let Some(index) = self.lightbox.active() {
            let image = self.view.get(&self.catalog, index);
            self.surface.show_lightbox(image);
        }
    }

    /// Keyboard bindings apply only while the lightbox is open.
    pub fn key(&mut self, key: &str) {
        if !self.lightbox.is_open() {
            return;
        }
        match key_action(key) {
            Some(Action::Close) => self.close(),
            Some(Action::Prev) => self.prev(),
            Some(Action::Next) => self.next(),
            None => {}
        }
    }

    fn touch_move(&mut self, point: Point) {
        let threshold = self.config.lightbox.swipe_threshold_px;
        let Some(direction) = self.swipe.touch_move(point, threshold) else {
            return;
        };
        self.change_slide(direction);
        if self.lightbox.is_open() {
            self.step_lightbox(direction);
        }
    }

    // ---- slider --------------------------------------------------------------

    pub fn change_slide(&mut self, direction: Direction) {
        if let Some(index) = self.slider.advance(direction) {
            self.surface.set_active_slide(index);
            log::debug!("slide -> {index}");
        }
    }

    pub fn jump_to_slide(&mut self, index: usize) {
        match self.slider.jump_to(index) {
            Some(index) => self.surface.set_active_slide(index),
            None => log::trace!("no slide {index}"),
        }
    }

    // ---- contact form ----------------------------------------------------------

    /// Validate and annotate the form. Clears earlier markers and banners.
    pub fn validate_form(&mut self, fields: &ContactFields) -> bool {
        self.surface.clear_field_errors();
        self.surface.clear_banners();
        let errors = form::validate(fields);
        for error in &errors {
            self.surface.mark_field_error(error);
        }
        errors.is_empty()
    }

    /// Validate and, if valid, start a submission. Returns whether one was
    /// started.
    pub fn submit(&mut self, fields: ContactFields) -> bool {
        if self.form.is_submitting() {
            log::trace!("submission already in flight");
            return false;
        }
        if !self.validate_form(&fields) {
            log::debug!("contact form invalid");
            return false;
        }
        if !self.form.begin(fields) {
            return false;
        }
        self.surface
            .set_submit_busy(Some(self.config.form.sending_label.as_str()));
        self.scheduler
            .schedule_after(self.config.form.submit_delay_ms, Task::SettleSubmission);
        true
    }

    fn settle_submission(&mut self) {
        let Some(fields) = self.form.settle() else {
            return;
        };
        let result = self.submitter.submit(&fields);
        let delivered = matches!(result, Ok(SubmitResponse { success: true }));
        match &result {
            Ok(_) if delivered => log::debug!("contact form delivered"),
            Ok(_) => log::warn!("contact form declined by endpoint"),
            Err(e) => log::error!("form submission error: {e}"),
        }

        if delivered {
            self.surface.reset_form();
            self.surface.clear_field_errors();
        }
        let banner = self.form.banner_for(&result, &self.config.form);
        self.surface.show_banner(&banner);
        self.scheduler
            .schedule_after(self.config.form.banner_ms, Task::DismissBanner(banner.id));
        self.surface.set_submit_busy(None);
    }

    // ---- page chrome ----------------------------------------------------------

    pub fn scroll(&mut self, y: f64, viewport_height: f64) {
        let now = self.now();
        let Some(update) = self.scroll.on_scroll(now, y, viewport_height) else {
            return;
        };
        self.project_scroll(&update);
    }

    /// Scroll the page to `y` as a section jump or back-to-top click would.
    pub fn scroll_to(&mut self, y: f64) {
        self.surface.scroll_to(y);
        let update = self.scroll.scroll_to(y);
        self.project_scroll(&update);
    }

    fn project_scroll(&mut self, update: &ScrollUpdate) {
        self.surface.set_chrome(update.chrome);
        for id in &update.revealed {
            self.surface.mark_revealed(id);
        }
        for (id, src) in &update.loaded {
            self.surface.load_image(id, src);
        }
    }

    pub fn toggle_menu(&mut self) {
        let chrome = self.scroll.toggle_menu();
        self.surface.set_chrome(chrome);
    }

    /// Follow an in-page link: close the mobile menu, then scroll to the
    /// section if it is known.
    pub fn jump_to_section(&mut self, id: &str) {
        if self.scroll.close_menu() {
            self.surface.set_chrome(self.scroll.chrome());
        }
        match self.scroll.target_top(id) {
            Some(top) => self.scroll_to(top),
            None => log::trace!("no section '{id}'"),
        }
    }
}
