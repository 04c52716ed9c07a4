use std::collections::BTreeMap;
use std::time::Instant;

use super::drag::{
    DragContext, DragController, DragOutcome, PointerButton, PointerEvent, PointerKind,
};
use super::observer::{WindowEvent, WindowObserver};
use super::store::WindowRecordStore;
use super::z_order::ZOrderAllocator;
use super::{RecordPatch, WindowMode, WindowRecord};
use crate::config::WmConfig;
use crate::error::{WmError, WmResult};
use crate::geometry::{Rect, Viewport, centered_rect, clamp_to_viewport, maximized_rect};

#[derive(Debug, Clone, Copy)]
struct PendingHide {
    deadline: Instant,
    // record epoch at scheduling time; a later open or close makes this stale
    epoch: u64,
}

/// Owns every window record and coordinates lifecycle, stacking and drags.
///
/// All operations take an opaque identifier and never fail loudly: an
/// unknown id or a transition that makes no sense in the current state is a
/// no-op. The `try_*` variants report why.
///
/// Observer callbacks are dispatched after an operation has finished
/// mutating state.
pub struct WindowManager {
    config: WmConfig,
    store: WindowRecordStore,
    z_order: ZOrderAllocator,
    drags: BTreeMap<String, DragController>,
    pending_hides: BTreeMap<String, PendingHide>,
    observers: Vec<Box<dyn WindowObserver>>,
    queued: Vec<WindowEvent>,
    focused: Option<String>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(WmConfig::default())
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("z_order", &self.z_order)
            .field("focused", &self.focused)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl WindowManager {
    pub fn new(config: WmConfig) -> Self {
        Self {
            config,
            store: WindowRecordStore::new(),
            z_order: ZOrderAllocator::new(config.z_base),
            drags: BTreeMap::new(),
            pending_hides: BTreeMap::new(),
            observers: Vec::new(),
            queued: Vec::new(),
            focused: None,
        }
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    pub fn add_observer(&mut self, observer: Box<dyn WindowObserver>) {
        self.observers.push(observer);
    }

    pub fn get_record(&self, id: &str) -> Option<&WindowRecord> {
        self.store.get(id)
    }

    pub fn records(&self) -> impl Iterator<Item = &WindowRecord> {
        self.store.all()
    }

    /// The visible window with the highest stacking value.
    pub fn focused(&self) -> Option<&str> {
        ZOrderAllocator::topmost(self.store.all())
    }

    /// Visible windows from back to front, i.e. in paint order.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.store.all().filter(|r| r.is_visible()).collect();
        visible.sort_by_key(|r| r.z_index());
        visible
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.drags.get(id).is_some_and(DragController::is_dragging)
    }

    pub fn is_closing(&self, id: &str) -> bool {
        self.pending_hides.contains_key(id)
    }

    pub fn open(&mut self, id: &str) {
        self.open_inner(id);
        self.flush();
    }

    pub fn close(&mut self, id: &str) {
        let result = self.try_close(id);
        quietly("close", result);
    }

    pub fn try_close(&mut self, id: &str) -> WmResult<()> {
        let result = self.close_inner(id);
        self.flush();
        result
    }

    pub fn minimize(&mut self, id: &str) {
        let result = self.try_minimize(id);
        quietly("minimize", result);
    }

    pub fn try_minimize(&mut self, id: &str) -> WmResult<()> {
        let result = self.minimize_inner(id);
        self.flush();
        result
    }

    pub fn toggle_maximize(&mut self, id: &str) {
        let result = self.try_toggle_maximize(id);
        quietly("toggle_maximize", result);
    }

    pub fn try_toggle_maximize(&mut self, id: &str) -> WmResult<()> {
        let result = self.toggle_maximize_inner(id);
        self.flush();
        result
    }

    pub fn bring_to_front(&mut self, id: &str) {
        let result = self.try_bring_to_front(id);
        quietly("bring_to_front", result);
    }

    pub fn try_bring_to_front(&mut self, id: &str) -> WmResult<()> {
        let result = self.bring_to_front_inner(id);
        self.flush();
        result
    }

    /// Undo whichever of minimize or maximize currently applies.
    pub fn restore(&mut self, id: &str) {
        let result = self.try_restore(id);
        quietly("restore", result);
    }

    pub fn try_restore(&mut self, id: &str) -> WmResult<()> {
        let state = self
            .store
            .get(id)
            .map(|record| (record.is_minimized(), record.is_maximized()));
        let result = match state {
            None => Err(WmError::unknown(id)),
            Some((true, _)) => {
                self.open_inner(id);
                Ok(())
            }
            Some((false, true)) => self.toggle_maximize_inner(id),
            Some((false, false)) => Err(WmError::invalid(
                id,
                "restore",
                "window is neither minimized nor maximized",
            )),
        };
        self.flush();
        result
    }

    /// Forget a window entirely. Its next `open` starts from scratch.
    pub fn deregister(&mut self, id: &str) {
        let result = self.try_deregister(id);
        quietly("deregister", result);
    }

    pub fn try_deregister(&mut self, id: &str) -> WmResult<()> {
        let result = match self.store.remove(id) {
            None => Err(WmError::unknown(id)),
            Some(record) => {
                self.drags.remove(id);
                self.pending_hides.remove(id);
                if record.is_visible() {
                    self.queue_visibility(id, false);
                }
                tracing::debug!(window_id = %id, "deregistered window");
                Ok(())
            }
        };
        self.flush();
        result
    }

    /// Hide `id` once `close_delay` has elapsed after `now`.
    ///
    /// The hide is applied by [`poll_deferred`](Self::poll_deferred). Only a
    /// re-`open` (or an explicit `close`) before the deadline cancels it;
    /// minimizing or maximizing during the fade does not.
    pub fn schedule_close(&mut self, id: &str, now: Instant) {
        let result = self.try_schedule_close(id, now);
        quietly("schedule_close", result);
    }

    pub fn try_schedule_close(&mut self, id: &str, now: Instant) -> WmResult<()> {
        let record = self.store.get(id).ok_or_else(|| WmError::unknown(id))?;
        if !record.is_visible() {
            return Err(WmError::invalid(id, "schedule_close", "window is not visible"));
        }
        let epoch = record.epoch();
        if self.config.close_delay.is_zero() {
            return self.try_close(id);
        }
        let pending = PendingHide {
            deadline: now + self.config.close_delay,
            epoch,
        };
        tracing::trace!(window_id = %id, delay = ?self.config.close_delay, "scheduled close");
        self.pending_hides.insert(id.to_string(), pending);
        Ok(())
    }

    /// Apply every scheduled close whose deadline has passed. Returns how
    /// many windows were actually hidden.
    pub fn poll_deferred(&mut self, now: Instant) -> usize {
        let due: Vec<(String, PendingHide)> = self
            .pending_hides
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(id, pending)| (id.clone(), *pending))
            .collect();
        let mut hidden = 0;
        for (id, pending) in due {
            self.pending_hides.remove(&id);
            let current = self.store.get(&id).map(WindowRecord::epoch);
            if current != Some(pending.epoch) {
                tracing::trace!(window_id = %id, "dropped stale deferred close");
                continue;
            }
            if self.close_inner(&id).is_ok() {
                hidden += 1;
            }
        }
        self.flush();
        hidden
    }

    /// Earliest pending close deadline, for sizing an event-loop poll.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_hides.values().map(|p| p.deadline).min()
    }

    /// Adopt a new viewport: maximized windows are refitted and their saved
    /// rectangle clamped, everything else is clamped back inside.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.config.viewport {
            return;
        }
        self.config.viewport = viewport;
        let inset = self.config.maximize_inset;
        let updates: Vec<(String, Rect, WindowMode)> = self
            .store
            .all()
            .filter_map(|record| {
                let (rect, mode) = match record.mode() {
                    WindowMode::Maximized { saved } => (
                        maximized_rect(viewport, inset),
                        WindowMode::Maximized {
                            saved: clamp_to_viewport(saved, viewport),
                        },
                    ),
                    WindowMode::Normal => {
                        (clamp_to_viewport(record.rect(), viewport), WindowMode::Normal)
                    }
                };
                (rect != record.rect() || mode != record.mode())
                    .then(|| (record.id().to_string(), rect, mode))
            })
            .collect();
        for (id, rect, mode) in updates {
            let moved = self.store.get(&id).is_some_and(|r| r.rect() != rect);
            self.store.upsert(&id, RecordPatch::default().rect(rect).mode(mode));
            if moved {
                self.queue_geometry(&id, rect);
            }
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport changed");
        self.flush();
    }

    /// Feed a pointer event aimed at `id`'s drag handle.
    pub fn handle_pointer(&mut self, id: &str, event: PointerEvent) -> DragOutcome {
        let outcome = self.pointer_inner(id, event);
        self.flush();
        outcome
    }

    /// Feed a pointer event that was not aimed at any particular window.
    ///
    /// Moves and releases reach every window currently being dragged, the
    /// same way document-level listeners would; presses are ignored because
    /// they need a target.
    pub fn handle_global_pointer(&mut self, event: PointerEvent) -> bool {
        if matches!(event.kind, PointerKind::Down(_)) {
            return false;
        }
        let dragging: Vec<String> = self
            .drags
            .iter()
            .filter(|(_, drag)| drag.is_dragging())
            .map(|(id, _)| id.clone())
            .collect();
        let mut handled = false;
        for id in dragging {
            handled |= self.pointer_inner(&id, event) != DragOutcome::Ignored;
        }
        self.flush();
        handled
    }

    fn open_inner(&mut self, id: &str) {
        let z = self.z_order.next();
        self.pending_hides.remove(id);
        let base = RecordPatch::default()
            .z_index(z)
            .visible(true)
            .minimized(false)
            .transition();

        let Some(record) = self.store.get(id) else {
            let rect = centered_rect(self.config.default_size, self.config.viewport);
            self.store.upsert(id, base.rect(rect).mode(WindowMode::Normal));
            tracing::debug!(window_id = %id, z, "opened window");
            self.queue_visibility(id, true);
            self.queue_geometry(id, rect);
            return;
        };

        let was_visible = record.is_visible();
        let previous_rect = record.rect();
        if was_visible || record.is_minimized() {
            // already open or coming back from the taskbar: keep geometry and mode
            self.store.upsert(id, base);
            tracing::debug!(window_id = %id, z, was_visible, "reopened window");
        } else {
            let rect = centered_rect(self.config.default_size, self.config.viewport);
            self.store.upsert(id, base.rect(rect).mode(WindowMode::Normal));
            tracing::debug!(window_id = %id, z, "opened closed window fresh");
            if rect != previous_rect {
                self.queue_geometry(id, rect);
            }
        }
        if !was_visible {
            self.queue_visibility(id, true);
        }
    }

    fn close_inner(&mut self, id: &str) -> WmResult<()> {
        let record = self.store.get(id).ok_or_else(|| WmError::unknown(id))?;
        let was_visible = record.is_visible();
        self.pending_hides.remove(id);
        self.cancel_drag(id);
        self.store.upsert(
            id,
            RecordPatch::default()
                .visible(false)
                .minimized(false)
                .transition(),
        );
        tracing::debug!(window_id = %id, "closed window");
        if was_visible {
            self.queue_visibility(id, false);
        }
        Ok(())
    }

    fn minimize_inner(&mut self, id: &str) -> WmResult<()> {
        let record = self.store.get(id).ok_or_else(|| WmError::unknown(id))?;
        if record.is_minimized() {
            return Ok(());
        }
        if !record.is_visible() {
            return Err(WmError::invalid(id, "minimize", "window is closed"));
        }
        self.cancel_drag(id);
        self.store.upsert(id, RecordPatch::default().visible(false).minimized(true));
        tracing::debug!(window_id = %id, "minimized window");
        self.queue_visibility(id, false);
        Ok(())
    }

    fn toggle_maximize_inner(&mut self, id: &str) -> WmResult<()> {
        let record = self.store.get(id).ok_or_else(|| WmError::unknown(id))?;
        if !record.is_visible() {
            return Err(WmError::invalid(id, "toggle_maximize", "window is not visible"));
        }
        let (mode, rect) = match record.mode() {
            WindowMode::Normal => (
                WindowMode::Maximized {
                    saved: record.rect(),
                },
                maximized_rect(self.config.viewport, self.config.maximize_inset),
            ),
            WindowMode::Maximized { saved } => (WindowMode::Normal, saved),
        };
        let changed = rect != record.rect();
        self.cancel_drag(id);
        self.store.upsert(id, RecordPatch::default().mode(mode).rect(rect));
        tracing::debug!(
            window_id = %id,
            maximized = matches!(mode, WindowMode::Maximized { .. }),
            "toggled maximize"
        );
        if changed {
            self.queue_geometry(id, rect);
        }
        Ok(())
    }

    fn bring_to_front_inner(&mut self, id: &str) -> WmResult<()> {
        let record = self.store.get(id).ok_or_else(|| WmError::unknown(id))?;
        if !record.is_visible() {
            return Err(WmError::invalid(id, "bring_to_front", "window is not visible"));
        }
        let z = self.z_order.next();
        self.store.upsert(id, RecordPatch::default().z_index(z));
        tracing::trace!(window_id = %id, z, "brought window to front");
        Ok(())
    }

    fn pointer_inner(&mut self, id: &str, event: PointerEvent) -> DragOutcome {
        let Some(record) = self.store.get(id) else {
            tracing::debug!(error = %WmError::unknown(id), "pointer event ignored");
            return DragOutcome::Ignored;
        };
        let ctx = DragContext {
            rect: record.rect(),
            viewport: self.config.viewport,
            draggable: record.is_visible() && !record.is_maximized(),
        };
        if event.kind == PointerKind::Down(PointerButton::Primary) && !ctx.draggable {
            tracing::trace!(
                error = %WmError::invalid(id, "drag", "window is hidden or maximized"),
                "drag not started"
            );
        }
        let outcome = self
            .drags
            .entry(id.to_string())
            .or_default()
            .handle(event, ctx);
        match outcome {
            DragOutcome::Started => {
                tracing::trace!(window_id = %id, "drag started");
                quietly("bring_to_front", self.bring_to_front_inner(id));
            }
            DragOutcome::Moved(rect) if rect != ctx.rect => {
                self.store.upsert(id, RecordPatch::default().rect(rect));
                self.queue_geometry(id, rect);
            }
            DragOutcome::Ended => {
                tracing::trace!(window_id = %id, x = ctx.rect.x, y = ctx.rect.y, "drag ended");
            }
            _ => {}
        }
        outcome
    }

    fn cancel_drag(&mut self, id: &str) {
        if let Some(drag) = self.drags.get_mut(id)
            && drag.cancel()
        {
            tracing::trace!(window_id = %id, "drag cancelled");
        }
    }

    fn queue_visibility(&mut self, id: &str, visible: bool) {
        self.queued.push(WindowEvent::VisibilityChanged {
            id: id.to_string(),
            visible,
        });
    }

    fn queue_geometry(&mut self, id: &str, rect: Rect) {
        self.queued.push(WindowEvent::GeometryChanged {
            id: id.to_string(),
            rect,
        });
    }

    // Runs at the end of every public operation, after all state changes.
    fn flush(&mut self) {
        let topmost = ZOrderAllocator::topmost(self.store.all()).map(str::to_string);
        if topmost != self.focused {
            self.focused = topmost.clone();
            self.queued.push(WindowEvent::FocusChanged { id: topmost });
        }
        if self.queued.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.queued);
        for event in &events {
            for observer in self.observers.iter_mut() {
                event.dispatch(observer.as_mut());
            }
        }
    }
}

fn quietly(op: &'static str, result: WmResult<()>) {
    if let Err(err) = result {
        tracing::debug!(op, error = %err, "operation ignored");
    }
}
