//! The render coordinator (spec §4.9, component I) — owns the backend
//! registry and the frame counter, and drives whichever backend is
//! currently selected without knowing if it's the rasterizer or the
//! path tracer.

use std::io;
use std::path::PathBuf;

use shapes_render::Backend;

use crate::error::{CoordinatorError, Result};
use crate::recording::RecordingConfig;
use crate::registry::BackendRegistry;

pub struct RenderCoordinator {
    registry: BackendRegistry,
    current: i32,
    frame_number: u64,
    recording: RecordingConfig,
    animating: bool,
    last_frame_complete: bool,
}

impl RenderCoordinator {
    #[must_use]
    pub fn new(initial_output_id: i32) -> Self {
        RenderCoordinator {
            registry: BackendRegistry::new(),
            current: initial_output_id,
            frame_number: 0,
            recording: RecordingConfig::default(),
            animating: false,
            last_frame_complete: true,
        }
    }

    pub fn register_backend(&mut self, output_id: i32, backend: Box<dyn Backend>) {
        self.registry.register(output_id, backend);
    }

    #[must_use]
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    #[must_use]
    pub fn current_output_id(&self) -> i32 {
        self.current
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    pub fn configure_recording(&mut self, recording: RecordingConfig) {
        self.recording = recording;
    }

    fn current_backend_mut(&mut self) -> Result<&mut dyn Backend> {
        self.registry.get_mut(self.current).ok_or(CoordinatorError::UnknownBackend(self.current))
    }

    /// `SetRenderer(id)` — switches the active backend and forces a full
    /// scene-graph dirty mark on it, so the next render rebuilds every
    /// cached handle from scratch.
    pub fn set_renderer(&mut self, output_id: i32) -> Result<()> {
        let backend = self.registry.get_mut(output_id).ok_or(CoordinatorError::UnknownBackend(output_id))?;
        backend.mark_all_dirty();
        self.current = output_id;
        Ok(())
    }

    /// `DoAdvance()` — spec §4.9 step 1: if recording is enabled and the
    /// current frame is the configured start frame, switch to the
    /// recording backend; then, if animating and the previous frame
    /// converged (or the current backend is non-progressive), start a
    /// new accumulation.
    pub fn do_advance(&mut self) -> Result<()> {
        if self.recording.enabled && self.frame_number == self.recording.start_frame {
            self.set_renderer(self.recording.backend_output_id)?;
        }

        let backend = self.current_backend_mut()?;
        if self.animating && (self.last_frame_complete || !backend.is_progressive()) {
            backend.start_new_frame();
        }
        Ok(())
    }

    /// `Render(w, h, pick)` — delegates `StartRender` / `Render` /
    /// `EndRender` to the current backend. Returns whether the frame
    /// completed (spec §4.8: a progressive backend returns `false` until
    /// its sample budget is exhausted).
    pub fn render(&mut self, width: u32, height: u32, pick: bool) -> Result<bool> {
        let backend = self.current_backend_mut()?;
        backend.start_render();
        let complete = backend.render(width, height, pick);
        backend.end_render();
        self.last_frame_complete = complete;
        Ok(complete)
    }

    /// `RecordFrame()` — if the previous frame completed and recording is
    /// active, saves `outNNNNN.{png|tif}` and advances the frame
    /// counter. Returns the path written, if any.
    pub fn record_frame(&mut self) -> Result<Option<PathBuf>> {
        if !self.last_frame_complete || !self.recording.enabled {
            return Ok(None);
        }
        let path = self.recording.output_path(self.frame_number);
        let backend = self.current_backend_mut()?;
        backend.save_frame(&path)?;
        self.frame_number += 1;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingBackend {
        progressive: bool,
        samples_done: u32,
        dirty_marks: u32,
        new_frames: u32,
        saved: u32,
    }

    impl CountingBackend {
        fn new(progressive: bool) -> Self {
            CountingBackend { progressive, samples_done: 0, dirty_marks: 0, new_frames: 0, saved: 0 }
        }
    }

    impl Backend for CountingBackend {
        fn start_render(&mut self) {}

        fn render(&mut self, _w: u32, _h: u32, _pick: bool) -> bool {
            if self.progressive {
                self.samples_done += 1;
                self.samples_done >= 2
            } else {
                true
            }
        }

        fn end_render(&mut self) {}

        fn is_progressive(&self) -> bool {
            self.progressive
        }

        fn start_new_frame(&mut self) {
            self.samples_done = 0;
            self.new_frames += 1;
        }

        fn mark_all_dirty(&mut self) {
            self.dirty_marks += 1;
        }

        fn save_frame(&mut self, _path: &std::path::Path) -> io::Result<()> {
            self.saved += 1;
            Ok(())
        }
    }

    #[test]
    fn set_renderer_switches_and_dirties() {
        let mut coordinator = RenderCoordinator::new(0);
        coordinator.register_backend(0, Box::new(CountingBackend::new(false)));
        coordinator.register_backend(1, Box::new(CountingBackend::new(true)));
        coordinator.set_renderer(1).unwrap();
        assert_eq!(coordinator.current_output_id(), 1);
    }

    #[test]
    fn unknown_backend_id_errors() {
        let mut coordinator = RenderCoordinator::new(0);
        coordinator.register_backend(0, Box::new(CountingBackend::new(false)));
        assert!(coordinator.set_renderer(42).is_err());
    }

    #[test]
    fn record_frame_is_noop_until_recording_enabled() {
        let mut coordinator = RenderCoordinator::new(0);
        coordinator.register_backend(0, Box::new(CountingBackend::new(false)));
        coordinator.render(64, 64, false).unwrap();
        assert!(coordinator.record_frame().unwrap().is_none());
    }

    #[test]
    fn record_frame_writes_once_frame_completes_and_advances_counter() {
        let mut coordinator = RenderCoordinator::new(0);
        coordinator.register_backend(0, Box::new(CountingBackend::new(false)));
        let mut recording = RecordingConfig::default();
        recording.enabled = true;
        recording.directory = PathBuf::from("/tmp");
        coordinator.configure_recording(recording);

        coordinator.render(64, 64, false).unwrap();
        let path = coordinator.record_frame().unwrap().unwrap();
        assert_eq!(path, PathBuf::from("/tmp/out00000.png"));
        assert_eq!(coordinator.frame_number(), 1);
    }

    #[test]
    fn progressive_backend_only_records_after_convergence() {
        let mut coordinator = RenderCoordinator::new(0);
        coordinator.register_backend(0, Box::new(CountingBackend::new(true)));
        let mut recording = RecordingConfig::default();
        recording.enabled = true;
        recording.directory = PathBuf::from("/tmp");
        coordinator.configure_recording(recording);

        coordinator.render(64, 64, false).unwrap();
        assert!(coordinator.record_frame().unwrap().is_none());

        coordinator.render(64, 64, false).unwrap();
        assert!(coordinator.record_frame().unwrap().is_some());
    }

    #[test]
    fn do_advance_switches_to_recording_backend_at_start_frame() {
        let mut coordinator = RenderCoordinator::new(0);
        coordinator.register_backend(0, Box::new(CountingBackend::new(false)));
        coordinator.register_backend(1, Box::new(CountingBackend::new(false)));
        let mut recording = RecordingConfig::default();
        recording.enabled = true;
        recording.backend_output_id = 1;
        recording.start_frame = 0;
        coordinator.configure_recording(recording);

        coordinator.do_advance().unwrap();
        assert_eq!(coordinator.current_output_id(), 1);
    }

    #[test]
    fn do_advance_starts_new_frame_when_animating_and_prior_frame_converged() {
        let mut coordinator = RenderCoordinator::new(0);
        coordinator.register_backend(0, Box::new(CountingBackend::new(true)));
        coordinator.set_animating(true);
        coordinator.render(64, 64, false).unwrap();
        coordinator.render(64, 64, false).unwrap();
        assert!(coordinator.record_frame().is_ok());
        coordinator.do_advance().unwrap();
    }
}
