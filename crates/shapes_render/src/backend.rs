//! The backend contract the render coordinator (spec §4.9, component I)
//! drives — implemented by the rasterizer (§4.7) and the path tracer
//! (§4.8). Lives here, rather than in the coordinator crate, so both
//! concrete backends and the coordinator can depend on it without a
//! dependency cycle.

/// One registered rendering backend. The coordinator never touches a
/// backend's internals directly — only through this contract plus the
/// output texture id it was registered with.
pub trait Backend {
    /// `StartRender` — begins a new frame. For a progressive backend this
    /// resets the sample counter; for the rasterizer it's a no-op.
    fn start_render(&mut self);

    /// `Render(w, h, pick)` — draws one frame (or one progressive sample)
    /// at `(w, h)`; `pick` requests the half-resolution, no-MSAA picking
    /// pass alongside the beauty pass. Returns whether the frame is
    /// complete (spec §4.8: `sampleIndex >= maxSamples` for a progressive
    /// backend; always `true` for the single-pass rasterizer).
    fn render(&mut self, width: u32, height: u32, pick: bool) -> bool;

    /// `EndRender` — submits/presents whatever this frame accumulated.
    fn end_render(&mut self);

    /// Whether this backend accumulates over multiple `render` calls
    /// before a frame is "done" (spec §4.9 step 1: "if animating and the
    /// previous frame has converged, or the current backend is
    /// non-progressive, start a new frame").
    fn is_progressive(&self) -> bool;

    /// `StartNewFrame` — resets progressive accumulation (camera or scene
    /// changed). A no-op for non-progressive backends.
    fn start_new_frame(&mut self);

    /// Forces every cached handle to be considered stale, so the next
    /// `render` call rebuilds this backend's caches from scratch (spec
    /// §4.9: `SetRenderer` "forces a full scene-graph dirty mark").
    fn mark_all_dirty(&mut self);

    /// Writes the current output texture to `path` (spec §6.4 — PNG or
    /// TIFF inferred from the extension).
    fn save_frame(&mut self, path: &std::path::Path) -> std::io::Result<()>;
}
