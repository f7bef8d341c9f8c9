//! Viewport fit geometry for zoom-to-word.
//!
//! Pure function: given a target rectangle (a word's bounding box) and the
//! viewport frame, compute the zoom level and scroll offsets that best center
//! the target without scrolling past the content edges.

/// Inputs for one fit computation. Container bounds are optional; when absent
/// the offsets are left unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRequest {
    pub frame_w: f32,
    pub frame_h: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub target_x: f32,
    pub target_y: f32,
    pub target_w: f32,
    pub target_h: f32,
    pub container_w: Option<f32>,
    pub container_h: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Largest zoom that fits the target inside the frame, clamped to the zoom
/// bounds, with offsets centering the target in the zoomed frame.
pub fn fit(request: &FitRequest) -> Fit {
    let frame_w = sanitize_dim(request.frame_w);
    let frame_h = sanitize_dim(request.frame_h);
    let target_w = sanitize_dim(request.target_w);
    let target_h = sanitize_dim(request.target_h);
    let min_zoom = if request.min_zoom.is_finite() && request.min_zoom > 0.0 {
        request.min_zoom
    } else {
        1.0
    };
    let max_zoom = if request.max_zoom.is_finite() {
        request.max_zoom.max(min_zoom)
    } else {
        min_zoom
    };

    let zoom = (frame_w / target_w)
        .min(frame_h / target_h)
        .clamp(min_zoom, max_zoom);
    let offset_x = centered_offset(
        sanitize_pos(request.target_x),
        frame_w,
        target_w,
        zoom,
        request.container_w,
    );
    let offset_y = centered_offset(
        sanitize_pos(request.target_y),
        frame_h,
        target_h,
        zoom,
        request.container_h,
    );

    Fit {
        zoom,
        offset_x,
        offset_y,
    }
}

fn centered_offset(
    target_pos: f32,
    frame_dim: f32,
    target_dim: f32,
    zoom: f32,
    container_dim: Option<f32>,
) -> f32 {
    let visible = frame_dim / zoom;
    let mut offset = target_pos - (visible - target_dim) / 2.0;
    if let Some(container) = container_dim.filter(|dim| dim.is_finite()) {
        let max_offset = (container - visible).max(0.0);
        offset = offset.clamp(0.0, max_offset);
    }
    offset
}

fn sanitize_dim(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        f32::EPSILON
    }
}

fn sanitize_pos(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}
