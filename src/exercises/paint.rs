//! # Brush Canvas
//!
//! Click or drag on a canvas to stamp points, triangles and circles in the
//! current brush. Shapes are stored in clip space and turned into
//! [`DrawBatch`]es of [`Vertex2D`] on demand.

use log::debug;

use crate::gfx::scene::Vertex2D;
use crate::simulation::Simulation;

/// Pixel coordinates on a `width` x `height` canvas to clip space (y up).
pub fn canvas_to_clip(px: f32, py: f32, width: f32, height: f32) -> (f32, f32) {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    ((px - half_w) / half_w, (half_h - py) / half_h)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeKind {
    #[default]
    Point,
    Triangle,
    Circle,
}

/// One stamped shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Centre in clip space
    pub position: [f32; 2],
    pub color: [f32; 4],
    /// Brush size; points use it as pixel size, other shapes as `size / 200` clip units
    pub size: f32,
    pub segments: u32,
}

impl Shape {
    fn extent(&self) -> f32 {
        self.size / 200.0
    }

    /// Clip-space vertices in draw order for this shape's primitive.
    pub fn vertices(&self) -> Vec<Vertex2D> {
        let [x, y] = self.position;
        match self.kind {
            ShapeKind::Point => vec![Vertex2D::new(x, y)],
            ShapeKind::Triangle => {
                let d = self.extent();
                vec![
                    Vertex2D::new(x, y + d),
                    Vertex2D::new(x - d, y - d),
                    Vertex2D::new(x + d, y - d),
                ]
            }
            ShapeKind::Circle => {
                let d = self.extent();
                let segments = self.segments.max(3);
                let step = std::f32::consts::TAU / segments as f32;
                std::iter::once(Vertex2D::new(x, y))
                    .chain((0..=segments).map(|i| {
                        let angle = i as f32 * step;
                        Vertex2D::new(x + d * angle.cos(), y + d * angle.sin())
                    }))
                    .collect()
            }
        }
    }

    pub fn primitive(&self) -> Primitive {
        match self.kind {
            ShapeKind::Point => Primitive::Points,
            ShapeKind::Triangle => Primitive::Triangles,
            ShapeKind::Circle => Primitive::TriangleFan,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    Triangles,
    TriangleFan,
}

/// Everything needed to issue one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub primitive: Primitive,
    pub vertices: Vec<Vertex2D>,
    pub color: [f32; 4],
    pub point_size: f32,
}

/// Brush state applied to newly stamped shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSettings {
    pub color: [f32; 4],
    pub size: f32,
    pub kind: ShapeKind,
    pub segments: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            size: 5.0,
            kind: ShapeKind::Point,
            segments: 10,
        }
    }
}

impl BrushSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// RGB colour; alpha is kept
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = [r, g, b, self.color[3]];
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size.max(0.0);
        self
    }

    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(3);
        self
    }
}

/// The painting surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: f32,
    height: f32,
    pub brush: BrushSettings,
    shapes: Vec<Shape>,
    running: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            brush: BrushSettings::default(),
            shapes: Vec::new(),
            running: true,
        }
    }

    pub fn with_brush(mut self, brush: BrushSettings) -> Self {
        self.brush = brush;
        self
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Stamps the current brush at a pixel position.
    pub fn click(&mut self, px: f32, py: f32) {
        let (x, y) = canvas_to_clip(px, py, self.width, self.height);
        self.shapes.push(Shape {
            kind: self.brush.kind,
            position: [x, y],
            color: self.brush.color,
            size: self.brush.size,
            segments: self.brush.segments,
        });
    }

    /// Pointer motion; paints only while the primary button is held.
    pub fn drag(&mut self, px: f32, py: f32, primary_pressed: bool) {
        if primary_pressed {
            self.click(px, py);
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Replaces the canvas with a triangle landscape: sky, sun, mountains, hills, ground.
    pub fn landscape(&mut self) {
        const ART: [([f32; 2], [f32; 3], f32); 20] = [
            // sky
            ([0.0, 0.9], [0.1, 0.3, 0.6], 180.0),
            ([0.0, 0.5], [0.9, 0.5, 0.1], 180.0),
            // sun
            ([0.0, 0.5], [1.0, 0.8, 0.0], 20.0),
            ([0.05, 0.55], [1.0, 0.75, 0.0], 20.0),
            ([-0.05, 0.55], [1.0, 0.75, 0.0], 20.0),
            ([0.05, 0.45], [1.0, 0.7, 0.0], 20.0),
            ([-0.05, 0.45], [1.0, 0.7, 0.0], 20.0),
            ([0.0, 0.4], [1.0, 0.8, 0.0], 20.0),
            // mountains, each with a shadow
            ([-0.6, -0.2], [0.3, 0.3, 0.3], 100.0),
            ([-0.6, -0.2], [0.2, 0.2, 0.2], 90.0),
            ([0.0, -0.2], [0.35, 0.35, 0.35], 120.0),
            ([0.0, -0.2], [0.25, 0.25, 0.25], 110.0),
            ([0.6, -0.2], [0.4, 0.4, 0.4], 100.0),
            ([0.6, -0.2], [0.3, 0.3, 0.3], 90.0),
            // hills
            ([-0.4, -0.6], [0.0, 0.5, 0.0], 70.0),
            ([0.0, -0.65], [0.0, 0.6, 0.0], 80.0),
            ([0.4, -0.6], [0.0, 0.5, 0.0], 70.0),
            // ground
            ([-0.5, -0.9], [0.3, 0.2, 0.1], 100.0),
            ([0.5, -0.9], [0.3, 0.2, 0.1], 100.0),
            ([0.0, -1.0], [0.2, 0.15, 0.05], 120.0),
        ];

        self.shapes = ART
            .iter()
            .map(|&(position, [r, g, b], size)| Shape {
                kind: ShapeKind::Triangle,
                position,
                color: [r, g, b, 1.0],
                size,
                segments: self.brush.segments,
            })
            .collect();
        debug!("landscape drawn with {} triangles", self.shapes.len());
    }

    /// One batch per shape, in stamping order.
    pub fn batches(&self) -> Vec<DrawBatch> {
        self.shapes
            .iter()
            .map(|shape| DrawBatch {
                primitive: shape.primitive(),
                vertices: shape.vertices(),
                color: shape.color,
                point_size: shape.size,
            })
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.shapes.iter().map(|s| s.vertices().len()).sum()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }
}

impl Simulation for Canvas {
    fn update(&mut self, _delta_time: f32) {}

    fn name(&self) -> &str {
        "Paint"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self) {
        self.clear();
        self.brush = BrushSettings::default();
    }
}
