//! Decorations drawn alongside a notebook: the footer bar and cancel strokes.
//!
//! Both are built as lyon paths in scene units and tessellated straight into
//! `Mesh2D`, so the host renderer treats them like any other filled mesh.

use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    LineCap, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use crate::error::{Error, Result};
use crate::layout::Frame;
use crate::scene::{Aabb2, Mesh2D, Rgba, SceneNode};

/// Scene units per unit of stroke width.
pub const STROKE_WIDTH_UNIT: f32 = 0.01;

const TOLERANCE: f32 = 0.01;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TessVertex {
    pub position: [f32; 2],
}

struct Ctor;

impl FillVertexConstructor<TessVertex> for Ctor {
    fn new_vertex(&mut self, v: FillVertex) -> TessVertex {
        let p = v.position();
        TessVertex {
            position: [p.x, p.y],
        }
    }
}

impl StrokeVertexConstructor<TessVertex> for Ctor {
    fn new_vertex(&mut self, v: StrokeVertex) -> TessVertex {
        let p = v.position();
        TessVertex {
            position: [p.x, p.y],
        }
    }
}

fn mesh_from_buffers(buffers: VertexBuffers<TessVertex, u16>) -> Mesh2D {
    Mesh2D {
        positions: bytemuck::cast_slice::<TessVertex, [f32; 2]>(&buffers.vertices).to_vec(),
        indices: buffers.indices,
    }
}

fn rect_path(b: Aabb2) -> Path {
    let [first, rest @ ..] = b.corners();
    let mut p = Path::builder();
    p.begin(point(first[0], first[1]));
    for c in rest {
        p.line_to(point(c[0], c[1]));
    }
    p.close();
    p.build()
}

pub fn fill_rect(bounds: Aabb2) -> Result<Mesh2D> {
    let mut buffers: VertexBuffers<TessVertex, u16> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &rect_path(bounds),
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut buffers, Ctor),
        )
        .map_err(|e| Error::Tessellation(format!("{e:?}")))?;
    Ok(mesh_from_buffers(buffers))
}

/// Straight segment `from -> to`, stroked `width` scene units wide.
pub fn stroke_line(from: [f32; 2], to: [f32; 2], width: f32) -> Result<Mesh2D> {
    let mut p = Path::builder();
    p.begin(point(from[0], from[1]));
    p.line_to(point(to[0], to[1]));
    p.end(false);
    let path = p.build();

    let opts = StrokeOptions::tolerance(TOLERANCE)
        .with_line_width(width)
        .with_line_cap(LineCap::Butt);

    let mut buffers: VertexBuffers<TessVertex, u16> = VertexBuffers::new();
    StrokeTessellator::new()
        .tessellate_path(&path, &opts, &mut BuffersBuilder::new(&mut buffers, Ctor))
        .map_err(|e| Error::Tessellation(format!("{e:?}")))?;
    Ok(mesh_from_buffers(buffers))
}

/// Append `src` into `dst`, offsetting indices.
pub fn append_mesh(dst: &mut Mesh2D, src: &Mesh2D) -> Result<()> {
    let base = dst.positions.len();
    if base + src.positions.len() > u16::MAX as usize {
        return Err(Error::Tessellation(
            "vertex count overflows u16 indices".to_string(),
        ));
    }

    dst.positions.extend_from_slice(&src.positions);
    let base = base as u16;
    dst.indices.extend(src.indices.iter().map(|i| base + i));
    Ok(())
}

#[derive(Debug, Copy, Clone)]
pub struct FooterOptions {
    pub height: f32,
    /// Defaults to the frame width.
    pub width: Option<f32>,
    pub fill: Rgba,
    pub z: i32,
}

impl Default for FooterOptions {
    fn default() -> Self {
        Self {
            height: 0.8,
            width: None,
            fill: Rgba::WHITE,
            z: 1,
        }
    }
}

/// A bar along the bottom edge of the frame.
pub fn footer(frame: &Frame, opts: &FooterOptions) -> Result<SceneNode> {
    let width = opts.width.unwrap_or(frame.width);
    let bottom = -frame.height / 2.0;
    let bounds = Aabb2::from_min_max(
        [-width / 2.0, bottom],
        [width / 2.0, bottom + opts.height],
    );

    Ok(SceneNode::new("footer")
        .with_mesh(fill_rect(bounds)?)
        .with_fill(opts.fill)
        .with_z(opts.z))
}

#[derive(Debug, Copy, Clone)]
pub struct CancelOptions {
    pub color: Rgba,
    pub stroke_width: f32,
    /// Scale of the diagonal about the target's center.
    pub scale: f32,
}

impl Default for CancelOptions {
    fn default() -> Self {
        Self {
            color: Rgba::RED,
            stroke_width: 2.0,
            scale: 1.5,
        }
    }
}

/// Strike through `target` from its upper-right to its lower-left corner.
pub fn cancel(target: Aabb2, opts: &CancelOptions) -> Result<SceneNode> {
    let b = target.scaled(opts.scale);
    let mesh = stroke_line(b.max, b.min, opts.stroke_width * STROKE_WIDTH_UNIT)?;

    Ok(SceneNode::new("cancel")
        .with_mesh(mesh)
        .with_fill(opts.color))
}

/// One merged stroke mesh cancelling every target, e.g. terms of an equation.
pub fn cancel_all(targets: &[Aabb2], opts: &CancelOptions) -> Result<SceneNode> {
    let mut merged = Mesh2D::default();
    for &target in targets {
        let b = target.scaled(opts.scale);
        let stroke = stroke_line(b.max, b.min, opts.stroke_width * STROKE_WIDTH_UNIT)?;
        append_mesh(&mut merged, &stroke)?;
    }

    Ok(SceneNode::new("cancel")
        .with_mesh(merged)
        .with_fill(opts.color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Payload;

    const EPS: f32 = 1e-4;

    #[test]
    fn footer_spans_frame_bottom() {
        let frame = Frame::default();
        let m = footer(&frame, &FooterOptions::default()).unwrap();
        let b = m.extent();

        assert!((b.size()[0] - frame.width).abs() < EPS);
        assert!((b.min[1] + frame.height / 2.0).abs() < EPS);
        assert!((b.max[1] - (-frame.height / 2.0 + 0.8)).abs() < EPS);
        assert_eq!(m.z, 1);
        assert!(matches!(&m.payload, Payload::Mesh(mesh) if mesh.triangle_count() == 2));
    }

    #[test]
    fn cancel_covers_scaled_target() {
        let target = Aabb2::from_center_size([1.0, 2.0], [2.0, 1.0]);
        let m = cancel(target, &CancelOptions::default()).unwrap();
        let b = m.extent();

        // Scaled 1.5x about the center; the stroke adds a little on each side.
        assert!((b.center()[0] - 1.0).abs() < 0.05);
        assert!((b.center()[1] - 2.0).abs() < 0.05);
        assert!(b.size()[0] >= 3.0 - EPS && b.size()[0] < 3.1);
        assert!(b.size()[1] >= 1.5 - EPS && b.size()[1] < 1.6);
        assert_eq!(m.fill, Rgba::RED);
    }

    #[test]
    fn cancel_all_merges_strokes() {
        let targets = [
            Aabb2::from_center_size([0.0, 0.0], [1.0, 1.0]),
            Aabb2::from_center_size([4.0, 0.0], [1.0, 1.0]),
        ];
        let opts = CancelOptions::default();
        let one = cancel(targets[0], &opts).unwrap();
        let both = cancel_all(&targets, &opts).unwrap();

        let (Payload::Mesh(one), Payload::Mesh(both)) = (&one.payload, &both.payload) else {
            panic!("cancel strokes carry meshes");
        };
        assert_eq!(both.triangle_count(), 2 * one.triangle_count());
        assert!(both.bounds().size()[0] > 4.0);
    }

    #[test]
    fn append_offsets_indices() {
        let a = fill_rect(Aabb2::from_min_max([0.0, 0.0], [1.0, 1.0])).unwrap();
        let mut dst = a.clone();
        append_mesh(&mut dst, &a).unwrap();

        assert_eq!(dst.positions.len(), 2 * a.positions.len());
        assert_eq!(dst.triangle_count(), 2 * a.triangle_count());
        let n = a.positions.len() as u16;
        assert!(dst.indices[a.indices.len()..].iter().all(|&i| i >= n));
    }
}
