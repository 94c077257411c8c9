//! Scene export for the host renderer.
//!
//! A laid-out notebook becomes a tree of `SceneNode`s. Text blocks carry a
//! `TextRun` (what to typeset) and the box they were laid out in; decorations
//! carry a triangle mesh. The renderer walks `Scene::draw_list` in z order.

pub mod color;
pub mod geom;

pub use color::Rgba;
pub use geom::{Aabb2, Transform2};

/// Triangle mesh, positions in the owning node's local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh2D {
    pub positions: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl Mesh2D {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Aabb2 {
        let mut b = Aabb2::empty();
        for &p in &self.positions {
            b.include_point(p);
        }
        b
    }
}

/// Text the renderer typesets inside a node's box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub lines: Vec<String>,
    /// Presentation mode key (`display_math`, `text`, ...).
    pub mode: &'static str,
    pub font: String,
    pub font_size: f32,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    Empty,
    Text(TextRun),
    Mesh(Mesh2D),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// Maps this node's local space into its parent's.
    pub transform: Transform2,
    /// Painter's order; higher draws later.
    pub z: i32,
    pub fill: Rgba,
    pub payload: Payload,
    /// Layout box in local space, for text nodes.
    pub bounds: Option<Aabb2>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform2::IDENTITY,
            z: 0,
            fill: Rgba::WHITE,
            payload: Payload::Empty,
            bounds: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, run: TextRun) -> Self {
        self.payload = Payload::Text(run);
        self
    }

    pub fn with_mesh(mut self, mesh: Mesh2D) -> Self {
        self.payload = Payload::Mesh(mesh);
        self
    }

    pub fn with_fill(mut self, fill: Rgba) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_transform(mut self, transform: Transform2) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_bounds(mut self, bounds: Aabb2) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn push(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Depth-first search by name, self included.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Everything this node covers, in its parent's space.
    pub fn extent(&self) -> Aabb2 {
        let mut local = self.bounds.unwrap_or_else(Aabb2::empty);
        if let Payload::Mesh(mesh) = &self.payload {
            local = local.union(mesh.bounds());
        }
        let local = self
            .children
            .iter()
            .fold(local, |acc, child| acc.union(child.extent()));
        self.transform.apply_box(local)
    }

    fn collect(&self, parent: Transform2, out: &mut Vec<DrawItem>) {
        let world = parent.compose(self.transform);
        let shape = match &self.payload {
            Payload::Empty => None,
            Payload::Text(run) => Some(DrawShape::Text {
                run: run.clone(),
                bounds: self.bounds.unwrap_or_default(),
            }),
            Payload::Mesh(mesh) => Some(DrawShape::Mesh(mesh.clone())),
        };
        if let Some(shape) = shape {
            out.push(DrawItem {
                name: self.name.clone(),
                world,
                z: self.z,
                fill: self.fill,
                shape,
            });
        }
        for child in &self.children {
            child.collect(world, out);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawShape {
    Mesh(Mesh2D),
    /// `bounds` is in local space; `world` places it.
    Text { run: TextRun, bounds: Aabb2 },
}

/// One thing to draw, with its transform fully composed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub name: String,
    pub world: Transform2,
    pub z: i32,
    pub fill: Rgba,
    pub shape: DrawShape,
}

#[derive(Debug, Default)]
pub struct Scene {
    pub roots: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SceneNode) {
        self.roots.push(node);
    }

    pub fn get(&self, name: &str) -> Option<&SceneNode> {
        self.roots.iter().find_map(|r| r.find(name))
    }

    /// Draw items in painter's order; equal `z` keeps tree order.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut items = Vec::new();
        for root in &self.roots {
            root.collect(Transform2::IDENTITY, &mut items);
        }
        items.sort_by_key(|item| item.z);
        items
    }
}
