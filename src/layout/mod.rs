//! Notebook layout.
//!
//! Blocks are stacked one after another with a single pass over neighbouring
//! pairs `(m1, m2)`:
//! - default: `m2` goes next to `m1` along the arrangement direction, aligned
//!   on the cross axis to the requested edge (or to `m2`'s own `Align`)
//! - after a label or cue block, `m2` goes to its right, top edges aligned,
//!   and `m1` is pushed on the label stack
//! - a label `m2` pops the stack and lines up its right edge with the popped
//!   block; a cue `m2` is pulled to the left margin and leaves the stack alone
//! - math blocks share one horizontal anchor (left edge of the first one),
//!   except right after a label or cue, where the first rule wins
//!
//! The right-of-cue rule takes precedence over everything else, so a cue
//! block directly after a label sits beside it rather than on the margin.
//!
//! The pass never backtracks. Label stack and math anchor live only for the
//! duration of one `arrange` call.

pub mod notebook;

use crate::block::{Align, AlignRole, ContentBlock};
use crate::measure::Measure;
use crate::scene::{Aabb2, SceneNode, TextRun, Transform2};

pub use notebook::{Frame, Notebook, answer_group, question_group};

/// Manim's default gap between neighbouring objects.
pub const DEFAULT_SPACING: f32 = 0.25;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Cross-axis edge for a vertical arrangement; centered blocks have none.
pub fn align_edge(align: Align) -> Option<Edge> {
    match align {
        Align::Left => Some(Edge::Left),
        Align::Right => Some(Edge::Right),
        Align::Center => None,
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ArrangeOptions {
    pub direction: Direction,
    pub spacing: f32,
    /// Cross-axis edge to align; `None` centers.
    pub aligned_edge: Option<Edge>,
    /// Re-center the assembled group on the origin afterwards.
    pub center: bool,
}

impl Default for ArrangeOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            spacing: DEFAULT_SPACING,
            aligned_edge: Some(Edge::Left),
            center: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Block(ContentBlock),
    Group(Vec<LayoutNode>),
}

/// A block or a nested group, with its current bounds.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub name: String,
    pub role: AlignRole,
    pub align: Option<Align>,
    pub kind: NodeKind,
    bounds: Aabb2,
}

impl LayoutNode {
    /// A measured block centered on the origin.
    pub fn block(block: ContentBlock, measure: &dyn Measure) -> Self {
        let size = measure.measure(&block);
        Self::block_with_size(block, size)
    }

    pub fn block_with_size(block: ContentBlock, size: [f32; 2]) -> Self {
        Self {
            name: block.name.clone(),
            role: block.role,
            align: block.align,
            bounds: Aabb2::from_center_size([0.0, 0.0], size),
            kind: NodeKind::Block(block),
        }
    }

    /// Group children as they are currently placed.
    pub fn group(name: impl Into<String>, children: Vec<LayoutNode>) -> Self {
        let bounds = union_bounds(&children);
        Self {
            name: name.into(),
            role: AlignRole::Content,
            align: None,
            kind: NodeKind::Group(children),
            bounds,
        }
    }

    pub fn with_role(mut self, role: AlignRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    #[inline]
    pub fn bounds(&self) -> Aabb2 {
        self.bounds
    }

    pub fn as_block(&self) -> Option<&ContentBlock> {
        match &self.kind {
            NodeKind::Block(b) => Some(b),
            NodeKind::Group(_) => None,
        }
    }

    pub fn children(&self) -> &[LayoutNode] {
        match &self.kind {
            NodeKind::Block(_) => &[],
            NodeKind::Group(children) => children,
        }
    }

    pub fn is_math(&self) -> bool {
        self.as_block().is_some_and(ContentBlock::is_math)
    }

    /// Move this node (and everything inside it).
    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.bounds = self.bounds.translated(dx, dy);
        if let NodeKind::Group(children) = &mut self.kind {
            for child in children {
                child.shift(dx, dy);
            }
        }
    }

    pub fn set_left(&mut self, x: f32) {
        self.shift(x - self.bounds.min[0], 0.0);
    }

    pub fn set_right(&mut self, x: f32) {
        self.shift(x - self.bounds.max[0], 0.0);
    }

    pub fn set_center_x(&mut self, x: f32) {
        self.shift(x - self.bounds.center()[0], 0.0);
    }

    pub fn set_top(&mut self, y: f32) {
        self.shift(0.0, y - self.bounds.max[1]);
    }

    pub fn move_to(&mut self, center: [f32; 2]) {
        let c = self.bounds.center();
        self.shift(center[0] - c[0], center[1] - c[1]);
    }

    /// Align one of our edges with the same edge of `target`.
    pub fn align_to(&mut self, target: Aabb2, edge: Edge) {
        match edge {
            Edge::Left => self.set_left(target.min[0]),
            Edge::Right => self.set_right(target.max[0]),
            Edge::Top => self.set_top(target.max[1]),
            Edge::Bottom => self.shift(0.0, target.min[1] - self.bounds.min[1]),
        }
    }

    /// Place this node beside `target` in `direction`, `spacing` apart.
    ///
    /// On the cross axis the node aligns `aligned_edge` with the target, or
    /// centers on it when `None`. An edge on the wrong axis also centers.
    pub fn next_to(
        &mut self,
        target: Aabb2,
        direction: Direction,
        spacing: f32,
        aligned_edge: Option<Edge>,
    ) {
        let b = self.bounds;
        match direction {
            Direction::Down => self.shift(0.0, target.min[1] - spacing - b.max[1]),
            Direction::Up => self.shift(0.0, target.max[1] + spacing - b.min[1]),
            Direction::Right => self.shift(target.max[0] + spacing - b.min[0], 0.0),
            Direction::Left => self.shift(target.min[0] - spacing - b.max[0], 0.0),
        }

        let vertical = direction.is_vertical();
        match aligned_edge {
            Some(edge @ (Edge::Left | Edge::Right)) if vertical => self.align_to(target, edge),
            Some(edge @ (Edge::Top | Edge::Bottom)) if !vertical => self.align_to(target, edge),
            _ if vertical => self.set_center_x(target.center()[0]),
            _ => {
                let dy = target.center()[1] - self.bounds.center()[1];
                self.shift(0.0, dy);
            }
        }
    }

    /// Scene node placed at this node's position; groups keep their children.
    pub fn to_scene_node(&self) -> SceneNode {
        match &self.kind {
            NodeKind::Block(block) => {
                let c = self.bounds.center();
                SceneNode::new(self.name.clone())
                    .with_text(TextRun {
                        lines: block.lines.clone(),
                        mode: block.mode().key(),
                        font: block.style.font.clone(),
                        font_size: block.style.font_size,
                        weight: block.style.weight.value(),
                    })
                    .with_fill(block.style.color)
                    .with_transform(Transform2::translate(c[0], c[1]))
                    .with_bounds(Aabb2::from_center_size([0.0, 0.0], self.bounds.size()))
            }
            NodeKind::Group(children) => {
                let mut group = SceneNode::new(self.name.clone());
                for (i, child) in children.iter().enumerate() {
                    let mut node = child.to_scene_node();
                    node.name = format!("{}/{i}:{}", self.name, node.name);
                    group.push(node);
                }
                group
            }
        }
    }

    /// Visit every block with its final bounds, depth first.
    pub fn for_each_block<'a>(&'a self, f: &mut dyn FnMut(&'a ContentBlock, Aabb2, usize)) {
        self.visit(f, 0);
    }

    fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a ContentBlock, Aabb2, usize), depth: usize) {
        match &self.kind {
            NodeKind::Block(block) => f(block, self.bounds, depth),
            NodeKind::Group(children) => {
                for child in children {
                    child.visit(f, depth + 1);
                }
            }
        }
    }
}

pub fn union_bounds(nodes: &[LayoutNode]) -> Aabb2 {
    nodes
        .iter()
        .fold(Aabb2::empty(), |acc, n| acc.union(n.bounds()))
}

/// Arrange `nodes` in place and return the bounds of the whole group.
pub fn arrange(nodes: &mut [LayoutNode], opts: &ArrangeOptions) -> Aabb2 {
    let Some(first) = nodes.first() else {
        return Aabb2::empty();
    };

    let margin = first.bounds().min[0];
    let mut labels: Vec<usize> = Vec::new();
    let mut math_anchor: Option<f32> = None;

    pin_math(&mut nodes[0], &mut math_anchor);

    for i in 1..nodes.len() {
        let (done, rest) = nodes.split_at_mut(i);
        let m1 = &done[i - 1];
        let m2 = &mut rest[0];
        let prev = m1.bounds();

        if m1.role.is_cue() {
            m2.next_to(prev, Direction::Right, opts.spacing, Some(Edge::Top));
            labels.push(i - 1);
            log::debug!("arrange: {:?} right of cue {:?}", m2.name, m1.name);
            // Only records the anchor; the block stays right of the cue.
            math_anchor = math_anchor.or_else(|| m2.is_math().then(|| m2.bounds().min[0]));
            continue;
        }

        let edge = m2.align.map_or(opts.aligned_edge, align_edge);
        m2.next_to(prev, opts.direction, opts.spacing, edge);

        match m2.role {
            AlignRole::CueColumn => m2.set_left(margin),
            AlignRole::Label(_) => {
                if let Some(p) = labels.pop() {
                    m2.set_right(done[p].bounds().max[0]);
                    log::debug!("arrange: {:?} lined up with {:?}", m2.name, done[p].name);
                }
            }
            AlignRole::Content => {}
        }

        pin_math(m2, &mut math_anchor);
    }

    let mut bounds = union_bounds(nodes);
    if opts.center && !bounds.is_empty() {
        let c = bounds.center();
        for n in nodes.iter_mut() {
            n.shift(-c[0], -c[1]);
        }
        bounds = bounds.translated(-c[0], -c[1]);
    }
    bounds
}

fn pin_math(node: &mut LayoutNode, anchor: &mut Option<f32>) {
    if !node.is_math() {
        return;
    }
    match *anchor {
        None => *anchor = Some(node.bounds().min[0]),
        Some(x) => node.set_left(x),
    }
}

/// Arrange `children` and wrap them in a group node.
pub fn arranged_group(
    name: impl Into<String>,
    mut children: Vec<LayoutNode>,
    opts: &ArrangeOptions,
) -> LayoutNode {
    arrange(&mut children, opts);
    LayoutNode::group(name, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Wrapper;
    use crate::labels::LabelKind;

    const EPS: f32 = 1e-4;

    fn node(w: &Wrapper, text: &str, size: [f32; 2]) -> LayoutNode {
        LayoutNode::block_with_size(w.block(text), size)
    }

    fn no_center() -> ArrangeOptions {
        ArrangeOptions {
            center: false,
            ..Default::default()
        }
    }

    #[test]
    fn default_stacks_down_left_aligned() {
        let w = Wrapper::default();
        let mut nodes = vec![
            node(&w, "a", [4.0, 1.0]),
            node(&w, "b", [2.0, 1.0]),
            node(&w, "c", [3.0, 0.5]),
        ];
        arrange(&mut nodes, &no_center());

        let [a, b, c] = [0, 1, 2].map(|i| nodes[i].bounds());
        assert!((b.max[1] - (a.min[1] - DEFAULT_SPACING)).abs() < EPS);
        assert!((c.max[1] - (b.min[1] - DEFAULT_SPACING)).abs() < EPS);
        assert!((a.min[0] - b.min[0]).abs() < EPS);
        assert!((a.min[0] - c.min[0]).abs() < EPS);
    }

    #[test]
    fn per_block_align_overrides_edge() {
        let w = Wrapper::default();
        let mut nodes = vec![
            node(&w, "wide", [6.0, 1.0]),
            node(&w, "right", [2.0, 1.0]).with_align(Align::Right),
            node(&w, "center", [2.0, 1.0]).with_align(Align::Center),
        ];
        arrange(&mut nodes, &no_center());

        assert!((nodes[1].bounds().max[0] - nodes[0].bounds().max[0]).abs() < EPS);
        assert!((nodes[2].bounds().center()[0] - nodes[1].bounds().center()[0]).abs() < EPS);
    }

    #[test]
    fn content_after_label_goes_right_then_stacks_under_it() {
        let w = Wrapper::default();
        let mut nodes = vec![
            LayoutNode::block_with_size(w.question_label(1), [2.0, 0.5]),
            node(&w, "A", [3.0, 1.0]),
            node(&w, "B", [1.0, 1.0]),
            node(&w, "C", [1.0, 1.0]),
        ];
        arrange(&mut nodes, &no_center());

        let [q, a, b, c] = [0, 1, 2, 3].map(|i| nodes[i].bounds());
        // A to the right of the label, tops aligned.
        assert!((a.min[0] - (q.max[0] + DEFAULT_SPACING)).abs() < EPS);
        assert!((a.max[1] - q.max[1]).abs() < EPS);
        // B below A, left-aligned with A, not with the label.
        assert!(b.max[1] < a.min[1]);
        assert!((b.min[0] - a.min[0]).abs() < EPS);
        assert!((b.min[0] - q.min[0]).abs() > EPS);
        assert!((c.min[0] - a.min[0]).abs() < EPS);
    }

    #[test]
    fn second_label_lines_up_with_first() {
        let w = Wrapper::default();
        let mut nodes = vec![
            LayoutNode::block_with_size(w.question_label(1), [2.0, 0.5]),
            node(&w, "A", [3.0, 1.0]),
            LayoutNode::block_with_size(w.answer_label(LabelKind::Answer), [1.5, 0.5]),
            node(&w, "B", [3.0, 1.0]),
        ];
        arrange(&mut nodes, &no_center());

        let [q, a, ans, b] = [0, 1, 2, 3].map(|i| nodes[i].bounds());
        assert!((ans.max[0] - q.max[0]).abs() < EPS);
        assert!(ans.max[1] < a.min[1]);
        assert!((b.min[0] - (ans.max[0] + DEFAULT_SPACING)).abs() < EPS);
        assert!((b.max[1] - ans.max[1]).abs() < EPS);
    }

    #[test]
    fn cue_column_is_pulled_to_margin() {
        let w = Wrapper::default();
        let mut nodes = vec![
            node(&w, "intro", [4.0, 1.0]),
            node(&w, "indented", [2.0, 1.0]).with_align(Align::Right),
            node(&w, "cue", [1.0, 1.0]).with_role(AlignRole::CueColumn),
            node(&w, "note", [3.0, 1.0]),
        ];
        arrange(&mut nodes, &no_center());

        let [intro, _, cue, note] = [0, 1, 2, 3].map(|i| nodes[i].bounds());
        assert!((cue.min[0] - intro.min[0]).abs() < EPS);
        assert!((note.min[0] - (cue.max[0] + DEFAULT_SPACING)).abs() < EPS);
    }

    #[test]
    fn math_blocks_share_anchor() {
        let w = Wrapper::default();
        let mut nodes = vec![
            node(&w, "text", [4.0, 1.0]),
            node(&w, "$$a = b$$", [2.0, 1.0]).with_align(Align::Center),
            node(&w, "between", [5.0, 1.0]).with_align(Align::Right),
            node(&w, "$c = d$", [3.0, 1.0]).with_align(Align::Right),
        ];
        arrange(&mut nodes, &no_center());

        let [_, m1, between, m2] = [0, 1, 2, 3].map(|i| nodes[i].bounds());
        assert!((m1.min[0] - m2.min[0]).abs() < EPS);
        // The non-math block keeps its own alignment (right edge of m1).
        assert!((between.max[0] - m1.max[0]).abs() < EPS);
    }

    #[test]
    fn math_right_of_cue_is_not_pulled_back() {
        let w = Wrapper::default();
        let mut nodes = vec![
            node(&w, "$$a = b$$", [1.5, 0.5]),
            node(&w, "Note", [1.0, 0.5]).with_role(AlignRole::CueColumn),
            node(&w, "$$c = d$$", [1.5, 0.5]),
            node(&w, "$$e = f$$", [1.5, 0.5]),
        ];
        arrange(&mut nodes, &no_center());

        let [m1, cue, m2, m3] = [0, 1, 2, 3].map(|i| nodes[i].bounds());
        assert!((m2.min[0] - (cue.max[0] + DEFAULT_SPACING)).abs() < EPS);
        assert!((m2.max[1] - cue.max[1]).abs() < EPS);
        // Blocks that are not right of a cue still use the first anchor.
        assert!((m3.min[0] - m1.min[0]).abs() < EPS);
    }

    #[test]
    fn first_math_right_of_label_sets_anchor() {
        let w = Wrapper::default();
        let mut nodes = vec![
            LayoutNode::block_with_size(w.answer_label(LabelKind::Solution), [2.0, 0.5]),
            node(&w, "$$a = b$$", [1.5, 0.5]),
            node(&w, "$$c = d$$", [3.0, 0.5]).with_align(Align::Right),
        ];
        arrange(&mut nodes, &no_center());

        let [label, m1, m2] = [0, 1, 2].map(|i| nodes[i].bounds());
        assert!(m1.min[0] > label.max[0]);
        assert!((m2.min[0] - m1.min[0]).abs() < EPS);
    }

    #[test]
    fn label_lines_up_with_nearest_cue() {
        let w = Wrapper::default();
        let mut nodes = vec![
            LayoutNode::block_with_size(w.question_label(1), [2.0, 0.5]),
            node(&w, "A", [3.0, 1.0]),
            node(&w, "B", [3.0, 1.0]),
            node(&w, "cue", [0.5, 0.5]).with_role(AlignRole::CueColumn),
            node(&w, "C", [3.0, 1.0]),
            LayoutNode::block_with_size(w.answer_label(LabelKind::Answer), [1.5, 0.5]),
            node(&w, "D", [3.0, 1.0]),
        ];
        arrange(&mut nodes, &no_center());

        let [q, _, _, cue, _, ans, _] = [0, 1, 2, 3, 4, 5, 6].map(|i| nodes[i].bounds());
        assert!((cue.min[0] - q.min[0]).abs() < EPS);
        // The cue went on the stack when C was placed beside it.
        assert!((ans.max[0] - cue.max[0]).abs() < EPS);
    }

    #[test]
    fn cue_directly_after_label_sits_beside_it() {
        let w = Wrapper::default();
        let mut nodes = vec![
            node(&w, "intro", [4.0, 1.0]),
            LayoutNode::block_with_size(w.question_label(1), [2.0, 0.5]),
            node(&w, "cue", [1.0, 0.5]).with_role(AlignRole::CueColumn),
        ];
        arrange(&mut nodes, &no_center());

        let [_, q, cue] = [0, 1, 2].map(|i| nodes[i].bounds());
        assert!((cue.min[0] - (q.max[0] + DEFAULT_SPACING)).abs() < EPS);
    }

    #[test]
    fn centering_moves_group_to_origin() {
        let w = Wrapper::default();
        let mut nodes = vec![node(&w, "a", [4.0, 1.0]), node(&w, "b", [2.0, 3.0])];
        let bounds = arrange(&mut nodes, &ArrangeOptions::default());

        let c = bounds.center();
        assert!(c[0].abs() < EPS && c[1].abs() < EPS);
        assert_eq!(union_bounds(&nodes), bounds);
    }

    #[test]
    fn order_is_top_to_bottom() {
        let w = Wrapper::default();
        let mut nodes: Vec<LayoutNode> = (0..5)
            .map(|i| node(&w, &format!("line {i}"), [1.0 + i as f32, 0.5]))
            .collect();
        arrange(&mut nodes, &ArrangeOptions::default());
        for pair in nodes.windows(2) {
            assert!(pair[0].bounds().min[1] > pair[1].bounds().max[1]);
        }
    }

    #[test]
    fn groups_move_their_children() {
        let w = Wrapper::default();
        let children = vec![node(&w, "a", [1.0, 1.0]), node(&w, "b", [1.0, 1.0])];
        let mut group = arranged_group("g", children, &ArrangeOptions::default());
        group.shift(10.0, 0.0);

        assert!((group.bounds().center()[0] - 10.0).abs() < EPS);
        for child in group.children() {
            assert!((child.bounds().center()[0] - 10.0).abs() < EPS);
        }

        let node = group.to_scene_node();
        assert_eq!(node.children.len(), 2);
        assert!(node.children[0].name.starts_with("g/0:"));
        assert!((node.extent().center()[0] - 10.0).abs() < EPS);
    }

    #[test]
    fn horizontal_direction_centers_vertically() {
        let w = Wrapper::default();
        let mut nodes = vec![node(&w, "a", [1.0, 2.0]), node(&w, "b", [1.0, 1.0])];
        let opts = ArrangeOptions {
            direction: Direction::Right,
            aligned_edge: None,
            center: false,
            ..Default::default()
        };
        arrange(&mut nodes, &opts);
        let [a, b] = [0, 1].map(|i| nodes[i].bounds());
        assert!((b.min[0] - (a.max[0] + DEFAULT_SPACING)).abs() < EPS);
        assert!((b.center()[1] - a.center()[1]).abs() < EPS);
    }

    #[test]
    fn empty_input() {
        assert!(arrange(&mut [], &ArrangeOptions::default()).is_empty());
    }
}
