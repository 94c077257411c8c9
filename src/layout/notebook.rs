//! Notebook pages and question/answer groups.

use serde::Deserialize;

use crate::block::{ContentBlock, Wrapper};
use crate::labels::LabelKind;
use crate::layout::{ArrangeOptions, LayoutNode, arrange, arranged_group, union_bounds};
use crate::measure::Measure;
use crate::scene::{Aabb2, Scene, SceneNode};

/// Gap between the notebook and the frame corner.
pub const CORNER_BUFF: f32 = 0.25;

/// Visible frame in scene units, centered on the origin.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 8.0 * 16.0 / 9.0,
            height: 8.0,
        }
    }
}

impl Frame {
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_center_size([0.0, 0.0], [self.width, self.height])
    }
}

/// Question label followed by its content, arranged as one group.
pub fn question_group(
    wrapper: &Wrapper,
    measure: &dyn Measure,
    number: u32,
    items: Vec<LayoutNode>,
    spacing: f32,
) -> LayoutNode {
    let label = LayoutNode::block(wrapper.question_label(number), measure);
    labelled_group("question", label, items, spacing)
}

/// Answer or solution label followed by its content.
pub fn answer_group(
    wrapper: &Wrapper,
    measure: &dyn Measure,
    kind: LabelKind,
    items: Vec<LayoutNode>,
    spacing: f32,
) -> LayoutNode {
    let label = LayoutNode::block(wrapper.answer_label(kind), measure);
    let name = match kind {
        LabelKind::Solution => "solution",
        _ => "answer",
    };
    labelled_group(name, label, items, spacing)
}

fn labelled_group(
    name: &str,
    label: LayoutNode,
    items: Vec<LayoutNode>,
    spacing: f32,
) -> LayoutNode {
    let mut children = Vec::with_capacity(items.len() + 1);
    children.push(label);
    children.extend(items);

    let opts = ArrangeOptions {
        spacing,
        ..Default::default()
    };
    arranged_group(name, children, &opts)
}

/// Everything on one page, arranged top-down from the upper-left corner.
#[derive(Debug, Clone)]
pub struct Notebook {
    pub nodes: Vec<LayoutNode>,
    pub frame: Frame,
}

impl Notebook {
    /// Left-aligned top-down stack with `spacing` between nodes.
    pub fn new(nodes: Vec<LayoutNode>, frame: Frame, spacing: f32) -> Self {
        let opts = ArrangeOptions {
            spacing,
            ..Default::default()
        };
        Self::with_options(nodes, frame, &opts)
    }

    pub fn with_options(
        mut nodes: Vec<LayoutNode>,
        frame: Frame,
        opts: &ArrangeOptions,
    ) -> Self {
        let bounds = arrange(&mut nodes, opts);

        if !bounds.is_empty() {
            let corner = frame.bounds();
            let dx = corner.min[0] + CORNER_BUFF - bounds.min[0];
            let dy = corner.max[1] - CORNER_BUFF - bounds.max[1];
            for n in &mut nodes {
                n.shift(dx, dy);
            }
        }

        log::debug!("notebook: {} top-level nodes", nodes.len());
        Self { nodes, frame }
    }

    pub fn bounds(&self) -> Aabb2 {
        union_bounds(&self.nodes)
    }

    /// Content wider or taller than the frame.
    pub fn overflows(&self) -> bool {
        let b = self.bounds();
        let f = self.frame.bounds();
        !b.is_empty()
            && (b.min[0] < f.min[0] || b.max[0] > f.max[0] || b.min[1] < f.min[1] || b.max[1] > f.max[1])
    }

    /// All blocks with their final bounds and nesting depth, in order.
    pub fn blocks(&self) -> Vec<(&ContentBlock, Aabb2, usize)> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.for_each_block(&mut |block, bounds, depth| out.push((block, bounds, depth)));
        }
        out
    }

    pub fn to_scene_node(&self) -> SceneNode {
        LayoutNode::group("notebook", self.nodes.clone()).to_scene_node()
    }

    /// A scene holding just the notebook; decorations are pushed by the caller.
    pub fn to_scene(&self) -> Scene {
        let mut scene = Scene::new();
        scene.push(self.to_scene_node());
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::AlignRole;
    use crate::measure::EstimatedMetrics;

    const EPS: f32 = 1e-4;

    #[test]
    fn notebook_sits_in_upper_left_corner() {
        let w = Wrapper::default();
        let m = EstimatedMetrics::default();
        let nodes = vec![
            LayoutNode::block(w.block("Question 1:"), &m),
            LayoutNode::block(w.block("What is speed?"), &m),
        ];
        let nb = Notebook::new(nodes, Frame::default(), 0.25);

        let b = nb.bounds();
        let f = nb.frame.bounds();
        assert!((b.min[0] - (f.min[0] + CORNER_BUFF)).abs() < EPS);
        assert!((b.max[1] - (f.max[1] - CORNER_BUFF)).abs() < EPS);
        assert!(!nb.overflows());
        assert_eq!(nb.blocks().len(), 2);
    }

    #[test]
    fn answer_group_puts_content_right_of_label() {
        let w = Wrapper::default();
        let m = EstimatedMetrics::default();
        let items = vec![
            LayoutNode::block(w.block("Speed is distance over time."), &m),
            LayoutNode::block(w.block(r"$$\text{Speed} = \dfrac{d}{t}$$"), &m),
        ];
        let group = answer_group(&w, &m, LabelKind::Solution, items, 0.25);

        let children = group.children();
        assert_eq!(children.len(), 3);
        assert_eq!(
            children[0].role,
            AlignRole::Label(LabelKind::Solution)
        );
        let label = children[0].bounds();
        let first = children[1].bounds();
        assert!(first.min[0] > label.max[0]);
        assert!((first.max[1] - label.max[1]).abs() < EPS);

        // Groups are centered on the origin until placed.
        let c = group.bounds().center();
        assert!(c[0].abs() < EPS && c[1].abs() < EPS);
    }

    #[test]
    fn nested_groups_flatten_in_order() {
        let w = Wrapper::default();
        let m = EstimatedMetrics::default();
        let q = question_group(
            &w,
            &m,
            1,
            vec![LayoutNode::block(w.block("What is speed?"), &m)],
            0.25,
        );
        let a = answer_group(
            &w,
            &m,
            LabelKind::Answer,
            vec![LayoutNode::block(w.block("Distance per unit time."), &m)],
            0.25,
        );
        let nb = Notebook::new(vec![q, a], Frame::default(), 0.25);

        let texts: Vec<String> = nb.blocks().iter().map(|(b, _, _)| b.text()).collect();
        assert_eq!(
            texts,
            vec![
                "Question 1:",
                "What is speed?",
                "Answer :",
                "Distance per unit time."
            ]
        );
        assert!(nb.blocks().iter().all(|(_, _, depth)| *depth == 1));

        let root = nb.to_scene_node();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children.len(), 2);
        assert_eq!(nb.to_scene().draw_list().len(), 4);
    }
}
