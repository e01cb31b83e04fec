//! Drawing layouts for weekly graphs.
//!
//! Both layouts are deterministic: the same graph always yields the same
//! coordinates. Positions live in the unit square around the origin.

use std::f64::consts::TAU;

use clap::ValueEnum;
use snda_core::InteractionGraph;
use snda_core::temporal::{Layout, Positions};

/// Which layout `snda weekly` should compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutKind {
    Circle,
    Spring,
}

impl LayoutKind {
    pub fn build(self) -> Box<dyn Layout> {
        match self {
            Self::Circle => Box::new(CircleLayout),
            Self::Spring => Box::new(SpringLayout::default()),
        }
    }
}

/// Nodes evenly spaced on the unit circle, in insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleLayout;

impl Layout for CircleLayout {
    fn layout(&self, graph: &InteractionGraph) -> Positions {
        let ids: Vec<&str> = graph.node_ids().collect();
        circle_points(ids.len())
            .into_iter()
            .zip(ids)
            .map(|(p, id)| (id.to_string(), p))
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn circle_points(n: usize) -> Vec<(f64, f64)> {
    if n == 1 {
        return vec![(0.0, 0.0)];
    }
    (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64;
            (theta.cos(), theta.sin())
        })
        .collect()
}

/// Force-directed layout seeded from the circle layout.
///
/// Every pair of nodes repels, every edge pulls its endpoints toward a rest
/// length, and per-step displacement is capped by a temperature that cools
/// linearly to zero.
#[derive(Debug, Clone, Copy)]
pub struct SpringLayout {
    pub iterations: usize,
    /// Rest length of an edge.
    pub spring_length: f64,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self {
            iterations: 50,
            spring_length: 0.3,
        }
    }
}

impl Layout for SpringLayout {
    #[allow(clippy::cast_precision_loss)]
    fn layout(&self, graph: &InteractionGraph) -> Positions {
        let n = graph.node_count();
        let mut pos = circle_points(n);

        let k = self.spring_length;
        for step in 0..self.iterations {
            let temperature = 0.1 * (1.0 - step as f64 / self.iterations as f64);
            let mut disp = vec![(0.0_f64, 0.0_f64); n];

            // Repulsion
            for i in 0..n {
                for j in (i + 1)..n {
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let dist_sq = dx.mul_add(dx, dy * dy).max(1e-9);
                    let force = k * k / dist_sq;
                    disp[i].0 += dx * force;
                    disp[i].1 += dy * force;
                    disp[j].0 -= dx * force;
                    disp[j].1 -= dy * force;
                }
            }

            // Attraction along edges; each undirected edge is visited from
            // both ends, so only act when i < j.
            for i in 0..n {
                for &j in graph.neighbors(i) {
                    if j <= i {
                        continue;
                    }
                    let dx = pos[j].0 - pos[i].0;
                    let dy = pos[j].1 - pos[i].1;
                    let dist = dx.hypot(dy).max(1e-9);
                    let force = (dist - k) / dist;
                    disp[i].0 += dx * force;
                    disp[i].1 += dy * force;
                    disp[j].0 -= dx * force;
                    disp[j].1 -= dy * force;
                }
            }

            for (p, d) in pos.iter_mut().zip(&disp) {
                let len = d.0.hypot(d.1);
                if len > 0.0 {
                    let capped = len.min(temperature);
                    p.0 += d.0 / len * capped;
                    p.1 += d.1 / len * capped;
                }
            }
        }

        normalize(&mut pos);
        graph
            .node_ids()
            .zip(pos)
            .map(|(id, p)| (id.to_string(), p))
            .collect()
    }
}

/// Center on the origin and scale so the farthest node sits at distance 1.
fn normalize(pos: &mut [(f64, f64)]) {
    if pos.is_empty() {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;
    let mut radius = 0.0_f64;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        radius = radius.max(p.0.hypot(p.1));
    }
    if radius > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= radius;
            p.1 /= radius;
        }
    }
}
