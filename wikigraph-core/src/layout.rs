//! Force-directed node placement for the plot.

use crate::graph::ArticleGraph;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

pub type Position = (f64, f64);

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub iterations: usize,
    pub seed: u64,
    /// Stop early once the mean displacement per node drops below this.
    pub threshold: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 42,
            threshold: 1e-4,
        }
    }
}

/// Fruchterman-Reingold spring layout.
///
/// Positions are centred on the origin and scaled so the furthest coordinate
/// sits at distance 1. The result only depends on the graph and the seed.
pub fn spring_layout(graph: &ArticleGraph, options: &LayoutOptions) -> HashMap<NodeIndex, Position> {
    let nodes: Vec<NodeIndex> = graph.node_indices().collect();
    let n = nodes.len();

    match n {
        0 => return HashMap::new(),
        1 => return HashMap::from([(nodes[0], (0.0, 0.0))]),
        _ => {}
    }

    let slot: HashMap<NodeIndex, usize> = nodes.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();
    let edges: Vec<(usize, usize)> = graph
        .edge_endpoints()
        .into_iter()
        .map(|(a, b)| (slot[&a], slot[&b]))
        .collect();

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut pos: Vec<Position> = (0..n).map(|_| (rng.r#gen::<f64>(), rng.r#gen::<f64>())).collect();

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = initial_temperature(&pos);
    let cooling = temperature / (options.iterations as f64 + 1.0);

    for _ in 0..options.iterations {
        let mut disp = vec![(0.0f64, 0.0f64); n];

        // Repulsion between every pair.
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (pos[i].0 - pos[j].0, pos[i].1 - pos[j].1);
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = k * k / (dist * dist);
                disp[i].0 += dx * force;
                disp[i].1 += dy * force;
                disp[j].0 -= dx * force;
                disp[j].1 -= dy * force;
            }
        }

        // Attraction along edges.
        for &(a, b) in &edges {
            let (dx, dy) = (pos[a].0 - pos[b].0, pos[a].1 - pos[b].1);
            let dist = (dx * dx + dy * dy).sqrt().max(0.01);
            let force = dist / k;
            disp[a].0 -= dx * force;
            disp[a].1 -= dy * force;
            disp[b].0 += dx * force;
            disp[b].1 += dy * force;
        }

        let mut moved = 0.0;
        for (p, d) in pos.iter_mut().zip(&disp) {
            let length = (d.0 * d.0 + d.1 * d.1).sqrt().max(0.01);
            let step = (d.0 * temperature / length, d.1 * temperature / length);
            p.0 += step.0;
            p.1 += step.1;
            moved += (step.0 * step.0 + step.1 * step.1).sqrt();
        }

        temperature -= cooling;
        if moved / (n as f64) < options.threshold {
            break;
        }
    }

    rescale(&mut pos);
    nodes.into_iter().zip(pos).collect()
}

fn initial_temperature(pos: &[Position]) -> f64 {
    let xs = pos.iter().map(|p| p.0);
    let ys = pos.iter().map(|p| p.1);
    span(xs).max(span(ys)) * 0.1
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    max - min
}

fn rescale(pos: &mut [Position]) {
    let n = pos.len() as f64;
    let (cx, cy) = pos
        .iter()
        .fold((0.0, 0.0), |(x, y), p| (x + p.0, y + p.1));
    let (cx, cy) = (cx / n, cy / n);

    let mut extent: f64 = 0.0;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        extent = extent.max(p.0.abs()).max(p.1.abs());
    }

    if extent > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= extent;
            p.1 /= extent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_temperature_uses_widest_axis() {
        let pos = vec![(0.0, 0.0), (0.5, 1.0)];
        assert!((initial_temperature(&pos) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rescale_centres_and_normalises() {
        let mut pos = vec![(1.0, 1.0), (3.0, 1.0), (2.0, 2.0)];
        rescale(&mut pos);

        let max = pos.iter().map(|p| p.0.abs().max(p.1.abs())).fold(0.0, f64::max);
        assert!((max - 1.0).abs() < 1e-12);

        let mean_x: f64 = pos.iter().map(|p| p.0).sum::<f64>() / 3.0;
        assert!(mean_x.abs() < 1e-12);
    }
}
