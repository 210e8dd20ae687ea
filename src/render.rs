use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::clusterer::Snapshot;
use crate::geometry::{Dataset, Point};

/// Cluster colors, cycled by cluster id.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn cluster_color(id: usize) -> &'static str {
    PALETTE[id % PALETTE.len()]
}

/// One snapshot ready for display.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// 1-based position of `snapshot` in its log
    pub step: usize,
    pub total_steps: usize,
    pub converged: bool,
    pub snapshot: &'a Snapshot,
}

/// Destination for frames, e.g. a terminal or a chart front-end.
pub trait RenderSink {
    fn render(&mut self, dataset: &Dataset, frame: &Frame<'_>) -> Result<()>;
}

#[derive(Serialize)]
struct JsonCluster<'a> {
    id: usize,
    color: &'static str,
    centroid: Point,
    points: Vec<&'a Point>,
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    step: usize,
    total_steps: usize,
    converged: bool,
    inertia: f64,
    labels: &'a [usize],
    clusters: Vec<JsonCluster<'a>>,
}

/// Writes one JSON object per frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, dataset: &Dataset, frame: &Frame<'_>) -> Result<()> {
        let snapshot = frame.snapshot;
        let mut clusters: Vec<JsonCluster> = snapshot
            .centroids
            .iter()
            .enumerate()
            .map(|(id, &centroid)| JsonCluster {
                id,
                color: cluster_color(id),
                centroid,
                points: Vec::new(),
            })
            .collect();

        for (point, &label) in dataset.iter().zip(&snapshot.labels) {
            clusters[label].points.push(point);
        }

        let json = JsonFrame {
            step: frame.step,
            total_steps: frame.total_steps,
            converged: frame.converged,
            inertia: snapshot.inertia(dataset),
            labels: &snapshot.labels,
            clusters,
        };

        serde_json::to_writer(&mut self.out, &json).context("Failed to serialize frame")?;
        writeln!(self.out).context("Failed to write frame")?;
        Ok(())
    }
}

/// Human readable frame summary.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn render(&mut self, dataset: &Dataset, frame: &Frame<'_>) -> Result<()> {
        let snapshot = frame.snapshot;
        let status = if frame.step < frame.total_steps {
            "in progress"
        } else if frame.converged {
            "converged"
        } else {
            "stopped at iteration cap"
        };

        writeln!(
            self.out,
            "KMeans Clustering - Step {}/{} ({})",
            frame.step, frame.total_steps, status
        )?;

        let sizes = snapshot.cluster_sizes();
        for (id, centroid) in snapshot.centroids.iter().enumerate() {
            writeln!(
                self.out,
                "  Cluster {:<3} {:>5} points  centroid ({:.4}, {:.4})  {}",
                id + 1,
                sizes[id],
                centroid.x,
                centroid.y,
                cluster_color(id)
            )?;
        }
        writeln!(self.out, "  Inertia: {:.6}", snapshot.inertia(dataset))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Dataset, Snapshot) {
        let dataset = Dataset::from(vec![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0]]);
        let snapshot = Snapshot {
            centroids: vec![Point::new(0.0, 0.5), Point::new(10.0, 0.0)],
            labels: vec![0, 0, 1],
        };
        (dataset, snapshot)
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(cluster_color(0), "#1f77b4");
        assert_eq!(cluster_color(10), cluster_color(0));
        assert_eq!(cluster_color(13), "#d62728");
    }

    #[test]
    fn test_json_frame_groups_points() {
        let (dataset, snapshot) = fixture();
        let frame = Frame {
            step: 1,
            total_steps: 2,
            converged: true,
            snapshot: &snapshot,
        };

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.render(&dataset, &frame).unwrap();
        let bytes = sink.into_inner();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["step"], 1);
        assert_eq!(value["labels"], serde_json::json!([0, 0, 1]));
        assert_eq!(value["clusters"][0]["points"], serde_json::json!([[0.0, 0.0], [0.0, 1.0]]));
        assert_eq!(value["clusters"][1]["centroid"], serde_json::json!([10.0, 0.0]));
        assert_eq!(value["clusters"][1]["color"], "#ff7f0e");
        assert_eq!(value["inertia"], 0.5);
    }

    #[test]
    fn test_text_frame_reports_status() {
        let (dataset, snapshot) = fixture();
        let frame = Frame {
            step: 2,
            total_steps: 2,
            converged: false,
            snapshot: &snapshot,
        };

        let mut sink = TextSink::new(Vec::new());
        sink.render(&dataset, &frame).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.starts_with("KMeans Clustering - Step 2/2 (stopped at iteration cap)"));
        assert!(text.contains("centroid (10.0000, 0.0000)"));
        assert!(text.contains("Inertia: 0.500000"));
    }
}
