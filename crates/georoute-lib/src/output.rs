use std::fmt::Write;

use serde::Serialize;

use crate::entity::{EntityId, EntitySet};
use crate::routing::{DistanceReport, PathResult, RouteAlgorithm, RouteOutcome, RoutePlan};

/// Presentation style for turning a [`RoutePlan`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteRenderMode {
    #[default]
    PlainText,
    RichText,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Straight-line length of the hop into this step; `None` for the first
    /// step or when a coordinate is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_km: Option<f64>,
    pub cumulative_km: f64,
}

impl RouteStep {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Structured, name-resolved view of a node-sequence plan.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub unit: &'static str,
    pub hops: usize,
    pub total: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Build a summary for a node-sequence plan. Returns `None` for trees,
    /// distance tables and negative cycles.
    pub fn from_plan(entities: &EntitySet, plan: &RoutePlan) -> Option<Self> {
        let path = plan.path()?;

        let mut cumulative = 0.0;
        let mut previous = None;
        let steps = path
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let entity = entities.get(id);
                let coordinate = entity.and_then(|e| e.valid_coordinate());
                let leg_km = match (previous, coordinate) {
                    (Some(from), Some(to)) => Some(crate::geo::haversine_km(from, to)),
                    _ => None,
                };
                cumulative += leg_km.unwrap_or(0.0);
                previous = coordinate;
                RouteStep {
                    index,
                    id: id.clone(),
                    name: entity.and_then(|e| e.name.clone()),
                    leg_km,
                    cumulative_km: cumulative,
                }
            })
            .collect::<Vec<_>>();

        Some(Self {
            algorithm: plan.algorithm,
            unit: plan.unit,
            hops: plan.hop_count(),
            total: plan.total().unwrap_or(0.0),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let (Some(first), Some(last)) = (self.steps.first(), self.steps.last()) else {
            let _ = writeln!(buffer, "No path found (algorithm: {})", self.algorithm);
            return buffer;
        };

        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {})",
            first.display_name(),
            last.display_name(),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            match step.leg_km {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}) +{:.1} km",
                        step.index,
                        step.display_name(),
                        step.id,
                        leg
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {} ({})", step.index, step.display_name(), step.id);
                }
            }
        }
        let _ = writeln!(buffer, "Total: {}", format_weight(self.total, self.unit));
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let (Some(first), Some(last)) = (self.steps.first(), self.steps.last()) else {
            let _ = writeln!(buffer, "**No path found** (algorithm: `{}`)", self.algorithm);
            return buffer;
        };

        let _ = writeln!(
            buffer,
            "**Route** _{} to {}_ ({} hops, algorithm: `{}`)",
            first.display_name(),
            last.display_name(),
            self.hops,
            self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`) {:.1} km",
                step.index,
                step.display_name(),
                step.id,
                step.cumulative_km
            );
        }
        let _ = writeln!(buffer, "\n**Total:** {}", format_weight(self.total, self.unit));
        buffer
    }
}

/// Render any plan as text, resolving entity names where possible.
pub fn render_plan(entities: &EntitySet, plan: &RoutePlan, mode: RouteRenderMode) -> String {
    if let Some(summary) = RouteSummary::from_plan(entities, plan) {
        return summary.render(mode);
    }

    let mut buffer = String::new();
    match &plan.outcome {
        RouteOutcome::Path(PathResult::EdgeSequence {
            mst_edges,
            total_cost,
            complete,
        }) => {
            let _ = writeln!(
                buffer,
                "Spanning tree: {} edges (algorithm: {}){}",
                mst_edges.len(),
                plan.algorithm,
                if *complete { "" } else { " [partial: graph is disconnected]" }
            );
            for edge in mst_edges {
                let _ = writeln!(
                    buffer,
                    "- {} -> {} ({})",
                    name_of(entities, &edge.from),
                    name_of(entities, &edge.to),
                    format_weight(edge.weight, plan.unit)
                );
            }
            let _ = writeln!(buffer, "Total: {}", format_weight(*total_cost, plan.unit));
        }
        RouteOutcome::Distances(report) => render_distances(&mut buffer, entities, plan, report),
        RouteOutcome::NegativeCycle(report) => {
            let _ = writeln!(
                buffer,
                "Negative cycle reachable from {}; distances are undefined",
                name_of(entities, &report.source)
            );
        }
        RouteOutcome::Path(PathResult::NodeSequence { .. }) => {}
    }
    buffer
}

fn render_distances(
    buffer: &mut String,
    entities: &EntitySet,
    plan: &RoutePlan,
    report: &DistanceReport,
) {
    let _ = writeln!(
        buffer,
        "Distances from {} (algorithm: {}):",
        name_of(entities, &report.source),
        plan.algorithm
    );
    for entry in &report.distances {
        let value = entry
            .distance
            .map(|d| format_weight(d, plan.unit))
            .unwrap_or_else(|| "unreachable".to_string());
        let _ = writeln!(buffer, "- {}: {}", name_of(entities, &entry.id), value);
    }
}

fn name_of<'a>(entities: &'a EntitySet, id: &'a str) -> &'a str {
    entities.get(id).map(|e| e.display_name()).unwrap_or(id)
}

fn format_weight(value: f64, unit: &str) -> String {
    match unit {
        "h" => format!("{:.2} h", value),
        "" => format!("{:.2}", value),
        other => format!("{:.1} {}", value, other),
    }
}
