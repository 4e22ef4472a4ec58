//! SceneRenderer - Draws every chart into a retained [`Container`]

use ahash::AHashSet;

use crate::domain::flow::NodeKind;
use crate::domain::medal::{MedalType, Tally};
use crate::error::{Error, Result};
use crate::render::scale::{BandScale, LinearScale};
use crate::render::scene::{Anchor, Container, MESSAGE_CLASS, Mark};
use crate::render::{Capability, ChartRenderer};
use crate::reshape::{
    Cell, EvolutionView, FlowView, HeatmapView, HistoryView, HostBar, HostView, RankingView,
};
use crate::theme::{ChartColors, Rgb, category10, yl_or_rd};

/// Space around the flow layout on every side
pub const FLOW_MARGIN: f64 = 20.0;

/// Flow labels longer than this are shortened
const FLOW_LABEL_MAX: usize = 20;
const FLOW_LABEL_KEEP: usize = 18;

#[derive(Debug, Clone, Copy)]
struct Margin {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Margin {
    const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Plot area size inside the margin
    fn inner(&self, container: &Container) -> (f64, f64) {
        (
            (container.width() - self.left - self.right).max(0.0),
            (container.height() - self.top - self.bottom).max(0.0),
        )
    }
}

const HEATMAP_MARGIN: Margin = Margin::new(70.0, 30.0, 100.0, 120.0);
const EVOLUTION_MARGIN: Margin = Margin::new(60.0, 120.0, 40.0, 50.0);
const RANKING_MARGIN: Margin = Margin::new(60.0, 30.0, 50.0, 50.0);
const DOMINANCE_MARGIN: Margin = Margin::new(60.0, 170.0, 30.0, 140.0);
const HOST_MARGIN: Margin = Margin::new(60.0, 30.0, 40.0, 50.0);

fn node_color(kind: NodeKind) -> Rgb {
    match kind {
        NodeKind::Year => ChartColors::flow_year(),
        NodeKind::Sport => ChartColors::flow_sport(),
        NodeKind::Country => ChartColors::flow_country(),
    }
}

/// Shorten long flow labels to keep columns readable
pub fn truncate_label(name: &str) -> String {
    if name.chars().count() > FLOW_LABEL_MAX {
        let kept: String = name.chars().take(FLOW_LABEL_KEEP).collect();
        format!("{kept}...")
    } else {
        name.to_string()
    }
}

fn draw_title(container: &mut Container, title: &str, subtitle: &str) {
    let cx = container.width() / 2.0;
    container.push(
        Mark::text("title", cx, 24.0, title)
            .font(Anchor::Middle, 18.0)
            .fill(ChartColors::text())
            .bold(),
    );
    if !subtitle.is_empty() {
        container.push(
            Mark::text("subtitle", cx, 44.0, subtitle)
                .font(Anchor::Middle, 13.0)
                .fill(ChartColors::text_muted()),
        );
    }
}

/// Vertical value axis with grid lines
fn draw_value_axis(container: &mut Container, y: &LinearScale, x0: f64, x1: f64) {
    for tick in y.ticks(5) {
        let py = y.map(tick);
        container.push(Mark::line("grid", x0, py, x1, py).stroke(ChartColors::grid(), 1.0));
        container.push(
            Mark::text("axis", x0 - 6.0, py + 4.0, format!("{tick}"))
                .font(Anchor::End, 10.0)
                .fill(ChartColors::text_muted()),
        );
    }
}

/// Colored swatches with labels, one per row
fn draw_legend(container: &mut Container, x: f64, y: f64, items: &[(Rgb, String)]) {
    for (i, (color, label)) in items.iter().enumerate() {
        let row = y + i as f64 * 18.0;
        container.push(Mark::rect("legend", x, row, 12.0, 12.0).fill(*color));
        container.push(
            Mark::text("legend", x + 18.0, row + 10.0, label.as_str())
                .font(Anchor::Start, 11.0)
                .fill(ChartColors::text()),
        );
    }
}

/// Text shown inside an empty plot area
fn draw_empty(container: &mut Container, margin: Margin, text: &str) {
    let (w, h) = margin.inner(container);
    container.push(
        Mark::text("empty", margin.left + w / 2.0, margin.top + h / 2.0, text)
            .font(Anchor::Middle, 14.0)
            .fill(ChartColors::text_muted()),
    );
}

fn medal_tooltip(header: &str, tally: &Tally) -> String {
    match tally.counts() {
        Some(c) => format!(
            "{header}\nGold: {}\nSilver: {}\nBronze: {}\nTotal: {}",
            c.gold,
            c.silver,
            c.bronze,
            c.total()
        ),
        None => format!("{header}\nNo data"),
    }
}

/// Scene-backed [`ChartRenderer`]
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    capabilities: AHashSet<Capability>,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self {
            capabilities: [Capability::FlowLayout].into_iter().collect(),
        }
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same renderer with `capability` switched off
    pub fn without(mut self, capability: Capability) -> Self {
        self.capabilities.remove(&capability);
        self
    }

    /// Check preconditions, then clear the container
    fn prepare(&self, container: &mut Container, needs: Option<Capability>) -> Result<()> {
        container.check_ready()?;
        if let Some(capability) = needs.filter(|c| !self.supports(*c)) {
            return Err(Error::render_precondition(format!(
                "{} is not available",
                capability.label()
            )));
        }
        container.clear();
        Ok(())
    }

    fn draw_host_bar(
        container: &mut Container,
        bar: &HostBar,
        medal_type: MedalType,
        x: f64,
        width: f64,
        y: &LinearScale,
    ) {
        let baseline = y.map(0.0);
        match bar.value {
            Some(v) => {
                let top = y.map(f64::from(v));
                let fill = if bar.is_host_year {
                    ChartColors::host()
                } else {
                    ChartColors::medal(medal_type)
                };
                let mut tip = format!("{}\n{}: {v}", bar.year, medal_type.label());
                if bar.is_host_year {
                    tip.push_str("\nHost year");
                }
                container.push(
                    Mark::rect("bar", x, top, width, baseline - top)
                        .fill(fill)
                        .tooltip(tip),
                );
            }
            None => {
                container.push(
                    Mark::rect("placeholder", x, baseline - 20.0, width, 20.0)
                        .stroke(ChartColors::text_muted(), 1.0)
                        .dashed("4,4")
                        .tooltip(format!("{}\nNo data", bar.year)),
                );
            }
        }
    }

    fn draw_average(
        container: &mut Container,
        label: &str,
        avg: f64,
        x0: f64,
        x1: f64,
        y: &LinearScale,
    ) {
        let py = y.map(avg);
        container.push(
            Mark::line("average", x0, py, x1, py)
                .stroke(ChartColors::average(), 1.5)
                .dashed("6,3"),
        );
        container.push(
            Mark::text("average", x0 + 4.0, py - 4.0, format!("{label}: {avg:.1}"))
                .font(Anchor::Start, 11.0)
                .fill(ChartColors::average()),
        );
    }
}

impl ChartRenderer for SceneRenderer {
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn render_heatmap(&self, container: &mut Container, view: &HeatmapView) -> Result<()> {
        self.prepare(container, None)?;
        let m = HEATMAP_MARGIN;
        let (w, h) = m.inner(container);
        let xs = BandScale::new(view.sports.len(), m.left, m.left + w, 0.05);
        let ys = BandScale::new(view.countries.len(), m.top, m.top + h, 0.05);

        draw_title(container, &view.title, &view.subtitle);

        for (row, cells) in view.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let fill = match cell {
                    Cell::Absent => continue,
                    Cell::Zero => ChartColors::zero_cell(),
                    Cell::Count(n) => yl_or_rd(f64::from(*n) / view.max_value),
                };
                let label = view.country_labels.get(row).map_or("", String::as_str);
                let sport = view.sports.get(col).map_or("", String::as_str);
                container.push(
                    Mark::rect(
                        "cell",
                        xs.position(col),
                        ys.position(row),
                        xs.bandwidth(),
                        ys.bandwidth(),
                    )
                    .fill(fill)
                    .tooltip(format!(
                        "{label}\n{sport}\nMedals: {}",
                        cell.value().unwrap_or(0)
                    )),
                );
            }
        }

        for (row, label) in view.country_labels.iter().enumerate() {
            container.push(
                Mark::text("axis", m.left - 6.0, ys.center(row) + 4.0, label.as_str())
                    .font(Anchor::End, 11.0)
                    .fill(ChartColors::text()),
            );
        }
        for (col, sport) in view.sports.iter().enumerate() {
            container.push(
                Mark::text("axis", xs.center(col), m.top + h + 14.0, sport.as_str())
                    .font(Anchor::Middle, 10.0)
                    .fill(ChartColors::text()),
            );
        }

        for &row in &view.country_breaks {
            let py = ys.boundary(row);
            container.push(
                Mark::line("cluster", m.left, py, m.left + w, py)
                    .stroke(ChartColors::cluster_line(), 2.0),
            );
        }
        for &col in &view.sport_breaks {
            let px = xs.boundary(col);
            container.push(
                Mark::line("cluster", px, m.top, px, m.top + h)
                    .stroke(ChartColors::cluster_line(), 2.0),
            );
        }

        // Color key under the grid
        let key_y = m.top + h + 40.0;
        for step in 0..=4 {
            let t = f64::from(step) / 4.0;
            let x = m.left + f64::from(step) * 60.0;
            container.push(Mark::rect("legend", x, key_y, 60.0, 12.0).fill(yl_or_rd(t)));
            container.push(
                Mark::text(
                    "legend",
                    x,
                    key_y + 26.0,
                    format!("{}", (view.max_value * t).round()),
                )
                .font(Anchor::Start, 10.0)
                .fill(ChartColors::text_muted()),
            );
        }
        Ok(())
    }

    fn render_flow(&self, container: &mut Container, view: &FlowView) -> Result<()> {
        self.prepare(container, Some(Capability::FlowLayout))?;
        let o = FLOW_MARGIN;

        container.push(
            Mark::text("title", container.width() / 2.0, 14.0, view.title.as_str())
                .font(Anchor::Middle, 14.0)
                .fill(ChartColors::text())
                .bold(),
        );

        for link in &view.links {
            let (Some(source), Some(target)) =
                (view.nodes.get(link.source), view.nodes.get(link.target))
            else {
                continue;
            };
            let (x0, x1) = (o + source.x1, o + target.x0);
            let xm = (x0 + x1) / 2.0;
            let (ys, yt) = (o + link.y_source, o + link.y_target);
            container.push(
                Mark::path("link", vec![(x0, ys), (xm, ys), (xm, yt), (x1, yt)])
                    .stroke(ChartColors::flow_link(), link.width.max(1.0))
                    .opacity(0.3)
                    .tooltip(format!(
                        "{} → {}\n{}",
                        source.name, target.name, link.value
                    )),
            );
        }

        for (i, node) in view.nodes.iter().enumerate() {
            container.push(
                Mark::rect(
                    "node",
                    o + node.x0,
                    o + node.y0,
                    node.x1 - node.x0,
                    node.y1 - node.y0,
                )
                .fill(node_color(node.kind))
                .tooltip(format!(
                    "{}\nTotal: {}\nIncoming: {}\nOutgoing: {}",
                    node.name,
                    node.value(),
                    node.incoming,
                    node.outgoing
                ))
                .group(i),
            );
            let cy = o + (node.y0 + node.y1) / 2.0 + 4.0;
            let label = if node.x0 < view.width / 2.0 {
                Mark::text("label", o + node.x1 + 6.0, cy, truncate_label(&node.name))
                    .font(Anchor::Start, 10.0)
            } else {
                Mark::text("label", o + node.x0 - 6.0, cy, truncate_label(&node.name))
                    .font(Anchor::End, 10.0)
            };
            container.push(label.fill(ChartColors::text()).group(i));
        }

        let legend: Vec<(Rgb, String)> = [NodeKind::Year, NodeKind::Sport, NodeKind::Country]
            .into_iter()
            .map(|k| (node_color(k), k.label().to_string()))
            .collect();
        draw_legend(container, container.width() - 90.0, o, &legend);
        Ok(())
    }

    fn render_evolution(&self, container: &mut Container, view: &EvolutionView) -> Result<()> {
        self.prepare(container, None)?;
        let (Some(&first), Some(&last)) = (view.years.first(), view.years.last()) else {
            return Ok(());
        };
        if view.is_empty() {
            return Ok(());
        }

        let m = EVOLUTION_MARGIN;
        let (w, h) = m.inner(container);
        let x = LinearScale::new((f64::from(first), f64::from(last)), (m.left, m.left + w));
        let y = LinearScale::new((0.0, f64::from(view.y_max)), (m.top + h, m.top)).nice(5);

        let medals: Vec<&str> = view.medals.enabled().iter().map(MedalType::label).collect();
        draw_title(container, "Olympic Medal Evolution", &medals.join(", "));
        draw_value_axis(container, &y, m.left, m.left + w);
        for tick in x.ticks(8) {
            container.push(
                Mark::text("axis", x.map(tick), m.top + h + 16.0, format!("{tick}"))
                    .font(Anchor::Middle, 10.0)
                    .fill(ChartColors::text_muted()),
            );
        }

        for series in &view.series {
            let color = category10(series.slot);
            let points = series
                .points
                .iter()
                .map(|p| (x.map(f64::from(p.year)), y.map(f64::from(p.total()))))
                .collect();
            container.push(Mark::path("series", points).stroke(color, 2.0));

            for point in series.medal_points() {
                let tally = Tally::Counts(point.counts);
                container.push(
                    Mark::circle(
                        "point",
                        x.map(f64::from(point.year)),
                        y.map(f64::from(point.total())),
                        4.0,
                    )
                    .fill(color)
                    .tooltip(medal_tooltip(
                        &format!("{} ({})", series.label, point.year),
                        &tally,
                    )),
                );
            }

            if let Some(end) = series.medal_points().last() {
                container.push(
                    Mark::text(
                        "series-label",
                        x.map(f64::from(end.year)) + 6.0,
                        y.map(f64::from(end.total())) + 4.0,
                        series.label.as_str(),
                    )
                    .font(Anchor::Start, 11.0)
                    .fill(color),
                );
            }
        }
        Ok(())
    }

    fn render_ranking(&self, container: &mut Container, view: &RankingView) -> Result<()> {
        self.prepare(container, None)?;
        let m = RANKING_MARGIN;
        draw_title(container, &view.title, &view.subtitle);
        if view.entries.is_empty() {
            draw_empty(container, m, &view.empty_text);
            return Ok(());
        }

        let (w, h) = m.inner(container);
        let xs = BandScale::new(view.entries.len(), m.left, m.left + w, 0.2);
        let y = LinearScale::new((0.0, f64::from(view.max_value()) * 1.1), (m.top + h, m.top))
            .nice(5);
        draw_value_axis(container, &y, m.left, m.left + w);

        for (i, entry) in view.entries.iter().enumerate() {
            let mut base = 0u32;
            for medal in &view.stacks {
                let v = medal.pick(&entry.counts);
                if v == 0 {
                    continue;
                }
                let (top, bottom) = (y.map(f64::from(base + v)), y.map(f64::from(base)));
                container.push(
                    Mark::rect("bar", xs.position(i), top, xs.bandwidth(), bottom - top)
                        .fill(ChartColors::medal(*medal))
                        .tooltip(format!(
                            "{}\n{}: {v}\nTotal: {}",
                            entry.label,
                            medal.label(),
                            entry.value
                        )),
                );
                base += v;
            }
            container.push(
                Mark::text("axis", xs.center(i), m.top + h + 14.0, entry.key.as_str())
                    .font(Anchor::Middle, 10.0)
                    .fill(ChartColors::text()),
            );
            if entry.is_host {
                container.push(
                    Mark::text(
                        "host",
                        xs.center(i),
                        y.map(f64::from(entry.value)) - 6.0,
                        "Host",
                    )
                    .font(Anchor::Middle, 10.0)
                    .fill(ChartColors::host())
                    .bold(),
                );
            }
        }

        let legend: Vec<(Rgb, String)> = view
            .stacks
            .iter()
            .map(|medal| (ChartColors::medal(*medal), medal.label().to_string()))
            .collect();
        draw_legend(container, container.width() - 100.0, m.top, &legend);
        Ok(())
    }

    fn render_dominance(&self, container: &mut Container, view: &RankingView) -> Result<()> {
        self.prepare(container, None)?;
        let m = DOMINANCE_MARGIN;
        draw_title(container, &view.title, &view.subtitle);
        if view.entries.is_empty() {
            draw_empty(container, m, &view.empty_text);
            return Ok(());
        }

        let (w, h) = m.inner(container);
        let medal = view.stacks.first().copied().unwrap_or_default();
        let x = LinearScale::new((0.0, f64::from(view.max_value()) * 1.1), (m.left, m.left + w))
            .nice(5);
        let ys = BandScale::new(view.entries.len(), m.top, m.top + h, 0.15);

        for (i, entry) in view.entries.iter().enumerate() {
            let right = x.map(f64::from(entry.value));
            container.push(
                Mark::rect("bar", m.left, ys.position(i), right - m.left, ys.bandwidth())
                    .fill(ChartColors::medal(medal))
                    .tooltip(format!("{}\n{}: {}", entry.label, medal.label(), entry.value)),
            );
            container.push(
                Mark::text("axis", m.left - 6.0, ys.center(i) + 4.0, entry.label.as_str())
                    .font(Anchor::End, 11.0)
                    .fill(ChartColors::text()),
            );
            container.push(
                Mark::text("value", right + 4.0, ys.center(i) + 4.0, entry.value.to_string())
                    .font(Anchor::Start, 10.0)
                    .fill(ChartColors::text_muted()),
            );
        }

        for (i, line) in view.legend.iter().enumerate() {
            container.push(
                Mark::text(
                    "legend",
                    m.left + w + 20.0,
                    m.top + 12.0 + i as f64 * 18.0,
                    line.as_str(),
                )
                .font(Anchor::Start, 11.0)
                .fill(ChartColors::text()),
            );
        }
        Ok(())
    }

    fn render_host(&self, container: &mut Container, view: &HostView) -> Result<()> {
        self.prepare(container, None)?;
        let m = HOST_MARGIN;
        draw_title(container, &view.title, &view.subtitle);

        let (w, h) = m.inner(container);
        let xs = BandScale::new(view.bars.len(), m.left, m.left + w, 0.2);
        let y = LinearScale::new((0.0, f64::from(view.y_max) * 1.1), (m.top + h, m.top)).nice(5);
        draw_value_axis(container, &y, m.left, m.left + w);

        for (i, bar) in view.bars.iter().enumerate() {
            let (x, width) = (xs.position(i), xs.bandwidth());
            Self::draw_host_bar(container, bar, view.medal_type, x, width, &y);
            container.push(
                Mark::text("axis", xs.center(i), m.top + h + 14.0, bar.year.to_string())
                    .font(Anchor::Middle, 10.0)
                    .fill(ChartColors::text()),
            );
        }

        let host_x = view
            .bars
            .iter()
            .position(|b| b.is_host_year)
            .map(|i| xs.center(i));
        let (start, end) = (m.left, m.left + w);
        if let Some(avg) = view.pre_host_avg {
            Self::draw_average(container, "Pre-host Avg", avg, start, host_x.unwrap_or(end), &y);
        }
        if let Some(avg) = view.post_host_avg {
            Self::draw_average(container, "Post-host Avg", avg, host_x.unwrap_or(start), end, &y);
        }
        Ok(())
    }

    fn render_history(&self, container: &mut Container, view: &HistoryView) -> Result<()> {
        self.prepare(container, None)?;
        let m = HOST_MARGIN;
        draw_title(
            container,
            &format!("{} Medal History", view.host_country),
            &format!("Host Year: {}", view.host_year),
        );

        let (w, h) = m.inner(container);
        let xs = BandScale::new(view.bars.len(), m.left, m.left + w, 0.2);
        let y = LinearScale::new((0.0, f64::from(view.y_max) * 1.1), (m.top + h, m.top)).nice(5);
        draw_value_axis(container, &y, m.left, m.left + w);
        let stacks = [MedalType::Gold, MedalType::Silver, MedalType::Bronze];

        for (i, bar) in view.bars.iter().enumerate() {
            let tip = medal_tooltip(&bar.year.to_string(), &bar.tally);
            match bar.tally.counts() {
                Some(counts) => {
                    let mut base = 0u32;
                    for medal in stacks {
                        let v = medal.pick(counts);
                        if v == 0 {
                            continue;
                        }
                        let (top, bottom) = (y.map(f64::from(base + v)), y.map(f64::from(base)));
                        container.push(
                            Mark::rect("segment", xs.position(i), top, xs.bandwidth(), bottom - top)
                                .fill(ChartColors::medal(medal))
                                .tooltip(tip.clone()),
                        );
                        base += v;
                    }
                }
                None => {
                    let baseline = y.map(0.0);
                    container.push(
                        Mark::rect("no-data", xs.position(i), baseline - 20.0, xs.bandwidth(), 20.0)
                            .fill(ChartColors::no_data())
                            .tooltip(tip),
                    );
                    container.push(
                        Mark::text("no-data", xs.center(i), baseline - 24.0, "No Data")
                            .font(Anchor::Middle, 8.0)
                            .fill(ChartColors::text_muted()),
                    );
                }
            }
            if bar.is_host_year {
                container.push(
                    Mark::text("axis", xs.center(i), m.top + h + 14.0, bar.year.to_string())
                        .font(Anchor::Middle, 10.0)
                        .fill(ChartColors::host())
                        .bold(),
                );
            } else {
                container.push(
                    Mark::text("axis", xs.center(i), m.top + h + 14.0, bar.year.to_string())
                        .font(Anchor::Middle, 10.0)
                        .fill(ChartColors::text()),
                );
            }
        }

        let legend: Vec<(Rgb, String)> = stacks
            .iter()
            .map(|medal| (ChartColors::medal(*medal), medal.label().to_string()))
            .collect();
        draw_legend(container, container.width() - 100.0, m.top, &legend);
        Ok(())
    }

    fn render_message(&self, container: &mut Container, message: &str) -> Result<()> {
        self.prepare(container, None)?;
        container.push(
            Mark::text(
                MESSAGE_CLASS,
                container.width() / 2.0,
                container.height() / 2.0,
                message,
            )
            .font(Anchor::Middle, 14.0)
            .fill(ChartColors::error()),
        );
        Ok(())
    }
}
