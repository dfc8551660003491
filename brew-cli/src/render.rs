use anyhow::{Context, Result};
use chrono::{Local, NaiveTime, TimeDelta};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};

use brew_core::{BrewMethod, BrewPlan, Recommendation};

pub fn fmt_g(x: f64) -> String {
    let v = (x * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0} g", v)
    } else {
        format!("{:.1} g", v)
    }
}

pub fn fmt_ratio(r: f64) -> String {
    let v = (r * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("1:{:.0}", v)
    } else {
        format!("1:{:.1}", v)
    }
}

/// Offset from brew start as m:ss.
pub fn fmt_offset(sec: u32) -> String {
    format!("{}:{:02}", sec / 60, sec % 60)
}

/// `--start` accepts HH:MM or "now".
pub fn parse_start(s: Option<&str>) -> Result<Option<NaiveTime>> {
    match s {
        None => Ok(None),
        Some("now") => Ok(Some(Local::now().naive_local().time())),
        Some(hhmm) => NaiveTime::parse_from_str(hhmm, "%H:%M")
            .map(Some)
            .with_context(|| format!("invalid start time {hhmm:?}, expected HH:MM")),
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            header
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

pub fn summary_table(plan: &BrewPlan) -> Table {
    let mut table = new_table(&["Item", "Amount", "Notes"]);
    table.add_row(vec![
        Cell::new("Coffee"),
        Cell::new(fmt_g(plan.coffee_grams)),
        Cell::new(format!("ratio {}", fmt_ratio(plan.ratio))),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(format!("{} ml", plan.water_total_ml)),
        Cell::new(format!("incl. {} ml absorbed by grounds", plan.absorbed_ml())),
    ]);
    table.add_row(vec![
        Cell::new("Yield"),
        Cell::new(format!("{} ml", plan.yield_target_ml)),
        Cell::new(""),
    ]);
    if let Some(bloom) = plan.bloom_ml {
        table.add_row(vec![
            Cell::new("Bloom"),
            Cell::new(format!("{bloom} ml")),
            Cell::new("wet grounds, wait 45 s"),
        ]);
    }
    table
}

/// Pour schedule; with a start time each step also gets its clock time.
pub fn schedule_table(plan: &BrewPlan, start: Option<NaiveTime>) -> Table {
    let mut header = vec!["Time"];
    if start.is_some() {
        header.push("Clock");
    }
    header.extend(["Step", "Pour", "Scale reads"]);
    let mut table = new_table(&header);

    for step in &plan.pours {
        let mut row = vec![Cell::new(fmt_offset(step.at_sec))];
        if let Some(st) = start {
            let at = st + TimeDelta::seconds(i64::from(step.at_sec));
            row.push(Cell::new(at.format("%H:%M:%S")));
        }
        row.push(Cell::new(step.label));
        row.push(Cell::new(format!("{} ml", step.volume_ml)).set_alignment(CellAlignment::Right));
        row.push(
            Cell::new(format!("{} ml", step.cumulative_ml)).set_alignment(CellAlignment::Right),
        );
        table.add_row(row);
    }
    table
}

pub fn recommendation_lines(rec: &Recommendation) -> Vec<String> {
    vec![
        format!("• Water temperature: {} °C", rec.temp_c),
        format!("• Grind: {}", rec.grind),
        format!("• Filter: {}", rec.filter),
    ]
}

pub fn methods_table(methods: &[BrewMethod]) -> Table {
    let mut table = new_table(&[
        "Key", "Method", "Ratio", "Bloom", "Pours", "Temp", "Grind", "Filter",
    ]);
    for m in methods {
        let rec = m.key.recommendation();
        table.add_row(vec![
            Cell::new(m.key),
            Cell::new(m.name),
            Cell::new(fmt_ratio(m.default_ratio)),
            Cell::new(if m.bloom { "yes" } else { "no" }),
            Cell::new(m.pour_count),
            Cell::new(format!("{} °C", rec.temp_c)),
            Cell::new(rec.grind),
            Cell::new(rec.filter),
        ]);
    }
    table
}
