//! Floor-Plan Editor (Kommandozeile).
//!
//! Liest Grundriss-Dokumente und wertet sie mit der Engine aus:
//! - `inspect <plan.json>` — Statistik über Ebenen, Knoten, Wände, Öffnungen, Räume
//! - `rooms <plan.json> <x> <y>` — Raumerkennung am Saatpunkt

use anyhow::{bail, Context};
use floorplan_editor::{extract_region, from_document, parse_plan_document, FloorPlan};
use glam::Vec2;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Floor-Plan Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, path] if cmd == "inspect" => inspect(&load_plan(path)?),
        [cmd, path, x, y] if cmd == "rooms" => {
            let seed = Vec2::new(
                x.parse().with_context(|| format!("Ungültige X-Koordinate: {x}"))?,
                y.parse().with_context(|| format!("Ungültige Y-Koordinate: {y}"))?,
            );
            rooms(&load_plan(path)?, seed)
        }
        _ => {
            eprintln!("Verwendung:");
            eprintln!("  floorplan-editor inspect <plan.json>");
            eprintln!("  floorplan-editor rooms <plan.json> <x> <y>");
            bail!("Ungültige Argumente")
        }
    }
}

fn load_plan(path: &str) -> anyhow::Result<FloorPlan> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {path}"))?;
    let document =
        parse_plan_document(&json).with_context(|| format!("Ungültiges Plan-Dokument: {path}"))?;
    let plan = from_document(&document)?;
    Ok(plan)
}

fn inspect(plan: &FloorPlan) -> anyhow::Result<()> {
    println!("Ebenen:    {}", plan.layer_count());
    for (id, layer) in plan.layers() {
        println!(
            "  {id} {:<20} sichtbar={} gesperrt={}",
            layer.name, layer.visible, layer.locked
        );
    }
    println!("Knoten:    {}", plan.node_count());
    let total_length: f32 = plan
        .walls()
        .filter_map(|(id, _)| plan.wall_geometry(id))
        .map(|g| g.length)
        .sum();
    println!(
        "Wände:     {} (Gesamtlänge {:.2})",
        plan.wall_count(),
        total_length
    );
    let doors = plan.openings().filter(|(_, o)| o.is_door()).count();
    println!(
        "Öffnungen: {} ({} Türen, {} Fenster)",
        plan.opening_count(),
        doors,
        plan.opening_count() - doors
    );
    println!("Räume:     {}", plan.room_count());
    for (id, room) in plan.rooms() {
        println!(
            "  {id} {:<20} Fläche {:.2}, Umfang {:.2}",
            room.name, room.area, room.perimeter
        );
    }
    if let Some((min, max)) = plan.bounds() {
        println!(
            "Ausdehnung: ({:.2}, {:.2}) bis ({:.2}, {:.2})",
            min.x, min.y, max.x, max.y
        );
    }
    Ok(())
}

fn rooms(plan: &FloorPlan, seed: Vec2) -> anyhow::Result<()> {
    let draft = extract_region(plan, seed)
        .with_context(|| format!("Kein Raum an ({:.2}, {:.2})", seed.x, seed.y))?;
    println!("Fläche:  {:.3}", draft.area);
    println!("Umfang:  {:.3}", draft.perimeter);
    println!("Wände:   {}", draft.walls.len());
    for point in &draft.polygon {
        println!("  ({:.3}, {:.3})", point.x, point.y);
    }
    Ok(())
}
