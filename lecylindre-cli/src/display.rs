use comfy_table::{Cell, Color as CellColor, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use crate::import::ReplayResult;
use lecylindre_core::models::{Color, Dozen, Pocket, Street, Variant};
use lecylindre_stats::aggregate::distribution::{BasicStats, DozenStats};
use lecylindre_stats::aggregate::hot_cold::{Heat, PocketStat};
use lecylindre_stats::aggregate::streak::{Streak, StreakState};
use lecylindre_stats::aggregate::streets::{StreetAnalysis, StreetStat, StreetStatus};
use lecylindre_stats::{Confidence, Recommendation, Report};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn cell_color(color: Color) -> CellColor {
    match color {
        Color::Red => CellColor::Red,
        Color::Black => CellColor::White,
        Color::Green => CellColor::Green,
    }
}

fn pocket_cell(pocket: Pocket) -> Cell {
    Cell::new(format!("{:>2}", pocket)).fg(cell_color(pocket.color()))
}

pub fn display_replay_summary(result: &ReplayResult) {
    println!("Lecture terminée :");
    println!("  Valeurs lues      : {}", result.total_values);
    println!("  Enregistrées      : {}", result.recorded);
    if result.rejected > 0 {
        println!("  Rejetées          : {}", result.rejected);
    }
}

pub fn display_recommendation(recommendation: &Recommendation) {
    let color = match recommendation.confidence {
        Confidence::Low => CellColor::DarkGrey,
        Confidence::LowToMedium => CellColor::Yellow,
        Confidence::Medium => CellColor::Cyan,
        Confidence::MediumToHigh | Confidence::High => CellColor::Green,
    };

    let mut table = new_table();
    table.set_header(vec!["Décision", "Confiance", "Raison"]);
    table.add_row(vec![
        Cell::new(recommendation.decision.to_string()),
        Cell::new(recommendation.confidence.to_string()).fg(color),
        Cell::new(recommendation.reason.as_deref().unwrap_or("—")),
    ]);
    println!("{table}");
}

pub fn display_basic_stats(stats: &BasicStats) {
    println!("\n── Répartition ──");
    let mut table = new_table();
    table.set_header(vec!["Rouge", "Noir", "Vert", "Impair", "Pair", "Manque", "Passe"]);
    table.add_row(
        [stats.red, stats.black, stats.green, stats.odd, stats.even, stats.low, stats.high]
            .iter()
            .map(|p| format!("{:.1} %", p))
            .collect::<Vec<_>>(),
    );
    println!("{table}");
}

fn streak_row<T: std::fmt::Display>(label: &str, streak: &Streak<T>) -> Vec<String> {
    let value = streak
        .value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string());
    vec![label.to_string(), value, streak.count.to_string()]
}

pub fn display_streaks(streaks: &StreakState) {
    println!("\n── Séries en cours ──");
    let mut table = new_table();
    table.set_header(vec!["Axe", "Valeur", "Longueur"]);
    table.add_row(streak_row("Couleur", &streaks.color));
    table.add_row(streak_row("Parité", &streaks.parity));
    table.add_row(streak_row("Douzaine", &streaks.dozen));
    println!("{table}");
}

pub fn display_dozens(dozens: &DozenStats) {
    println!("\n── Douzaines ──");
    let mut table = new_table();
    table.set_header(vec!["Douzaine", "Sorties"]);
    for dozen in Dozen::ALL {
        table.add_row(vec![dozen.to_string(), dozens.get(dozen).to_string()]);
    }
    table.add_row(vec!["Zéro".to_string(), dozens.zero.to_string()]);
    println!("{table}");
}

pub fn display_street_totals(totals: &[(Street, u32)]) {
    println!("\n── Sorties par transversale (session) ──");
    let mut table = new_table();
    table.set_header(vec!["Transversale", "Numéros", "Sorties", ""]);
    let max = totals.iter().map(|&(_, c)| c).max().unwrap_or(0).max(1);
    for &(street, count) in totals {
        let [a, b, c] = street.numbers();
        let bar = "█".repeat((count as f64 / max as f64 * 30.0).round() as usize);
        table.add_row(vec![
            Cell::new(street.number()),
            Cell::new(format!("{}-{}-{}", a, b, c)),
            Cell::new(count),
            Cell::new(bar),
        ]);
    }
    println!("{table}");
}

pub fn display_pockets(stats: &[PocketStat]) {
    println!("\n── Sorties par numéro ──");
    let mut table = new_table();
    table.set_header(vec!["Numéro", "Sorties", "Tag", ""]);

    let max = stats.iter().map(|s| s.count).max().unwrap_or(0).max(1);
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    for stat in &sorted {
        let tag_color = match stat.heat {
            Heat::Hot => CellColor::Red,
            Heat::Cold => CellColor::Blue,
            Heat::Normal => CellColor::White,
        };
        let bar = "█".repeat((stat.count as f64 / max as f64 * 30.0).round() as usize);
        table.add_row(vec![
            pocket_cell(stat.pocket),
            Cell::new(stat.count),
            Cell::new(stat.heat.to_string()).fg(tag_color),
            Cell::new(bar),
        ]);
    }
    println!("{table}");
}

pub fn display_pocket_chart(stats: &[PocketStat]) {
    if stats.iter().all(|s| s.count == 0) {
        println!("  (Pas de données à afficher)");
        return;
    }
    println!("\n── Histogramme (ordre du tableau) ──\n");
    let points: Vec<(f32, f32)> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f32, s.count as f32))
        .collect();
    let y_max = stats.iter().map(|s| s.count).max().unwrap_or(0) as f32 + 1.0;
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new_with_y_range(120, 40, 0.0, stats.len() as f32, 0.0, y_max);
    println!("{}", chart.lineplot(&shape));
}

pub fn display_streets(analysis: &StreetAnalysis) {
    println!(
        "\n── Transversales (fenêtres {} / {}) ──",
        analysis.short_window, analysis.long_window
    );
    let mut table = new_table();
    table.set_header(vec![
        "Transversale".to_string(),
        "Numéros".to_string(),
        format!("Vue ({} derniers)", analysis.short_window),
        format!("Sorties ({} derniers)", analysis.long_window),
        "Statut".to_string(),
    ]);

    for stat in &analysis.all {
        let status = analysis.status(stat.street);
        let color = match status {
            StreetStatus::AbsentLong => CellColor::Green,
            StreetStatus::Repeated => CellColor::Red,
            StreetStatus::AbsentShort => CellColor::Yellow,
            StreetStatus::Normal => CellColor::White,
        };
        let [a, b, c] = stat.numbers;
        table.add_row(vec![
            Cell::new(stat.street.number()),
            Cell::new(format!("{}-{}-{}", a, b, c)),
            Cell::new(if stat.appeared_in_short_window { "oui" } else { "non" }),
            Cell::new(stat.appearances_in_long_window),
            Cell::new(status.to_string()).fg(color),
        ]);
    }
    println!("{table}");

    let numbers = |streets: &[StreetStat]| {
        if streets.is_empty() {
            "aucune".to_string()
        } else {
            streets
                .iter()
                .map(|s| s.street.number().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    };
    println!("  Absentes ({} derniers)   : {}", analysis.long_window, numbers(&analysis.absent_from_long));
    println!("  Absentes ({} derniers)   : {}", analysis.short_window, numbers(&analysis.absent_from_short));
    println!("  Sorties 2+ fois          : {}", numbers(&analysis.repeated_in_long));
    println!("  Sorties une seule fois   : {}", numbers(&analysis.once_in_long));
}

pub fn display_history(spins: &[Pocket]) {
    if spins.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["#", "Numéro", "Couleur"]);
    for (i, &pocket) in spins.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            pocket_cell(pocket),
            Cell::new(pocket.color().to_string()).fg(cell_color(pocket.color())),
        ]);
    }
    println!("{table}");
}

pub fn display_pocket_table(variant: Variant) {
    println!("\n── Cases de la roulette {} ──\n", variant);
    let mut table = new_table();
    table.set_header(vec!["Case", "Couleur", "Parité", "Moitié", "Douzaine", "Transversale"]);
    let or_dash = |s: Option<String>| s.unwrap_or_else(|| "—".to_string());

    for pocket in variant.pockets() {
        let street = if variant.has_streets() {
            pocket.street().map(|s: Street| s.number().to_string())
        } else {
            None
        };
        table.add_row(vec![
            pocket_cell(pocket),
            Cell::new(pocket.color().to_string()).fg(cell_color(pocket.color())),
            Cell::new(or_dash(pocket.parity().map(|p| p.to_string()))),
            Cell::new(or_dash(pocket.half().map(|h| h.to_string()))),
            Cell::new(or_dash(pocket.dozen().map(|d| d.to_string()))),
            Cell::new(or_dash(street)),
        ]);
    }
    println!("{table}");
}

pub fn display_report(report: &Report) {
    println!(
        "\n🎯 Roulette {} : {} tirages\n",
        report.variant, report.total_spins
    );
    display_recommendation(&report.recommendation);

    if let Some(stats) = &report.basic_stats {
        display_basic_stats(stats);
    }
    if let Some(streaks) = &report.streaks {
        display_streaks(streaks);
    }
    if let Some(dozens) = &report.dozens {
        display_dozens(dozens);
    }
    if let Some(totals) = &report.street_totals {
        display_street_totals(totals);
    }
    if let Some(pockets) = &report.pockets {
        display_pockets(pockets);
        display_pocket_chart(pockets);
    }
    if let Some(streets) = &report.streets {
        display_streets(streets);
    }
    if let Some(commentary) = &report.commentary {
        println!("\n💬 {}", commentary);
    }
    if let Some(recent) = &report.recent {
        println!("\n── Derniers tirages (le plus récent en premier) ──");
        display_history(recent);
    }
}
