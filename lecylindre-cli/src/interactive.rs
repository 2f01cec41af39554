use std::io::{self, Write};

use anyhow::{Context, Result};

use lecylindre_core::models::Pocket;
use lecylindre_stats::report::RECENT_SPINS;
use lecylindre_stats::{Report, Session, View};

use crate::display::{
    display_basic_stats, display_dozens, display_history, display_pocket_chart, display_pockets,
    display_recommendation, display_report, display_streaks, display_street_totals,
    display_streets,
};

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Stats,
    Streets,
    Advice,
    History,
    Report,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, PartialEq)]
enum Input {
    Spin(String),
    Command(InteractiveCommand),
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "stats" | "statistiques" | "s" => Some(InteractiveCommand::Stats),
        "transversales" | "streets" | "t" => Some(InteractiveCommand::Streets),
        "conseil" | "advice" | "c" => Some(InteractiveCommand::Advice),
        "historique" | "history" | "hist" | "h" => Some(InteractiveCommand::History),
        "rapport" | "report" | "r" => Some(InteractiveCommand::Report),
        "reinit" | "réinit" | "reset" => Some(InteractiveCommand::Reset),
        "aide" | "help" | "?" => Some(InteractiveCommand::Help),
        "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

/// Les chiffres sont des tirages ; tout le reste est une commande.
fn parse_input(input: &str) -> Option<Input> {
    let trimmed = input.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Some(Input::Spin(trimmed.to_string()));
    }
    parse_command(trimmed).map(Input::Command)
}

fn display_menu(session: &Session, view: View) {
    println!();
    let view_name = if view.is_detailed() { "détaillée" } else { "simplifiée" };
    let double_zero = if session.variant().contains(Pocket::DOUBLE_ZERO) { ", 00" } else { "" };
    println!("── Roulette {} (vue {}) ──", session.variant(), view_name);
    println!("  <numéro>       Enregistrer un tirage (0-36{})", double_zero);
    println!("  conseil        Recommandation actuelle");
    println!("  stats          Répartition, séries, douzaines, numéros");
    println!("  transversales  Analyse des transversales");
    println!("  historique     Derniers tirages");
    println!("  rapport        Rapport complet");
    println!("  reinit         Effacer la session");
    println!("  quitter        Quitter");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if read == 0 {
        anyhow::bail!("Fin de l'entrée");
    }
    Ok(input.trim().to_string())
}

fn detailed_only(view: View) -> bool {
    if !view.is_detailed() {
        println!("Réservé à la vue détaillée (--view detailed).");
    }
    view.is_detailed()
}

fn record(session: &mut Session, label: &str) -> Result<()> {
    let pocket = session.record_label(label)?;
    println!(
        "{} {} enregistré. {} tirages.",
        pocket,
        pocket.color(),
        session.total_spins()
    );
    display_recommendation(&session.recommend());
    Ok(())
}

fn cmd_stats(session: &Session) {
    display_basic_stats(&session.basic_stats());
    display_streaks(&session.streaks());
    display_dozens(&session.dozen_stats());
    let pockets = session.hot_cold();
    display_pockets(&pockets);
    display_pocket_chart(&pockets);
}

fn cmd_streets(session: &Session) {
    match session.analyze_streets() {
        Some(analysis) => {
            display_streets(&analysis);
            if let Some(totals) = session.street_totals() {
                display_street_totals(&totals);
            }
            if let Some(commentary) = session.street_commentary() {
                println!("\n💬 {}", commentary);
            }
        }
        None => println!("Pas d'analyse par transversales sur la roulette {}.", session.variant()),
    }
}

fn cmd_reset(session: &mut Session) -> Result<()> {
    let confirm = prompt("Effacer tous les tirages ? (o/n) : ")?;
    if confirm.to_lowercase() == "o" {
        session.reset();
        println!("Session réinitialisée.");
    } else {
        println!("Réinitialisation annulée.");
    }
    Ok(())
}

pub fn run_interactive(session: &mut Session, view: View) -> Result<()> {
    println!("Bienvenue dans le mode interactif de lecylindre !");
    display_menu(session, view);

    loop {
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        match parse_input(&input) {
            Some(Input::Spin(label)) => {
                if let Err(e) = record(session, &label) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(Input::Command(InteractiveCommand::Quit)) => {
                println!("Au revoir !");
                break;
            }
            Some(Input::Command(InteractiveCommand::Advice)) => {
                display_recommendation(&session.recommend());
            }
            Some(Input::Command(InteractiveCommand::Stats)) => {
                if detailed_only(view) {
                    cmd_stats(session);
                }
            }
            Some(Input::Command(InteractiveCommand::Streets)) => {
                if detailed_only(view) {
                    cmd_streets(session);
                }
            }
            Some(Input::Command(InteractiveCommand::History)) => {
                display_history(&session.recent_spins(RECENT_SPINS));
            }
            Some(Input::Command(InteractiveCommand::Report)) => {
                display_report(&Report::build(session, view));
            }
            Some(Input::Command(InteractiveCommand::Reset)) => {
                if let Err(e) = cmd_reset(session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(Input::Command(InteractiveCommand::Help)) => display_menu(session, view),
            None => {
                println!("Commande inconnue : '{}'. Tapez un numéro ou 'aide'.", input);
            }
        }
    }

    Ok(())
}
